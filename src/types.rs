/// Width in bytes of the fixed-size wire primitives.
pub mod lengths {
    pub const BYTE: usize = 1;
    pub const SHORT: usize = 2;
    pub const TRIAD: usize = 3;
    pub const INT: usize = 4;
    pub const FLOAT: usize = 4;
    pub const LONG: usize = 8;
    pub const DOUBLE: usize = 8;
}

/// Integer block coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockPosition {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPosition {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Address family marker written in front of a socket address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFamily {
    V4 = 4,
    V6 = 6,
}

impl AddressFamily {
    pub fn from_byte(byte: u8) -> Option<AddressFamily> {
        match byte {
            4 => Some(AddressFamily::V4),
            6 => Some(AddressFamily::V6),
            _ => None,
        }
    }
}
