use crate::config::CodecConfig;
use crate::error::{CodecError, Result};
use crate::protocol::nbt::{NbtEncoding, Tag};
use crate::types::{lengths, AddressFamily, BlockPosition, Vec3};
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::io::{self, Read, Write};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};
use uuid::Uuid;

/// Offline message magic, sent in front of every unconnected handshake.
pub const MAGIC: [u8; 16] = [
    0x00, 0xff, 0xff, 0x00, 0xfe, 0xfe, 0xfe, 0xfe, 0xfd, 0xfd, 0xfd, 0xfd, 0x12, 0x34, 0x56, 0x78,
];

/// Address family value for IPv6 sockets as it appears on the wire.
const AF_INET6: u16 = 23;

/// Generates a write/read pair for a fixed-width primitive in the given byte order.
macro_rules! fixed_width {
    ($write:ident, $read:ident, $ty:ty, $order:ident, $bo_write:ident, $bo_read:ident, $len:expr) => {
        pub fn $write(&mut self, value: $ty) {
            let mut bytes = [0u8; $len];
            $order::$bo_write(&mut bytes, value);
            self.buffer.extend_from_slice(&bytes);
        }

        pub fn $read(&mut self) -> Result<$ty> {
            Ok($order::$bo_read(self.take($len)?))
        }
    };
}

/// Byte buffer with a read cursor. Writes append at the end; reads consume from the cursor.
///
/// Every domain codec (items, metadata, skins, chunks) is implemented as methods on this type, so
/// one value carries a whole record from first field to last.
#[derive(Debug, Clone, Default)]
pub struct BinaryData {
    pub buffer: Vec<u8>,
    cursor: usize,
    config: CodecConfig,
}

impl BinaryData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps received bytes for reading. The cursor starts at 0.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            buffer: bytes,
            cursor: 0,
            config: CodecConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CodecConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// An empty buffer sharing this one's configuration, for length-prefixed sub-records.
    pub fn nested(&self) -> BinaryData {
        BinaryData::new().with_config(self.config.clone())
    }

    /// Reads an unsigned varint length and moves that many bytes into a nested buffer.
    pub fn read_nested(&mut self) -> Result<BinaryData> {
        let length = self.read_unsigned_varint()? as usize;
        let bytes = self.read_bytes(length)?;
        Ok(BinaryData::from_bytes(bytes).with_config(self.config.clone()))
    }

    /// Appends a nested buffer's bytes behind an unsigned varint length.
    pub fn write_nested(&mut self, nested: &BinaryData) {
        self.write_byte_array(&nested.buffer);
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.cursor)
    }

    /// True once every byte has been read.
    pub fn feof(&self) -> bool {
        self.remaining() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }

    pub fn peek_byte(&self) -> Option<u8> {
        self.buffer.get(self.cursor).copied()
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        let remaining = self.remaining();
        if needed > remaining {
            return Err(CodecError::EndOfBuffer { needed, remaining });
        }
        Ok(())
    }

    /// Borrows the next `length` bytes and moves the cursor past them.
    fn take(&mut self, length: usize) -> Result<&[u8]> {
        self.ensure(length)?;
        let start = self.cursor;
        self.cursor += length;
        Ok(&self.buffer[start..start + length])
    }

    pub fn skip(&mut self, length: usize) -> Result<()> {
        self.take(length).map(|_| ())
    }

    pub fn read_bytes(&mut self, length: usize) -> Result<Vec<u8>> {
        self.take(length).map(<[u8]>::to_vec)
    }

    /// Fills `out` completely from the cursor.
    pub fn read_into(&mut self, out: &mut [u8]) -> Result<()> {
        let bytes = self.take(out.len())?;
        out.copy_from_slice(bytes);
        Ok(())
    }

    pub fn write_bytes_raw(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(lengths::BYTE)?[0])
    }

    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(value as u8);
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    fixed_width!(write_u16_le, read_u16_le, u16, LittleEndian, write_u16, read_u16, lengths::SHORT);
    fixed_width!(write_i16_le, read_i16_le, i16, LittleEndian, write_i16, read_i16, lengths::SHORT);
    fixed_width!(write_u16_be, read_u16_be, u16, BigEndian, write_u16, read_u16, lengths::SHORT);
    fixed_width!(write_u24_le, read_u24_le, u32, LittleEndian, write_u24, read_u24, lengths::TRIAD);
    fixed_width!(write_i32_le, read_i32_le, i32, LittleEndian, write_i32, read_i32, lengths::INT);
    fixed_width!(write_u32_le, read_u32_le, u32, LittleEndian, write_u32, read_u32, lengths::INT);
    fixed_width!(write_i32_be, read_i32_be, i32, BigEndian, write_i32, read_i32, lengths::INT);
    fixed_width!(write_u32_be, read_u32_be, u32, BigEndian, write_u32, read_u32, lengths::INT);
    fixed_width!(write_i64_le, read_i64_le, i64, LittleEndian, write_i64, read_i64, lengths::LONG);
    fixed_width!(write_i64_be, read_i64_be, i64, BigEndian, write_i64, read_i64, lengths::LONG);
    fixed_width!(write_u64_le, read_u64_le, u64, LittleEndian, write_u64, read_u64, lengths::LONG);
    fixed_width!(write_f32_le, read_f32_le, f32, LittleEndian, write_f32, read_f32, lengths::FLOAT);
    fixed_width!(write_f64_le, read_f64_le, f64, LittleEndian, write_f64, read_f64, lengths::DOUBLE);

    /// Writes an unsigned VarInt: 7 bits per byte, least significant group first, high bit set on
    /// every byte but the last.
    pub fn write_unsigned_varint(&mut self, mut value: u32) {
        while value >= 0x80 {
            self.buffer.push((value as u8 & 0x7F) | 0x80);
            value >>= 7;
        }
        self.buffer.push(value as u8);
    }

    pub fn read_unsigned_varint(&mut self) -> Result<u32> {
        let mut result = 0u32;
        for shift in (0..35).step_by(7) {
            let byte = self.read_u8()?;
            result |= ((byte & 0x7F) as u32) << shift;
            if byte & 0x80 == 0 {
                return Ok(result);
            }
        }
        Err(CodecError::invalid_data("VarInt too big"))
    }

    /// Writes a zigzag-encoded signed VarInt.
    pub fn write_varint(&mut self, value: i32) {
        self.write_unsigned_varint(((value << 1) ^ (value >> 31)) as u32);
    }

    pub fn read_varint(&mut self) -> Result<i32> {
        let raw = self.read_unsigned_varint()?;
        Ok((raw >> 1) as i32 ^ -((raw & 1) as i32))
    }

    pub fn write_unsigned_varlong(&mut self, mut value: u64) {
        while value >= 0x80 {
            self.buffer.push((value as u8 & 0x7F) | 0x80);
            value >>= 7;
        }
        self.buffer.push(value as u8);
    }

    pub fn read_unsigned_varlong(&mut self) -> Result<u64> {
        let mut result = 0u64;
        for shift in (0..70).step_by(7) {
            let byte = self.read_u8()?;
            result |= ((byte & 0x7F) as u64) << shift;
            if byte & 0x80 == 0 {
                return Ok(result);
            }
        }
        Err(CodecError::invalid_data("VarLong too big"))
    }

    /// Writes a zigzag-encoded signed VarLong.
    pub fn write_varlong(&mut self, value: i64) {
        self.write_unsigned_varlong(((value << 1) ^ (value >> 63)) as u64);
    }

    pub fn read_varlong(&mut self) -> Result<i64> {
        let raw = self.read_unsigned_varlong()?;
        Ok((raw >> 1) as i64 ^ -((raw & 1) as i64))
    }

    /// Writes a byte sequence behind an unsigned VarInt length.
    pub fn write_byte_array(&mut self, bytes: &[u8]) {
        self.write_unsigned_varint(bytes.len() as u32);
        self.buffer.extend_from_slice(bytes);
    }

    pub fn read_byte_array(&mut self) -> Result<Vec<u8>> {
        let length = self.read_unsigned_varint()? as usize;
        self.read_bytes(length)
    }

    pub fn write_string(&mut self, value: &str) {
        self.write_byte_array(value.as_bytes());
    }

    pub fn read_string(&mut self) -> Result<String> {
        let bytes = self.read_byte_array()?;
        String::from_utf8(bytes)
            .map_err(|_| CodecError::invalid_data("Failed to convert bytes to UTF-8 string"))
    }

    /// Writes a string behind a little-endian u16 length, as item extra data does.
    pub fn write_short_string(&mut self, value: &str) -> Result<()> {
        let length = u16::try_from(value.len()).map_err(|_| {
            CodecError::invalid_data(format!("String too long for u16 length: {}", value.len()))
        })?;
        self.write_u16_le(length);
        self.buffer.extend_from_slice(value.as_bytes());
        Ok(())
    }

    pub fn read_short_string(&mut self) -> Result<String> {
        let length = self.read_u16_le()? as usize;
        String::from_utf8(self.read_bytes(length)?)
            .map_err(|_| CodecError::invalid_data("Failed to convert bytes to UTF-8 string"))
    }

    pub fn write_magic(&mut self) {
        self.buffer.extend_from_slice(&MAGIC);
    }

    pub fn read_magic(&mut self) -> Result<()> {
        if self.take(MAGIC.len())? != MAGIC {
            return Err(CodecError::invalid_data("Offline message magic mismatch"));
        }
        Ok(())
    }

    /// Skips the two-byte security field of a connection request. Its content is never used.
    pub fn read_security(&mut self) -> Result<()> {
        self.skip(lengths::SHORT)
    }

    /// Writes a UUID as two little-endian longs, most significant half first.
    pub fn write_uuid(&mut self, value: Uuid) {
        let (most, least) = value.as_u64_pair();
        self.write_u64_le(most);
        self.write_u64_le(least);
    }

    pub fn read_uuid(&mut self) -> Result<Uuid> {
        let most = self.read_u64_le()?;
        let least = self.read_u64_le()?;
        Ok(Uuid::from_u64_pair(most, least))
    }

    pub fn write_address(&mut self, address: &SocketAddr) {
        match address {
            SocketAddr::V4(v4) => {
                self.write_u8(AddressFamily::V4 as u8);
                for octet in v4.ip().octets() {
                    self.write_u8(!octet);
                }
                self.write_u16_be(v4.port());
            }
            SocketAddr::V6(v6) => {
                self.write_u8(AddressFamily::V6 as u8);
                self.write_u16_le(AF_INET6);
                self.write_u16_be(v6.port());
                self.write_u32_be(v6.flowinfo());
                self.buffer.extend_from_slice(&v6.ip().octets());
                self.write_u32_be(v6.scope_id());
            }
        }
    }

    pub fn read_address(&mut self) -> Result<SocketAddr> {
        let family = self.read_u8()?;
        match AddressFamily::from_byte(family) {
            Some(AddressFamily::V4) => {
                let mut octets = [0u8; 4];
                self.read_into(&mut octets)?;
                let ip = Ipv4Addr::from(octets.map(|octet| !octet));
                let port = self.read_u16_be()?;
                Ok(SocketAddr::V4(SocketAddrV4::new(ip, port)))
            }
            Some(AddressFamily::V6) => {
                self.skip(lengths::SHORT)?;
                let port = self.read_u16_be()?;
                let flowinfo = self.read_u32_be()?;
                let mut octets = [0u8; 16];
                self.read_into(&mut octets)?;
                let scope_id = self.read_u32_be()?;
                Ok(SocketAddr::V6(SocketAddrV6::new(
                    Ipv6Addr::from(octets),
                    port,
                    flowinfo,
                    scope_id,
                )))
            }
            None => Err(CodecError::invalid_data(format!(
                "Unknown address family: {}",
                family
            ))),
        }
    }

    /// The IP part only, for callers that log peers.
    pub fn read_ip(&mut self) -> Result<IpAddr> {
        self.read_address().map(|address| address.ip())
    }

    pub fn write_vector3(&mut self, vector: &Vec3) {
        self.write_f32_le(vector.x);
        self.write_f32_le(vector.y);
        self.write_f32_le(vector.z);
    }

    pub fn read_vector3(&mut self) -> Result<Vec3> {
        Ok(Vec3 {
            x: self.read_f32_le()?,
            y: self.read_f32_le()?,
            z: self.read_f32_le()?,
        })
    }

    /// Block coordinates: signed x, unsigned y, signed z.
    pub fn write_block_position(&mut self, position: &BlockPosition) {
        self.write_varint(position.x);
        self.write_unsigned_varint(position.y as u32);
        self.write_varint(position.z);
    }

    pub fn read_block_position(&mut self) -> Result<BlockPosition> {
        Ok(BlockPosition {
            x: self.read_varint()?,
            y: self.read_unsigned_varint()? as i32,
            z: self.read_varint()?,
        })
    }

    /// Writes a nameless root tag.
    pub fn write_nbt(&mut self, tag: &Tag, encoding: NbtEncoding) -> Result<()> {
        tag.write(self, "", encoding)?;
        Ok(())
    }

    pub fn read_nbt(&mut self, encoding: NbtEncoding) -> Result<Tag> {
        let result = Tag::read(self, encoding);
        match result {
            Ok((_, tag)) => Ok(tag),
            // Short reads inside the tree carry no byte count
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(CodecError::IoError(e)),
            Err(e) => Err(CodecError::invalid_data(format!("Malformed NBT: {}", e))),
        }
    }
}

impl Read for BinaryData {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let to_read = buf.len().min(self.remaining());
        buf[..to_read].copy_from_slice(&self.buffer[self.cursor..self.cursor + to_read]);
        self.cursor += to_read;
        Ok(to_read)
    }
}

impl Write for BinaryData {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
