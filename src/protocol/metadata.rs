use crate::error::{CodecError, Result};
use crate::protocol::binary::BinaryData;
use crate::protocol::item::Item;
use crate::types::{BlockPosition, Vec3};

/// Wire ids of the entity metadata value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataType {
    Byte = 0,
    Short = 1,
    Int = 2,
    Float = 3,
    String = 4,
    Item = 5,
    Position = 6,
    Long = 7,
    Vector = 8,
}

impl MetadataType {
    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn from_id(id: u32) -> Option<MetadataType> {
        match id {
            0 => Some(MetadataType::Byte),
            1 => Some(MetadataType::Short),
            2 => Some(MetadataType::Int),
            3 => Some(MetadataType::Float),
            4 => Some(MetadataType::String),
            5 => Some(MetadataType::Item),
            6 => Some(MetadataType::Position),
            7 => Some(MetadataType::Long),
            8 => Some(MetadataType::Vector),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Byte(u8),
    Short(i16),
    Int(i32),
    Float(f32),
    String(String),
    Item(Item),
    Position(BlockPosition),
    Long(i64),
    Vector(Vec3),
}

impl MetadataValue {
    pub fn get_type(&self) -> MetadataType {
        match self {
            MetadataValue::Byte(_) => MetadataType::Byte,
            MetadataValue::Short(_) => MetadataType::Short,
            MetadataValue::Int(_) => MetadataType::Int,
            MetadataValue::Float(_) => MetadataType::Float,
            MetadataValue::String(_) => MetadataType::String,
            MetadataValue::Item(_) => MetadataType::Item,
            MetadataValue::Position(_) => MetadataType::Position,
            MetadataValue::Long(_) => MetadataType::Long,
            MetadataValue::Vector(_) => MetadataType::Vector,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetadataEntry {
    pub flag: u32,
    pub value: MetadataValue,
}

/// Entity metadata in wire order. Flags are not de-duplicated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetadataStore {
    entries: Vec<MetadataEntry>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, flag: u32, value: MetadataValue) {
        self.entries.push(MetadataEntry { flag, value });
    }

    /// First entry carrying `flag`.
    pub fn get(&self, flag: u32) -> Option<&MetadataValue> {
        self.entries
            .iter()
            .find(|entry| entry.flag == flag)
            .map(|entry| &entry.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetadataEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl BinaryData {
    /// Writes the store. On an unsupported value type nothing is appended.
    pub fn write_metadata(&mut self, store: &MetadataStore) -> Result<()> {
        let mut scratch = self.nested();
        scratch.write_unsigned_varint(store.len() as u32);
        for entry in store.iter() {
            let kind = entry.value.get_type();
            scratch.write_unsigned_varint(entry.flag);
            scratch.write_unsigned_varint(kind.id());
            match &entry.value {
                MetadataValue::Byte(value) => scratch.write_u8(*value),
                MetadataValue::Short(value) => scratch.write_i16_le(*value),
                MetadataValue::Float(value) => scratch.write_f32_le(*value),
                MetadataValue::String(value) => scratch.write_string(value),
                MetadataValue::Long(value) => scratch.write_varlong(*value),
                _ => return Err(CodecError::UnsupportedMetadataType(kind.id())),
            }
        }
        self.write_bytes_raw(&scratch.buffer);
        Ok(())
    }

    pub fn read_metadata(&mut self) -> Result<MetadataStore> {
        let count = self.read_unsigned_varint()?;
        let mut store = MetadataStore::new();
        for _ in 0..count {
            let flag = self.read_unsigned_varint()?;
            let type_id = self.read_unsigned_varint()?;
            let value = match MetadataType::from_id(type_id) {
                Some(MetadataType::Byte) => MetadataValue::Byte(self.read_u8()?),
                Some(MetadataType::Short) => MetadataValue::Short(self.read_i16_le()?),
                Some(MetadataType::Float) => MetadataValue::Float(self.read_f32_le()?),
                Some(MetadataType::String) => MetadataValue::String(self.read_string()?),
                Some(MetadataType::Long) => MetadataValue::Long(self.read_varlong()?),
                _ => return Err(CodecError::UnsupportedMetadataType(type_id)),
            };
            store.add(flag, value);
        }
        Ok(store)
    }
}
