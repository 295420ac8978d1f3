use byteorder::{BigEndian, LittleEndian, ReadBytesExt, WriteBytesExt};
use std::collections::HashMap;
use std::io::{self, Read, Write};

/// Nesting limit for compounds and lists read off the wire.
const MAX_DEPTH: usize = 512;

/// Binary flavours of NBT.
///
/// `BigEndian` is the Java/file layout. `LittleEndian` is what Bedrock stores on disk and inside
/// item extra data. `Network` is little-endian with varint string lengths, zigzag varint list and
/// array lengths, and zigzag varint Int/Long payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NbtEncoding {
    BigEndian,
    LittleEndian,
    Network,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(Vec<Tag>),
    Compound(HashMap<String, Tag>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

fn invalid(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

fn read_unsigned_varint<R: Read>(reader: &mut R) -> io::Result<u32> {
    let mut result = 0u32;
    for shift in (0..35).step_by(7) {
        let byte = reader.read_u8()?;
        result |= ((byte & 0x7F) as u32) << shift;
        if byte & 0x80 == 0 {
            return Ok(result);
        }
    }
    Err(invalid("VarInt too big".to_owned()))
}

fn read_unsigned_varlong<R: Read>(reader: &mut R) -> io::Result<u64> {
    let mut result = 0u64;
    for shift in (0..70).step_by(7) {
        let byte = reader.read_u8()?;
        result |= ((byte & 0x7F) as u64) << shift;
        if byte & 0x80 == 0 {
            return Ok(result);
        }
    }
    Err(invalid("VarLong too big".to_owned()))
}

fn write_unsigned_varint<W: Write>(writer: &mut W, mut value: u32) -> io::Result<()> {
    while value >= 0x80 {
        writer.write_u8((value as u8 & 0x7F) | 0x80)?;
        value >>= 7;
    }
    writer.write_u8(value as u8)
}

fn write_unsigned_varlong<W: Write>(writer: &mut W, mut value: u64) -> io::Result<()> {
    while value >= 0x80 {
        writer.write_u8((value as u8 & 0x7F) | 0x80)?;
        value >>= 7;
    }
    writer.write_u8(value as u8)
}

impl NbtEncoding {
    fn read_i16<R: Read>(self, reader: &mut R) -> io::Result<i16> {
        match self {
            NbtEncoding::BigEndian => reader.read_i16::<BigEndian>(),
            _ => reader.read_i16::<LittleEndian>(),
        }
    }

    fn read_i32<R: Read>(self, reader: &mut R) -> io::Result<i32> {
        match self {
            NbtEncoding::BigEndian => reader.read_i32::<BigEndian>(),
            NbtEncoding::LittleEndian => reader.read_i32::<LittleEndian>(),
            NbtEncoding::Network => {
                let raw = read_unsigned_varint(reader)?;
                Ok((raw >> 1) as i32 ^ -((raw & 1) as i32))
            }
        }
    }

    fn read_i64<R: Read>(self, reader: &mut R) -> io::Result<i64> {
        match self {
            NbtEncoding::BigEndian => reader.read_i64::<BigEndian>(),
            NbtEncoding::LittleEndian => reader.read_i64::<LittleEndian>(),
            NbtEncoding::Network => {
                let raw = read_unsigned_varlong(reader)?;
                Ok((raw >> 1) as i64 ^ -((raw & 1) as i64))
            }
        }
    }

    fn read_f32<R: Read>(self, reader: &mut R) -> io::Result<f32> {
        match self {
            NbtEncoding::BigEndian => reader.read_f32::<BigEndian>(),
            _ => reader.read_f32::<LittleEndian>(),
        }
    }

    fn read_f64<R: Read>(self, reader: &mut R) -> io::Result<f64> {
        match self {
            NbtEncoding::BigEndian => reader.read_f64::<BigEndian>(),
            _ => reader.read_f64::<LittleEndian>(),
        }
    }

    /// Length of a list or array payload.
    fn read_len<R: Read>(self, reader: &mut R) -> io::Result<usize> {
        let length = self.read_i32(reader)?;
        if length < 0 {
            return Err(invalid(format!("Negative NBT length: {}", length)));
        }
        Ok(length as usize)
    }

    fn read_string<R: Read>(self, reader: &mut R) -> io::Result<String> {
        let length = match self {
            NbtEncoding::BigEndian => reader.read_u16::<BigEndian>()? as usize,
            NbtEncoding::LittleEndian => reader.read_u16::<LittleEndian>()? as usize,
            NbtEncoding::Network => read_unsigned_varint(reader)? as usize,
        };
        let mut bytes = vec![0u8; length];
        reader.read_exact(&mut bytes)?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn write_i16<W: Write>(self, writer: &mut W, value: i16) -> io::Result<()> {
        match self {
            NbtEncoding::BigEndian => writer.write_i16::<BigEndian>(value),
            _ => writer.write_i16::<LittleEndian>(value),
        }
    }

    fn write_i32<W: Write>(self, writer: &mut W, value: i32) -> io::Result<()> {
        match self {
            NbtEncoding::BigEndian => writer.write_i32::<BigEndian>(value),
            NbtEncoding::LittleEndian => writer.write_i32::<LittleEndian>(value),
            NbtEncoding::Network => {
                write_unsigned_varint(writer, ((value << 1) ^ (value >> 31)) as u32)
            }
        }
    }

    fn write_i64<W: Write>(self, writer: &mut W, value: i64) -> io::Result<()> {
        match self {
            NbtEncoding::BigEndian => writer.write_i64::<BigEndian>(value),
            NbtEncoding::LittleEndian => writer.write_i64::<LittleEndian>(value),
            NbtEncoding::Network => {
                write_unsigned_varlong(writer, ((value << 1) ^ (value >> 63)) as u64)
            }
        }
    }

    fn write_f32<W: Write>(self, writer: &mut W, value: f32) -> io::Result<()> {
        match self {
            NbtEncoding::BigEndian => writer.write_f32::<BigEndian>(value),
            _ => writer.write_f32::<LittleEndian>(value),
        }
    }

    fn write_f64<W: Write>(self, writer: &mut W, value: f64) -> io::Result<()> {
        match self {
            NbtEncoding::BigEndian => writer.write_f64::<BigEndian>(value),
            _ => writer.write_f64::<LittleEndian>(value),
        }
    }

    fn write_len<W: Write>(self, writer: &mut W, length: usize) -> io::Result<()> {
        let length = i32::try_from(length)
            .map_err(|_| invalid(format!("NBT payload too long: {}", length)))?;
        self.write_i32(writer, length)
    }

    fn write_string<W: Write>(self, writer: &mut W, value: &str) -> io::Result<()> {
        let bytes = value.as_bytes();
        match self {
            NbtEncoding::Network => write_unsigned_varint(writer, bytes.len() as u32)?,
            _ => {
                let length = u16::try_from(bytes.len())
                    .map_err(|_| invalid(format!("NBT string too long: {}", bytes.len())))?;
                match self {
                    NbtEncoding::BigEndian => writer.write_u16::<BigEndian>(length)?,
                    _ => writer.write_u16::<LittleEndian>(length)?,
                }
            }
        }
        writer.write_all(bytes)
    }
}

impl Tag {
    /// An empty compound.
    pub fn compound() -> Tag {
        Tag::Compound(HashMap::new())
    }

    pub fn get_type_id(&self) -> u8 {
        match self {
            Tag::End => 0,
            Tag::Byte(_) => 1,
            Tag::Short(_) => 2,
            Tag::Int(_) => 3,
            Tag::Long(_) => 4,
            Tag::Float(_) => 5,
            Tag::Double(_) => 6,
            Tag::ByteArray(_) => 7,
            Tag::String(_) => 8,
            Tag::List(_) => 9,
            Tag::Compound(_) => 10,
            Tag::IntArray(_) => 11,
            Tag::LongArray(_) => 12,
        }
    }

    /// Reads one named tag.
    pub fn read<R: Read>(reader: &mut R, encoding: NbtEncoding) -> io::Result<(String, Tag)> {
        Tag::read_named(reader, encoding, 0)
    }

    fn read_named<R: Read>(
        reader: &mut R,
        encoding: NbtEncoding,
        depth: usize,
    ) -> io::Result<(String, Tag)> {
        let type_id = reader.read_u8()?;
        if type_id == 0 {
            return Ok((String::new(), Tag::End));
        }

        let name = encoding.read_string(reader)?;
        let tag = Tag::read_payload(reader, type_id, encoding, depth)?;
        Ok((name, tag))
    }

    fn read_payload<R: Read>(
        reader: &mut R,
        type_id: u8,
        encoding: NbtEncoding,
        depth: usize,
    ) -> io::Result<Tag> {
        if depth > MAX_DEPTH {
            return Err(invalid(format!("NBT nested deeper than {}", MAX_DEPTH)));
        }

        match type_id {
            0 => Ok(Tag::End),
            1 => Ok(Tag::Byte(reader.read_i8()?)),
            2 => Ok(Tag::Short(encoding.read_i16(reader)?)),
            3 => Ok(Tag::Int(encoding.read_i32(reader)?)),
            4 => Ok(Tag::Long(encoding.read_i64(reader)?)),
            5 => Ok(Tag::Float(encoding.read_f32(reader)?)),
            6 => Ok(Tag::Double(encoding.read_f64(reader)?)),
            7 => {
                let length = encoding.read_len(reader)?;
                let mut bytes = vec![0u8; length];
                reader.read_exact(&mut bytes)?;
                Ok(Tag::ByteArray(bytes.into_iter().map(|b| b as i8).collect()))
            }
            8 => Ok(Tag::String(encoding.read_string(reader)?)),
            9 => {
                let list_type = reader.read_u8()?;
                let length = encoding.read_len(reader)?;
                let mut list = Vec::with_capacity(length.min(1024));
                for _ in 0..length {
                    list.push(Tag::read_payload(reader, list_type, encoding, depth + 1)?);
                }
                Ok(Tag::List(list))
            }
            10 => {
                let mut compound = HashMap::new();
                loop {
                    let (name, tag) = Tag::read_named(reader, encoding, depth + 1)?;
                    if let Tag::End = tag {
                        break;
                    }
                    compound.insert(name, tag);
                }
                Ok(Tag::Compound(compound))
            }
            11 => {
                let length = encoding.read_len(reader)?;
                let mut ints = Vec::with_capacity(length.min(1024));
                for _ in 0..length {
                    ints.push(encoding.read_i32(reader)?);
                }
                Ok(Tag::IntArray(ints))
            }
            12 => {
                let length = encoding.read_len(reader)?;
                let mut longs = Vec::with_capacity(length.min(1024));
                for _ in 0..length {
                    longs.push(encoding.read_i64(reader)?);
                }
                Ok(Tag::LongArray(longs))
            }
            _ => Err(invalid(format!("Invalid tag type: {}", type_id))),
        }
    }

    /// Writes this tag under `name`.
    pub fn write<W: Write>(&self, writer: &mut W, name: &str, encoding: NbtEncoding) -> io::Result<()> {
        writer.write_u8(self.get_type_id())?;

        if !matches!(self, Tag::End) {
            encoding.write_string(writer, name)?;
        }

        self.write_payload(writer, encoding)
    }

    fn write_payload<W: Write>(&self, writer: &mut W, encoding: NbtEncoding) -> io::Result<()> {
        match self {
            Tag::End => Ok(()),
            Tag::Byte(v) => writer.write_i8(*v),
            Tag::Short(v) => encoding.write_i16(writer, *v),
            Tag::Int(v) => encoding.write_i32(writer, *v),
            Tag::Long(v) => encoding.write_i64(writer, *v),
            Tag::Float(v) => encoding.write_f32(writer, *v),
            Tag::Double(v) => encoding.write_f64(writer, *v),
            Tag::ByteArray(v) => {
                encoding.write_len(writer, v.len())?;
                let bytes: Vec<u8> = v.iter().map(|&b| b as u8).collect();
                writer.write_all(&bytes)
            }
            Tag::String(v) => encoding.write_string(writer, v),
            Tag::List(v) => {
                match v.first() {
                    // TAG_End for empty lists
                    None => writer.write_u8(0)?,
                    Some(first) => {
                        let type_id = first.get_type_id();
                        if v.iter().any(|tag| tag.get_type_id() != type_id) {
                            return Err(invalid("NBT list mixes element types".to_owned()));
                        }
                        writer.write_u8(type_id)?;
                    }
                }
                encoding.write_len(writer, v.len())?;
                for tag in v {
                    tag.write_payload(writer, encoding)?;
                }
                Ok(())
            }
            Tag::Compound(v) => {
                // Sorted so equal trees always serialize to equal bytes
                let mut names: Vec<&String> = v.keys().collect();
                names.sort();
                for name in names {
                    v[name].write(writer, name, encoding)?;
                }
                Tag::End.write(writer, "", encoding)
            }
            Tag::IntArray(v) => {
                encoding.write_len(writer, v.len())?;
                for &i in v {
                    encoding.write_i32(writer, i)?;
                }
                Ok(())
            }
            Tag::LongArray(v) => {
                encoding.write_len(writer, v.len())?;
                for &l in v {
                    encoding.write_i64(writer, l)?;
                }
                Ok(())
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.as_compound().and_then(|map| map.get(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Sets a field on a compound, returning the previous value. Does nothing on other tags.
    pub fn insert(&mut self, name: impl Into<String>, tag: Tag) -> Option<Tag> {
        self.as_compound_mut()
            .and_then(|map| map.insert(name.into(), tag))
    }

    pub fn remove(&mut self, name: &str) -> Option<Tag> {
        self.as_compound_mut().and_then(|map| map.remove(name))
    }

    /// Moves field `from` to `to`, replacing whatever `to` held. Returns false if `from` is absent.
    pub fn rename(&mut self, from: &str, to: &str) -> bool {
        match self.remove(from) {
            Some(tag) => {
                self.insert(to, tag);
                true
            }
            None => false,
        }
    }

    /// Deep-merges `other` into this compound. Nested compounds merge, anything else in `other`
    /// overwrites.
    pub fn merge(&mut self, other: &Tag) {
        let (Some(target), Some(source)) = (self.as_compound_mut(), other.as_compound()) else {
            return;
        };
        for (name, tag) in source {
            if let (Some(existing), Tag::Compound(_)) = (target.get_mut(name), tag) {
                if matches!(existing, Tag::Compound(_)) {
                    existing.merge(tag);
                    continue;
                }
            }
            target.insert(name.clone(), tag.clone());
        }
    }

    pub fn as_compound(&self) -> Option<&HashMap<String, Tag>> {
        match self {
            Tag::Compound(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_compound_mut(&mut self) -> Option<&mut HashMap<String, Tag>> {
        match self {
            Tag::Compound(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&Vec<Tag>> {
        match self {
            Tag::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&String> {
        match self {
            Tag::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Tag::Long(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Tag::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_i16(&self) -> Option<i16> {
        match self {
            Tag::Short(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_i8(&self) -> Option<i8> {
        match self {
            Tag::Byte(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Tag::Float(n) => Some(*n),
            _ => None,
        }
    }
}
