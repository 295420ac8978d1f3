use crate::config::MAX_SUB_CHUNKS;
use crate::error::{CodecError, Result};
use crate::logger::{log, LogSeverity};
use crate::protocol::binary::BinaryData;
use crate::protocol::nbt::{NbtEncoding, Tag};
use crate::types::BlockPosition;

pub const BLOCKS_PER_SUB_CHUNK: usize = 4096;
/// Nibble arrays (meta, sky light, block light) hold two blocks per byte.
pub const NIBBLES_PER_SUB_CHUNK: usize = 2048;
pub const BIOME_COUNT: usize = 256;
pub const SUB_CHUNK_VERSION: u8 = 0;

/// One 16x16x16 slab of a chunk column.
#[derive(Debug, Clone, PartialEq)]
pub struct SubChunk {
    pub ids: Vec<u8>,
    pub data: Vec<u8>,
    /// Either `NIBBLES_PER_SUB_CHUNK` bytes or empty when light is not tracked.
    pub sky_light: Vec<u8>,
    pub block_light: Vec<u8>,
}

impl SubChunk {
    /// Air everywhere, full sky light, no block light.
    pub fn empty() -> SubChunk {
        SubChunk {
            ids: vec![0; BLOCKS_PER_SUB_CHUNK],
            data: vec![0; NIBBLES_PER_SUB_CHUNK],
            sky_light: vec![0xFF; NIBBLES_PER_SUB_CHUNK],
            block_light: vec![0; NIBBLES_PER_SUB_CHUNK],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ids.iter().all(|&id| id == 0)
            && self.sky_light.iter().all(|&light| light == 0xFF)
            && self.block_light.iter().all(|&light| light == 0)
    }

    /// Index into `ids` for local coordinates, in XZY order.
    fn index(x: usize, y: usize, z: usize) -> usize {
        ((x & 0xF) << 8) | ((z & 0xF) << 4) | (y & 0xF)
    }

    pub fn get_block_id(&self, x: usize, y: usize, z: usize) -> u8 {
        self.ids[SubChunk::index(x, y, z)]
    }

    pub fn set_block_id(&mut self, x: usize, y: usize, z: usize, id: u8) {
        self.ids[SubChunk::index(x, y, z)] = id;
    }

    pub fn get_block_data(&self, x: usize, y: usize, z: usize) -> u8 {
        let index = SubChunk::index(x, y, z);
        let byte = self.data[index >> 1];
        if index & 1 == 0 {
            byte & 0x0F
        } else {
            byte >> 4
        }
    }

    pub fn set_block_data(&mut self, x: usize, y: usize, z: usize, meta: u8) {
        let index = SubChunk::index(x, y, z);
        let byte = &mut self.data[index >> 1];
        if index & 1 == 0 {
            *byte = (*byte & 0xF0) | (meta & 0x0F);
        } else {
            *byte = (*byte & 0x0F) | ((meta & 0x0F) << 4);
        }
    }
}

impl Default for SubChunk {
    fn default() -> Self {
        SubChunk::empty()
    }
}

/// A block with extra state. On the wire it is a network NBT compound carrying `id`, `x`, `y`
/// and `z` alongside the rest of `tag`.
#[derive(Debug, Clone, PartialEq)]
pub struct TileEntity {
    /// Only spawnable tiles are sent to clients.
    pub spawnable: bool,
    pub identifier: String,
    pub position: BlockPosition,
    pub tag: Tag,
}

impl TileEntity {
    pub fn new(identifier: &str, position: BlockPosition) -> TileEntity {
        TileEntity {
            spawnable: true,
            identifier: identifier.to_owned(),
            position,
            tag: Tag::compound(),
        }
    }

    pub fn with_tag(mut self, tag: Tag) -> TileEntity {
        self.tag = tag;
        self
    }

    pub fn to_tag(&self) -> Tag {
        let mut tag = match &self.tag {
            Tag::Compound(_) => self.tag.clone(),
            _ => Tag::compound(),
        };
        tag.insert("id", Tag::String(self.identifier.clone()));
        tag.insert("x", Tag::Int(self.position.x));
        tag.insert("y", Tag::Int(self.position.y));
        tag.insert("z", Tag::Int(self.position.z));
        tag
    }

    /// Splits the identity fields back out of a received compound. Decoded tiles are always
    /// spawnable.
    pub fn from_tag(mut tag: Tag) -> TileEntity {
        let identifier = match tag.remove("id") {
            Some(Tag::String(id)) => id,
            _ => String::new(),
        };

        let mut coordinate = |name: &str| match tag.remove(name).and_then(|value| value.as_i32()) {
            Some(value) => value,
            None => {
                log(
                    format!("Tile entity {} has no {} coordinate", identifier, name),
                    LogSeverity::Warning,
                );
                0
            }
        };
        let position = BlockPosition::new(coordinate("x"), coordinate("y"), coordinate("z"));

        TileEntity {
            spawnable: true,
            identifier,
            position,
            tag,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChunkColumn {
    pub x: i32,
    pub z: i32,
    /// Bottom to top. Decoding leaves exactly as many layers as were received.
    pub sub_chunks: Vec<SubChunk>,
    pub biomes: Vec<u8>,
    pub tiles: Vec<TileEntity>,
}

impl ChunkColumn {
    /// An all-air column with a full stack of sub-chunks.
    pub fn new(x: i32, z: i32) -> ChunkColumn {
        ChunkColumn {
            x,
            z,
            sub_chunks: vec![SubChunk::empty(); MAX_SUB_CHUNKS],
            biomes: vec![0; BIOME_COUNT],
            tiles: Vec::new(),
        }
    }

    /// Highest non-empty sub-chunk index, or -1 when every layer is empty.
    pub fn last_non_empty_sub_chunk(&self) -> i32 {
        self.sub_chunks
            .iter()
            .rposition(|sub_chunk| !sub_chunk.is_empty())
            .map_or(-1, |index| index as i32)
    }

    /// Number of layers `write_chunk_data` emits.
    pub fn sub_chunk_count(&self) -> usize {
        (self.last_non_empty_sub_chunk() + 1) as usize
    }

    pub fn get_block_id(&self, x: usize, y: usize, z: usize) -> u8 {
        self.sub_chunks
            .get(y >> 4)
            .map_or(0, |sub_chunk| sub_chunk.get_block_id(x, y, z))
    }

    pub fn get_block_data(&self, x: usize, y: usize, z: usize) -> u8 {
        self.sub_chunks
            .get(y >> 4)
            .map_or(0, |sub_chunk| sub_chunk.get_block_data(x, y, z))
    }

    /// Sets id and meta at column coordinates, growing the layer stack if `y` is above it.
    pub fn set_block(&mut self, x: usize, y: usize, z: usize, id: u8, meta: u8) -> Result<()> {
        let layer = y >> 4;
        if layer >= MAX_SUB_CHUNKS {
            return Err(CodecError::invalid_data(format!(
                "Block y {} is above the chunk column",
                y
            )));
        }
        if self.sub_chunks.len() <= layer {
            self.sub_chunks.resize_with(layer + 1, SubChunk::empty);
        }
        let sub_chunk = &mut self.sub_chunks[layer];
        sub_chunk.set_block_id(x, y, z, id);
        sub_chunk.set_block_data(x, y, z, meta);
        Ok(())
    }

    pub fn add_tile(&mut self, tile: TileEntity) {
        self.tiles.push(tile);
    }
}

fn check_length(what: &str, bytes: &[u8], expected: usize) -> Result<()> {
    if bytes.len() != expected {
        return Err(CodecError::invalid_data(format!(
            "{} has {} bytes, expected {}",
            what,
            bytes.len(),
            expected
        )));
    }
    Ok(())
}

impl BinaryData {
    /// Writes the length-prefixed terrain payload followed by the spawnable tiles. Empty layers
    /// above the last non-empty one are dropped.
    pub fn write_chunk_data(&mut self, chunk: &ChunkColumn) -> Result<()> {
        let count = chunk.sub_chunk_count();
        if count > self.config().max_sub_chunks {
            return Err(CodecError::invalid_data(format!(
                "Chunk {},{} has {} sub-chunks, limit is {}",
                chunk.x,
                chunk.z,
                count,
                self.config().max_sub_chunks
            )));
        }
        check_length("Biome array", &chunk.biomes, BIOME_COUNT)?;

        let mut payload = self.nested();
        for sub_chunk in &chunk.sub_chunks[..count] {
            check_length("Sub-chunk ids", &sub_chunk.ids, BLOCKS_PER_SUB_CHUNK)?;
            check_length("Sub-chunk meta", &sub_chunk.data, NIBBLES_PER_SUB_CHUNK)?;
            payload.write_u8(SUB_CHUNK_VERSION);
            payload.write_bytes_raw(&sub_chunk.ids);
            payload.write_bytes_raw(&sub_chunk.data);
        }
        payload.write_bytes_raw(&chunk.biomes);
        // Border block count
        payload.write_u8(0);

        let mut out = self.nested();
        out.write_nested(&payload);
        for tile in chunk.tiles.iter().filter(|tile| tile.spawnable) {
            out.write_nbt(&tile.to_tag(), NbtEncoding::Network)?;
        }

        if count < chunk.sub_chunks.len() {
            log(
                format!(
                    "Chunk {},{}: sending {} of {} sub-chunks",
                    chunk.x,
                    chunk.z,
                    count,
                    chunk.sub_chunks.len()
                ),
                LogSeverity::Debug,
            );
        }

        self.write_bytes_raw(&out.buffer);
        Ok(())
    }

    /// Reads `num_sub_chunks` layers, the biomes and every tile left in the buffer. `chunk` is
    /// only replaced once the whole record decoded.
    pub fn read_chunk_data(&mut self, chunk: &mut ChunkColumn, num_sub_chunks: usize) -> Result<()> {
        if num_sub_chunks > self.config().max_sub_chunks {
            return Err(CodecError::invalid_data(format!(
                "{} sub-chunks requested, limit is {}",
                num_sub_chunks,
                self.config().max_sub_chunks
            )));
        }

        let mut payload = self.read_nested()?;
        let mut sub_chunks = Vec::with_capacity(num_sub_chunks);
        for _ in 0..num_sub_chunks {
            let version = payload.read_u8()?;
            if version != SUB_CHUNK_VERSION {
                return Err(CodecError::UnsupportedSubChunkVersion(version));
            }
            sub_chunks.push(SubChunk {
                ids: payload.read_bytes(BLOCKS_PER_SUB_CHUNK)?,
                data: payload.read_bytes(NIBBLES_PER_SUB_CHUNK)?,
                sky_light: Vec::new(),
                block_light: Vec::new(),
            });
        }
        let biomes = payload.read_bytes(BIOME_COUNT)?;
        // Border block count
        payload.skip(1)?;

        let mut tiles = Vec::new();
        while !self.feof() {
            tiles.push(TileEntity::from_tag(self.read_nbt(NbtEncoding::Network)?));
        }

        chunk.sub_chunks = sub_chunks;
        chunk.biomes = biomes;
        chunk.tiles = tiles;
        Ok(())
    }
}
