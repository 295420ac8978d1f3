use bedrock_codec::protocol::nbt::Tag;
use bedrock_codec::{BinaryData, ChunkColumn, Item};

pub fn durable_item(identifier: &str, damage: i32) -> Item {
    Item::new(identifier, damage, 1)
        .unwrap()
        .with_durability(true)
}

pub fn compound(fields: &[(&str, Tag)]) -> Tag {
    let mut tag = Tag::compound();
    for (name, value) in fields {
        tag.insert(*name, value.clone());
    }
    tag
}

/// A column where only `layer` holds blocks.
pub fn chunk_with_layer(layer: usize) -> ChunkColumn {
    let mut chunk = ChunkColumn::new(0, 0);
    chunk.set_block(8, layer * 16 + 8, 8, 1, 0).unwrap();
    chunk
}

/// Reads the length-prefixed terrain payload and counts the sub-chunk layers in it.
pub fn count_written_layers(buffer: &mut BinaryData) -> usize {
    let payload = buffer.read_byte_array().unwrap();
    (payload.len() - 256 - 1) / (1 + 4096 + 2048)
}
