use crate::error::{CodecError, Result};
use crate::protocol::binary::BinaryData;
use crate::protocol::nbt::{NbtEncoding, Tag};
use crate::runtime_id::{block_runtimes, item_runtimes};

pub const AIR: &str = "minecraft:air";
pub const SHIELD: &str = "minecraft:shield";
pub const AIR_RUNTIME_ID: i32 = 0;

/// NBT field that mirrors the meta of durable items.
pub const DAMAGE_TAG: &str = "Damage";
/// Where a caller-supplied `Damage` field is moved before the protocol one is inserted.
pub const DAMAGE_COLLISION_TAG: &str = "___Damage_ProtocolCollisionResolution___";

const NBT_MARKER: u16 = 0xFFFF;
const NBT_VERSION: u8 = 1;

/// An inventory item.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub identifier: String,
    pub runtime_id: i32,
    pub meta: i32,
    pub count: u8,
    /// Durable items also carry their meta as a `Damage` NBT field on the wire.
    pub durable: bool,
    pub nbt: Option<Tag>,
}

impl Item {
    /// Builds an item, resolving its runtime id from the item table.
    pub fn new(identifier: &str, meta: i32, count: u8) -> Result<Item> {
        Ok(Item {
            identifier: identifier.to_owned(),
            runtime_id: item_runtimes().get_rid(identifier)?,
            meta,
            count,
            durable: false,
            nbt: None,
        })
    }

    pub fn air() -> Item {
        Item {
            identifier: AIR.to_owned(),
            runtime_id: AIR_RUNTIME_ID,
            meta: 0,
            count: 1,
            durable: false,
            nbt: None,
        }
    }

    pub fn with_durability(mut self, durable: bool) -> Item {
        self.durable = durable;
        self
    }

    pub fn with_nbt(mut self, nbt: Tag) -> Item {
        self.nbt = Some(nbt);
        self
    }

    pub fn is_air(&self) -> bool {
        self.identifier == AIR
    }

    pub fn is_shield(&self) -> bool {
        self.identifier == SHIELD
    }

    /// Runtime id that goes on the wire, resolved from `identifier`. Air is always
    /// `AIR_RUNTIME_ID`, which is what readers test for.
    pub fn wire_runtime_id(&self) -> Result<i32> {
        if self.is_air() {
            return Ok(AIR_RUNTIME_ID);
        }
        item_runtimes().get_rid(&self.identifier)
    }

    /// The tree that goes on the wire: the item's own NBT plus the `Damage` mirror for durable
    /// items. An existing `Damage` field is parked under `DAMAGE_COLLISION_TAG`. A root that is
    /// not a compound cannot hold the mirror and is replaced by one.
    pub fn wire_nbt(&self) -> Option<Tag> {
        let mut nbt = self.nbt.clone();
        if self.durable && self.meta > 0 {
            if !matches!(nbt, Some(Tag::Compound(_))) {
                nbt = Some(Tag::compound());
            }
            if let Some(tag) = nbt.as_mut() {
                tag.rename(DAMAGE_TAG, DAMAGE_COLLISION_TAG);
                tag.insert(DAMAGE_TAG, Tag::Int(self.meta));
            }
        }
        nbt
    }

    /// Builds a decoded item, undoing the `Damage` mirror when it is the only source of it.
    fn from_wire(identifier: String, runtime_id: i32, meta: i32, count: u8, nbt: Option<Tag>) -> Item {
        let (durable, nbt) = match nbt {
            None => (false, None),
            Some(tag) if tag.contains(DAMAGE_COLLISION_TAG) => (tag.contains(DAMAGE_TAG), Some(tag)),
            Some(mut tag) => match tag.get(DAMAGE_TAG).and_then(Tag::as_i32) {
                Some(damage) if damage == meta => {
                    tag.remove(DAMAGE_TAG);
                    let emptied = tag.as_compound().map_or(false, |map| map.is_empty());
                    (true, if emptied { None } else { Some(tag) })
                }
                _ => (false, Some(tag)),
            },
        };

        Item {
            identifier,
            runtime_id,
            meta,
            count,
            durable,
            nbt,
        }
    }
}

impl Default for Item {
    fn default() -> Self {
        Item::air()
    }
}

/// Item layout of newer protocol versions: adds a stack id and block runtime id, and moves the
/// NBT into a length-prefixed extra-data section.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStack {
    pub item: Item,
    /// Only on the wire when `CodecConfig::has_stack_ids` is set.
    pub stack_id: Option<i32>,
    pub block_runtime_id: i32,
}

impl ItemStack {
    pub fn new(item: Item) -> ItemStack {
        ItemStack {
            item,
            stack_id: None,
            block_runtime_id: 0,
        }
    }

    pub fn air() -> ItemStack {
        ItemStack::new(Item::air())
    }

    pub fn with_stack_id(mut self, stack_id: i32) -> ItemStack {
        self.stack_id = Some(stack_id);
        self
    }

    pub fn with_block_runtime_id(mut self, block_runtime_id: i32) -> ItemStack {
        self.block_runtime_id = block_runtime_id;
        self
    }

    /// Identifier of the block this item places, if any.
    pub fn block_identifier(&self) -> Result<Option<&'static str>> {
        if self.block_runtime_id == 0 {
            return Ok(None);
        }
        block_runtimes().get_nid(self.block_runtime_id).map(Some)
    }
}

impl BinaryData {
    fn write_item_nbt(&mut self, nbt: Option<&Tag>, encoding: NbtEncoding) -> Result<()> {
        match nbt {
            Some(tag) => {
                self.write_u16_le(NBT_MARKER);
                self.write_u8(NBT_VERSION);
                self.write_nbt(tag, encoding)
            }
            None => {
                self.write_u16_le(0);
                Ok(())
            }
        }
    }

    fn read_item_nbt(&mut self, encoding: NbtEncoding) -> Result<Option<Tag>> {
        match self.read_u16_le()? {
            0 => Ok(None),
            NBT_MARKER => {
                let version = self.read_u8()?;
                if version != NBT_VERSION {
                    return Err(CodecError::UnsupportedNbtVersion(version));
                }
                self.read_nbt(encoding).map(Some)
            }
            // Older peers send the byte length of a little-endian tree instead of the marker
            length => {
                let bytes = self.read_bytes(length as usize)?;
                BinaryData::from_bytes(bytes)
                    .read_nbt(NbtEncoding::LittleEndian)
                    .map(Some)
            }
        }
    }

    /// Writes an item in the inline layout used by inventory and container packets.
    pub fn write_container_item(&mut self, item: &Item) -> Result<()> {
        let mut out = self.nested();
        out.write_varint(item.wire_runtime_id()?);
        if item.is_air() {
            self.write_bytes_raw(&out.buffer);
            return Ok(());
        }

        out.write_varint(((item.meta & 0x7FFF) << 8) | item.count as i32);
        out.write_item_nbt(item.wire_nbt().as_ref(), NbtEncoding::Network)?;

        // CanPlaceOn, CanDestroy
        out.write_varint(0);
        out.write_varint(0);

        if item.is_shield() {
            // Blocking tick
            out.write_i64_le(0);
        }

        self.write_bytes_raw(&out.buffer);
        Ok(())
    }

    pub fn read_container_item(&mut self) -> Result<Item> {
        let runtime_id = self.read_varint()?;
        if runtime_id == AIR_RUNTIME_ID {
            return Ok(Item::air());
        }
        let identifier = item_runtimes().get_nid(runtime_id)?.to_owned();

        let aux = self.read_varint()?;
        let meta = aux >> 8;
        let count = (aux & 0xFF) as u8;

        let nbt = self.read_item_nbt(NbtEncoding::Network)?;

        // CanPlaceOn, CanDestroy
        for _ in 0..2 {
            let entries = self.read_varint()?;
            if entries < 0 {
                return Err(CodecError::invalid_data(format!(
                    "Negative block list length: {}",
                    entries
                )));
            }
            for _ in 0..entries {
                self.read_string()?;
            }
        }

        if identifier == SHIELD {
            // Blocking tick
            self.read_i64_le()?;
        }

        Ok(Item::from_wire(identifier, runtime_id, meta, count, nbt))
    }

    /// Writes an item stack. The stack id is only written when the configuration asks for it.
    pub fn write_item_stack(&mut self, stack: &ItemStack) -> Result<()> {
        let item = &stack.item;
        let mut out = self.nested();
        out.write_varint(item.wire_runtime_id()?);
        if item.is_air() {
            self.write_bytes_raw(&out.buffer);
            return Ok(());
        }

        out.write_u16_le(item.count as u16);
        out.write_unsigned_varint(item.meta as u32);

        if self.config().has_stack_ids {
            out.write_bool(stack.stack_id.is_some());
            if let Some(stack_id) = stack.stack_id {
                out.write_varint(stack_id);
            }
        }

        out.write_varint(stack.block_runtime_id);

        let mut extra = self.nested();
        extra.write_item_nbt(item.wire_nbt().as_ref(), NbtEncoding::LittleEndian)?;

        // CanPlaceOn, CanDestroy
        extra.write_i32_le(0);
        extra.write_i32_le(0);

        if item.is_shield() {
            // Blocking tick
            extra.write_i64_le(0);
        }

        out.write_nested(&extra);
        self.write_bytes_raw(&out.buffer);
        Ok(())
    }

    pub fn read_item_stack(&mut self) -> Result<ItemStack> {
        let runtime_id = self.read_varint()?;
        if runtime_id == AIR_RUNTIME_ID {
            return Ok(ItemStack::air());
        }
        let identifier = item_runtimes().get_nid(runtime_id)?.to_owned();

        let count = self.read_u16_le()?;
        let count = u8::try_from(count)
            .map_err(|_| CodecError::invalid_data(format!("Stack count too large: {}", count)))?;
        let meta = self.read_unsigned_varint()? as i32;

        let stack_id = if self.config().has_stack_ids && self.read_bool()? {
            Some(self.read_varint()?)
        } else {
            None
        };

        let block_runtime_id = self.read_varint()?;

        let mut extra = self.read_nested()?;
        let nbt = extra.read_item_nbt(NbtEncoding::LittleEndian)?;

        // CanPlaceOn, CanDestroy
        for _ in 0..2 {
            let entries = extra.read_i32_le()?;
            if entries < 0 {
                return Err(CodecError::invalid_data(format!(
                    "Negative block list length: {}",
                    entries
                )));
            }
            for _ in 0..entries {
                extra.read_short_string()?;
            }
        }

        if identifier == SHIELD {
            // Blocking tick
            extra.read_i64_le()?;
        }

        Ok(ItemStack {
            item: Item::from_wire(identifier, runtime_id, meta, count, nbt),
            stack_id,
            block_runtime_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CodecConfig;
    use assert_matches::assert_matches;

    fn enchanted_sword() -> Item {
        let mut ench = Tag::compound();
        ench.insert("id", Tag::Short(9));
        ench.insert("lvl", Tag::Short(3));
        let mut nbt = Tag::compound();
        nbt.insert("ench", Tag::List(vec![ench]));
        Item::new("minecraft:diamond_sword", 0, 1).unwrap().with_nbt(nbt)
    }

    #[test]
    fn test_container_item_bytes() {
        let item = Item::new("minecraft:stone", 0, 64).unwrap();
        let mut buffer = BinaryData::new();
        buffer.write_container_item(&item).unwrap();
        assert_eq!(buffer.buffer, vec![0x02, 0x80, 0x01, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_container_item_round_trip() {
        for item in [
            Item::new("minecraft:stone", 3, 64).unwrap(),
            Item::new("minecraft:apple", 0, 255).unwrap(),
            enchanted_sword(),
            Item::new("minecraft:diamond_sword", 12, 1)
                .unwrap()
                .with_durability(true),
            Item::new("minecraft:shield", 0, 1).unwrap(),
        ] {
            let mut buffer = BinaryData::new();
            buffer.write_container_item(&item).unwrap();
            let decoded = buffer.read_container_item().unwrap();
            assert_eq!(decoded, item);
            assert!(buffer.feof());
        }
    }

    #[test]
    fn test_meta_is_clamped_to_fifteen_bits() {
        let item = Item::new("minecraft:stone", 0x18001, 2).unwrap();
        let mut buffer = BinaryData::new();
        buffer.write_container_item(&item).unwrap();
        let decoded = buffer.read_container_item().unwrap();
        assert_eq!(decoded.meta, 0x0001);
        assert_eq!(decoded.count, 2);
    }

    #[test]
    fn test_durable_item_writes_damage_tag() {
        let item = Item::new("minecraft:iron_sword", 5, 1)
            .unwrap()
            .with_durability(true);
        let wire = item.wire_nbt().unwrap();
        assert_eq!(wire.get(DAMAGE_TAG), Some(&Tag::Int(5)));

        let undamaged = Item::new("minecraft:iron_sword", 0, 1)
            .unwrap()
            .with_durability(true);
        assert_eq!(undamaged.wire_nbt(), None);
    }

    #[test]
    fn test_damage_collision_rule() {
        let mut nbt = Tag::compound();
        nbt.insert(DAMAGE_TAG, Tag::Int(99));
        let item = Item::new("minecraft:diamond_sword", 5, 1)
            .unwrap()
            .with_durability(true)
            .with_nbt(nbt.clone());

        let mut buffer = BinaryData::new();
        buffer.write_container_item(&item).unwrap();
        let decoded = buffer.read_container_item().unwrap();

        let tree = decoded.nbt.unwrap();
        assert_eq!(tree.get(DAMAGE_TAG), Some(&Tag::Int(5)));
        assert_eq!(tree.get(DAMAGE_COLLISION_TAG), Some(&Tag::Int(99)));
        assert!(decoded.durable);
        // The caller's tree is untouched
        assert_eq!(item.nbt, Some(nbt));
    }

    #[test]
    fn test_air_short_circuit() {
        let mut buffer = BinaryData::new();
        buffer.write_container_item(&Item::air()).unwrap();
        assert_eq!(buffer.buffer, vec![0x00]);

        let mut buffer = BinaryData::from_bytes(vec![0x00, 0x2A]);
        let item = buffer.read_container_item().unwrap();
        assert!(item.is_air());
        assert_eq!(item.count, 1);
        assert_eq!(item.meta, 0);
        assert_eq!(buffer.remaining(), 1);
    }

    #[test]
    fn test_runtime_id_follows_identifier() {
        // Air identifier with a stale runtime id still writes the air id
        let mut item = Item::new("minecraft:stone", 0, 5).unwrap();
        item.identifier = AIR.to_owned();
        let mut buffer = BinaryData::new();
        buffer.write_container_item(&item).unwrap();
        buffer.write_u8(0x42);
        assert_eq!(buffer.buffer, vec![0x00, 0x42]);
        assert!(buffer.read_container_item().unwrap().is_air());
        assert_eq!(buffer.read_u8().unwrap(), 0x42);

        // A zero runtime id on a real item is resolved from the identifier
        let mut item = Item::new("minecraft:stone", 0, 5).unwrap();
        item.runtime_id = AIR_RUNTIME_ID;
        let mut buffer = BinaryData::new();
        buffer.write_item_stack(&ItemStack::new(item)).unwrap();
        buffer.write_u8(0x42);
        let decoded = buffer.read_item_stack().unwrap();
        assert_eq!(decoded.item.identifier, "minecraft:stone");
        assert_eq!(decoded.item.runtime_id, 1);
        assert_eq!(decoded.item.count, 5);
        assert_eq!(buffer.read_u8().unwrap(), 0x42);
        assert!(buffer.feof());
    }

    #[test]
    fn test_unknown_identifier_on_write() {
        let mut item = Item::new("minecraft:stone", 0, 1).unwrap();
        item.identifier = "minecraft:not_an_item".to_owned();
        let mut buffer = BinaryData::new();
        assert_matches!(
            buffer.write_container_item(&item),
            Err(CodecError::UnknownIdentifier(_))
        );
        assert!(buffer.buffer.is_empty());
    }

    #[test]
    fn test_non_compound_nbt_on_durable_item() {
        let item = Item::new("minecraft:iron_sword", 7, 1)
            .unwrap()
            .with_durability(true)
            .with_nbt(Tag::Int(3));
        let wire = item.wire_nbt().unwrap();
        assert_eq!(wire.get(DAMAGE_TAG), Some(&Tag::Int(7)));

        let mut buffer = BinaryData::new();
        buffer.write_container_item(&item).unwrap();
        let decoded = buffer.read_container_item().unwrap();
        assert!(decoded.durable);
        assert_eq!(decoded.meta, 7);
        assert_eq!(decoded.nbt, None);

        // Without durability the root goes out as it is
        let plain = Item::new("minecraft:iron_sword", 7, 1)
            .unwrap()
            .with_nbt(Tag::Int(3));
        assert_eq!(plain.wire_nbt(), Some(Tag::Int(3)));
    }

    #[test]
    fn test_shield_has_blocking_tick() {
        let shield = Item::new("minecraft:shield", 0, 1).unwrap();
        let stone = Item::new("minecraft:stone", 0, 1).unwrap();
        let mut with_tick = BinaryData::new();
        with_tick.write_container_item(&shield).unwrap();
        let mut without_tick = BinaryData::new();
        without_tick.write_container_item(&stone).unwrap();
        // shield rid 513 takes two varint bytes, stone rid 1 takes one
        assert_eq!(with_tick.buffer.len(), without_tick.buffer.len() + 1 + 8);
        assert_eq!(&with_tick.buffer[with_tick.buffer.len() - 8..], &[0u8; 8]);
    }

    #[test]
    fn test_can_place_on_lists_are_skipped() {
        let mut buffer = BinaryData::new();
        buffer.write_varint(1); // stone
        buffer.write_varint(1 << 8 | 3);
        buffer.write_u16_le(0);
        buffer.write_varint(2);
        buffer.write_string("minecraft:dirt");
        buffer.write_string("minecraft:grass");
        buffer.write_varint(0);
        buffer.write_u8(0x7F);

        let item = buffer.read_container_item().unwrap();
        assert_eq!(item.meta, 1);
        assert_eq!(item.count, 3);
        assert_eq!(buffer.read_u8().unwrap(), 0x7F);
    }

    #[test]
    fn test_legacy_nbt_length_prefix() {
        let mut tree = Tag::compound();
        tree.insert("CustomName", Tag::String("Old".to_owned()));
        let mut nbt_bytes = BinaryData::new();
        nbt_bytes.write_nbt(&tree, NbtEncoding::LittleEndian).unwrap();

        let mut buffer = BinaryData::new();
        buffer.write_varint(260); // apple
        buffer.write_varint(1);
        buffer.write_u16_le(nbt_bytes.buffer.len() as u16);
        buffer.write_bytes_raw(&nbt_bytes.buffer);
        buffer.write_varint(0);
        buffer.write_varint(0);

        let item = buffer.read_container_item().unwrap();
        assert_eq!(item.nbt, Some(tree));
        assert!(buffer.feof());
    }

    #[test]
    fn test_unsupported_nbt_version() {
        let mut buffer = BinaryData::new();
        buffer.write_varint(1);
        buffer.write_varint(1);
        buffer.write_u16_le(0xFFFF);
        buffer.write_u8(2);
        assert_matches!(
            buffer.read_container_item(),
            Err(CodecError::UnsupportedNbtVersion(2))
        );
    }

    #[test]
    fn test_unknown_runtime_id() {
        let mut buffer = BinaryData::new();
        buffer.write_varint(31_000);
        assert_matches!(
            buffer.read_container_item(),
            Err(CodecError::UnknownRuntimeId(31_000))
        );
    }

    #[test]
    fn test_item_stack_round_trip() {
        let stacks = vec![
            ItemStack::new(Item::new("minecraft:dirt", 1, 32).unwrap())
                .with_stack_id(7)
                .with_block_runtime_id(10),
            ItemStack::new(enchanted_sword()).with_stack_id(-3),
            ItemStack::new(
                Item::new("minecraft:diamond_pickaxe", 40, 1)
                    .unwrap()
                    .with_durability(true),
            ),
            ItemStack::new(Item::new("minecraft:shield", 0, 1).unwrap()),
        ];

        for stack in stacks {
            let mut buffer = BinaryData::new();
            buffer.write_item_stack(&stack).unwrap();
            assert_eq!(buffer.read_item_stack().unwrap(), stack);
            assert!(buffer.feof());
        }
    }

    #[test]
    fn test_item_stack_without_stack_ids() {
        let config = CodecConfig {
            has_stack_ids: false,
            ..CodecConfig::default()
        };
        let stack = ItemStack::new(Item::new("minecraft:stone", 0, 1).unwrap()).with_stack_id(5);

        let mut buffer = BinaryData::new().with_config(config);
        buffer.write_item_stack(&stack).unwrap();
        let decoded = buffer.read_item_stack().unwrap();
        assert_eq!(decoded.stack_id, None);
        assert_eq!(decoded.item, stack.item);
    }

    #[test]
    fn test_item_stack_layout() {
        let config = CodecConfig {
            has_stack_ids: false,
            ..CodecConfig::default()
        };
        let stack = ItemStack::new(Item::new("minecraft:stone", 2, 3).unwrap())
            .with_block_runtime_id(3);
        let mut buffer = BinaryData::new().with_config(config);
        buffer.write_item_stack(&stack).unwrap();
        assert_eq!(
            buffer.buffer,
            vec![
                0x02, // runtime id
                0x03, 0x00, // count
                0x02, // meta
                0x06, // block runtime id
                0x0A, // extra data length
                0x00, 0x00, // no NBT
                0x00, 0x00, 0x00, 0x00, // CanPlaceOn
                0x00, 0x00, 0x00, 0x00, // CanDestroy
            ]
        );
    }

    #[test]
    fn test_item_stack_extra_data_is_skippable() {
        let stack = ItemStack::new(enchanted_sword()).with_stack_id(1);
        let mut buffer = BinaryData::new();
        buffer.write_item_stack(&stack).unwrap();
        buffer.write_u8(0xEE);

        buffer.read_varint().unwrap();
        buffer.read_u16_le().unwrap();
        buffer.read_unsigned_varint().unwrap();
        assert!(buffer.read_bool().unwrap());
        buffer.read_varint().unwrap();
        buffer.read_varint().unwrap();
        let skipped = buffer.read_byte_array().unwrap();
        assert!(!skipped.is_empty());
        assert_eq!(buffer.read_u8().unwrap(), 0xEE);
    }

    #[test]
    fn test_item_stack_block_lists_are_skipped() {
        let mut extra = BinaryData::new();
        extra.write_u16_le(0);
        extra.write_i32_le(1);
        extra.write_short_string("minecraft:dirt").unwrap();
        extra.write_i32_le(2);
        extra.write_short_string("minecraft:stone").unwrap();
        extra.write_short_string("minecraft:grass").unwrap();
        extra.write_i64_le(0);

        let mut buffer = BinaryData::new();
        buffer.write_varint(513); // shield
        buffer.write_u16_le(2);
        buffer.write_unsigned_varint(0);
        buffer.write_bool(false);
        buffer.write_varint(0);
        buffer.write_nested(&extra);
        buffer.write_u8(0x42);

        let stack = buffer.read_item_stack().unwrap();
        assert!(stack.item.is_shield());
        assert_eq!(stack.item.count, 2);
        assert_eq!(stack.stack_id, None);
        assert_eq!(stack.item.nbt, None);
        assert_eq!(buffer.read_u8().unwrap(), 0x42);
        assert!(buffer.feof());
    }

    #[test]
    fn test_item_stack_truncated_block_list() {
        let mut extra = BinaryData::new();
        extra.write_u16_le(0);
        extra.write_i32_le(3);
        extra.write_short_string("minecraft:dirt").unwrap();

        let mut buffer = BinaryData::new();
        buffer.write_varint(1);
        buffer.write_u16_le(1);
        buffer.write_unsigned_varint(0);
        buffer.write_bool(false);
        buffer.write_varint(0);
        buffer.write_nested(&extra);

        assert_matches!(buffer.read_item_stack(), Err(CodecError::EndOfBuffer { .. }));
    }

    #[test]
    fn test_item_stack_air() {
        let mut buffer = BinaryData::new();
        buffer.write_item_stack(&ItemStack::air().with_stack_id(4)).unwrap();
        assert_eq!(buffer.buffer, vec![0x00]);
        assert_eq!(buffer.read_item_stack().unwrap(), ItemStack::air());
    }

    #[test]
    fn test_block_identifier() {
        let stack = ItemStack::new(Item::new("minecraft:dirt", 0, 1).unwrap())
            .with_block_runtime_id(9);
        assert_eq!(stack.block_identifier().unwrap(), Some("minecraft:dirt"));
        assert_eq!(ItemStack::air().block_identifier().unwrap(), None);
    }
}
