pub mod binary;
pub mod chunk;
pub mod item;
pub mod metadata;
pub mod nbt;
pub mod skin;
