pub mod config;
pub mod error;
pub mod logger;
pub mod protocol;
pub mod runtime_id;
pub mod types;

// Re-export commonly used items
pub use config::CodecConfig;
pub use error::{CodecError, Result};
pub use logger::{log, LogSeverity};
pub use protocol::binary::BinaryData;
pub use protocol::chunk::{ChunkColumn, SubChunk, TileEntity};
pub use protocol::item::{Item, ItemStack};
pub use protocol::metadata::{MetadataStore, MetadataValue};
pub use protocol::nbt::{NbtEncoding, Tag};
pub use protocol::skin::Skin;
pub use runtime_id::{block_runtimes, item_runtimes};
