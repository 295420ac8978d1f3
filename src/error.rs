use std::error::Error;
use std::fmt;
use std::io;

pub type Result<T> = std::result::Result<T, CodecError>;

#[derive(Debug)]
pub enum CodecError {
    IoError(io::Error),
    /// A read wanted more bytes than the buffer had left.
    EndOfBuffer {
        needed: usize,
        remaining: usize,
    },
    InvalidData(String),
    UnsupportedMetadataType(u32),
    UnsupportedSubChunkVersion(u8),
    UnsupportedNbtVersion(u8),
    UnknownRuntimeId(i32),
    UnknownIdentifier(String),
}

impl CodecError {
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        CodecError::InvalidData(msg.into())
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::IoError(err) => write!(f, "IO error: {}", err),
            CodecError::EndOfBuffer { needed, remaining } => write!(
                f,
                "End of buffer: needed {} bytes, {} remaining",
                needed, remaining
            ),
            CodecError::InvalidData(msg) => write!(f, "Invalid data: {}", msg),
            CodecError::UnsupportedMetadataType(id) => {
                write!(f, "Unsupported metadata type: {}", id)
            }
            CodecError::UnsupportedSubChunkVersion(version) => {
                write!(f, "Unsupported sub-chunk version: {}", version)
            }
            CodecError::UnsupportedNbtVersion(version) => {
                write!(f, "Unsupported NBT version: {}", version)
            }
            CodecError::UnknownRuntimeId(rid) => {
                write!(f, "Couldn't find NID for RID: {}", rid)
            }
            CodecError::UnknownIdentifier(nid) => {
                write!(f, "Couldn't find RID for NID: {}", nid)
            }
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CodecError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for CodecError {
    fn from(err: io::Error) -> Self {
        CodecError::IoError(err)
    }
}
