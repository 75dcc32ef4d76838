use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("The file's magic value does not match the expectation {magic:#010x}")]
    InvalidMagicValue { magic: u32 },

    #[error("Unsupported container version {version}")]
    UnsupportedVersion { version: u32 },

    #[error("The file is violating the expected format, because: {reason}")]
    FormatError { reason: &'static str },

    /// Represents an empty source, e.g. a zero byte download.
    #[error("Source contains no data")]
    EmptySource,

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error("Invalid glTF document: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    UTF8ConversationError(#[from] std::string::FromUtf8Error),
}

pub mod common;
pub mod glb;
pub mod gltf;
