use nextar_files::ParserError;
use nextar_placement::source::{ModelFormat, ModelLocation};
use thiserror::Error;

/// Everything that can go wrong between a resolved location and a model that can be attached.
/// The display text is what ends up in front of the user.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Fetching {url} failed with status {status}")]
    Status { url: String, status: u16 },
    #[error("Invalid model data: {0}")]
    Parse(#[from] ParserError),
    #[error("Unsupported model format {format:?}: {reason}")]
    UnsupportedFormat { format: ModelFormat, reason: &'static str },
    #[error("No model source configured")]
    Unresolved,
}

/// Loads a whole asset from a resolved location. Called from the loader thread.
pub trait AssetLoader<T>: Send + Sync {
    fn load(&self, location: &ModelLocation, format: ModelFormat) -> T;
}

pub trait RawAssetLoader {
    /// Always reads the whole asset, there is no caching layer that could hand out borrows.
    fn load_raw_owned(&self, path: &str) -> Result<Vec<u8>, LoadError>;
}
