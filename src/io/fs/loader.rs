use log::trace;

use crate::io::common::loader::{LoadError, RawAssetLoader};

/// Reads models from the device storage.
#[derive(Debug, Default)]
pub struct FsModelLoader {}

impl FsModelLoader {
    pub fn new() -> Self {
        Self {}
    }
}

impl RawAssetLoader for FsModelLoader {
    fn load_raw_owned(&self, path: &str) -> Result<Vec<u8>, LoadError> {
        let buf = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_string(),
            source,
        })?;
        trace!("Read {} ({} bytes)", path, buf.len());
        Ok(buf)
    }
}
