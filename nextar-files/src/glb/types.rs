use std::fmt::{Debug, Formatter};

/// "glTF" in little endian
pub const GLB_MAGIC: u32 = 0x4654_6C67;
pub const GLB_VERSION: u32 = 2;
pub const HEADER_SIZE: u32 = 12;
/// "JSON"
pub const CHUNK_TYPE_JSON: u32 = 0x4E4F_534A;
/// "BIN\0"
pub const CHUNK_TYPE_BIN: u32 = 0x004E_4942;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GlbHeader {
    pub magic: u32,
    pub version: u32,
    /// Total length of the container including the header
    pub length: u32,
}

pub struct GlbAsset {
    pub header: GlbHeader,
    /// The glTF JSON document
    pub json: String,
    /// The embedded buffer, referenced by the first `buffers` entry without an uri
    pub bin: Option<Vec<u8>>,
}

impl GlbAsset {
    pub fn json_len(&self) -> usize {
        self.json.len()
    }

    pub fn bin_len(&self) -> usize {
        self.bin.as_ref().map_or(0, |bin| bin.len())
    }
}

impl Debug for GlbAsset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ header: {:?}, ", self.header)?;
        write!(f, "json: [{}], ", self.json_len())?;
        write!(f, "bin: [{}] }}", self.bin_len())
    }
}
