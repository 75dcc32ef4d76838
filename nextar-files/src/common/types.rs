use std::fmt::{Debug, Formatter};

pub struct BinaryChunk {
    pub chunk_type: u32,
    pub data: Vec<u8>,
}

impl BinaryChunk {
    /// The chunk type as its four character code, e.g. `JSON` or `BIN\0`.
    pub fn type_str(&self) -> String {
        String::from_utf8_lossy(&self.chunk_type.to_le_bytes()).into_owned()
    }
}

impl Debug for BinaryChunk {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ chunk_type: {:?}, ", self.type_str())?;
        write!(f, "data: [{}] }}", self.data.len())
    }
}
