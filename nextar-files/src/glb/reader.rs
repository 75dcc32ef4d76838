use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};
use log::{trace, warn};

use crate::ParserError;
use crate::common::reader::{Parseable, is_eof, read_chunk_array};
use crate::common::types::BinaryChunk;
use crate::glb::types::{CHUNK_TYPE_BIN, CHUNK_TYPE_JSON, GLB_MAGIC, GLB_VERSION, GlbAsset, GlbHeader, HEADER_SIZE};
use crate::gltf::reader::GltfReader;

impl Parseable<GlbHeader> for GlbHeader {
    fn parse<R: Read>(rdr: &mut R) -> Result<GlbHeader, ParserError> {
        Ok(GlbHeader {
            magic: rdr.read_u32::<LittleEndian>()?,
            version: rdr.read_u32::<LittleEndian>()?,
            length: rdr.read_u32::<LittleEndian>()?,
        })
    }
}

pub struct GlbReader {}

impl GlbReader {
    /// Only reads the 12 byte header, enough to tell whether some bytes are a GLB container.
    pub fn parse_header<R: Read>(rdr: &mut R) -> Result<GlbHeader, ParserError> {
        let header = match GlbHeader::parse(rdr) {
            Ok(header) => header,
            Err(err) if is_eof(&err) => return Err(ParserError::EmptySource),
            Err(err) => return Err(err),
        };

        if header.magic != GLB_MAGIC {
            return Err(ParserError::InvalidMagicValue { magic: header.magic });
        }

        if header.version != GLB_VERSION {
            return Err(ParserError::UnsupportedVersion { version: header.version });
        }

        if header.length < HEADER_SIZE {
            return Err(ParserError::FormatError {
                reason: "Declared length is smaller than the header",
            });
        }

        Ok(header)
    }

    /// Parses a whole container from a buffer. The declared length has to match the buffer, a
    /// truncated download is thus caught here rather than by the renderer.
    pub fn parse_asset(buf: &[u8]) -> Result<GlbAsset, ParserError> {
        if buf.is_empty() {
            return Err(ParserError::EmptySource);
        }

        let mut rdr = buf;
        let header = Self::parse_header(&mut rdr)?;
        if header.length as usize != buf.len() {
            warn!(
                "GLB declares {} bytes but {} were supplied",
                header.length,
                buf.len()
            );
            return Err(ParserError::FormatError {
                reason: "Declared length does not match the data",
            });
        }

        let chunks = match read_chunk_array::<BinaryChunk, _>(&mut rdr) {
            Ok(chunks) => chunks,
            Err(err) if is_eof(&err) => {
                return Err(ParserError::FormatError { reason: "Truncated chunk" });
            }
            Err(err) => return Err(err),
        };
        trace!("GLB chunks: {:?}", chunks);

        let mut chunk_iter = chunks.into_iter();
        let json_chunk = chunk_iter.next().ok_or(ParserError::FormatError {
            reason: "Missing mandatory JSON chunk",
        })?;

        if json_chunk.chunk_type != CHUNK_TYPE_JSON {
            return Err(ParserError::FormatError {
                reason: "The first chunk has to be the JSON chunk",
            });
        }

        // JSON chunks are padded with trailing spaces
        let json = String::from_utf8(json_chunk.data)?.trim_end().to_string();
        GltfReader::parse_document(&json)?;

        let mut bin = None;
        for chunk in chunk_iter {
            if chunk.chunk_type == CHUNK_TYPE_BIN {
                if bin.is_some() {
                    return Err(ParserError::FormatError {
                        reason: "More than one BIN chunk",
                    });
                }
                bin = Some(chunk.data);
            } else {
                // unknown chunks must be ignored
                trace!("Skipping GLB chunk {}", chunk.type_str());
            }
        }

        Ok(GlbAsset { header, json, bin })
    }
}
