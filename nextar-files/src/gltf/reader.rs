use log::trace;

use crate::ParserError;
use crate::gltf::types::{GLTF_MAJOR_VERSION, GltfDocument};

pub struct GltfReader {}

impl GltfReader {
    /// Parses the JSON document and checks it declares a glTF 2 asset.
    pub fn parse_document(text: &str) -> Result<GltfDocument, ParserError> {
        let document: GltfDocument = serde_json::from_str(text)?;

        let major = document
            .asset
            .version
            .split('.')
            .next()
            .and_then(|major| major.parse::<u32>().ok())
            .ok_or(ParserError::FormatError {
                reason: "Malformed asset version",
            })?;

        if major != GLTF_MAJOR_VERSION {
            return Err(ParserError::UnsupportedVersion { version: major });
        }

        trace!("glTF asset {:?}", document.asset);
        Ok(document)
    }
}
