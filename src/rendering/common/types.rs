use std::fmt::{Debug, Formatter};

use nextar_placement::source::ModelFormat;

/// A model that passed validation and can be handed to a renderer.
#[derive(Clone)]
pub struct LoadedModel {
    /// Where the model came from, for diagnostics
    pub source: String,
    pub format: ModelFormat,
    /// The glTF JSON document
    pub document: String,
    /// The binary buffer embedded in a .glb container
    pub buffer: Option<Vec<u8>>,
}

impl LoadedModel {
    pub fn byte_len(&self) -> usize {
        self.document.len() + self.buffer.as_ref().map_or(0, Vec::len)
    }
}

impl Debug for LoadedModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ source: {}, format: {:?}, ", self.source, self.format)?;
        write!(f, "document: [{}], ", self.document.len())?;
        match &self.buffer {
            Some(buffer) => write!(f, "buffer: [{}] }}", buffer.len()),
            None => write!(f, "buffer: None }}"),
        }
    }
}

/// Lighting coefficients, fixed once per model at upload time.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MaterialProperties {
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    pub specular_power: f32,
}

impl MaterialProperties {
    pub const PLACED_MODEL: MaterialProperties = MaterialProperties {
        ambient: 0.3,
        diffuse: 1.0,
        specular: 1.0,
        specular_power: 6.0,
    };
}

impl Default for MaterialProperties {
    fn default() -> Self {
        Self::PLACED_MODEL
    }
}
