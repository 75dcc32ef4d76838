use serde::Deserialize;

pub const GLTF_MAJOR_VERSION: u32 = 2;

/// The parts of a glTF JSON document needed to accept or reject it. Everything else is left to
/// the renderer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GltfDocument {
    pub asset: GltfAssetInfo,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GltfAssetInfo {
    pub version: String,
    pub min_version: Option<String>,
    pub generator: Option<String>,
}
