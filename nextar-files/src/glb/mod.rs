// https://registry.khronos.org/glTF/specs/2.0/glTF-2.0.html#binary-gltf-layout
pub mod reader;
pub mod types;
