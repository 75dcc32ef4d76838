/// basic types (e.g. the loaded model) to abstract away from both the asset format and the render backend.
pub mod types;
