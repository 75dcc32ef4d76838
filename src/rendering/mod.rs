use std::sync::Arc;

use glam::{Mat4, Vec3, Vec4};

use crate::rendering::common::types::{LoadedModel, MaterialProperties};

pub mod anchor_renderer;
pub mod common;
pub mod headless;
pub mod loader;

/// Identifies a model after it has been uploaded to a renderer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ModelHandle(pub u64);

/// Everything a renderer needs to draw one model for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawCall {
    pub handle: ModelHandle,
    pub view: Mat4,
    pub projection: Mat4,
    pub model_matrix: Mat4,
    /// Applied to the mesh before `model_matrix`
    pub scale: Vec3,
    pub tint: Vec4,
    pub color_correction: Vec4,
}

impl DrawCall {
    pub fn object_transform(&self) -> Mat4 {
        self.model_matrix * Mat4::from_scale(self.scale)
    }
}

/// The seam to the rendering backend. Shading and rasterization live behind it.
pub trait Renderer {
    /// Called once per model, the material stays fixed afterwards.
    fn upload(&mut self, model: &Arc<LoadedModel>, material: &MaterialProperties) -> ModelHandle;

    fn draw(&mut self, call: &DrawCall);
}
