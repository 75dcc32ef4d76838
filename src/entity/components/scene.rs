use std::sync::Arc;

use glam::{Mat4, Quat, Vec3};
use hecs::Entity;
use nextar_placement::placement::Anchor;

use crate::rendering::ModelHandle;
use crate::rendering::common::types::LoadedModel;

pub const MIN_SCALE: f32 = 0.75;
pub const MAX_SCALE: f32 = 1.75;

/// The root of everything placed on a tracked anchor.
pub struct AnchorNode(pub Anchor);

pub struct ChildOf(pub Entity);

pub struct ModelRenderable {
    pub handle: ModelHandle,
    pub model: Arc<LoadedModel>,
}

/// The user's manipulation of a node, relative to its parent.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transformable {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

impl Default for Transformable {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
        }
    }
}

impl Transformable {
    pub fn translate(&mut self, delta: Vec3) {
        self.translation += delta;
    }

    pub fn rotate(&mut self, radians: f32) {
        self.rotation = (Quat::from_rotation_y(radians) * self.rotation).normalize();
    }

    pub fn scale_by(&mut self, factor: f32) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        self.scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
    }

    pub fn local_transform(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.rotation, self.translation)
    }
}

/// Marks the node gestures apply to.
pub struct Selected;
