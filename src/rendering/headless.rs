use std::collections::HashMap;
use std::sync::Arc;

use log::{info, trace};

use crate::rendering::common::types::{LoadedModel, MaterialProperties};
use crate::rendering::{DrawCall, ModelHandle, Renderer};

/// A renderer without a surface, it only logs what it would draw.
#[derive(Debug, Default)]
pub struct LogRenderer {
    uploads: HashMap<ModelHandle, (String, MaterialProperties)>,
    draw_count: usize,
    last_draw: Option<DrawCall>,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.len()
    }

    pub fn draw_count(&self) -> usize {
        self.draw_count
    }

    #[cfg(test)]
    pub fn last_draw(&self) -> Option<&DrawCall> {
        self.last_draw.as_ref()
    }
}

impl Renderer for LogRenderer {
    fn upload(&mut self, model: &Arc<LoadedModel>, material: &MaterialProperties) -> ModelHandle {
        let handle = ModelHandle(self.uploads.len() as u64 + 1);
        info!(
            "Uploading {} ({} bytes) as {:?} with {:?}",
            model.source,
            model.byte_len(),
            handle,
            material
        );
        self.uploads.insert(handle, (model.source.clone(), *material));
        handle
    }

    fn draw(&mut self, call: &DrawCall) {
        trace!(
            "Drawing {:?} at {} scaled {} tinted {}",
            call.handle,
            call.object_transform().w_axis.truncate(),
            call.scale,
            call.tint
        );
        self.draw_count += 1;
        self.last_draw = Some(*call);
    }
}
