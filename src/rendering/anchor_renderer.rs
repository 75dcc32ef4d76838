use glam::{Mat4, Vec3, Vec4};
use log::trace;
use nextar_placement::placement::DetectionTarget;
use nextar_placement::pose::PoseNormalizer;
use nextar_placement::tint::{UNTINTED, tint_for};

use crate::tracking::AnchorObservation;

/// Where and how the model sits on its anchor in this frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AnchorPlacement {
    pub model_matrix: Mat4,
    pub scale: Vec3,
    pub tint: Vec4,
}

/// Turns per-frame anchor observations into model placements.
///
/// Image targets are measured, so the model is fitted to the image: scaled by its longer edge and
/// re-centered, then tinted by the image identity. Plane anchors have no size and draw the model
/// as authored.
pub struct AnchorRenderer {
    normalizer: PoseNormalizer,
}

impl AnchorRenderer {
    pub fn new(normalizer: PoseNormalizer) -> Self {
        Self { normalizer }
    }

    /// `None` if the model can't be drawn this frame.
    pub fn placement(&self, target: &DetectionTarget, observation: &AnchorObservation) -> Option<AnchorPlacement> {
        match target {
            DetectionTarget::Image(identity) => {
                let Some(extent) = observation.extent else {
                    trace!("No extent for image {} yet", identity);
                    return None;
                };

                let Some(pose) = self.normalizer.normalize(&observation.pose, extent) else {
                    trace!("Skipping image {}, extent {:?} is degenerate", identity, extent);
                    return None;
                };

                Some(AnchorPlacement {
                    model_matrix: pose.model_matrix,
                    scale: pose.scale,
                    tint: tint_for(*identity),
                })
            }
            DetectionTarget::Plane(_) => Some(AnchorPlacement {
                model_matrix: Mat4::from(observation.pose),
                scale: Vec3::ONE,
                tint: UNTINTED,
            }),
        }
    }
}
