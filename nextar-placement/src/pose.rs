use glam::{Affine3A, Mat4, Vec3};
use log::trace;

use crate::PlacementError;
use crate::asset::AssetProfile;

/// Physical size of a detection target, as measured by the tracking runtime (meters).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct RealWorldExtent {
    pub width: f32,
    pub depth: f32,
}

impl RealWorldExtent {
    pub fn new(width: f32, depth: f32) -> Self {
        Self { width, depth }
    }

    #[inline]
    pub fn max_edge(&self) -> f32 {
        self.width.max(self.depth)
    }

    /// A target that has not been measured confidently yet.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        let edge = self.max_edge();
        !edge.is_finite() || edge <= 0.0
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NormalizedPose {
    /// Anchor pose composed with the scaled re-centering offset, without the scale itself.
    pub model_matrix: Mat4,
    /// Non-uniform scale the renderer applies in model space.
    pub scale: Vec3,
}

impl NormalizedPose {
    /// The full transform for the model's vertices: scale first, then placement.
    pub fn object_transform(&self) -> Mat4 {
        self.model_matrix * Mat4::from_scale(self.scale)
    }
}

/// Computes where a model lands on a target, see [`PoseNormalizer::normalize`] for the details.
/// `reference_size` and `vertical_scale_divisor` need to be non-zero, which
/// [`PoseNormalizer::new`] ensures.
pub fn compute_model_matrix(
    anchor_pose: &Affine3A,
    extent: RealWorldExtent,
    offset: Vec3,
    reference_size: f32,
    vertical_scale_divisor: f32,
) -> NormalizedPose {
    // max, not average: the model must never exceed the target along its longer edge
    let scale = extent.max_edge() / reference_size;

    // The offset is in native units, so it grows with the model.
    let local_offset = Affine3A::from_translation(offset * scale);
    let model_matrix = Mat4::from(*anchor_pose * local_offset);

    NormalizedPose {
        model_matrix,
        scale: Vec3::new(scale, scale / vertical_scale_divisor, scale),
    }
}

/// Fits one asset onto detected targets. Construct it once per asset, then call
/// [`PoseNormalizer::normalize`] for every frame the anchor is visible, since both the anchor
/// pose and the measured extent get refined over time.
#[derive(Debug, Copy, Clone)]
pub struct PoseNormalizer {
    profile: AssetProfile,
}

impl PoseNormalizer {
    pub fn new(profile: AssetProfile) -> Result<Self, PlacementError> {
        profile.validate()?;
        Ok(Self { profile })
    }

    pub fn profile(&self) -> &AssetProfile {
        &self.profile
    }

    /// Returns `None` while the extent is degenerate, the caller should skip drawing the anchor
    /// for that frame instead of drawing a collapsed model.
    pub fn normalize(&self, anchor_pose: &Affine3A, extent: RealWorldExtent) -> Option<NormalizedPose> {
        if extent.is_degenerate() {
            trace!("Skipping degenerate extent {:?}", extent);
            return None;
        }

        Some(compute_model_matrix(
            anchor_pose,
            extent,
            self.profile.offset,
            self.profile.reference_size,
            self.profile.vertical_scale_divisor,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    #[test]
    fn identity_anchor_unit_profile() {
        let normalizer = PoseNormalizer::new(AssetProfile::UNIT).unwrap();
        let pose = normalizer
            .normalize(&Affine3A::IDENTITY, RealWorldExtent::new(0.5, 0.25))
            .unwrap();

        assert_eq!(pose.scale, Vec3::splat(0.5));
        assert!(pose.model_matrix.abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn offset_is_rotated_by_the_anchor() {
        let profile = AssetProfile {
            reference_size: 2.0,
            offset: Vec3::new(4.0, 0.0, 0.0),
            vertical_scale_divisor: 1.0,
        };
        let anchor = Affine3A::from_rotation_translation(
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            Vec3::new(1.0, 2.0, 3.0),
        );

        let pose = PoseNormalizer::new(profile)
            .unwrap()
            .normalize(&anchor, RealWorldExtent::new(1.0, 0.0))
            .unwrap();

        // scale 0.5 -> local offset (2, 0, 0), rotated +90° around Y -> (0, 0, -2)
        let origin = pose.model_matrix.transform_point3(Vec3::ZERO);
        assert!(origin.abs_diff_eq(Vec3::new(1.0, 2.0, 1.0), 1e-5));
    }

    #[test]
    fn vertical_axis_uses_its_divisor() {
        let pose = compute_model_matrix(
            &Affine3A::IDENTITY,
            RealWorldExtent::new(100.65, 10.0),
            Vec3::ZERO,
            100.65,
            10.0,
        );
        assert!(pose.scale.abs_diff_eq(Vec3::new(1.0, 0.1, 1.0), 1e-6));
    }

    #[test]
    fn degenerate_extents_are_skipped() {
        let normalizer = PoseNormalizer::new(AssetProfile::BUNDLED_CAD).unwrap();
        assert!(normalizer
            .normalize(&Affine3A::IDENTITY, RealWorldExtent::default())
            .is_none());
        assert!(normalizer
            .normalize(&Affine3A::IDENTITY, RealWorldExtent::new(f32::NAN, 0.0))
            .is_none());
    }

    #[test]
    fn object_transform_applies_scale_before_placement() {
        let anchor = Affine3A::from_translation(Vec3::new(0.0, 0.0, -1.0));
        let pose = compute_model_matrix(&anchor, RealWorldExtent::new(2.0, 1.0), Vec3::ZERO, 1.0, 1.0);
        let corner = pose.object_transform().transform_point3(Vec3::ONE);
        assert!(corner.abs_diff_eq(Vec3::new(2.0, 2.0, 1.0), 1e-6));
    }
}
