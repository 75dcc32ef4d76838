use glam::Vec3;

use crate::PlacementError;

/// Native-unit description of a model asset, needed to fit it onto a detected target.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AssetProfile {
    /// The model's footprint along its longest horizontal edge, in native units.
    pub reference_size: f32,
    /// Displacement of the geometric origin from the visual center, in native units.
    pub offset: Vec3,
    /// The vertical axis is scaled by `scale / vertical_scale_divisor`, for assets whose height is
    /// authored in a different unit than their footprint.
    pub vertical_scale_divisor: f32,
}

impl AssetProfile {
    /// The CAD model bundled for image targets. It is not centered around its origin and its
    /// height is exported in tenfold units.
    pub const BUNDLED_CAD: AssetProfile = AssetProfile {
        reference_size: 100.65,
        offset: Vec3::new(-251.3, 0.0, 29.0),
        vertical_scale_divisor: 10.0,
    };

    /// Centered, uniformly scaled model that is one unit wide.
    pub const UNIT: AssetProfile = AssetProfile {
        reference_size: 1.0,
        offset: Vec3::ZERO,
        vertical_scale_divisor: 1.0,
    };

    pub fn validate(&self) -> Result<(), PlacementError> {
        if !self.reference_size.is_finite() || self.reference_size <= 0.0 {
            return Err(PlacementError::Configuration {
                reason: format!(
                    "reference size must be positive, got {}",
                    self.reference_size
                ),
            });
        }

        if !self.vertical_scale_divisor.is_finite() || self.vertical_scale_divisor <= 0.0 {
            return Err(PlacementError::Configuration {
                reason: format!(
                    "vertical scale divisor must be positive, got {}",
                    self.vertical_scale_divisor
                ),
            });
        }

        if !self.offset.is_finite() {
            return Err(PlacementError::Configuration {
                reason: format!("model offset must be finite, got {}", self.offset),
            });
        }

        Ok(())
    }
}

impl Default for AssetProfile {
    fn default() -> Self {
        AssetProfile::BUNDLED_CAD
    }
}
