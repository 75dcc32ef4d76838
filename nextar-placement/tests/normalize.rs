use glam::{Affine3A, Quat, Vec3};
use nextar_placement::asset::AssetProfile;
use nextar_placement::capability::{self, MIN_PLATFORM_API_LEVEL, Unsupported};
use nextar_placement::pose::{PoseNormalizer, RealWorldExtent};
use nextar_placement::tint::{TINT_COLORS_HEX, tint_for};

fn anchor() -> Affine3A {
    Affine3A::from_rotation_translation(Quat::from_rotation_y(0.7), Vec3::new(0.3, -0.2, -1.5))
}

#[test]
fn scale_grows_with_the_longer_edge() {
    let normalizer = PoseNormalizer::new(AssetProfile::BUNDLED_CAD).unwrap();

    let mut last = 0.0;
    for edge in [0.05, 0.1, 0.2, 0.4, 0.8] {
        let pose = normalizer
            .normalize(&anchor(), RealWorldExtent::new(0.01, edge))
            .unwrap();
        assert!(pose.scale.x > last);
        last = pose.scale.x;
    }
}

#[test]
fn doubling_the_edge_doubles_horizontal_scale() {
    let normalizer = PoseNormalizer::new(AssetProfile::BUNDLED_CAD).unwrap();

    let single = normalizer
        .normalize(&anchor(), RealWorldExtent::new(0.21, 0.13))
        .unwrap();
    let double = normalizer
        .normalize(&anchor(), RealWorldExtent::new(0.42, 0.26))
        .unwrap();

    assert!((double.scale.x - 2.0 * single.scale.x).abs() < 1e-6);
    assert!((double.scale.z - 2.0 * single.scale.z).abs() < 1e-6);
    assert!((double.scale.y - 2.0 * single.scale.y).abs() < 1e-6);
}

#[test]
fn width_and_depth_are_interchangeable() {
    let normalizer = PoseNormalizer::new(AssetProfile::BUNDLED_CAD).unwrap();
    let a = normalizer.normalize(&anchor(), RealWorldExtent::new(0.3, 0.1));
    let b = normalizer.normalize(&anchor(), RealWorldExtent::new(0.1, 0.3));
    assert_eq!(a, b);
}

#[test]
fn bundled_model_is_recentered_under_scale() {
    let normalizer = PoseNormalizer::new(AssetProfile::BUNDLED_CAD).unwrap();
    let extent = RealWorldExtent::new(100.65, 50.0);

    // scale == 1, the model origin moves by exactly the native offset
    let pose = normalizer
        .normalize(&Affine3A::IDENTITY, extent)
        .unwrap();
    let origin = pose.model_matrix.transform_point3(Vec3::ZERO);
    assert!(origin.abs_diff_eq(Vec3::new(-251.3, 0.0, 29.0), 1e-3));
    assert!(pose.scale.abs_diff_eq(Vec3::new(1.0, 0.1, 1.0), 1e-6));
}

#[test]
fn zero_reference_size_is_fatal() {
    let profile = AssetProfile {
        reference_size: 0.0,
        ..AssetProfile::BUNDLED_CAD
    };
    assert!(PoseNormalizer::new(profile).is_err());
}

#[test]
fn tint_wraps_around_the_palette() {
    let size = TINT_COLORS_HEX.len() as u32;
    for identity in 0..64 {
        assert_eq!(tint_for(identity), tint_for(identity + size));
        assert_eq!(tint_for(identity).w, 1.0);
    }
}

#[test]
fn capability_gate() {
    let too_old = capability::check(MIN_PLATFORM_API_LEVEL - 1, "3.2").unwrap_err();
    assert!(matches!(too_old, Unsupported::PlatformTooOld { .. }));
    assert!(too_old.to_string().contains("Platform too old"));

    // the platform is reported even if graphics would fail as well
    assert!(capability::check(19, "2.0").unwrap_err().is_platform());

    let old_graphics = capability::check(MIN_PLATFORM_API_LEVEL, "2.0").unwrap_err();
    assert!(matches!(old_graphics, Unsupported::GraphicsTooOld { .. }));
    assert!(old_graphics.to_string().contains("Graphics too old"));

    assert_eq!(capability::check(MIN_PLATFORM_API_LEVEL, "3.0"), Ok(()));
    assert_eq!(capability::check(33, "3.2"), Ok(()));
}
