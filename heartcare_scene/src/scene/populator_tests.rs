use super::*;
use crate::render::{FailurePlan, RecordingDevice};
use crate::resource::HEART_PALETTE;
use crate::scene::SceneRng;
use crate::shape::build_heart_outline;

fn flat() -> ExtrudeParams {
    ExtrudeParams::flat(1.0)
}

// ============================================================================
// Sampling
// ============================================================================

#[test]
fn test_blueprints_stay_inside_bounds() {
    let config = LayerConfig::background();
    let mut rng = SceneRng::seeded(11);
    let blueprints = sample_blueprints(Layer::Background, &config, &mut rng);

    assert_eq!(blueprints.len(), 8);
    for bp in &blueprints {
        assert!(config.bounds.contains(bp.transform.position));
        assert!((0.0..PI).contains(&bp.transform.rotation.x));
        assert!((0.0..PI).contains(&bp.transform.rotation.y));
        assert_eq!(bp.transform.scale, Vec3::splat(0.05));
        assert!(config.speed.rotation.contains(bp.animation.rotation_speed_x));
        assert!(config.speed.float_speed.contains(bp.animation.float_speed));
        assert!((0.0..TAU).contains(&bp.animation.float_offset));
        assert!(HEART_PALETTE.contains(&bp.material.base_color));
        assert!(!bp.material.transparent);
    }
}

#[test]
fn test_foreground_blueprints_are_transparent_and_calm() {
    let mut rng = SceneRng::seeded(5);
    let fg = sample_blueprints(Layer::Foreground, &LayerConfig::foreground(), &mut rng);
    let bg = sample_blueprints(Layer::Background, &LayerConfig::background(), &mut rng);

    assert!(fg.iter().all(|bp| bp.material.transparent && bp.material.opacity == 0.9));
    assert!(fg.iter().all(|bp| bp.animation.layer == Layer::Foreground));
    let max_fg = fg.iter().map(|bp| bp.animation.rotation_speed_x.abs()).fold(0.0, f32::max);
    assert!(max_fg <= 0.005);
    assert!(bg.iter().all(|bp| bp.animation.float_intensity > fg[0].animation.float_intensity));
}

#[test]
fn test_same_seed_same_layout() {
    let config = LayerConfig::foreground();
    let a = sample_blueprints(Layer::Foreground, &config, &mut SceneRng::seeded(99));
    let b = sample_blueprints(Layer::Foreground, &config, &mut SceneRng::seeded(99));
    assert_eq!(a, b);
}

#[test]
fn test_single_layer_is_fixed() {
    let bp = sample_blueprints(Layer::Background, &LayerConfig::single(), &mut SceneRng::seeded(0));
    assert_eq!(bp.len(), 1);
    assert_eq!(bp[0].transform.position, Vec3::new(-0.25, -0.5, 0.0));
    assert_eq!(bp[0].animation.rotation_speed_y, 0.01);
}

// ============================================================================
// Populate
// ============================================================================

#[test]
fn test_populate_uploads_one_of_each_per_instance() {
    let mut device = RecordingDevice::new();
    let ledger = device.ledger();
    let instances = populate(
        &mut device, &build_heart_outline(), &flat(),
        Layer::Foreground, &LayerConfig::foreground(), &mut SceneRng::seeded(1),
    ).unwrap();

    assert_eq!(instances.len(), 5);
    let snapshot = ledger.snapshot();
    assert_eq!(snapshot.geometries_created, 5);
    assert_eq!(snapshot.materials_created, 5);

    // No two instances share a geometry
    let keys: std::collections::HashSet<_> = instances.iter().map(|i| i.geometry()).collect();
    assert_eq!(keys.len(), 5);
    for instance in &instances {
        assert_eq!(instance.displacement(), Vec3::ZERO);
        assert_eq!(device.material(instance.material()), Some(instance.material_spec()));
    }
}

#[test]
fn test_populate_empty_layer() {
    let mut device = RecordingDevice::new();
    let instances = populate(
        &mut device, &build_heart_outline(), &flat(),
        Layer::Foreground, &LayerConfig::empty(), &mut SceneRng::seeded(1),
    ).unwrap();
    assert!(instances.is_empty());
    assert_eq!(device.ledger().snapshot().geometries_created, 0);
}

#[test]
fn test_failed_upload_rolls_back_layer() {
    let mut device = RecordingDevice::with_failures(FailurePlan {
        fail_geometry_upload_at: Some(3),
        ..FailurePlan::default()
    });
    let result = populate(
        &mut device, &build_heart_outline(), &flat(),
        Layer::Background, &LayerConfig::background(), &mut SceneRng::seeded(1),
    );

    assert!(matches!(result, Err(Error::InitializationFailed(_))));
    let snapshot = device.ledger().snapshot();
    assert_eq!(snapshot.geometries_created, 3);
    assert!(snapshot.is_balanced());
}

#[test]
fn test_invalid_extrusion_fails_before_upload() {
    let mut device = RecordingDevice::new();
    let result = populate(
        &mut device, &build_heart_outline(), &ExtrudeParams::flat(-1.0),
        Layer::Background, &LayerConfig::background(), &mut SceneRng::seeded(1),
    );
    assert!(matches!(result, Err(Error::InitializationFailed(_))));
    assert_eq!(device.ledger().snapshot().geometries_created, 0);
}

#[test]
fn test_release_instances_empties_list() {
    let mut device = RecordingDevice::new();
    let mut instances = populate(
        &mut device, &build_heart_outline(), &flat(),
        Layer::Background, &LayerConfig::background(), &mut SceneRng::seeded(2),
    ).unwrap();

    let failures = release_instances(&mut device, &mut instances);
    assert!(failures.is_empty());
    assert!(instances.is_empty());
    assert!(device.ledger().snapshot().is_balanced());
}
