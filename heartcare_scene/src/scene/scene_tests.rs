use super::*;
use crate::config::{CameraConfig, LayerConfig};
use crate::render::RecordingDevice;
use crate::resource::ExtrudeParams;
use crate::scene::{populate, Layer, SceneRng};
use crate::shape::build_heart_outline;

fn create_test_scene() -> SceneState {
    let mut device = RecordingDevice::new();
    let mut rng = SceneRng::seeded(21);
    let outline = build_heart_outline();
    let params = ExtrudeParams::flat(1.0);
    let mut instances = populate(
        &mut device, &outline, &params, Layer::Background, &LayerConfig::background(), &mut rng,
    ).unwrap();
    instances.extend(populate(
        &mut device, &outline, &params, Layer::Foreground, &LayerConfig::foreground(), &mut rng,
    ).unwrap());

    let camera = PerspectiveCamera::new(&CameraConfig::default(), 800.0 / 400.0);
    SceneState::assemble(instances, LightRig::AmbientDirectionalSpot, camera, SurfaceId(1), (800, 400), 0.01)
}

// ============================================================================
// Assembly
// ============================================================================

#[test]
fn test_assemble_attaches_everything_once() {
    let scene = create_test_scene();
    assert_eq!(scene.instances().len(), 13);
    assert_eq!(scene.lights().len(), 3);
    assert_eq!(scene.light_rig(), LightRig::AmbientDirectionalSpot);
    assert_eq!(scene.surface(), SurfaceId(1));
    assert_eq!(scene.time(), 0.0);
    assert_eq!(scene.camera().aspect(), 2.0);
}

// ============================================================================
// Advance
// ============================================================================

#[test]
fn test_advance_accumulates_time() {
    let mut scene = create_test_scene();
    for _ in 0..100 {
        scene.advance();
    }
    assert!((scene.time() - 1.0).abs() < 1e-4);
    assert!(scene.instances().iter().any(|i| i.displacement() != glam::Vec3::ZERO));
}

#[test]
fn test_clock_keeps_oscillating_after_week_long_session() {
    let mut scene = create_test_scene();
    // 262144 s of scene time: an f32 sum of 0.01 steps stops moving here
    scene.steps = 26_214_400;
    let start = scene.time();

    for _ in 0..100_000 {
        scene.advance();
    }

    assert!((scene.time() - start - 1000.0).abs() < 1e-3);
    for instance in scene.instances() {
        let moved = instance.displacement();
        assert!(moved.y.abs() < 0.5, "y ran away to {}", moved.y);
        assert!(moved.x.abs() < 5.0, "x ran away to {}", moved.x);
    }
}

#[test]
fn test_phase_stays_within_period() {
    let mut scene = create_test_scene();
    scene.steps = u64::from(u32::MAX);
    scene.advance();
    let phase = scene.phase();
    assert!((0.0..kinematics::PHASE_PERIOD as f32 + 1e-3).contains(&phase));
    assert!(scene.time() > 4.0e7);
}

// ============================================================================
// Resize
// ============================================================================

#[test]
fn test_resize_with_height_band() {
    let mut scene = create_test_scene();
    let size = scene.resize(ViewportSize::new(1200, 900), Some(400));
    assert_eq!(size, Some((1200, 400)));
    assert_eq!(scene.camera().aspect(), 3.0);
    assert_eq!(scene.surface_size(), (1200, 400));
}

#[test]
fn test_resize_follows_viewport_without_band() {
    let mut scene = create_test_scene();
    scene.resize(ViewportSize::new(1000, 500), None);
    assert_eq!(scene.surface_size(), (1000, 500));
    assert_eq!(scene.camera().aspect(), 2.0);
}

#[test]
fn test_resize_is_idempotent() {
    let mut once = create_test_scene();
    once.resize(ViewportSize::new(640, 480), Some(400));

    let mut many = once.clone();
    for _ in 0..10 {
        many.resize(ViewportSize::new(640, 480), Some(400));
    }
    assert_eq!(once.camera(), many.camera());
    assert_eq!(once.surface_size(), many.surface_size());
}

#[test]
fn test_empty_viewport_is_ignored() {
    let mut scene = create_test_scene();
    assert_eq!(scene.resize(ViewportSize::new(0, 0), Some(400)), None);
    assert_eq!(scene.surface_size(), (800, 400));
}

// ============================================================================
// Draw list
// ============================================================================

#[test]
fn test_draw_list_orders_transparent_last() {
    let scene = create_test_scene();
    let draw_list = scene.build_draw_list();
    assert_eq!(draw_list.len(), 13);
    assert_eq!(draw_list.transparent_count(), 5);
    assert_eq!(draw_list.lights().len(), 3);

    let items = draw_list.items();
    assert!(items[..8].iter().all(|item| !item.transparent));
    assert!(items[8..].windows(2).all(|w| w[0].view_depth >= w[1].view_depth));
}

#[test]
fn test_take_instances_empties_scene() {
    let mut scene = create_test_scene();
    assert_eq!(scene.take_instances().len(), 13);
    assert!(scene.instances().is_empty());
    assert!(scene.build_draw_list().is_empty());
}
