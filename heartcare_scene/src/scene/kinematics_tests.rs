use super::*;
use glam::Vec3;

fn params(layer: Layer) -> AnimationParams {
    AnimationParams {
        rotation_speed_x: 0.01,
        rotation_speed_y: -0.02,
        float_speed: 0.015,
        float_offset: 1.0,
        float_intensity: 0.1,
        drift_amplitude: 0.01,
        layer,
    }
}

#[test]
fn test_step_rotates_and_floats() {
    let mut transform = Transform::default();
    let p = params(Layer::Background);
    step(&mut transform, &p, 0.01);

    assert!((transform.rotation.x - 0.01).abs() < 1e-6);
    // Negative speed wraps into [0, TAU)
    assert!((transform.rotation.y - (TAU - 0.02)).abs() < 1e-5);
    let expected_dy = (0.01f32 + 1.0).sin() * 0.015 * 0.1;
    assert!((transform.position.y - expected_dy).abs() < 1e-7);
}

#[test]
fn test_background_never_drifts_horizontally() {
    let mut transform = Transform::default();
    let p = params(Layer::Background);
    for frame in 1..=200 {
        step(&mut transform, &p, frame as f32 * 0.01);
    }
    assert_eq!(transform.position.x, 0.0);
    assert_eq!(transform.position.z, 0.0);
}

#[test]
fn test_foreground_drifts_horizontally() {
    let mut transform = Transform::default();
    let p = params(Layer::Foreground);
    step(&mut transform, &p, 0.01);
    let expected_dx = (0.01f32 * 0.5 + 1.0).sin() * 0.01;
    assert!((transform.position.x - expected_dx).abs() < 1e-7);
}

#[test]
fn test_rotation_stays_normalized() {
    let mut transform = Transform::default();
    let p = AnimationParams { rotation_speed_x: 1.0, rotation_speed_y: -1.0, ..params(Layer::Background) };
    for frame in 0..10_000 {
        step(&mut transform, &p, frame as f32);
        assert!((0.0..TAU).contains(&transform.rotation.x));
        assert!((0.0..TAU).contains(&transform.rotation.y));
    }
}

#[test]
fn test_displacement_bound_by_layer() {
    let bg = displacement_bound(100, &params(Layer::Background));
    assert_eq!(bg.x, 0.0);
    assert!((bg.y - 100.0 * 0.015 * 0.1).abs() < 1e-6);

    let fg = displacement_bound(100, &params(Layer::Foreground));
    assert!((fg.x - 1.0).abs() < 1e-6);
    assert_eq!(displacement_bound(0, &params(Layer::Foreground)), glam::Vec2::ZERO);
}

#[test]
fn test_simulated_motion_respects_bound() {
    let p = params(Layer::Foreground);
    let mut transform = Transform { position: Vec3::new(1.0, 2.0, 3.0), ..Transform::default() };
    let start = transform.position;
    let frames = 500;
    for frame in 1..=frames {
        step(&mut transform, &p, frame as f32 * 0.01);
    }
    let bound = displacement_bound(frames, &p);
    let moved = transform.position - start;
    assert!(moved.x.abs() <= bound.x + 1e-4);
    assert!(moved.y.abs() <= bound.y + 1e-4);
}
