use glam::{Mat4, Vec3};
use super::*;

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_camera_from_default_config() {
    let camera = PerspectiveCamera::new(&CameraConfig::default(), 2.0);
    assert!((camera.fov_degrees() - 75.0).abs() < 1e-4);
    assert_eq!(camera.aspect(), 2.0);
    assert_eq!(camera.near(), 0.1);
    assert_eq!(camera.far(), 1000.0);
    assert_eq!(camera.position(), Vec3::new(0.0, 0.0, 20.0));
}

#[test]
fn test_invalid_initial_aspect_falls_back_to_square() {
    let camera = PerspectiveCamera::new(&CameraConfig::default(), f32::NAN);
    assert_eq!(camera.aspect(), 1.0);
}

// ============================================================================
// Matrices
// ============================================================================

#[test]
fn test_matrices_match_glam() {
    let camera = PerspectiveCamera::new(&CameraConfig::default(), 1.5);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 20.0), Vec3::ZERO, Vec3::Y);
    let proj = Mat4::perspective_rh(75f32.to_radians(), 1.5, 0.1, 1000.0);

    assert_eq!(camera.view_matrix(), view);
    assert_eq!(camera.projection_matrix(), proj);
    assert_eq!(camera.view_projection_matrix(), proj * view);
}

#[test]
fn test_view_depth_along_negative_z() {
    let camera = PerspectiveCamera::new(&CameraConfig::default(), 1.0);
    assert!((camera.view_depth(Vec3::ZERO) - 20.0).abs() < 1e-5);
    assert!((camera.view_depth(Vec3::new(3.0, -2.0, -20.0)) - 40.0).abs() < 1e-5);
    assert!(camera.view_depth(Vec3::new(0.0, 0.0, 25.0)) < 0.0);
}

// ============================================================================
// Aspect
// ============================================================================

#[test]
fn test_set_aspect() {
    let mut camera = PerspectiveCamera::new(&CameraConfig::default(), 1.0);
    camera.set_aspect(1280.0 / 400.0);
    assert_eq!(camera.aspect(), 3.2);
}

#[test]
fn test_set_aspect_ignores_degenerate_values() {
    let mut camera = PerspectiveCamera::new(&CameraConfig::default(), 2.0);
    camera.set_aspect(0.0);
    camera.set_aspect(f32::INFINITY);
    camera.set_aspect(-1.0);
    assert_eq!(camera.aspect(), 2.0);
}
