/// PerspectiveCamera - fixed-FOV camera looking down -Z at the origin
///
/// Unlike a passive camera, this one derives its matrices from a handful of
/// parameters. Only the aspect ratio changes after construction (resize).

use glam::{Mat4, Vec3};
use crate::config::CameraConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    fov_y: f32,
    aspect: f32,
    near: f32,
    far: f32,
    position: Vec3,
    target: Vec3,
}

impl PerspectiveCamera {
    /// Camera at `(0, 0, config.distance)` looking at the origin
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            fov_y: config.fov_degrees.to_radians(),
            aspect: sanitize_aspect(aspect, 1.0),
            near: config.near,
            far: config.far,
            position: Vec3::new(0.0, 0.0, config.distance),
            target: Vec3::ZERO,
        }
    }

    // ===== GETTERS =====

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn fov_degrees(&self) -> f32 {
        self.fov_y.to_degrees()
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Combined view-projection matrix (projection * view)
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Signed distance of `point` in front of the camera along its view axis
    pub fn view_depth(&self, point: Vec3) -> f32 {
        let forward = (self.target - self.position).normalize_or_zero();
        (point - self.position).dot(forward)
    }

    // ===== SETTERS =====

    /// Update the aspect ratio; degenerate values keep the previous one
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = sanitize_aspect(aspect, self.aspect);
    }
}

fn sanitize_aspect(aspect: f32, fallback: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        fallback
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
