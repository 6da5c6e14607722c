/// Heart instances: one placed, independently animated copy of the heart
///
/// Each instance exclusively owns one uploaded geometry and one uploaded
/// material. Only the transform changes after population.

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use crate::render::{GeometryKey, MaterialKey};
use crate::resource::MaterialSpec;

/// Population an instance belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Background,
    Foreground,
}

/// Position, rotation on X and Y, and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles around X and Y, radians
    pub rotation: Vec2,
    pub scale: Vec3,
}

impl Transform {
    /// Local-to-world matrix (XYZ Euler order)
    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, 0.0);
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec2::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// Per-instance kinematic parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationParams {
    /// Radians added to rotation.x every frame
    pub rotation_speed_x: f32,
    /// Radians added to rotation.y every frame
    pub rotation_speed_y: f32,
    pub float_speed: f32,
    /// Phase of the float/drift sine waves
    pub float_offset: f32,
    /// Layer-dependent amplitude factor of the vertical float
    pub float_intensity: f32,
    /// Horizontal drift amplitude; only foreground instances drift
    pub drift_amplitude: f32,
    pub layer: Layer,
}

/// One heart in the scene
#[derive(Debug, Clone, PartialEq)]
pub struct HeartInstance {
    pub(crate) geometry: GeometryKey,
    pub(crate) material: MaterialKey,
    pub(crate) material_spec: MaterialSpec,
    pub(crate) transform: Transform,
    pub(crate) initial_position: Vec3,
    pub(crate) animation: AnimationParams,
}

impl HeartInstance {
    pub(crate) fn new(
        geometry: GeometryKey,
        material: MaterialKey,
        material_spec: MaterialSpec,
        transform: Transform,
        animation: AnimationParams,
    ) -> Self {
        Self {
            geometry,
            material,
            material_spec,
            transform,
            initial_position: transform.position,
            animation,
        }
    }

    pub fn geometry(&self) -> GeometryKey {
        self.geometry
    }

    pub fn material(&self) -> MaterialKey {
        self.material
    }

    pub fn material_spec(&self) -> &MaterialSpec {
        &self.material_spec
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Position at population time
    pub fn initial_position(&self) -> Vec3 {
        self.initial_position
    }

    pub fn animation(&self) -> &AnimationParams {
        &self.animation
    }

    pub fn layer(&self) -> Layer {
        self.animation.layer
    }

    /// Offset from the initial position
    pub fn displacement(&self) -> Vec3 {
        self.transform.position - self.initial_position
    }
}
