/// Scene lights and the preset rigs they come in

use std::f32::consts::FRAC_PI_4;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use crate::resource::Color;

/// A light source attached to the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Ambient {
        color: Color,
        intensity: f32,
    },
    /// Parallel light shining from `position` toward the origin
    Directional {
        color: Color,
        intensity: f32,
        position: Vec3,
    },
    Spot {
        color: Color,
        intensity: f32,
        position: Vec3,
        /// Cone half-angle in radians
        angle: f32,
        penumbra: f32,
        decay: f32,
        distance: f32,
    },
    Point {
        color: Color,
        intensity: f32,
        position: Vec3,
    },
}

impl Light {
    pub fn ambient(color: Color, intensity: f32) -> Self {
        Light::Ambient { color, intensity }
    }

    pub fn directional(color: Color, intensity: f32, position: Vec3) -> Self {
        Light::Directional { color, intensity, position }
    }

    pub fn point(color: Color, intensity: f32, position: Vec3) -> Self {
        Light::Point { color, intensity, position }
    }

    pub fn intensity(&self) -> f32 {
        match self {
            Light::Ambient { intensity, .. }
            | Light::Directional { intensity, .. }
            | Light::Spot { intensity, .. }
            | Light::Point { intensity, .. } => *intensity,
        }
    }

    /// World position, `None` for ambient light
    pub fn position(&self) -> Option<Vec3> {
        match self {
            Light::Ambient { .. } => None,
            Light::Directional { position, .. }
            | Light::Spot { position, .. }
            | Light::Point { position, .. } => Some(*position),
        }
    }
}

/// Preset combinations of lights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightRig {
    AmbientOnly,
    AmbientDirectional,
    AmbientDirectionalSpot,
    /// One white point light, used by the single-heart scene
    SinglePoint,
}

impl LightRig {
    /// Lights of the rig, each appearing once
    pub fn lights(self) -> Vec<Light> {
        let ambient = Light::ambient(Color::WHITE, 0.5);
        let directional = Light::directional(Color::WHITE, 1.0, Vec3::new(5.0, 5.0, 5.0));
        let spot = Light::Spot {
            color: Color::WHITE,
            intensity: 1.0,
            position: Vec3::new(0.0, 0.0, 10.0),
            angle: FRAC_PI_4,
            penumbra: 0.1,
            decay: 2.0,
            distance: 200.0,
        };

        match self {
            LightRig::AmbientOnly => vec![ambient],
            LightRig::AmbientDirectional => vec![ambient, directional],
            LightRig::AmbientDirectionalSpot => vec![ambient, directional, spot],
            LightRig::SinglePoint => {
                vec![Light::point(Color::WHITE, 1.0, Vec3::new(10.0, 10.0, 10.0))]
            }
        }
    }
}

#[cfg(test)]
#[path = "light_tests.rs"]
mod tests;
