//! Per-frame motion rules
//!
//! Every frame each heart spins by its rotation speeds and floats vertically
//! along a sine of the scene time. Foreground hearts also drift sideways at
//! half the float frequency.

use std::f32::consts::TAU;
use glam::Vec2;
use super::instance::{AnimationParams, HeartInstance, Layer, Transform};

/// Common period of the float (`sin t`) and drift (`sin t/2`) terms
pub const PHASE_PERIOD: f64 = 4.0 * std::f64::consts::PI;

/// Apply one frame of motion at scene time (or phase) `time`
pub fn step(transform: &mut Transform, params: &AnimationParams, time: f32) {
    transform.rotation.x = wrap_angle(transform.rotation.x + params.rotation_speed_x);
    transform.rotation.y = wrap_angle(transform.rotation.y + params.rotation_speed_y);

    transform.position.y +=
        (time + params.float_offset).sin() * params.float_speed * params.float_intensity;

    if params.layer == Layer::Foreground {
        transform.position.x += (time * 0.5 + params.float_offset).sin() * params.drift_amplitude;
    }
}

/// Normalize into [0, TAU)
fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to TAU
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Step every instance
pub fn advance(instances: &mut [HeartInstance], time: f32) {
    for instance in instances {
        step(&mut instance.transform, &instance.animation, time);
    }
}

/// Largest possible |dx| and |dy| after `frames` steps
///
/// Each step moves by at most the amplitude of its sine term, whatever the
/// time values are.
pub fn displacement_bound(frames: usize, params: &AnimationParams) -> Vec2 {
    let frames = frames as f32;
    let dy = frames * (params.float_speed * params.float_intensity).abs();
    let dx = match params.layer {
        Layer::Foreground => frames * params.drift_amplitude.abs(),
        Layer::Background => 0.0,
    };
    Vec2::new(dx, dy)
}

#[cfg(test)]
#[path = "kinematics_tests.rs"]
mod tests;
