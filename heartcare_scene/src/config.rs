//! Scene configuration
//!
//! All tunables of a mount: layer populations, sampling bounds, camera and
//! surface parameters, extrusion parameters and the animation time step.
//! Defaults reproduce the layered heart backdrop (8 background hearts,
//! 5 foreground hearts, ambient + directional + spot lighting).

use rand::Rng;
use serde::{Deserialize, Serialize};
use crate::error::Result;
use crate::resource::ExtrudeParams;
use crate::scene::LightRig;
use crate::scene_bail;

const SOURCE: &str = "heartcare::Config";

// ===== RANGES AND BOUNDS =====

/// Half-open sampling range `[min, max)`. A degenerate range (`min == max`) always yields `min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Range that always samples `value`
    pub const fn fixed(value: f32) -> Self {
        Self { min: value, max: value }
    }

    /// Symmetric range `[-half_width, half_width)`
    pub const fn symmetric(half_width: f32) -> Self {
        Self { min: -half_width, max: half_width }
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Inclusive containment check (the upper bound is never sampled but is accepted)
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Largest magnitude any sample can have
    pub fn max_abs(&self) -> f32 {
        self.min.abs().max(self.max.abs())
    }

    /// Draw a uniform sample
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.min >= self.max {
            self.min
        } else {
            rng.gen_range(self.min..self.max)
        }
    }
}

/// Position sampling box for one layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionBounds {
    pub x: ValueRange,
    pub y: ValueRange,
    pub z: ValueRange,
}

impl PositionBounds {
    pub fn contains(&self, position: glam::Vec3) -> bool {
        self.x.contains(position.x) && self.y.contains(position.y) && self.z.contains(position.z)
    }
}

/// Kinematic sampling ranges for one layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedBounds {
    /// Per-frame rotation increment, radians (applied independently on X and Y)
    pub rotation: ValueRange,
    /// Float speed multiplier of the vertical oscillation
    pub float_speed: ValueRange,
}

// ===== LAYERS =====

/// Population parameters of one layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    /// Number of hearts in the layer
    pub count: usize,
    pub bounds: PositionBounds,
    pub speed: SpeedBounds,
    /// Uniform scale applied to the extruded heart
    pub scale: f32,
    /// Amplitude factor of the vertical float
    pub float_intensity: f32,
    /// Per-frame horizontal drift amplitude (foreground only)
    pub drift_amplitude: f32,
    /// Material opacity; below 1.0 the material is transparent
    pub opacity: f32,
}

impl LayerConfig {
    /// Wide, far-back, lively layer behind the overlay text
    pub fn background() -> Self {
        Self {
            count: 8,
            bounds: PositionBounds {
                x: ValueRange::new(-10.0, 10.0),
                y: ValueRange::new(-5.0, 5.0),
                z: ValueRange::new(-25.0, -15.0),
            },
            speed: SpeedBounds {
                rotation: ValueRange::symmetric(0.01),
                float_speed: ValueRange::new(0.01, 0.02),
            },
            scale: 0.05,
            float_intensity: 0.1,
            drift_amplitude: 0.0,
            opacity: 1.0,
        }
    }

    /// Narrow, centered, calmer layer in front of the camera focus
    pub fn foreground() -> Self {
        Self {
            count: 5,
            bounds: PositionBounds {
                x: ValueRange::symmetric(6.0 * 0.8),
                y: ValueRange::symmetric(3.0 * 0.8),
                z: ValueRange::new(-3.0, 3.0),
            },
            speed: SpeedBounds {
                rotation: ValueRange::symmetric(0.005),
                float_speed: ValueRange::new(0.005, 0.01),
            },
            scale: 0.045,
            float_intensity: 0.05,
            drift_amplitude: 0.01,
            opacity: 0.9,
        }
    }

    /// A single centered heart spinning in place
    pub fn single() -> Self {
        Self {
            count: 1,
            bounds: PositionBounds {
                x: ValueRange::fixed(-0.25),
                y: ValueRange::fixed(-0.5),
                z: ValueRange::fixed(0.0),
            },
            speed: SpeedBounds {
                rotation: ValueRange::fixed(0.01),
                float_speed: ValueRange::fixed(0.0),
            },
            scale: 0.05,
            float_intensity: 0.0,
            drift_amplitude: 0.0,
            opacity: 1.0,
        }
    }

    /// An empty layer
    pub fn empty() -> Self {
        Self { count: 0, ..Self::foreground() }
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }

    fn validate(&self, name: &str) -> Result<()> {
        for (axis, range) in [("x", self.bounds.x), ("y", self.bounds.y), ("z", self.bounds.z)] {
            if !range.is_valid() {
                scene_bail!(InvalidConfig, SOURCE,
                    "{} bounds.{} is empty or not finite: [{}, {})", name, axis, range.min, range.max);
            }
        }
        if !self.speed.rotation.is_valid() || !self.speed.float_speed.is_valid() {
            scene_bail!(InvalidConfig, SOURCE, "{} speed ranges must satisfy min <= max", name);
        }
        if !(self.scale > 0.0) || !self.scale.is_finite() {
            scene_bail!(InvalidConfig, SOURCE, "{} scale must be > 0, got {}", name, self.scale);
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            scene_bail!(InvalidConfig, SOURCE, "{} opacity must be in [0, 1], got {}", name, self.opacity);
        }
        if self.float_intensity < 0.0 || self.drift_amplitude < 0.0 {
            scene_bail!(InvalidConfig, SOURCE, "{} amplitudes must be >= 0", name);
        }
        Ok(())
    }
}

// ===== CAMERA / SURFACE =====

/// Perspective camera parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Offset of the camera along +Z, looking at the origin
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { fov_degrees: 75.0, near: 0.1, far: 1000.0, distance: 20.0 }
    }
}

/// Render surface parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Fixed surface height; `None` follows the viewport height
    pub height_band: Option<u32>,
    pub alpha: bool,
    pub antialias: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self { height_band: Some(400), alpha: true, antialias: true }
    }
}

// ===== SCENE =====

/// Scene flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneVariant {
    /// One heart, one point light
    Simple,
    /// Background + foreground populations, three-light rig
    Layered,
}

/// Complete configuration of one mount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub variant: SceneVariant,
    pub background: LayerConfig,
    pub foreground: LayerConfig,
    /// Overrides the rig implied by `variant`
    pub light_rig: Option<LightRig>,
    pub camera: CameraConfig,
    pub surface: SurfaceConfig,
    pub extrude: ExtrudeParams,
    /// Time accumulator increment per frame
    pub time_step: f32,
    /// Layout seed; `None` seeds from the clock
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::layered()
    }
}

impl SceneConfig {
    /// Layered backdrop (default)
    pub fn layered() -> Self {
        Self {
            variant: SceneVariant::Layered,
            background: LayerConfig::background(),
            foreground: LayerConfig::foreground(),
            light_rig: None,
            camera: CameraConfig::default(),
            surface: SurfaceConfig::default(),
            extrude: ExtrudeParams::default(),
            time_step: 0.01,
            seed: None,
        }
    }

    /// Single spinning heart
    pub fn simple() -> Self {
        Self {
            variant: SceneVariant::Simple,
            background: LayerConfig::single(),
            foreground: LayerConfig::empty(),
            camera: CameraConfig { distance: 5.0, ..CameraConfig::default() },
            ..Self::layered()
        }
    }

    /// Builder-style seed override
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Lights attached to the scene
    pub fn effective_light_rig(&self) -> LightRig {
        self.light_rig.unwrap_or(match self.variant {
            SceneVariant::Simple => LightRig::SinglePoint,
            SceneVariant::Layered => LightRig::AmbientDirectionalSpot,
        })
    }

    /// Total number of hearts across layers
    pub fn instance_count(&self) -> usize {
        self.background.count + self.foreground.count
    }

    /// Parse a TOML document and validate it
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SceneConfig = toml::from_str(text).map_err(|e| {
            crate::scene_err!(InvalidConfig, SOURCE, "TOML parse error: {}", e)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self)
            .map_err(|e| crate::scene_err!(InvalidConfig, SOURCE, "TOML serialize error: {}", e))
    }

    /// Reject values the scene cannot run with
    pub fn validate(&self) -> Result<()> {
        self.background.validate("background")?;
        self.foreground.validate("foreground")?;
        // Blending order relies on the background being opaque and the foreground not
        if self.background.count > 0 && self.background.is_transparent() {
            scene_bail!(InvalidConfig, SOURCE,
                "background opacity must be 1.0, got {}", self.background.opacity);
        }
        if self.foreground.count > 0 && !self.foreground.is_transparent() {
            scene_bail!(InvalidConfig, SOURCE,
                "foreground opacity must be below 1.0, got {}", self.foreground.opacity);
        }

        if !(self.time_step > 0.0) || !self.time_step.is_finite() {
            scene_bail!(InvalidConfig, SOURCE, "time_step must be > 0, got {}", self.time_step);
        }
        let camera = &self.camera;
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            scene_bail!(InvalidConfig, SOURCE, "fov_degrees must be in (0, 180), got {}", camera.fov_degrees);
        }
        if !(camera.near > 0.0) || camera.near >= camera.far {
            scene_bail!(InvalidConfig, SOURCE,
                "camera planes must satisfy 0 < near < far, got near={} far={}", camera.near, camera.far);
        }
        if self.surface.height_band == Some(0) {
            scene_bail!(InvalidConfig, SOURCE, "surface height_band must be > 0");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
