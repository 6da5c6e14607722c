//! Resource-level material description.
//!
//! A MaterialSpec is pure data (Phong parameters + transparency). The device
//! creates its own GPU object from it; the instance that requested the upload
//! owns the resulting handle.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// 24-bit RGB color stored as `0xRRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color(0xffffff);

    /// Normalized linear components in [0, 1]
    pub fn to_rgb(self) -> [f32; 3] {
        let r = ((self.0 >> 16) & 0xff) as f32 / 255.0;
        let g = ((self.0 >> 8) & 0xff) as f32 / 255.0;
        let b = (self.0 & 0xff) as f32 / 255.0;
        [r, g, b]
    }
}

/// Heart tints, one picked uniformly per instance
pub const HEART_PALETTE: [Color; 5] = [
    Color(0xff4d6d),
    Color(0xff758f),
    Color(0xd81b60),
    Color(0xad1457),
    Color(0xff80ab),
];

/// Phong surface description of one heart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    pub base_color: Color,
    pub shininess: f32,
    pub specular_color: Color,
    pub transparent: bool,
    pub opacity: f32,
}

impl MaterialSpec {
    pub const SHININESS: f32 = 50.0;
    pub const SPECULAR: Color = Color(0x444444);

    /// Opaque heart material
    pub fn opaque(base_color: Color) -> Self {
        Self {
            base_color,
            shininess: Self::SHININESS,
            specular_color: Self::SPECULAR,
            transparent: false,
            opacity: 1.0,
        }
    }

    /// Material with the given opacity; anything below 1.0 is flagged transparent
    pub fn with_opacity(base_color: Color, opacity: f32) -> Self {
        let opacity = opacity.clamp(0.0, 1.0);
        Self {
            transparent: opacity < 1.0,
            opacity,
            ..Self::opaque(base_color)
        }
    }

    /// Pick a palette color uniformly at random
    pub fn random_palette_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
        HEART_PALETTE[rng.gen_range(0..HEART_PALETTE.len())]
    }
}

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;
