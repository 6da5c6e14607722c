//! CPU-side resource descriptions handed to the render device.

pub mod geometry;
pub mod material;

pub use geometry::{extrude, ExtrudeParams, SolidGeometry, Vertex, MAX_BEVEL_SEGMENTS};
pub use material::{Color, MaterialSpec, HEART_PALETTE};
