//! Volumetric mesh factory.
//!
//! Extrudes a closed 2D outline along +Z into a solid with optional
//! quarter-round bevels on both faces.
//!
//! # Ring layout
//!
//! ```text
//! z = -bevel_thickness   front cap (outline, no inset)
//!   ... bevel rings, offset grows with sin(t * PI/2)
//! z = 0                  body start (offset = bevel_size)
//! z = depth              body end   (offset = bevel_size)
//!   ... bevel rings, mirrored
//! z = depth + thickness  back cap
//! ```
//!
//! Caps get their own vertices (flat normals) and share one ear-clipped
//! triangulation of the outline, since every ring is an offset of the same
//! contour and keeps its topology.

use std::f32::consts::FRAC_PI_2;
use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use crate::error::Result;
use crate::scene_bail;
use crate::shape::{HeartOutline, MAX_CURVE_SEGMENTS};

const SOURCE: &str = "heartcare::Extrude";

/// Finest bevel profile
pub const MAX_BEVEL_SEGMENTS: u32 = 256;

/// Upper bound on the miter scale at sharp corners (the heart's top cusp)
const MAX_MITER_SCALE: f32 = 2.0;

// ============================================================================
// PARAMETERS
// ============================================================================

/// Extrusion settings. Bevel values are ignored when `bevel_enabled` is false.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtrudeParams {
    pub depth: f32,
    pub bevel_enabled: bool,
    pub bevel_thickness: f32,
    pub bevel_size: f32,
    pub bevel_segments: u32,
    /// Samples per cubic curve when flattening the outline
    pub curve_segments: u32,
}

impl Default for ExtrudeParams {
    fn default() -> Self {
        Self {
            depth: 2.0,
            bevel_enabled: true,
            bevel_thickness: 1.0,
            bevel_size: 1.0,
            bevel_segments: 3,
            curve_segments: 12,
        }
    }
}

impl ExtrudeParams {
    /// Flat slab without bevels
    pub fn flat(depth: f32) -> Self {
        Self {
            depth,
            bevel_enabled: false,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.depth > 0.0) || !self.depth.is_finite() {
            scene_bail!(InitializationFailed, SOURCE, "extrude depth must be > 0, got {}", self.depth);
        }
        if !(1..=MAX_CURVE_SEGMENTS).contains(&self.curve_segments) {
            scene_bail!(InitializationFailed, SOURCE,
                "curve_segments must be in 1..={}, got {}", MAX_CURVE_SEGMENTS, self.curve_segments);
        }
        if self.bevel_enabled {
            if !(self.bevel_thickness >= 0.0) || !(self.bevel_size >= 0.0) {
                scene_bail!(InitializationFailed, SOURCE,
                    "bevel thickness/size must be >= 0, got {}/{}", self.bevel_thickness, self.bevel_size);
            }
            if !(1..=MAX_BEVEL_SEGMENTS).contains(&self.bevel_segments) {
                scene_bail!(InitializationFailed, SOURCE,
                    "bevel_segments must be in 1..={} when bevel is enabled, got {}",
                    MAX_BEVEL_SEGMENTS, self.bevel_segments);
            }
        }
        Ok(())
    }

    /// (z, outward offset) of every ring, front to back
    fn rings(&self) -> Vec<(f32, f32)> {
        if !self.bevel_enabled {
            return vec![(0.0, 0.0), (self.depth, 0.0)];
        }

        let segments = self.bevel_segments;
        let profile = |b: u32| {
            let t = b as f32 / segments as f32;
            let angle = t * FRAC_PI_2;
            (self.bevel_thickness * angle.cos(), self.bevel_size * angle.sin())
        };

        let mut rings = Vec::with_capacity(2 * segments as usize + 2);
        for b in 0..segments {
            let (z, offset) = profile(b);
            rings.push((-z, offset));
        }
        rings.push((0.0, self.bevel_size));
        rings.push((self.depth, self.bevel_size));
        for b in (0..segments).rev() {
            let (z, offset) = profile(b);
            rings.push((self.depth + z, offset));
        }
        rings
    }
}

// ============================================================================
// GEOMETRY
// ============================================================================

/// Interleaved vertex uploaded to the device
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position: position.to_array(), normal: normal.to_array() }
    }
}

/// Extruded solid: CPU-side vertex/index data plus the parameters it was built from.
///
/// Once uploaded, the device copy is owned by exactly one instance and must be
/// disposed through the device exactly once.
#[derive(Debug, Clone)]
pub struct SolidGeometry {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    params: ExtrudeParams,
    contour_len: usize,
    ring_count: usize,
    bounds_min: Vec3,
    bounds_max: Vec3,
}

impl SolidGeometry {
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn params(&self) -> &ExtrudeParams {
        &self.params
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of points in the flattened outline
    pub fn contour_len(&self) -> usize {
        self.contour_len
    }

    /// Number of contour rings along the extrusion axis (caps included)
    pub fn ring_count(&self) -> usize {
        self.ring_count
    }

    /// Local-space bounds (min, max)
    pub fn bounds(&self) -> (Vec3, Vec3) {
        (self.bounds_min, self.bounds_max)
    }

    /// Raw vertex buffer contents
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index buffer contents (u32 indices)
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Extrude `outline` into a solid.
///
/// # Errors
///
/// `InitializationFailed` when the parameters are invalid or the outline
/// cannot be triangulated (fewer than three distinct points).
pub fn extrude(outline: &HeartOutline, params: &ExtrudeParams) -> Result<SolidGeometry> {
    params.validate()?;

    let mut contour = outline.flatten(params.curve_segments);
    if contour.len() < 3 {
        scene_bail!(InitializationFailed, SOURCE,
            "outline flattens to {} points, need at least 3", contour.len());
    }
    if signed_area(&contour) < 0.0 {
        contour.reverse();
    }

    let cap_triangles = triangulate(&contour);
    if cap_triangles.is_empty() {
        scene_bail!(InitializationFailed, SOURCE, "outline has no area");
    }

    let directions = vertex_directions(&contour);
    let rings = params.rings();
    let n = contour.len();

    let mut vertices = Vec::with_capacity(n * (rings.len() + 2));
    let mut indices = Vec::with_capacity(cap_triangles.len() * 6 + n * (rings.len() - 1) * 6);

    let ring_point = |ring: (f32, f32), i: usize| {
        let p = contour[i] + directions[i] * ring.1;
        Vec3::new(p.x, p.y, ring.0)
    };

    // Front cap (faces -Z): reversed winding
    let front = rings[0];
    for i in 0..n {
        vertices.push(Vertex::new(ring_point(front, i), Vec3::NEG_Z));
    }
    for tri in &cap_triangles {
        indices.extend_from_slice(&[tri[0], tri[2], tri[1]]);
    }

    // Back cap (faces +Z)
    let back = rings[rings.len() - 1];
    let base = vertices.len() as u32;
    for i in 0..n {
        vertices.push(Vertex::new(ring_point(back, i), Vec3::Z));
    }
    for tri in &cap_triangles {
        indices.extend_from_slice(&[base + tri[0], base + tri[1], base + tri[2]]);
    }

    // Side walls
    let side_base = vertices.len() as u32;
    for (r, &ring) in rings.iter().enumerate() {
        let prev = rings[r.saturating_sub(1)];
        let next = rings[(r + 1).min(rings.len() - 1)];
        let (d_z, d_offset) = (next.0 - prev.0, next.1 - prev.1);
        let profile = Vec2::new(d_z, -d_offset).normalize_or_zero();
        for i in 0..n {
            let dir = directions[i].normalize_or_zero();
            let normal = Vec3::new(dir.x * profile.x, dir.y * profile.x, profile.y).normalize_or_zero();
            vertices.push(Vertex::new(ring_point(ring, i), normal));
        }
    }
    let n32 = n as u32;
    for r in 0..(rings.len() as u32 - 1) {
        for j in 0..n32 {
            let j1 = (j + 1) % n32;
            let a = side_base + r * n32 + j;
            let b = side_base + r * n32 + j1;
            let c = side_base + (r + 1) * n32 + j1;
            let d = side_base + (r + 1) * n32 + j;
            indices.extend_from_slice(&[a, b, c, a, c, d]);
        }
    }

    let (bounds_min, bounds_max) = vertices.iter().fold(
        (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)),
        |(min, max), v| {
            let p = Vec3::from_array(v.position);
            (min.min(p), max.max(p))
        },
    );

    Ok(SolidGeometry {
        vertices,
        indices,
        params: *params,
        contour_len: n,
        ring_count: rings.len(),
        bounds_min,
        bounds_max,
    })
}

// ============================================================================
// POLYGON HELPERS
// ============================================================================

/// Shoelace area; positive for counter-clockwise rings
pub(crate) fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum::<f32>()
        * 0.5
}

/// Outward miter direction per vertex of a counter-clockwise ring
fn vertex_directions(points: &[Vec2]) -> Vec<Vec2> {
    let n = points.len();
    let edge_normal = |a: Vec2, b: Vec2| {
        let d = (b - a).normalize_or_zero();
        Vec2::new(d.y, -d.x)
    };

    (0..n)
        .map(|i| {
            let prev = points[(i + n - 1) % n];
            let cur = points[i];
            let next = points[(i + 1) % n];
            let n0 = edge_normal(prev, cur);
            let n1 = edge_normal(cur, next);
            let miter = (n0 + n1).normalize_or_zero();
            if miter == Vec2::ZERO {
                return n0;
            }
            let cos = miter.dot(n0).max(1.0 / MAX_MITER_SCALE);
            miter / cos
        })
        .collect()
}

fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let d0 = (b - a).perp_dot(p - a);
    let d1 = (c - b).perp_dot(p - b);
    let d2 = (a - c).perp_dot(p - c);
    d0 >= 0.0 && d1 >= 0.0 && d2 >= 0.0
}

/// Ear-clipping triangulation of a simple counter-clockwise polygon.
///
/// Returns counter-clockwise index triples into `points`.
pub(crate) fn triangulate(points: &[Vec2]) -> Vec<[u32; 3]> {
    let mut remaining: Vec<usize> = (0..points.len()).collect();
    let mut triangles = Vec::with_capacity(points.len().saturating_sub(2));
    if points.len() < 3 {
        return triangles;
    }

    while remaining.len() > 3 {
        let m = remaining.len();
        let ear = (0..m).find(|&i| {
            let (ia, ib, ic) = (remaining[(i + m - 1) % m], remaining[i], remaining[(i + 1) % m]);
            let (a, b, c) = (points[ia], points[ib], points[ic]);
            if (b - a).perp_dot(c - b) <= f32::EPSILON {
                return false;
            }
            !remaining.iter().any(|&k| {
                k != ia && k != ib && k != ic && point_in_triangle(points[k], a, b, c)
            })
        });

        // Degenerate input: clip the first vertex so the loop always terminates
        let i = ear.unwrap_or(0);
        let (ia, ib, ic) = (remaining[(i + m - 1) % m], remaining[i], remaining[(i + 1) % m]);
        if (points[ib] - points[ia]).perp_dot(points[ic] - points[ib]) > 0.0 {
            triangles.push([ia as u32, ib as u32, ic as u32]);
        }
        remaining.remove(i);
    }

    let (a, b, c) = (points[remaining[0]], points[remaining[1]], points[remaining[2]]);
    if (b - a).perp_dot(c - b) > 0.0 {
        triangles.push([remaining[0] as u32, remaining[1] as u32, remaining[2] as u32]);
    }
    triangles
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;
