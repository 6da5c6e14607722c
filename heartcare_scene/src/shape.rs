//! Heart outline construction.
//!
//! The outline is a fixed path: one `MoveTo` followed by six cubic Bézier
//! curves, anchored at (+5, +5). The final curve ends on the start point, so
//! the path is closed implicitly.

use glam::Vec2;

/// Distance under which two outline points are considered identical
const CLOSE_EPSILON: f32 = 1e-4;

/// Finest subdivision of one curve
pub const MAX_CURVE_SEGMENTS: u32 = 256;

/// One drawing instruction of a 2D path
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Vec2),
    CubicCurveTo { c1: Vec2, c2: Vec2, end: Vec2 },
}

impl PathSegment {
    /// Point the pen rests on after this segment
    pub fn end_point(&self) -> Vec2 {
        match *self {
            PathSegment::MoveTo(p) => p,
            PathSegment::CubicCurveTo { end, .. } => end,
        }
    }
}

/// Evaluate a cubic Bézier at `t` in [0, 1]
pub fn cubic_point(p0: Vec2, c1: Vec2, c2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + c1 * (3.0 * u * u * t) + c2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

/// Immutable closed heart silhouette
#[derive(Debug, Clone, PartialEq)]
pub struct HeartOutline {
    segments: Vec<PathSegment>,
}

impl HeartOutline {
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// First pen position
    pub fn start_point(&self) -> Vec2 {
        self.segments.first().map(PathSegment::end_point).unwrap_or(Vec2::ZERO)
    }

    /// Whether the last segment returns to the start point
    pub fn is_closed(&self) -> bool {
        match self.segments.last() {
            Some(last) => last.end_point().distance(self.start_point()) < CLOSE_EPSILON,
            None => false,
        }
    }

    /// Sample the path into a closed polygon.
    ///
    /// Each curve contributes `curve_segments` points (its start excluded). The
    /// closing point is dropped when it coincides with the first one, so the
    /// returned ring never repeats a vertex. `curve_segments` is clamped to
    /// `1..=MAX_CURVE_SEGMENTS`.
    pub fn flatten(&self, curve_segments: u32) -> Vec<Vec2> {
        let divisions = curve_segments.clamp(1, MAX_CURVE_SEGMENTS);
        let mut points = Vec::with_capacity(self.segments.len() * divisions as usize);
        let mut pen = Vec2::ZERO;

        for segment in &self.segments {
            match *segment {
                PathSegment::MoveTo(p) => {
                    pen = p;
                    points.push(p);
                }
                PathSegment::CubicCurveTo { c1, c2, end } => {
                    for step in 1..=divisions {
                        let t = step as f32 / divisions as f32;
                        points.push(cubic_point(pen, c1, c2, end, t));
                    }
                    pen = end;
                }
            }
        }

        if points.len() > 1 {
            let first = points[0];
            if points[points.len() - 1].distance(first) < CLOSE_EPSILON {
                points.pop();
            }
        }
        points
    }

    /// Axis-aligned bounds of the sampled outline
    pub fn bounds(&self, curve_segments: u32) -> (Vec2, Vec2) {
        self.flatten(curve_segments).iter().fold(
            (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)),
            |(min, max), p| (min.min(*p), max.max(*p)),
        )
    }
}

/// Build the heart silhouette
pub fn build_heart_outline() -> HeartOutline {
    let (x, y) = (0.0_f32, 0.0_f32);
    let p = |px: f32, py: f32| Vec2::new(x + px, y + py);
    let curve = |c1: Vec2, c2: Vec2, end: Vec2| PathSegment::CubicCurveTo { c1, c2, end };

    HeartOutline {
        segments: vec![
            PathSegment::MoveTo(p(5.0, 5.0)),
            curve(p(5.0, 5.0), p(4.0, 0.0), p(0.0, 0.0)),
            curve(p(-6.0, 0.0), p(-6.0, 7.0), p(-6.0, 7.0)),
            curve(p(-6.0, 11.0), p(-3.0, 15.4), p(5.0, 19.0)),
            curve(p(12.0, 15.4), p(16.0, 11.0), p(16.0, 7.0)),
            curve(p(16.0, 7.0), p(16.0, 0.0), p(10.0, 0.0)),
            curve(p(7.0, 0.0), p(5.0, 5.0), p(5.0, 5.0)),
        ],
    }
}

#[cfg(test)]
#[path = "shape_tests.rs"]
mod tests;
