//! Line and polygon clipping.
//!
//! Lines are clipped with Cohen-Sutherland outcodes. Polygons use
//! Sutherland-Hodgman, one boundary at a time, either against the viewport
//! rectangle in screen space or against the six canonical planes in
//! homogeneous clip space. Per-vertex data rides along with the position and
//! is interpolated at every cut.

use crate::geometry::Rect;
use crate::math::{Vector2, Vector3, Vector4};

pub const INSIDE: u8 = 0b0000;
pub const LEFT: u8 = 0b0001;
pub const RIGHT: u8 = 0b0010;
pub const BOTTOM: u8 = 0b0100;
pub const TOP: u8 = 0b1000;

/// Endpoint value reported for a rejected segment.
pub fn rejected() -> Vector2 {
    Vector2::new(-1.0, -1.0)
}

/// Which sides of `[min, max]` the point lies beyond.
pub fn outcode(p: Vector2, min: Vector2, max: Vector2) -> u8 {
    let mut code = INSIDE;
    if p.x < min.x {
        code |= LEFT;
    } else if p.x > max.x {
        code |= RIGHT;
    }
    if p.y < min.y {
        code |= BOTTOM;
    } else if p.y > max.y {
        code |= TOP;
    }
    code
}

/// Cohen-Sutherland clip of the segment `p0 -> p1` against `[min, max]`.
///
/// A segment with no visible part comes back as [`rejected()`] on both ends.
pub fn clip_line(p0: Vector2, p1: Vector2, min: Vector2, max: Vector2) -> (Vector2, Vector2) {
    let (mut p0, mut p1) = (p0, p1);
    let mut code0 = outcode(p0, min, max);
    let mut code1 = outcode(p1, min, max);

    loop {
        if code0 | code1 == INSIDE {
            return (p0, p1);
        }
        if code0 & code1 != INSIDE {
            return (rejected(), rejected());
        }

        let out = if code0 != INSIDE { code0 } else { code1 };
        let (dx, dy) = (p1.x - p0.x, p1.y - p0.y);
        let point = if out & TOP != 0 {
            Vector2::new(p0.x + dx * (max.y - p0.y) / dy, max.y)
        } else if out & BOTTOM != 0 {
            Vector2::new(p0.x + dx * (min.y - p0.y) / dy, min.y)
        } else if out & RIGHT != 0 {
            Vector2::new(max.x, p0.y + dy * (max.x - p0.x) / dx)
        } else {
            Vector2::new(min.x, p0.y + dy * (min.x - p0.x) / dx)
        };

        if out == code0 {
            p0 = point;
            code0 = outcode(p0, min, max);
        } else {
            p1 = point;
            code1 = outcode(p1, min, max);
        }
    }
}

pub fn is_rejected(segment: (Vector2, Vector2)) -> bool {
    segment.0 == rejected() && segment.1 == rejected()
}

/// A polygon corner on its way through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipVertex {
    /// Homogeneous clip-space position, or `(x, y, depth, 1)` once on screen.
    pub position: Vector4,
    /// World-space position, kept for per-pixel lighting.
    pub world: Vector3,
    /// Shading payload: a color for Gouraud, a normal for Phong.
    pub attribute: Vector3,
}

impl ClipVertex {
    pub fn new(position: Vector4, world: Vector3, attribute: Vector3) -> Self {
        Self {
            position,
            world,
            attribute,
        }
    }

    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            position: self.position.lerp(&other.position, t),
            world: self.world.lerp(&other.world, t),
            attribute: self.attribute.lerp(&other.attribute, t),
        }
    }
}

/// Keep the part of `polygon` where `distance >= 0`.
fn clip_against<F>(polygon: &[ClipVertex], distance: F) -> Vec<ClipVertex>
where
    F: Fn(&ClipVertex) -> f64,
{
    let n = polygon.len();
    let mut output = Vec::with_capacity(n + 2);
    for i in 0..n {
        let current = &polygon[i];
        let next = &polygon[(i + 1) % n];
        let d1 = distance(current);
        let d2 = distance(next);

        if d1 >= 0.0 {
            output.push(*current);
            if d2 < 0.0 {
                output.push(current.lerp(next, d1 / (d1 - d2)));
            }
        } else if d2 >= 0.0 {
            output.push(current.lerp(next, d1 / (d1 - d2)));
        }
    }
    output
}

/// Boundaries of a screen-space rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Bottom,
    Top,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Bottom, Edge::Top];

    /// Positive inside `rect`.
    pub fn signed_distance(&self, rect: &Rect, v: &ClipVertex) -> f64 {
        let p = v.position;
        match self {
            Edge::Left => p.x - rect.min[0],
            Edge::Right => rect.max[0] - p.x,
            Edge::Bottom => p.y - rect.min[1],
            Edge::Top => rect.max[1] - p.y,
        }
    }
}

/// Clip a screen-space polygon to `rect`. Fewer than three vertices in the
/// result means nothing is left.
pub fn clip_polygon_2d(polygon: &[ClipVertex], rect: Rect) -> Vec<ClipVertex> {
    let mut result = polygon.to_vec();
    for edge in Edge::ALL {
        if result.len() < 3 {
            return Vec::new();
        }
        result = clip_against(&result, |v| edge.signed_distance(&rect, v));
    }
    result
}

/// The six planes of the canonical homogeneous volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipPlane {
    /// `x >= -w`
    Left,
    /// `x <= w`
    Right,
    /// `y >= -w`
    Bottom,
    /// `y <= w`
    Top,
    /// `z >= 0`
    Near,
    /// `z <= w`
    Far,
}

impl ClipPlane {
    pub const ALL: [ClipPlane; 6] = [
        ClipPlane::Near,
        ClipPlane::Far,
        ClipPlane::Left,
        ClipPlane::Right,
        ClipPlane::Bottom,
        ClipPlane::Top,
    ];

    /// Positive inside the volume.
    pub fn signed_distance(&self, v: &ClipVertex) -> f64 {
        let p = v.position;
        match self {
            ClipPlane::Left => p.w + p.x,
            ClipPlane::Right => p.w - p.x,
            ClipPlane::Bottom => p.w + p.y,
            ClipPlane::Top => p.w - p.y,
            ClipPlane::Near => p.z,
            ClipPlane::Far => p.w - p.z,
        }
    }
}

/// Clip a clip-space polygon to the canonical volume.
pub fn clip_polygon_3d(polygon: &[ClipVertex]) -> Vec<ClipVertex> {
    let mut result = polygon.to_vec();
    for plane in ClipPlane::ALL {
        if result.len() < 3 {
            return Vec::new();
        }
        result = clip_against(&result, |v| plane.signed_distance(v));
    }
    result
}
