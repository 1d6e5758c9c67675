//! Scanline polygon fill and Bresenham lines.
//!
//! Polygons arrive in screen space as [`ClipVertex`] lists whose position is
//! `(x, y, depth, 1)`. Rows are sampled at integer `y`; each edge covers the
//! half-open range `[y_low, y_high)` so shared vertices are not counted twice.
//! A span between crossings `xl` and `xr` fills pixels `ceil(xl)..ceil(xr)`.
//! Screen `x` and `y` are first snapped to [`SUBPIXEL_STEPS`] positions per
//! pixel, so an edge clipped onto a pixel boundary stays on it.

use super::buffers::{FrameBuffers, Rgba};
use super::shading::{Fragment, FragmentShader};
use crate::clip::ClipVertex;
use crate::geometry::{polygon_signed_area, Winding};
use crate::math::{lerp, Vector3};

/// Subpixel grid resolution used for scan conversion.
pub const SUBPIXEL_STEPS: f64 = 256.0;

fn snap(v: &ClipVertex) -> ClipVertex {
    let mut snapped = *v;
    snapped.position.x = (v.position.x * SUBPIXEL_STEPS).round() / SUBPIXEL_STEPS;
    snapped.position.y = (v.position.y * SUBPIXEL_STEPS).round() / SUBPIXEL_STEPS;
    snapped
}

/// Where an edge meets the current scanline.
#[derive(Debug, Clone, Copy)]
struct Crossing {
    x: f64,
    depth: f64,
    world: Vector3,
    attribute: Vector3,
}

impl Crossing {
    fn between(a: &ClipVertex, b: &ClipVertex, y: f64) -> Self {
        let t = (y - a.position.y) / (b.position.y - a.position.y);
        Self {
            x: lerp(a.position.x, b.position.x, t),
            depth: lerp(a.position.z, b.position.z, t),
            world: a.world.lerp(&b.world, t),
            attribute: a.attribute.lerp(&b.attribute, t),
        }
    }
}

/// Fill a screen-space polygon, shading every covered pixel. Returns the
/// number of pixels that passed the depth test.
pub fn fill_polygon<S: FragmentShader>(
    buffers: &mut FrameBuffers,
    polygon: &[ClipVertex],
    shader: &S,
) -> usize {
    if polygon.len() < 3 {
        return 0;
    }
    let polygon: Vec<ClipVertex> = polygon.iter().map(snap).collect();
    let points: Vec<Vector3> = polygon.iter().map(|v| v.position.xyz()).collect();
    if Winding::from_area(polygon_signed_area(&points)) == Winding::Degenerate {
        return 0;
    }

    let (y_min, y_max) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
    let first_row = (y_min.ceil() as i64).max(0);
    let last_row = (y_max.ceil() as i64 - 1).min(buffers.height() as i64 - 1);

    let n = polygon.len();
    let mut written = 0;
    let mut crossings: Vec<Crossing> = Vec::with_capacity(n);
    for row in first_row..=last_row {
        let y = row as f64;
        crossings.clear();
        for i in 0..n {
            let a = &polygon[i];
            let b = &polygon[(i + 1) % n];
            let (low, high) = if a.position.y <= b.position.y { (a, b) } else { (b, a) };
            if low.position.y <= y && y < high.position.y {
                crossings.push(Crossing::between(low, high, y));
            }
        }
        crossings.sort_by(|l, r| l.x.total_cmp(&r.x));

        for pair in crossings.chunks_exact(2) {
            written += fill_span(buffers, row, &pair[0], &pair[1], shader);
        }
    }
    written
}

fn fill_span<S: FragmentShader>(
    buffers: &mut FrameBuffers,
    row: i64,
    left: &Crossing,
    right: &Crossing,
    shader: &S,
) -> usize {
    let start = (left.x.ceil() as i64).max(0);
    let end = (right.x.ceil() as i64).min(buffers.width() as i64);
    let width = right.x - left.x;

    let mut written = 0;
    for x in start..end {
        let t = if width > 0.0 { (x as f64 - left.x) / width } else { 0.0 };
        let fragment = Fragment {
            x,
            y: row,
            depth: lerp(left.depth, right.depth, t),
            world: left.world.lerp(&right.world, t),
            attribute: left.attribute.lerp(&right.attribute, t),
        };
        // Skip the shader for fragments that would lose the depth test.
        if buffers.depth_at(x, row).is_some_and(|d| fragment.depth > d) {
            continue;
        }
        if buffers.set_pixel(x, row, fragment.depth, shader.shade(&fragment)) {
            written += 1;
        }
    }
    written
}

/// Bresenham line between two screen points `(x, y, depth)`, depth-tested
/// after pulling each pixel `bias` toward the viewer.
pub fn draw_line(buffers: &mut FrameBuffers, from: Vector3, to: Vector3, color: Rgba, bias: f64) {
    let (mut x, mut y) = (from.x.round() as i64, from.y.round() as i64);
    let (x1, y1) = (to.x.round() as i64, to.y.round() as i64);
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let steps = dx.max(-dy).max(1) as f64;

    let mut err = dx + dy;
    let mut step = 0.0;
    loop {
        let depth = lerp(from.z, to.z, step / steps) - bias;
        buffers.set_pixel(x, y, depth, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
        step += 1.0;
    }
}
