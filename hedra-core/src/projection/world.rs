//! World-reference pipeline: `viewport * projection * view`.
//!
//! The composed matrix takes a world-space point straight to the screen. No
//! clipping happens in homogeneous space; projected polygons are clipped
//! against the viewport rectangle after the divide.

use crate::camera::Camera;
use crate::geometry::Rect;
use crate::math::{matrix_identity, vector3_normalize, Matrix, Vector3, Vector4};

/// World (SRU) to camera (SRC) coordinates.
///
/// Builds the orthonormal basis `{u, v, n}` where `n` points from the focal
/// point back to the eye, `v` is the view-up made orthogonal to `n`, and
/// `u = v x n`.
pub fn sru_to_src(camera: &Camera) -> Matrix {
    let vrp = camera.position;
    let n = vector3_normalize(vrp - camera.target);
    let v = vector3_normalize(camera.up - n * camera.up.dot(&n));
    let u = v.cross(&n);
    basis_rows(u, v, n, vrp)
}

#[rustfmt::skip]
fn basis_rows(u: Vector3, v: Vector3, n: Vector3, vrp: Vector3) -> Matrix {
    Matrix::new(
        u.x, u.y, u.z, -u.dot(&vrp),
        v.x, v.y, v.z, -v.dot(&vrp),
        n.x, n.y, n.z, -n.dot(&vrp),
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Perspective projection onto the plane at distance `d` in front of the eye.
///
/// `w` becomes `-z / d`, so dividing by `w` scales `x` and `y` onto the plane.
/// `z` is passed through untouched and keeps the camera-space depth.
pub fn projection(d: f64) -> Matrix {
    let mut m = matrix_identity();
    m[(3, 2)] = -1.0 / d;
    m[(3, 3)] = 0.0;
    m
}

/// Window (logical projection-plane coordinates) to viewport (pixels).
///
/// With `reflected` set the vertical axis is flipped so that the window's
/// bottom edge lands on the viewport's largest row.
pub fn src_to_srt(window: Rect, viewport: Rect, reflected: bool) -> Matrix {
    let sx = viewport.width() / window.width();
    let sy = viewport.height() / window.height();
    let tx = viewport.min[0] - window.min[0] * sx;

    let mut m = matrix_identity();
    m[(0, 0)] = sx;
    m[(0, 3)] = tx;
    if reflected {
        m[(1, 1)] = -sy;
        m[(1, 3)] = window.min[1] * sy + viewport.max[1];
    } else {
        m[(1, 1)] = sy;
        m[(1, 3)] = viewport.min[1] - window.min[1] * sy;
    }
    m
}

/// The composed world-reference chain.
#[derive(Debug, Clone, Copy)]
pub struct WorldReference {
    pub view: Matrix,
    pub projection: Matrix,
    pub viewport: Matrix,
}

impl WorldReference {
    pub fn new(camera: &Camera, window: Rect, viewport: Rect) -> Self {
        Self {
            view: sru_to_src(camera),
            projection: projection(camera.d),
            viewport: src_to_srt(window, viewport, true),
        }
    }

    /// `viewport * projection * view`.
    pub fn matrix(&self) -> Matrix {
        self.viewport * self.projection * self.view
    }

    /// Pixel coordinates and depth of a transformed vertex.
    ///
    /// Depth is the camera-space distance `-z`, positive in front of the eye.
    /// Returns `None` for points on or behind the eye plane.
    pub fn to_screen(&self, h: Vector4) -> Option<Vector3> {
        if h.w <= 0.0 {
            return None;
        }
        Some(Vector3::new(h.x / h.w, h.y / h.w, -h.z))
    }
}
