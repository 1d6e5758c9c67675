//! Smith pipeline: `perspective * clip * view`.
//!
//! Vertices stay homogeneous until after clipping. The canonical volume is
//! `-w <= x <= w`, `-w <= y <= w`, `0 <= z <= w`; after the divide `x` and `y`
//! span `[-1, 1]` across the window and `z` runs from 0 at the near plane to
//! 1 at the far plane.

use crate::camera::Camera;
use crate::geometry::Rect;
use crate::math::{matrix_identity, Matrix, Vector3, Vector4};

use super::world::sru_to_src;

/// Maps the camera-space frustum through the window onto the canonical
/// perspective volume, with the far plane at `z = 1`.
///
/// The window centre is sheared onto the view axis, `x` and `y` are scaled by
/// `d / half_extent` so the window edges become the `|x| = z` planes, and the
/// whole volume is scaled by `1 / far`.
pub fn clipping_transformation(window: Rect, d: f64, far: f64) -> Matrix {
    let center = window.center();
    let su = window.width() / 2.0;
    let sv = window.height() / 2.0;

    let mut m = matrix_identity();
    m[(0, 0)] = d / (su * far);
    m[(0, 2)] = center.x / (su * far);
    m[(1, 1)] = d / (sv * far);
    m[(1, 2)] = center.y / (sv * far);
    m[(2, 2)] = -1.0 / far;
    m
}

/// Perspective-to-parallel transform of the canonical volume.
///
/// With `zmin = near / far`, the frustum between `zmin` and 1 is warped so
/// that dividing by `w` yields the unit parallel volume.
pub fn perspective_transformation(near: f64, far: f64) -> Matrix {
    let zmin = near / far;
    let mut m = matrix_identity();
    m[(2, 2)] = 1.0 / (1.0 - zmin);
    m[(2, 3)] = -zmin / (1.0 - zmin);
    m[(3, 2)] = 1.0;
    m[(3, 3)] = 0.0;
    m
}

/// Canonical `[-1, 1]` square to viewport pixels, bottom row first.
pub fn canonical_to_viewport(viewport: Rect) -> Matrix {
    let mut m = matrix_identity();
    m[(0, 0)] = viewport.width() / 2.0;
    m[(0, 3)] = viewport.min[0] + viewport.width() / 2.0;
    m[(1, 1)] = -viewport.height() / 2.0;
    m[(1, 3)] = viewport.max[1] - viewport.height() / 2.0;
    m
}

/// The composed Smith chain.
#[derive(Debug, Clone, Copy)]
pub struct Smith {
    pub view: Matrix,
    pub clip: Matrix,
    pub perspective: Matrix,
    pub viewport: Matrix,
}

impl Smith {
    pub fn new(camera: &Camera, window: Rect, viewport: Rect) -> Self {
        Self {
            view: sru_to_src(camera),
            clip: clipping_transformation(window, camera.d, camera.far),
            perspective: perspective_transformation(camera.near, camera.far),
            viewport: canonical_to_viewport(viewport),
        }
    }

    /// `perspective * clip * view`: world space to homogeneous clip space.
    pub fn matrix(&self) -> Matrix {
        self.perspective * self.clip * self.view
    }

    /// Divide a clip-space vertex by `w` and map it to pixels. The depth is
    /// the normalized `z / w` in `[0, 1]` for points inside the volume.
    pub fn to_screen(&self, h: Vector4) -> Option<Vector3> {
        if h.w <= 0.0 {
            return None;
        }
        let (x, y, z) = (h.x / h.w, h.y / h.w, h.z / h.w);
        let v = self.viewport;
        Some(Vector3::new(
            v[(0, 0)] * x + v[(0, 3)],
            v[(1, 1)] * y + v[(1, 3)],
            z,
        ))
    }
}
