//! Object-space transform state and the matrices built from it.
use crate::math::{matrix_rotate_x, matrix_rotate_y, matrix_rotate_z, Matrix, Vector3};

/// Accumulated position/rotation/scale of a mesh.
///
/// Mesh vertices are already baked with these deltas; the fields only record
/// what has been applied so far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3,
    /// Euler angles in radians.
    pub rotation: Vector3,
    pub scale: Vector3,
}

impl Transform {
    pub fn new(position: Vector3, rotation: Vector3, scale: Vector3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    pub fn identity() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: Vector3::zeros(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn translate(&mut self, delta: Vector3) {
        self.position += delta;
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.rotation.x += dx;
        self.rotation.y += dy;
        self.rotation.z += dz;
    }

    /// Rotation matrix from the Euler angles, applied X, then Y, then Z.
    pub fn rotation_matrix(&self) -> Matrix {
        matrix_rotate_z(self.rotation.z)
            * matrix_rotate_y(self.rotation.y)
            * matrix_rotate_x(self.rotation.x)
    }

    pub fn translation_matrix(&self) -> Matrix {
        Matrix::new_translation(&self.position)
    }

    pub fn scale_matrix(&self) -> Matrix {
        Matrix::new_nonuniform_scaling(&self.scale)
    }

    /// `translation * rotation * scale`.
    pub fn matrix(&self) -> Matrix {
        self.translation_matrix() * self.rotation_matrix() * self.scale_matrix()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
