//! 4x4 matrix operations.
//!
//! Matrices act on column vectors (`M * p`), so `matrix_multiply(a, b)`
//! applies `b` first. Storage follows `nalgebra`: element `(i, j)` is slot
//! `i + j * 4` of `as_slice()`, so the translation lives in slots 12..15.

use nalgebra::{Matrix4, Unit};

use super::{float_equals, Matrix, Vector3};

pub fn matrix_identity() -> Matrix {
    Matrix4::identity()
}

/// Mathematical product `left * right`.
pub fn matrix_multiply(left: Matrix, right: Matrix) -> Matrix {
    left * right
}

pub fn matrix_transpose(mat: Matrix) -> Matrix {
    mat.transpose()
}

pub fn matrix_determinant(mat: Matrix) -> f64 {
    mat.determinant()
}

/// `None` when the matrix is singular.
pub fn matrix_invert(mat: Matrix) -> Option<Matrix> {
    mat.try_inverse()
}

pub fn matrix_translate(x: f64, y: f64, z: f64) -> Matrix {
    Matrix4::new_translation(&Vector3::new(x, y, z))
}

pub fn matrix_scale(x: f64, y: f64, z: f64) -> Matrix {
    Matrix4::new_nonuniform_scaling(&Vector3::new(x, y, z))
}

/// Rotation of `angle` radians around an arbitrary axis.
///
/// A zero-length axis gives the identity.
pub fn matrix_rotate(axis: Vector3, angle: f64) -> Matrix {
    match Unit::try_new(axis, 0.0) {
        Some(axis) => Matrix4::from_axis_angle(&axis, angle),
        None => Matrix4::identity(),
    }
}

pub fn matrix_rotate_x(angle: f64) -> Matrix {
    Matrix4::from_axis_angle(&Vector3::x_axis(), angle)
}

pub fn matrix_rotate_y(angle: f64) -> Matrix {
    Matrix4::from_axis_angle(&Vector3::y_axis(), angle)
}

pub fn matrix_rotate_z(angle: f64) -> Matrix {
    Matrix4::from_axis_angle(&Vector3::z_axis(), angle)
}

/// Euler rotation applied X first, then Y, then Z.
pub fn matrix_rotate_xyz(angles: Vector3) -> Matrix {
    matrix_rotate_z(angles.z) * matrix_rotate_y(angles.y) * matrix_rotate_x(angles.x)
}

/// Column-major slot view (`slot = i + j * 4`).
pub fn matrix_to_slots(mat: Matrix) -> [f64; 16] {
    let mut slots = [0.0; 16];
    slots.copy_from_slice(mat.as_slice());
    slots
}

pub fn matrix_from_slots(slots: [f64; 16]) -> Matrix {
    Matrix4::from_column_slice(&slots)
}

pub fn matrix_equals(left: Matrix, right: Matrix) -> bool {
    left.iter().zip(right.iter()).all(|(&x, &y)| float_equals(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{vector3_equals, vector3_transform};
    use std::f64::consts::FRAC_PI_2;

    fn sample() -> Matrix {
        Matrix::new(
            2.0, 0.5, -1.0, 3.0, //
            0.0, 1.5, 4.0, -2.0, //
            1.0, -3.0, 2.5, 0.25, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    #[test]
    fn test_identity_is_neutral() {
        let m = sample();
        assert!(matrix_equals(matrix_multiply(matrix_identity(), m), m));
        assert!(matrix_equals(matrix_multiply(m, matrix_identity()), m));
        let t = matrix_translate(1.0, 2.0, 3.0);
        assert!(matrix_equals(matrix_multiply(matrix_identity(), t), t));
    }

    #[test]
    fn test_slot_indexing_is_column_major() {
        let t = matrix_translate(7.0, 8.0, 9.0);
        let slots = matrix_to_slots(t);
        assert_eq!(slots[12], 7.0);
        assert_eq!(slots[13], 8.0);
        assert_eq!(slots[14], 9.0);
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(t[(i, j)], slots[i + j * 4]);
            }
        }
        assert!(matrix_equals(matrix_from_slots(slots), t));
    }

    #[test]
    fn test_multiply_applies_right_first() {
        let m = matrix_multiply(matrix_translate(10.0, 0.0, 0.0), matrix_scale(2.0, 2.0, 2.0));
        let p = vector3_transform(Vector3::new(1.0, 1.0, 1.0), m);
        assert!(vector3_equals(p, Vector3::new(12.0, 2.0, 2.0)));
    }

    #[test]
    fn test_invert_round_trip() {
        let m = sample();
        let inv = matrix_invert(m).expect("sample is invertible");
        assert!(matrix_equals(matrix_multiply(m, inv), matrix_identity()));
        assert!((matrix_determinant(m) * matrix_determinant(inv) - 1.0).abs() < 1e-9);
        assert!(matrix_invert(matrix_scale(1.0, 0.0, 1.0)).is_none());
    }

    #[test]
    fn test_rotate_matches_axis_helpers() {
        let a = matrix_rotate(Vector3::new(0.0, 0.0, 1.0), FRAC_PI_2);
        assert!(matrix_equals(a, matrix_rotate_z(FRAC_PI_2)));
        let b = matrix_rotate(Vector3::new(0.0, 3.0, 0.0), 0.3);
        assert!(matrix_equals(b, matrix_rotate_y(0.3)));
        let p = vector3_transform(Vector3::new(1.0, 0.0, 0.0), a);
        assert!(vector3_equals(p, Vector3::new(0.0, 1.0, 0.0)));
        assert!(matrix_equals(matrix_rotate(Vector3::zeros(), 1.0), matrix_identity()));
    }

    #[test]
    fn test_transpose_and_determinant() {
        let m = sample();
        assert!(matrix_equals(matrix_transpose(matrix_transpose(m)), m));
        assert_eq!(matrix_transpose(m)[(3, 0)], m[(0, 3)]);
        assert!((matrix_determinant(matrix_identity()) - 1.0).abs() < 1e-12);
    }
}
