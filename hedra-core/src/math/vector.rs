//! Vector operations.

use nalgebra::{Rotation3, SVector, Unit, UnitQuaternion};

use super::{float_equals, Matrix, Quaternion, Vector2, Vector3, Vector4};

fn components_equal<const D: usize>(p: &SVector<f64, D>, q: &SVector<f64, D>) -> bool {
    p.iter().zip(q.iter()).all(|(&x, &y)| float_equals(x, y))
}

// ---------------------------------------------------------------------------
// Vector2
// ---------------------------------------------------------------------------

pub fn vector2_length(v: Vector2) -> f64 {
    v.norm()
}

pub fn vector2_equals(p: Vector2, q: Vector2) -> bool {
    components_equal(&p, &q)
}

// ---------------------------------------------------------------------------
// Vector3
// ---------------------------------------------------------------------------

pub fn vector3_add(v1: Vector3, v2: Vector3) -> Vector3 {
    v1 + v2
}

pub fn vector3_subtract(v1: Vector3, v2: Vector3) -> Vector3 {
    v1 - v2
}

pub fn vector3_scale(v: Vector3, scalar: f64) -> Vector3 {
    v * scalar
}

/// Component-wise product.
pub fn vector3_multiply(v1: Vector3, v2: Vector3) -> Vector3 {
    v1.component_mul(&v2)
}

pub fn vector3_cross(v1: Vector3, v2: Vector3) -> Vector3 {
    v1.cross(&v2)
}

pub fn vector3_dot(v1: Vector3, v2: Vector3) -> f64 {
    v1.dot(&v2)
}

pub fn vector3_length(v: Vector3) -> f64 {
    v.norm()
}

/// Normalize, treating a zero length as one (the input comes back unchanged).
pub fn vector3_normalize(v: Vector3) -> Vector3 {
    v.try_normalize(0.0).unwrap_or(v)
}

pub fn vector3_lerp(v1: Vector3, v2: Vector3, amount: f64) -> Vector3 {
    v1.lerp(&v2, amount)
}

/// Reflect `v` about the plane with unit normal `normal`: `v - 2(v·n)n`.
pub fn vector3_reflect(v: Vector3, normal: Vector3) -> Vector3 {
    v - normal * (2.0 * v.dot(&normal))
}

/// Transform a point (implicit `w = 1`) by `mat`; the result is not divided by `w`.
pub fn vector3_transform(v: Vector3, mat: Matrix) -> Vector3 {
    (mat * v.push(1.0)).xyz()
}

/// Rotate `v` by the unit quaternion `q`.
pub fn vector3_rotate_by_quaternion(v: Vector3, q: Quaternion) -> Vector3 {
    UnitQuaternion::new_unchecked(q) * v
}

/// Rotate `v` around `axis` by `angle` radians.
///
/// A zero-length axis leaves `v` unchanged.
pub fn vector3_rotate_by_axis_angle(v: Vector3, axis: Vector3, angle: f64) -> Vector3 {
    match Unit::try_new(axis, 0.0) {
        Some(axis) => Rotation3::from_axis_angle(&axis, angle) * v,
        None => v,
    }
}

pub fn vector3_equals(p: Vector3, q: Vector3) -> bool {
    components_equal(&p, &q)
}

// ---------------------------------------------------------------------------
// Vector4
// ---------------------------------------------------------------------------

/// Full homogeneous product `mat * v`.
pub fn vector4_transform(v: Vector4, mat: Matrix) -> Vector4 {
    mat * v
}

/// Divide through by `w`. A zero `w` is treated as one.
pub fn vector4_perspective_divide(v: Vector4) -> Vector3 {
    let w = if v.w == 0.0 { 1.0 } else { v.w };
    v.xyz() / w
}

pub fn vector4_equals(p: Vector4, q: Vector4) -> bool {
    components_equal(&p, &q)
}
