//! Quaternion operations. Components are `[x, y, z, w]` with `w` the scalar part.

use std::f64::consts::PI;

use nalgebra::{Unit, UnitQuaternion};

use super::{float_equals, Matrix, Quaternion, Vector3};

pub fn quaternion_identity() -> Quaternion {
    Quaternion::identity()
}

/// Normalize, treating a zero length as one.
pub fn quaternion_normalize(q: Quaternion) -> Quaternion {
    Quaternion::from(q.coords.try_normalize(0.0).unwrap_or(q.coords))
}

/// Multiplicative inverse; a zero quaternion is returned unchanged.
pub fn quaternion_invert(q: Quaternion) -> Quaternion {
    q.try_inverse().unwrap_or(q)
}

/// Hamilton product `q1 * q2` (rotate by `q2`, then by `q1`).
pub fn quaternion_multiply(q1: Quaternion, q2: Quaternion) -> Quaternion {
    q1 * q2
}

/// Rotation of `angle` radians around `axis`. A zero axis gives the identity.
pub fn quaternion_from_axis_angle(axis: Vector3, angle: f64) -> Quaternion {
    match Unit::try_new(axis, 0.0) {
        Some(axis) => UnitQuaternion::from_axis_angle(&axis, angle).into_inner(),
        None => Quaternion::identity(),
    }
}

/// Shortest-arc rotation taking `from` onto `to`. Opposite vectors get a
/// half turn around some axis perpendicular to `from`.
pub fn quaternion_from_vector3_to_vector3(from: Vector3, to: Vector3) -> Quaternion {
    if let Some(rotation) = UnitQuaternion::rotation_between(&from, &to) {
        return rotation.into_inner();
    }
    let helper = if from.x.abs() < 0.9 { Vector3::x() } else { Vector3::y() };
    quaternion_from_axis_angle(from.cross(&helper), PI)
}

/// Rotation matrix of a unit quaternion.
pub fn quaternion_to_matrix(q: Quaternion) -> Matrix {
    UnitQuaternion::new_unchecked(q).to_homogeneous()
}

/// Component equality; `q` and `-q` describe the same rotation and compare equal.
pub fn quaternion_equals(p: Quaternion, q: Quaternion) -> bool {
    let same = |sign: f64| {
        p.coords
            .iter()
            .zip(q.coords.iter())
            .all(|(&a, &b)| float_equals(a, sign * b))
    };
    same(1.0) || same(-1.0)
}
