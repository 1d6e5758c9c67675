//! Linear algebra kernel.
//!
//! Value types are `nalgebra` aliases over `f64`. The functions in the
//! submodules take their operands by value and return fresh results; none of
//! them mutate their inputs. Degenerate lengths (zero vectors, zero rotation
//! axes) are treated as length one instead of producing NaN.

pub mod matrix;
pub mod quaternion;
pub mod vector;

pub use matrix::*;
pub use quaternion::*;
pub use vector::*;

/// Two-component vector.
pub type Vector2 = nalgebra::Vector2<f64>;
/// Three-component vector.
pub type Vector3 = nalgebra::Vector3<f64>;
/// Homogeneous four-component vector.
pub type Vector4 = nalgebra::Vector4<f64>;
/// Quaternion, stored as a `Vector4` in `[x, y, z, w]` order.
pub type Quaternion = nalgebra::Quaternion<f64>;
/// 4x4 transform. Element `(i, j)` lives in storage slot `i + j * 4`.
pub type Matrix = nalgebra::Matrix4<f64>;

/// Tolerance used by every `*_equals` comparison.
pub const EPSILON: f64 = 0.000001;

/// Relative float comparison: `|x - y| <= EPSILON * max(1, |x|, |y|)`.
#[inline]
pub fn float_equals(x: f64, y: f64) -> bool {
    (x - y).abs() <= EPSILON * 1.0_f64.max(x.abs().max(y.abs()))
}

/// Clamp `value` into `[min, max]`.
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Linear interpolation between `start` and `end`.
#[inline]
pub fn lerp(start: f64, end: f64, amount: f64) -> f64 {
    start + amount * (end - start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_equals_relative() {
        assert!(float_equals(1.0, 1.0 + 1e-7));
        assert!(!float_equals(1.0, 1.0 + 1e-5));
        // Large magnitudes scale the tolerance.
        assert!(float_equals(1.0e6, 1.0e6 + 0.5));
        assert!(!float_equals(1.0e6, 1.0e6 + 2.0));
    }

    #[test]
    fn test_clamp_and_lerp() {
        assert_eq!(clamp(300.0, 0.0, 255.0), 255.0);
        assert_eq!(clamp(-3.0, 0.0, 255.0), 0.0);
        assert!((lerp(2.0, 4.0, 0.25) - 2.5).abs() < 1e-12);
    }
}
