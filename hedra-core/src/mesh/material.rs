//! Surface reflectance coefficients.
use crate::math::Vector3;

/// Phong reflectance: per-channel ambient/diffuse/specular coefficients in
/// `[0, 1]` plus the specular exponent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ka: Vector3,
    pub kd: Vector3,
    pub ks: Vector3,
    pub shininess: f64,
}

impl Material {
    pub fn new(ka: Vector3, kd: Vector3, ks: Vector3, shininess: f64) -> Self {
        Self {
            ka,
            kd,
            ks,
            shininess,
        }
    }

    /// Same coefficient on all three channels.
    pub fn grey(ka: f64, kd: f64, ks: f64, shininess: f64) -> Self {
        Self::new(
            Vector3::new(ka, ka, ka),
            Vector3::new(kd, kd, kd),
            Vector3::new(ks, ks, ks),
            shininess,
        )
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(
            Vector3::new(0.4, 0.4, 0.4),
            Vector3::new(0.7, 0.5, 0.3),
            Vector3::new(0.5, 0.5, 0.5),
            10.0,
        )
    }
}
