//! Ambient + diffuse + specular reflection.
//!
//! Intensities and results are per-channel values on the `0..=255` scale.
//! Each term is clamped to `[0, 255]` on its own; the sum is returned as is
//! and only saturates when narrowed to [`Rgba`](super::Rgba).
//!
//! Normals are used as supplied. A shorter-than-unit normal (the averaged
//! vertex normals) gives proportionally dimmer diffuse light.

use crate::math::{clamp, vector3_normalize, vector3_reflect, Vector3};
use crate::mesh::Material;

/// Global ambient light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub intensity: Vector3,
}

impl Light {
    pub fn new(intensity: Vector3) -> Self {
        Self { intensity }
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::new(Vector3::new(120.0, 120.0, 120.0))
    }
}

/// Point light radiating equally in every direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OmniLight {
    pub position: Vector3,
    pub intensity: Vector3,
}

impl OmniLight {
    pub fn new(position: Vector3, intensity: Vector3) -> Self {
        Self {
            position,
            intensity,
        }
    }
}

fn clamp_channels(v: Vector3) -> Vector3 {
    Vector3::new(
        clamp(v.x, 0.0, 255.0),
        clamp(v.y, 0.0, 255.0),
        clamp(v.z, 0.0, 255.0),
    )
}

/// `Ia * ka`
pub fn ambient(light: &Light, material: &Material) -> Vector3 {
    clamp_channels(light.intensity.component_mul(&material.ka))
}

/// `I * kd * max(0, N . L)`
pub fn diffuse(light: &OmniLight, material: &Material, point: Vector3, normal: Vector3) -> Vector3 {
    let l = vector3_normalize(light.position - point);
    let factor = normal.dot(&l).max(0.0);
    clamp_channels(light.intensity.component_mul(&material.kd) * factor)
}

/// `I * ks * max(0, R . V)^n` with `R = reflect(-L, N)`.
pub fn specular(
    light: &OmniLight,
    material: &Material,
    point: Vector3,
    normal: Vector3,
    eye: Vector3,
) -> Vector3 {
    let l = vector3_normalize(light.position - point);
    let r = vector3_reflect(-l, normal);
    let v = vector3_normalize(eye - point);
    let factor = r.dot(&v).max(0.0).powf(material.shininess);
    clamp_channels(light.intensity.component_mul(&material.ks) * factor)
}

/// Everything needed to light one surface point.
#[derive(Debug, Clone, Copy)]
pub struct LightingContext<'a> {
    pub ambient: &'a Light,
    pub lights: &'a [OmniLight],
    pub material: &'a Material,
    pub eye: Vector3,
}

impl LightingContext<'_> {
    /// Full lighting equation at `point` with surface normal `normal`.
    pub fn illuminate(&self, point: Vector3, normal: Vector3) -> Vector3 {
        self.lights.iter().fold(ambient(self.ambient, self.material), |acc, light| {
            acc + diffuse(light, self.material, point, normal)
                + specular(light, self.material, point, normal, self.eye)
        })
    }
}
