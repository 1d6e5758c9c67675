//! Shading models and the per-fragment shaders that implement them.
use serde::{Deserialize, Serialize};

use super::buffers::Rgba;
use super::lighting::LightingContext;
use crate::error::{HedraError, Result};
use crate::math::{vector3_normalize, Vector3};

/// How lighting is evaluated across a polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadingModel {
    /// One color per face, from its centroid and normal.
    Flat,
    /// Lit per vertex, colors interpolated.
    #[default]
    Gouraud,
    /// Normals interpolated, lit per pixel.
    Phong,
}

impl ShadingModel {
    /// Integer used by scene documents: 0 flat, 1 Gouraud, 2 Phong.
    pub fn selector(self) -> i64 {
        match self {
            ShadingModel::Flat => 0,
            ShadingModel::Gouraud => 1,
            ShadingModel::Phong => 2,
        }
    }

    pub fn from_selector(value: i64) -> Result<Self> {
        match value {
            0 => Ok(ShadingModel::Flat),
            1 => Ok(ShadingModel::Gouraud),
            2 => Ok(ShadingModel::Phong),
            _ => Err(HedraError::InvalidSelector {
                kind: "lighting model",
                value,
            }),
        }
    }

    pub fn next(self) -> Self {
        match self {
            ShadingModel::Flat => ShadingModel::Gouraud,
            ShadingModel::Gouraud => ShadingModel::Phong,
            ShadingModel::Phong => ShadingModel::Flat,
        }
    }
}

/// A pixel produced by the scanline fill, with interpolated vertex data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    pub x: i64,
    pub y: i64,
    pub depth: f64,
    pub world: Vector3,
    pub attribute: Vector3,
}

/// Turns a fragment into a color.
pub trait FragmentShader {
    fn shade(&self, fragment: &Fragment) -> Rgba;
}

/// Same color everywhere.
pub struct FlatShader {
    pub color: Rgba,
}

impl FragmentShader for FlatShader {
    fn shade(&self, _fragment: &Fragment) -> Rgba {
        self.color
    }
}

/// The attribute already holds the interpolated color.
pub struct GouraudShader;

impl FragmentShader for GouraudShader {
    fn shade(&self, fragment: &Fragment) -> Rgba {
        Rgba::from_channels(fragment.attribute)
    }
}

/// The attribute holds the interpolated normal; light every pixel.
pub struct PhongShader<'a> {
    pub lighting: LightingContext<'a>,
}

impl FragmentShader for PhongShader<'_> {
    fn shade(&self, fragment: &Fragment) -> Rgba {
        let normal = vector3_normalize(fragment.attribute);
        Rgba::from_channels(self.lighting.illuminate(fragment.world, normal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Material;
    use crate::raster::lighting::{Light, OmniLight};

    fn fragment(attribute: Vector3) -> Fragment {
        Fragment {
            x: 0,
            y: 0,
            depth: 1.0,
            world: Vector3::zeros(),
            attribute,
        }
    }

    #[test]
    fn test_selectors() {
        for model in [ShadingModel::Flat, ShadingModel::Gouraud, ShadingModel::Phong] {
            assert_eq!(ShadingModel::from_selector(model.selector()).ok(), Some(model));
        }
        assert!(matches!(
            ShadingModel::from_selector(3),
            Err(HedraError::InvalidSelector { value: 3, .. })
        ));
        assert_eq!(ShadingModel::Phong.next(), ShadingModel::Flat);
    }

    #[test]
    fn test_gouraud_uses_attribute_color() {
        let c = GouraudShader.shade(&fragment(Vector3::new(10.0, 20.0, 400.0)));
        assert_eq!(c, Rgba::opaque(10, 20, 255));
    }

    #[test]
    fn test_phong_renormalizes_interpolated_normal() {
        let material = Material::grey(0.0, 1.0, 0.0, 1.0);
        let ambient = Light::new(Vector3::zeros());
        let lights = [OmniLight::new(Vector3::new(0.0, 0.0, 10.0), Vector3::new(200.0, 200.0, 200.0))];
        let shader = PhongShader {
            lighting: LightingContext {
                ambient: &ambient,
                lights: &lights,
                material: &material,
                eye: Vector3::new(0.0, 0.0, 10.0),
            },
        };
        // A half-length normal lights the same as a unit one.
        let short = shader.shade(&fragment(Vector3::new(0.0, 0.0, 0.5)));
        let unit = shader.shade(&fragment(Vector3::new(0.0, 0.0, 1.0)));
        assert_eq!(short, unit);
        assert_eq!(unit.r, 200);
    }
}
