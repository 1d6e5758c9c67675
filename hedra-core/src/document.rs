//! Scene documents: the plain-data form a scene is saved and loaded as.
//!
//! Conversion only; reading and writing files is left to the caller.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::camera::Camera;
use crate::error::Result;
use crate::geometry::Rect;
use crate::math::Vector3;
use crate::mesh::{Material, Mesh, Vertex};
use crate::projection::PipelineModel;
use crate::raster::{Light, OmniLight, ShadingModel};
use crate::scene::Scene;
use crate::settings::RenderSettings;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraDocument {
    pub position: [f64; 3],
    pub target: [f64; 3],
    pub up: [f64; 3],
    pub d: f64,
    pub near: f64,
    pub far: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexDocument {
    pub id: String,
    pub position: [f64; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDocument {
    pub ka: [f64; 3],
    pub kd: [f64; 3],
    pub ks: [f64; 3],
    pub shininess: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshDocument {
    pub id: u32,
    pub name: String,
    pub vertices: Vec<VertexDocument>,
    pub faces: Vec<Vec<usize>>,
    pub material: MaterialDocument,
    #[serde(default = "default_true")]
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OmniLightDocument {
    pub position: [f64; 3],
    pub intensity: [f64; 3],
}

/// A whole scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    pub camera: CameraDocument,
    pub meshes: Vec<MeshDocument>,
    pub ambient: [f64; 3],
    #[serde(default)]
    pub lights: Vec<OmniLightDocument>,
    pub window: Rect,
    pub viewport: Rect,
    /// 0 flat, 1 Gouraud, 2 Phong.
    pub lighting_model: i64,
    /// 0 world-reference, 1 Smith.
    pub pipeline_model: i64,
    /// Remaining render settings. Shading and pipeline are taken from the
    /// integer selectors above.
    #[serde(default)]
    pub settings: RenderSettings,
    #[serde(default)]
    pub selected: Option<u32>,
}

fn default_true() -> bool {
    true
}

fn array(v: Vector3) -> [f64; 3] {
    [v.x, v.y, v.z]
}

fn vector(a: [f64; 3]) -> Vector3 {
    Vector3::new(a[0], a[1], a[2])
}

impl From<&Camera> for CameraDocument {
    fn from(camera: &Camera) -> Self {
        Self {
            position: array(camera.position),
            target: array(camera.target),
            up: array(camera.up),
            d: camera.d,
            near: camera.near,
            far: camera.far,
        }
    }
}

impl From<&CameraDocument> for Camera {
    fn from(doc: &CameraDocument) -> Self {
        let mut camera = Camera::new(vector(doc.position), vector(doc.target), vector(doc.up), doc.d);
        camera.near = doc.near;
        camera.far = doc.far;
        camera
    }
}

impl From<&Material> for MaterialDocument {
    fn from(material: &Material) -> Self {
        Self {
            ka: array(material.ka),
            kd: array(material.kd),
            ks: array(material.ks),
            shininess: material.shininess,
        }
    }
}

impl From<&MaterialDocument> for Material {
    fn from(doc: &MaterialDocument) -> Self {
        Material::new(vector(doc.ka), vector(doc.kd), vector(doc.ks), doc.shininess)
    }
}

impl From<&Mesh> for MeshDocument {
    fn from(mesh: &Mesh) -> Self {
        Self {
            id: mesh.id,
            name: mesh.name.clone(),
            vertices: mesh
                .vertices()
                .iter()
                .map(|v| VertexDocument {
                    id: v.id.clone(),
                    position: array(v.point()),
                })
                .collect(),
            faces: mesh
                .faces()
                .iter()
                .map(|f| f.vertices.iter().map(|v| v.0).collect())
                .collect(),
            material: MaterialDocument::from(&mesh.material),
            visible: mesh.visible,
        }
    }
}

impl MeshDocument {
    /// Rebuild the half-edge mesh. Fails like [`Mesh::new`] on bad input.
    pub fn to_mesh(&self) -> Result<Mesh> {
        let vertices = self
            .vertices
            .iter()
            .map(|v| Vertex::new(v.id.clone(), v.position[0], v.position[1], v.position[2]))
            .collect();
        let mut mesh = Mesh::new(self.name.clone(), vertices, &self.faces)?;
        mesh.id = self.id;
        mesh.material = Material::from(&self.material);
        mesh.visible = self.visible;
        Ok(mesh)
    }
}

impl Scene {
    pub fn to_document(&self) -> SceneDocument {
        SceneDocument {
            camera: CameraDocument::from(&self.camera),
            meshes: self.meshes().iter().map(MeshDocument::from).collect(),
            ambient: array(self.ambient.intensity),
            lights: self
                .lights
                .iter()
                .map(|l| OmniLightDocument {
                    position: array(l.position),
                    intensity: array(l.intensity),
                })
                .collect(),
            window: self.window,
            viewport: self.viewport(),
            lighting_model: self.settings.shading.selector(),
            pipeline_model: self.settings.pipeline.selector(),
            settings: self.settings,
            selected: self.selected(),
        }
    }

    pub fn from_document(doc: &SceneDocument) -> Result<Scene> {
        let shading = ShadingModel::from_selector(doc.lighting_model)?;
        let pipeline = PipelineModel::from_selector(doc.pipeline_model)?;

        let mut scene = Scene::new(0, 0);
        scene.settings = RenderSettings {
            shading,
            pipeline,
            ..doc.settings
        };
        scene.camera = Camera::from(&doc.camera);
        scene.ambient = Light::new(vector(doc.ambient));
        scene.lights = doc
            .lights
            .iter()
            .map(|l| OmniLight::new(vector(l.position), vector(l.intensity)))
            .collect();
        scene.window = doc.window;
        scene.set_viewport(doc.viewport);

        for mesh in &doc.meshes {
            scene.insert_mesh(mesh.to_mesh()?)?;
        }
        if let Some(id) = doc.selected {
            scene.select(id)?;
        }
        debug!(meshes = scene.meshes().len(), ?shading, ?pipeline, "scene loaded");
        Ok(scene)
    }
}

pub fn to_json(doc: &SceneDocument) -> Result<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

pub fn from_json(json: &str) -> Result<SceneDocument> {
    Ok(serde_json::from_str(json)?)
}
