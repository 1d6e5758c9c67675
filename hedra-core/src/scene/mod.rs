//! The scene: camera, meshes, lights, buffers and the render entry point.

pub mod frame;
mod render;

use crate::camera::Camera;
use crate::error::{HedraError, Result};
use crate::geometry::Rect;
use crate::math::Vector3;
use crate::mesh::{Mesh, NormalPolicy};
use crate::raster::{FrameBuffers, Light, OmniLight};
use crate::settings::RenderSettings;

pub use frame::{FacePolygon, FrameOutput, MeshFrame};

/// Half-height of the default window on the projection plane.
const DEFAULT_WINDOW_HALF_HEIGHT: f64 = 3.0;

/// Composition root for one editable scene.
#[derive(Debug, Clone)]
pub struct Scene {
    pub camera: Camera,
    pub ambient: Light,
    pub lights: Vec<OmniLight>,
    /// Logical coordinates on the projection plane.
    pub window: Rect,
    pub settings: RenderSettings,
    viewport: Rect,
    meshes: Vec<Mesh>,
    next_id: u32,
    selected: Option<u32>,
    buffers: FrameBuffers,
    frame: FrameOutput,
}

impl Scene {
    /// Empty scene rendering into a `width` x `height` pixel viewport with a
    /// window of matching aspect ratio.
    pub fn new(width: usize, height: usize) -> Self {
        let viewport = Rect::new(0.0, 0.0, width as f64, height as f64);
        let aspect = if height > 0 { width as f64 / height as f64 } else { 1.0 };
        let half_h = DEFAULT_WINDOW_HALF_HEIGHT;
        let half_w = half_h * aspect;
        Self {
            camera: Camera::default(),
            ambient: Light::default(),
            lights: vec![OmniLight::new(
                Vector3::new(10.0, 10.0, 10.0),
                Vector3::new(255.0, 255.0, 255.0),
            )],
            window: Rect::new(-half_w, -half_h, half_w, half_h),
            settings: RenderSettings::default(),
            viewport,
            meshes: Vec::new(),
            next_id: 1,
            selected: None,
            buffers: FrameBuffers::new(width, height),
            frame: FrameOutput::default(),
        }
    }

    // -- Meshes ------------------------------------------------------------

    /// Take ownership of `mesh` and return the id assigned to it.
    pub fn add_mesh(&mut self, mut mesh: Mesh) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        mesh.id = id;
        mesh.determine_normals(self.settings.normals);
        self.meshes.push(mesh);
        id
    }

    /// Insert a mesh under the id it already carries.
    pub(crate) fn insert_mesh(&mut self, mut mesh: Mesh) -> Result<u32> {
        if self.mesh(mesh.id).is_some() {
            return Err(HedraError::InvalidMesh(format!("duplicate mesh id {}", mesh.id)));
        }
        self.next_id = self.next_id.max(mesh.id + 1);
        mesh.determine_normals(self.settings.normals);
        let id = mesh.id;
        self.meshes.push(mesh);
        Ok(id)
    }

    pub fn remove_mesh(&mut self, id: u32) -> Result<Mesh> {
        let index = self
            .meshes
            .iter()
            .position(|m| m.id == id)
            .ok_or(HedraError::UnknownMesh(id))?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        Ok(self.meshes.remove(index))
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn mesh(&self, id: u32) -> Option<&Mesh> {
        self.meshes.iter().find(|m| m.id == id)
    }

    pub fn mesh_mut(&mut self, id: u32) -> Option<&mut Mesh> {
        self.meshes.iter_mut().find(|m| m.id == id)
    }

    // -- Selection ---------------------------------------------------------

    pub fn select(&mut self, id: u32) -> Result<()> {
        if self.mesh(id).is_none() {
            return Err(HedraError::UnknownMesh(id));
        }
        self.selected = Some(id);
        Ok(())
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<u32> {
        self.selected
    }

    pub fn selected_mesh(&self) -> Option<&Mesh> {
        self.selected.and_then(|id| self.mesh(id))
    }

    /// Move the selection to the next mesh in insertion order, wrapping
    /// around. Selects the first mesh when nothing is selected.
    pub fn select_next(&mut self) -> Option<u32> {
        let next = match self.selected.and_then(|id| self.meshes.iter().position(|m| m.id == id)) {
            Some(index) => self.meshes.get((index + 1) % self.meshes.len()),
            None => self.meshes.first(),
        };
        self.selected = next.map(|m| m.id);
        self.selected
    }

    // -- Object transforms -------------------------------------------------

    pub fn translate_mesh(&mut self, id: u32, delta: Vector3) -> Result<()> {
        self.mesh_mut(id).ok_or(HedraError::UnknownMesh(id))?.translate(delta);
        Ok(())
    }

    pub fn rotate_mesh(&mut self, id: u32, delta: Vector3) -> Result<()> {
        self.mesh_mut(id).ok_or(HedraError::UnknownMesh(id))?.rotate(delta);
        Ok(())
    }

    pub fn scale_mesh(&mut self, id: u32, factors: Vector3) -> Result<()> {
        self.mesh_mut(id).ok_or(HedraError::UnknownMesh(id))?.scale(factors);
        Ok(())
    }

    /// Translate the selected mesh. Returns false when nothing is selected.
    pub fn translate_selected(&mut self, delta: Vector3) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        self.translate_mesh(id, delta).is_ok()
    }

    pub fn rotate_selected(&mut self, delta: Vector3) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        self.rotate_mesh(id, delta).is_ok()
    }

    pub fn scale_selected(&mut self, factors: Vector3) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        self.scale_mesh(id, factors).is_ok()
    }

    /// Switch the vertex-normal algorithm and recompute every mesh.
    pub fn set_normal_policy(&mut self, policy: NormalPolicy) {
        self.settings.normals = policy;
        for mesh in &mut self.meshes {
            mesh.determine_normals(policy);
        }
    }

    // -- Viewport and buffers ----------------------------------------------

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
        self.initialize_buffers();
    }

    /// Size the buffers to cover the viewport and clear them.
    ///
    /// The viewport's max corner is an exclusive pixel bound: `(0, 0)-(W, H)`
    /// owns columns `0..W` and rows `0..H`.
    pub fn initialize_buffers(&mut self) {
        let width = self.viewport.max[0].max(0.0).ceil() as usize;
        let height = self.viewport.max[1].max(0.0).ceil() as usize;
        self.buffers.resize(width, height);
    }

    pub fn buffers(&self) -> &FrameBuffers {
        &self.buffers
    }

    /// Output of the last [`Scene::render`].
    pub fn frame(&self) -> &FrameOutput {
        &self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_with_cubes() -> (Scene, u32, u32) {
        let mut scene = Scene::new(40, 30);
        let a = scene.add_mesh(Mesh::cube(1.0).expect("cube"));
        let b = scene.add_mesh(Mesh::cube(2.0).expect("cube"));
        (scene, a, b)
    }

    #[test]
    fn test_ids_are_unique_and_stable() {
        let (mut scene, a, b) = scene_with_cubes();
        assert_ne!(a, b);
        scene.remove_mesh(a).expect("present");
        let c = scene.add_mesh(Mesh::cube(1.0).expect("cube"));
        assert_ne!(c, b);
        assert!(scene.mesh(a).is_none());
        assert!(matches!(scene.remove_mesh(a), Err(HedraError::UnknownMesh(_))));
    }

    #[test]
    fn test_selection_follows_removal() {
        let (mut scene, a, b) = scene_with_cubes();
        assert!(scene.select(99).is_err());
        scene.select(a).expect("exists");
        assert_eq!(scene.select_next(), Some(b));
        assert_eq!(scene.select_next(), Some(a));
        scene.remove_mesh(a).expect("present");
        assert_eq!(scene.selected(), None);
        assert!(!scene.translate_selected(Vector3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_selected_transforms_apply_deltas() {
        let (mut scene, a, _) = scene_with_cubes();
        scene.select(a).expect("exists");
        assert!(scene.translate_selected(Vector3::new(1.0, 0.0, 0.0)));
        assert!(scene.translate_selected(Vector3::new(1.0, 0.0, 0.0)));
        let mesh = scene.mesh(a).expect("exists");
        assert!((mesh.transform.position.x - 2.0).abs() < 1e-12);
        assert!((mesh.bounding_box().center().x - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_viewport_sizes_buffers() {
        let mut scene = Scene::new(40, 30);
        assert_eq!(scene.buffers().width(), 40);
        assert_eq!(scene.viewport(), Rect::new(0.0, 0.0, 40.0, 30.0));
        scene.set_viewport(Rect::new(0.0, 0.0, 320.0, 240.0));
        assert_eq!(scene.buffers().width(), 320);
        assert_eq!(scene.buffers().height(), 240);
    }
}
