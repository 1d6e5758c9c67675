//! One full render pass: transform, cull, clip, rasterize.
use tracing::{debug, trace, warn};

use super::frame::{FacePolygon, FrameOutput, MeshFrame};
use super::Scene;
use crate::camera::Camera;
use crate::clip::{clip_line, clip_polygon_2d, clip_polygon_3d, is_rejected, ClipVertex};
use crate::geometry::Rect;
use crate::math::{Matrix, Vector2, Vector3, Vector4};
use crate::mesh::{FaceId, HalfEdgeId, Mesh};
use crate::projection::Pipeline;
use crate::raster::{
    draw_line, fill_polygon, FlatShader, FrameBuffers, GouraudShader, Light, LightingContext,
    OmniLight, PhongShader, Rgba, ShadingModel,
};
use crate::settings::RenderSettings;

const OUTLINE_COLOR: Rgba = Rgba::opaque(255, 200, 0);

/// Pulls outline pixels in front of the faces they border. Depth units
/// differ between pipelines, so the bias is relative.
const OUTLINE_DEPTH_BIAS: f64 = 1e-4;

/// Borrowed, per-frame view of everything a mesh needs to be drawn.
struct FrameContext<'a> {
    camera: &'a Camera,
    ambient: &'a Light,
    lights: &'a [OmniLight],
    settings: &'a RenderSettings,
    viewport: Rect,
    pipeline: Pipeline,
    matrix: Matrix,
}

impl Scene {
    /// Render one frame and return the buffers.
    pub fn render(&mut self) -> &FrameBuffers {
        self.initialize_buffers();

        let pipeline = Pipeline::new(self.settings.pipeline, &self.camera, self.window, self.viewport);
        let ctx = FrameContext {
            camera: &self.camera,
            ambient: &self.ambient,
            lights: &self.lights,
            settings: &self.settings,
            viewport: self.viewport,
            pipeline,
            matrix: pipeline.matrix(),
        };

        let mut frame = FrameOutput {
            pipeline: self.settings.pipeline,
            shading: self.settings.shading,
            meshes: Vec::with_capacity(self.meshes.len()),
        };
        for mesh in &mut self.meshes {
            frame.meshes.push(ctx.draw_mesh(mesh, &mut self.buffers));
        }

        if self.settings.outline_selection {
            if let Some(mesh) = self.selected.and_then(|id| self.meshes.iter().find(|m| m.id == id)) {
                if let Some(out) = frame.mesh(mesh.id) {
                    ctx.draw_outline(mesh, out, &mut self.buffers);
                }
            }
        }

        debug!(
            pipeline = ?frame.pipeline,
            shading = ?frame.shading,
            drawn = frame.faces_drawn(),
            culled = frame.faces_culled(),
            clipped = frame.faces_clipped(),
            pixels = frame.pixels_written(),
            "frame rendered"
        );
        self.frame = frame;
        &self.buffers
    }
}

impl FrameContext<'_> {
    fn draw_mesh(&self, mesh: &mut Mesh, buffers: &mut FrameBuffers) -> MeshFrame {
        let mut out = MeshFrame::new(mesh.id);
        if !mesh.visible {
            out.culled = true;
            return out;
        }

        // Without homogeneous clipping, whole objects are kept or dropped by
        // the depth of their centroid.
        if !self.settings.clips_in_3d() {
            let centroid = mesh.centroid(self.settings.centroid);
            if !self.camera.in_depth_range(centroid) {
                trace!(mesh = %mesh.name, depth = self.camera.depth_of(centroid), "outside near/far");
                out.culled = true;
                return out;
            }
        }

        let homogeneous: Vec<Vector4> = mesh
            .vertices()
            .iter()
            .map(|v| self.matrix * v.position)
            .collect();
        out.screen_vertices = homogeneous.iter().map(|&h| self.pipeline.to_screen(h)).collect();

        let material = mesh.material;
        let lighting = LightingContext {
            ambient: self.ambient,
            lights: self.lights,
            material: &material,
            eye: self.camera.position,
        };
        let vertex_colors: Vec<Vector3> = match self.settings.shading {
            ShadingModel::Gouraud => mesh
                .vertices()
                .iter()
                .map(|v| lighting.illuminate(v.point(), v.normal))
                .collect(),
            _ => Vec::new(),
        };

        for face in 0..mesh.num_faces() {
            let face = FaceId(face);
            if !mesh.update_face_visibility(face, self.camera.position) {
                out.faces_culled += 1;
                continue;
            }

            let polygon: Vec<ClipVertex> = mesh
                .face(face)
                .vertices
                .iter()
                .map(|&v| {
                    let vertex = mesh.vertex(v);
                    let attribute = match self.settings.shading {
                        ShadingModel::Flat => Vector3::zeros(),
                        ShadingModel::Gouraud => vertex_colors[v.0],
                        ShadingModel::Phong => vertex.normal,
                    };
                    ClipVertex::new(homogeneous[v.0], vertex.point(), attribute)
                })
                .collect();

            let Some(screen) = self.clip_to_screen(mesh, face, &polygon) else {
                out.faces_clipped += 1;
                continue;
            };

            out.pixels_written += match self.settings.shading {
                ShadingModel::Flat => {
                    let color = lighting.illuminate(mesh.face_centroid(face), mesh.face(face).normal);
                    let shader = FlatShader {
                        color: Rgba::from_channels(color),
                    };
                    fill_polygon(buffers, &screen, &shader)
                }
                ShadingModel::Gouraud => fill_polygon(buffers, &screen, &GouraudShader),
                ShadingModel::Phong => fill_polygon(buffers, &screen, &PhongShader { lighting }),
            };
            out.faces_drawn += 1;
            out.polygons.push(FacePolygon {
                face,
                vertices: screen,
            });
        }

        trace!(
            mesh = %mesh.name,
            drawn = out.faces_drawn,
            culled = out.faces_culled,
            clipped = out.faces_clipped,
            "mesh rendered"
        );
        out
    }

    /// Clip a transformed polygon and bring it to screen space. `None` when
    /// nothing drawable is left.
    fn clip_to_screen(
        &self,
        mesh: &Mesh,
        face: FaceId,
        polygon: &[ClipVertex],
    ) -> Option<Vec<ClipVertex>> {
        let screen = if self.settings.clips_in_3d() {
            let clipped = clip_polygon_3d(polygon);
            clipped
                .into_iter()
                .filter_map(|v| self.finish(v))
                .collect::<Vec<_>>()
        } else {
            if polygon.iter().any(|v| v.position.w <= 0.0) {
                warn!(
                    mesh = %mesh.name,
                    face = face.0,
                    "face crosses the eye plane; dropped without 3D clipping"
                );
                return None;
            }
            let projected: Vec<ClipVertex> = polygon.iter().filter_map(|&v| self.finish(v)).collect();
            clip_polygon_2d(&projected, self.viewport)
        };
        (screen.len() >= 3).then_some(screen)
    }

    /// Divide and map to pixels, storing `(x, y, depth, 1)`.
    fn finish(&self, v: ClipVertex) -> Option<ClipVertex> {
        self.pipeline.to_screen(v.position).map(|s| ClipVertex {
            position: Vector4::new(s.x, s.y, s.z, 1.0),
            ..v
        })
    }

    /// Draw the visible edges of `mesh` over the fill.
    fn draw_outline(&self, mesh: &Mesh, out: &MeshFrame, buffers: &mut FrameBuffers) {
        let (min, max) = (self.viewport.min(), self.viewport.max());
        for (index, he) in mesh.half_edges().iter().enumerate() {
            let Some(face) = he.face else { continue };
            if !mesh.face(face).is_visible {
                continue;
            }
            // Each undirected edge once: skip the higher-indexed twin when
            // both sides are visible.
            if let Some(twin) = he.twin {
                let twin_visible = mesh
                    .half_edge(twin)
                    .face
                    .is_some_and(|f| mesh.face(f).is_visible);
                if twin_visible && twin.0 < index {
                    continue;
                }
            }
            let Some(dest) = mesh.destination(HalfEdgeId(index)) else {
                continue;
            };
            let (Some(Some(a)), Some(Some(b))) = (
                out.screen_vertices.get(he.origin.0),
                out.screen_vertices.get(dest.0),
            ) else {
                continue;
            };

            let (p0, p1) = (Vector2::new(a.x, a.y), Vector2::new(b.x, b.y));
            let segment = clip_line(p0, p1, min, max);
            if is_rejected(segment) {
                continue;
            }
            let length = (p1 - p0).norm();
            let depth_at = |p: Vector2| {
                let t = if length > 0.0 { (p - p0).norm() / length } else { 0.0 };
                a.z + (b.z - a.z) * t
            };
            let bias = OUTLINE_DEPTH_BIAS * a.z.abs().max(b.z.abs()).max(1.0);
            draw_line(
                buffers,
                Vector3::new(segment.0.x, segment.0.y, depth_at(segment.0)),
                Vector3::new(segment.1.x, segment.1.y, depth_at(segment.1)),
                OUTLINE_COLOR,
                bias,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::PipelineModel;

    fn cube_scene(settings: RenderSettings) -> (Scene, u32) {
        let mut scene = Scene::new(80, 60);
        scene.settings = settings;
        let id = scene.add_mesh(Mesh::cube(2.0).expect("cube"));
        (scene, id)
    }

    fn lit_pixels(buffers: &FrameBuffers) -> usize {
        buffers.color_buffer().iter().filter(|c| !c.is_transparent()).count()
    }

    #[test]
    fn test_cube_renders_in_every_mode() {
        for pipeline in [PipelineModel::WorldReference, PipelineModel::Smith] {
            for shading in [ShadingModel::Flat, ShadingModel::Gouraud, ShadingModel::Phong] {
                let settings = RenderSettings {
                    pipeline,
                    shading,
                    ..RenderSettings::default()
                };
                let (mut scene, _) = cube_scene(settings);
                let pixels = lit_pixels(scene.render());
                assert!(pixels > 0, "{:?}/{:?} drew nothing", pipeline, shading);
                // Looking straight down -z only the front two triangles face us.
                assert_eq!(scene.frame().faces_drawn(), 2);
                assert_eq!(scene.frame().faces_culled(), 10);
            }
        }
    }

    #[test]
    fn test_center_pixel_is_the_front_face() {
        let (mut scene, id) = cube_scene(RenderSettings::preview());
        let buffers = scene.render();
        let depth = buffers.depth_at(40, 30).expect("in range");
        // Eye at z = 10, front face at z = 1.
        assert!((depth - 9.0).abs() < 1e-6);
        let out = scene.frame().mesh(id).expect("rendered");
        assert_eq!(out.screen_vertices.len(), 8);
        assert_eq!(out.polygons.len(), 2);
    }

    #[test]
    fn test_mesh_behind_camera_is_culled() {
        let (mut scene, id) = cube_scene(RenderSettings::preview());
        scene.translate_mesh(id, Vector3::new(0.0, 0.0, 20.0)).expect("exists");
        assert_eq!(lit_pixels(scene.render()), 0);
        assert!(scene.frame().mesh(id).is_some_and(|m| m.culled));
    }

    fn floor_scene(settings: RenderSettings) -> (Scene, u32) {
        let mut scene = Scene::new(80, 60);
        scene.settings = settings;
        // Reaches from far in front of the eye to behind it.
        let mut floor = Mesh::plane(20.0, 20.0, 2).expect("plane");
        floor.translate(Vector3::new(0.0, -1.0, 0.0));
        let id = scene.add_mesh(floor);
        (scene, id)
    }

    #[test]
    fn test_smith_clipping_keeps_faces_crossing_the_eye_plane() {
        let (mut scene, id) = floor_scene(RenderSettings::high_quality());
        scene.render();
        let out = scene.frame().mesh(id).expect("rendered");
        assert_eq!(out.faces_drawn, 4);
        for polygon in &out.polygons {
            for v in &polygon.vertices {
                let p = v.position;
                assert!(p.z >= -1e-9 && p.z <= 1.0 + 1e-9, "depth {}", p.z);
                assert!(p.x >= -1e-9 && p.x <= 79.0 + 1e-9);
                assert!(p.y >= -1e-9 && p.y <= 59.0 + 1e-9);
            }
        }
    }

    #[test]
    fn test_faces_crossing_the_eye_plane_drop_without_clipping() {
        let (mut scene, id) = floor_scene(RenderSettings::preview());
        scene.render();
        let out = scene.frame().mesh(id).expect("rendered");
        assert_eq!(out.faces_drawn, 2);
        assert_eq!(out.faces_clipped, 2);
        assert!(out.screen_vertices.iter().any(Option::is_none));
    }

    #[test]
    fn test_selection_outline_is_drawn() {
        let (mut scene, id) = cube_scene(RenderSettings::preview());
        scene.render();
        let plain: Vec<Rgba> = scene.buffers().color_buffer().to_vec();
        scene.select(id).expect("exists");
        scene.render();
        let outlined = scene.buffers().color_buffer();
        assert!(outlined.iter().any(|&c| c == OUTLINE_COLOR));
        assert!(!plain.iter().any(|&c| c == OUTLINE_COLOR));
    }

    #[test]
    fn test_hidden_mesh_draws_nothing() {
        let (mut scene, id) = cube_scene(RenderSettings::default());
        scene.mesh_mut(id).expect("exists").visible = false;
        assert_eq!(lit_pixels(scene.render()), 0);
    }
}
