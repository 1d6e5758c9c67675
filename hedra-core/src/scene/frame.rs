//! Per-frame output, rebuilt by every render pass.
use crate::clip::ClipVertex;
use crate::math::Vector3;
use crate::mesh::FaceId;
use crate::projection::PipelineModel;
use crate::raster::ShadingModel;

/// A face that made it to the rasterizer, as screen-space polygon.
#[derive(Debug, Clone)]
pub struct FacePolygon {
    pub face: FaceId,
    pub vertices: Vec<ClipVertex>,
}

/// What one mesh produced this frame.
#[derive(Debug, Clone, Default)]
pub struct MeshFrame {
    pub mesh: u32,
    /// The whole mesh was skipped: hidden, or its centroid outside the
    /// near/far range.
    pub culled: bool,
    /// Pixel position and depth per vertex; `None` on or behind the eye plane.
    pub screen_vertices: Vec<Option<Vector3>>,
    pub polygons: Vec<FacePolygon>,
    pub faces_drawn: usize,
    /// Back faces.
    pub faces_culled: usize,
    /// Faces with nothing left after clipping.
    pub faces_clipped: usize,
    pub pixels_written: usize,
}

impl MeshFrame {
    pub fn new(mesh: u32) -> Self {
        Self {
            mesh,
            ..Self::default()
        }
    }
}

/// Side table for the last rendered frame.
#[derive(Debug, Clone, Default)]
pub struct FrameOutput {
    pub pipeline: PipelineModel,
    pub shading: ShadingModel,
    pub meshes: Vec<MeshFrame>,
}

impl FrameOutput {
    pub fn mesh(&self, id: u32) -> Option<&MeshFrame> {
        self.meshes.iter().find(|m| m.mesh == id)
    }

    pub fn faces_drawn(&self) -> usize {
        self.meshes.iter().map(|m| m.faces_drawn).sum()
    }

    pub fn faces_culled(&self) -> usize {
        self.meshes.iter().map(|m| m.faces_culled).sum()
    }

    pub fn faces_clipped(&self) -> usize {
        self.meshes.iter().map(|m| m.faces_clipped).sum()
    }

    pub fn pixels_written(&self) -> usize {
        self.meshes.iter().map(|m| m.pixels_written).sum()
    }
}
