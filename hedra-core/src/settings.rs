//! Render configuration.
use serde::{Deserialize, Serialize};

use crate::mesh::{CentroidPolicy, NormalPolicy};
use crate::projection::PipelineModel;
use crate::raster::ShadingModel;

/// Per-scene render settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub shading: ShadingModel,
    pub pipeline: PipelineModel,
    /// Clip polygons in homogeneous space. Only the Smith pipeline can.
    pub clipping: bool,
    pub normals: NormalPolicy,
    pub centroid: CentroidPolicy,
    /// Outline the selected mesh.
    pub outline_selection: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            shading: ShadingModel::default(),
            pipeline: PipelineModel::default(),
            clipping: true,
            normals: NormalPolicy::default(),
            centroid: CentroidPolicy::default(),
            outline_selection: true,
        }
    }
}

impl RenderSettings {
    /// Cheapest settings: flat shading, no 3D clipping.
    pub fn preview() -> Self {
        Self {
            shading: ShadingModel::Flat,
            pipeline: PipelineModel::WorldReference,
            clipping: false,
            ..Self::default()
        }
    }

    /// Per-pixel lighting through the clipping pipeline.
    pub fn high_quality() -> Self {
        Self {
            shading: ShadingModel::Phong,
            pipeline: PipelineModel::Smith,
            clipping: true,
            ..Self::default()
        }
    }

    /// True when polygons will be clipped in homogeneous space this frame.
    pub fn clips_in_3d(&self) -> bool {
        self.clipping && self.pipeline == PipelineModel::Smith
    }
}
