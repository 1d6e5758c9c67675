//! Viewing pipelines: world space to screen space.
//!
//! Two chains are available. [`WorldReference`] composes view, projection
//! and viewport into one matrix and clips in 2D after the divide. [`Smith`]
//! stops in homogeneous clip space so polygons can be clipped against the
//! six canonical planes before the divide.

pub mod smith;
pub mod world;

use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::error::{HedraError, Result};
use crate::geometry::Rect;
use crate::math::{Matrix, Vector3, Vector4};

pub use smith::{canonical_to_viewport, clipping_transformation, perspective_transformation, Smith};
pub use world::{projection, src_to_srt, sru_to_src, WorldReference};

/// Which chain a scene renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineModel {
    #[default]
    WorldReference,
    Smith,
}

impl PipelineModel {
    /// Integer used by scene documents: 0 world-reference, 1 Smith.
    pub fn selector(self) -> i64 {
        match self {
            PipelineModel::WorldReference => 0,
            PipelineModel::Smith => 1,
        }
    }

    pub fn from_selector(value: i64) -> Result<Self> {
        match value {
            0 => Ok(PipelineModel::WorldReference),
            1 => Ok(PipelineModel::Smith),
            _ => Err(HedraError::InvalidSelector {
                kind: "pipeline model",
                value,
            }),
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            PipelineModel::WorldReference => PipelineModel::Smith,
            PipelineModel::Smith => PipelineModel::WorldReference,
        }
    }
}

/// A pipeline instantiated for one frame's camera and rectangles.
#[derive(Debug, Clone, Copy)]
pub enum Pipeline {
    WorldReference(WorldReference),
    Smith(Smith),
}

impl Pipeline {
    pub fn new(model: PipelineModel, camera: &Camera, window: Rect, viewport: Rect) -> Self {
        match model {
            PipelineModel::WorldReference => {
                Pipeline::WorldReference(WorldReference::new(camera, window, viewport))
            }
            PipelineModel::Smith => Pipeline::Smith(Smith::new(camera, window, viewport)),
        }
    }

    pub fn model(&self) -> PipelineModel {
        match self {
            Pipeline::WorldReference(_) => PipelineModel::WorldReference,
            Pipeline::Smith(_) => PipelineModel::Smith,
        }
    }

    /// Composed world-to-output matrix. Output is screen space for the
    /// world-reference chain and clip space for Smith.
    pub fn matrix(&self) -> Matrix {
        match self {
            Pipeline::WorldReference(chain) => chain.matrix(),
            Pipeline::Smith(chain) => chain.matrix(),
        }
    }

    /// True when the output of [`Pipeline::matrix`] can be clipped against
    /// the canonical homogeneous volume.
    pub fn supports_clip_space(&self) -> bool {
        matches!(self, Pipeline::Smith(_))
    }

    pub fn transform(&self, point: Vector4) -> Vector4 {
        self.matrix() * point
    }

    /// Finish a transformed vertex: divide by `w` and map to pixels.
    /// `None` when the vertex is on or behind the eye plane.
    pub fn to_screen(&self, h: Vector4) -> Option<Vector3> {
        match self {
            Pipeline::WorldReference(chain) => chain.to_screen(h),
            Pipeline::Smith(chain) => chain.to_screen(h),
        }
    }
}

/// Project a single world point to pixels and depth.
pub fn world_to_screen(
    model: PipelineModel,
    camera: &Camera,
    window: Rect,
    viewport: Rect,
    point: Vector3,
) -> Option<Vector3> {
    let pipeline = Pipeline::new(model, camera, window, viewport);
    pipeline.to_screen(pipeline.transform(Vector4::new(point.x, point.y, point.z, 1.0)))
}
