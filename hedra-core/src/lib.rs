//! Hedra core library: half-edge meshes and a software 3D pipeline.
//!
//! The crate covers the math kernel, the mesh data structure, the camera, two
//! viewing pipelines with 2D/3D clipping, and a scanline rasterizer with
//! flat, Gouraud and Phong shading. A [`Scene`] ties them together and
//! renders into a pair of depth/color buffers.

pub mod camera;
pub mod clip;
pub mod document;
pub mod error;
pub mod geometry;
pub mod math;
pub mod mesh;
pub mod projection;
pub mod raster;
pub mod scene;
pub mod settings;
pub mod transform;

// Re-export commonly used types
pub use camera::Camera;
pub use document::SceneDocument;
pub use error::{HedraError, Result};
pub use geometry::Rect;
pub use mesh::{CentroidPolicy, Material, Mesh, NormalPolicy, Vertex};
pub use projection::{Pipeline, PipelineModel};
pub use raster::{FrameBuffers, Light, OmniLight, Rgba, ShadingModel};
pub use scene::{FrameOutput, Scene};
pub use settings::RenderSettings;
pub use transform::Transform;
