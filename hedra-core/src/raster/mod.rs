//! Software rasterizer: buffers, scanline fill, lighting and shading.

pub mod buffers;
pub mod lighting;
pub mod scanline;
pub mod shading;

pub use buffers::{FrameBuffers, Rgba};
pub use lighting::{LightingContext, Light, OmniLight};
pub use scanline::{draw_line, fill_polygon};
pub use shading::{FlatShader, Fragment, FragmentShader, GouraudShader, PhongShader, ShadingModel};
