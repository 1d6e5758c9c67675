//! Command line arguments and scene setup shared by the viewer and the
//! headless dump.
use clap::{Parser, ValueEnum};
use hedra_core::{document, PipelineModel, Rect, RenderSettings, Scene, ShadingModel};
use std::error::Error;
use std::path::PathBuf;
use tracing::info;

/// Pixel size used for a dump when neither the flags nor a scene document
/// give one.
pub const DEFAULT_DUMP_SIZE: (usize, usize) = (320, 240);

#[derive(Parser, Debug)]
#[command(name = "hedra-terminal")]
#[command(version, about = "Hedra - half-edge mesh scenes rendered in the terminal")]
pub struct Args {
    /// Scene document (JSON) to open instead of the demo scene.
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Shading model.
    #[arg(long, value_enum)]
    pub shading: Option<ShadingArg>,

    /// Viewing pipeline.
    #[arg(long, value_enum)]
    pub pipeline: Option<PipelineArg>,

    /// Clip polygons in homogeneous space (Smith pipeline only).
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub clipping: Option<bool>,

    /// Render one frame to this PPM file and exit.
    #[arg(long)]
    pub dump: Option<PathBuf>,

    /// Pixel width of the dumped frame.
    #[arg(long)]
    pub width: Option<usize>,

    /// Pixel height of the dumped frame.
    #[arg(long)]
    pub height: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ShadingArg {
    Flat,
    Gouraud,
    Phong,
}

impl From<ShadingArg> for ShadingModel {
    fn from(arg: ShadingArg) -> Self {
        match arg {
            ShadingArg::Flat => ShadingModel::Flat,
            ShadingArg::Gouraud => ShadingModel::Gouraud,
            ShadingArg::Phong => ShadingModel::Phong,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PipelineArg {
    World,
    Smith,
}

impl From<PipelineArg> for PipelineModel {
    fn from(arg: PipelineArg) -> Self {
        match arg {
            PipelineArg::World => PipelineModel::WorldReference,
            PipelineArg::Smith => PipelineModel::Smith,
        }
    }
}

impl Args {
    /// Override the settings named on the command line.
    pub fn apply(&self, settings: &mut RenderSettings) {
        if let Some(shading) = self.shading {
            settings.shading = shading.into();
        }
        if let Some(pipeline) = self.pipeline {
            settings.pipeline = pipeline.into();
        }
        if let Some(clipping) = self.clipping {
            settings.clipping = clipping;
        }
    }

    /// The scene document if one was given, otherwise the demo scene, with
    /// the command line settings applied.
    pub fn load_scene(&self) -> Result<Scene, Box<dyn Error>> {
        let mut scene = match &self.scene {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                let doc = document::from_json(&json)?;
                info!(path = %path.display(), meshes = doc.meshes.len(), "loaded scene");
                Scene::from_document(&doc)?
            }
            None => {
                let (width, height) = DEFAULT_DUMP_SIZE;
                crate::demo_scene(width, height)?
            }
        };
        self.apply(&mut scene.settings);
        Ok(scene)
    }

    /// Size of the dumped frame: flags first, then the scene's buffers.
    pub fn dump_size(&self, scene: &Scene) -> (usize, usize) {
        let from_scene = (scene.buffers().width(), scene.buffers().height());
        let fallback = if self.scene.is_some() {
            from_scene
        } else {
            DEFAULT_DUMP_SIZE
        };
        (
            self.width.unwrap_or(fallback.0),
            self.height.unwrap_or(fallback.1),
        )
    }
}

/// Point the viewport at a `width` x `height` pixel target and widen or
/// narrow the window to keep its height and match the new aspect ratio.
pub fn fit_scene(scene: &mut Scene, width: usize, height: usize) {
    let width = width.max(1);
    let height = height.max(1);
    let aspect = width as f64 / height as f64;
    let center = scene.window.center();
    let half_h = scene.window.height() / 2.0;
    let half_w = half_h * aspect;
    scene.window = Rect::new(
        center.x - half_w,
        center.y - half_h,
        center.x + half_w,
        center.y + half_h,
    );
    scene.set_viewport(Rect::new(0.0, 0.0, width as f64, height as f64));
}
