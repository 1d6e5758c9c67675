//! Hedra terminal viewer
//!
//! Opens a scene document (or the built-in demo scene) and renders it with
//! truecolor half-block cells. With `--dump` it renders one frame to a PPM
//! file instead and exits.
use clap::Parser;
use hedra_terminal::cli::{self, Args};
use hedra_terminal::TerminalApp;
use std::error::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let result = match &args.dump {
        Some(_) => dump(&args),
        None => interactive(&args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn dump(args: &Args) -> Result<(), Box<dyn Error>> {
    let Some(path) = &args.dump else {
        return Ok(());
    };
    let mut scene = args.load_scene()?;
    let (width, height) = args.dump_size(&scene);
    if (width, height) != (scene.buffers().width(), scene.buffers().height()) {
        cli::fit_scene(&mut scene, width, height);
    }

    let ppm = scene.render().to_ppm();
    std::fs::write(path, ppm)?;

    let frame = scene.frame();
    info!(
        path = %path.display(),
        width,
        height,
        faces_drawn = frame.faces_drawn(),
        faces_culled = frame.faces_culled(),
        "wrote frame"
    );
    Ok(())
}

fn interactive(args: &Args) -> Result<(), Box<dyn Error>> {
    let scene = args.load_scene()?;
    let mut app = TerminalApp::new(scene)?;
    app.run()?;
    Ok(())
}
