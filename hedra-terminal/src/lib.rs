//! Terminal viewer for Hedra scenes
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self},
};
use hedra_core::math::Vector3;
use hedra_core::{Material, Mesh, NormalPolicy, Scene, ShadingModel};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tracing::debug;

pub mod cli;
pub mod renderer;

pub use renderer::HalfBlockPresenter;

const ORBIT_STEP: f64 = 0.1;
const PAN_STEP: f64 = 0.25;
const ZOOM_STEP: f64 = 0.9;
const MOVE_STEP: f64 = 0.25;
const TURN_STEP: f64 = 0.15;
const SCALE_STEP: f64 = 1.1;
const AUTO_ORBIT: f64 = 0.01;

pub const CONTROLS: &str = "WASD/Arrows=Orbit IJKL=Pan +/-=Zoom Tab=Select R/F=Lift U/O=Turn [/]=Scale \
1/2/3=Shading P=Pipeline C=Clip N=Normals Space=Spin Q=Quit";

/// Three solids over a floor, lit from the upper right.
pub fn demo_scene(width: usize, height: usize) -> hedra_core::Result<Scene> {
    let mut scene = Scene::new(width, height);
    scene.camera.position = Vector3::new(4.0, 3.0, 9.0);

    let mut cube = Mesh::cube(1.5)?;
    cube.material = Material::new(
        Vector3::new(0.3, 0.1, 0.1),
        Vector3::new(0.8, 0.25, 0.2),
        Vector3::new(0.6, 0.6, 0.6),
        12.0,
    );
    let mut pyramid = Mesh::pyramid(1.5, 2.0)?;
    pyramid.material = Material::new(
        Vector3::new(0.1, 0.3, 0.1),
        Vector3::new(0.3, 0.75, 0.25),
        Vector3::new(0.3, 0.3, 0.3),
        6.0,
    );
    let mut sphere = Mesh::uv_sphere(0.8, 16, 10)?;
    sphere.material = Material::new(
        Vector3::new(0.1, 0.1, 0.3),
        Vector3::new(0.25, 0.4, 0.9),
        Vector3::new(0.9, 0.9, 0.9),
        40.0,
    );
    let mut floor = Mesh::plane(10.0, 10.0, 5)?;
    floor.material = Material::grey(0.25, 0.45, 0.05, 2.0);

    let cube = scene.add_mesh(cube);
    let pyramid = scene.add_mesh(pyramid);
    let sphere = scene.add_mesh(sphere);
    let floor = scene.add_mesh(floor);
    scene.translate_mesh(cube, Vector3::new(-2.0, 0.0, 0.0))?;
    scene.rotate_mesh(pyramid, Vector3::new(0.0, 0.4, 0.0))?;
    scene.translate_mesh(sphere, Vector3::new(2.0, 0.0, 0.0))?;
    scene.translate_mesh(floor, Vector3::new(0.0, -1.0, 0.0))?;
    scene.select(pyramid)?;
    Ok(scene)
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    scene: Scene,
    presenter: HalfBlockPresenter,
    running: bool,
    auto_rotate: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    /// Fit `scene` to the current terminal.
    pub fn new(scene: Scene) -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        Ok(Self::with_size(scene, columns, rows))
    }

    /// Fit `scene` to a terminal of `columns` x `rows` cells.
    pub fn with_size(mut scene: Scene, columns: u16, rows: u16) -> Self {
        cli::fit_scene(
            &mut scene,
            columns as usize,
            HalfBlockPresenter::pixel_height(rows),
        );
        Self {
            scene,
            presenter: HalfBlockPresenter::default(),
            running: true,
            auto_rotate: false,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            self.update();
            self.render()?;

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        match event::read()? {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press | KeyEventKind::Repeat,
                ..
            }) => self.handle_key(code),
            Event::Resize(columns, rows) => {
                cli::fit_scene(
                    &mut self.scene,
                    columns as usize,
                    HalfBlockPresenter::pixel_height(rows),
                );
                queue!(stdout(), terminal::Clear(terminal::ClearType::All))?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Apply one key press to the camera, the selection or the settings.
    pub fn handle_key(&mut self, code: KeyCode) {
        let scene = &mut self.scene;
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,

            KeyCode::Char('w') | KeyCode::Up => scene.camera.orbit(0.0, ORBIT_STEP),
            KeyCode::Char('s') | KeyCode::Down => scene.camera.orbit(0.0, -ORBIT_STEP),
            KeyCode::Char('a') | KeyCode::Left => scene.camera.orbit(-ORBIT_STEP, 0.0),
            KeyCode::Char('d') | KeyCode::Right => scene.camera.orbit(ORBIT_STEP, 0.0),
            KeyCode::Char('i') => scene.camera.pan(0.0, PAN_STEP),
            KeyCode::Char('k') => scene.camera.pan(0.0, -PAN_STEP),
            KeyCode::Char('j') => scene.camera.pan(-PAN_STEP, 0.0),
            KeyCode::Char('l') => scene.camera.pan(PAN_STEP, 0.0),
            KeyCode::Char('+') | KeyCode::Char('=') => scene.camera.zoom(ZOOM_STEP),
            KeyCode::Char('-') => scene.camera.zoom(1.0 / ZOOM_STEP),

            KeyCode::Tab => {
                scene.select_next();
            }
            KeyCode::Char('x') => scene.deselect(),
            KeyCode::Char('r') => {
                scene.translate_selected(Vector3::new(0.0, MOVE_STEP, 0.0));
            }
            KeyCode::Char('f') => {
                scene.translate_selected(Vector3::new(0.0, -MOVE_STEP, 0.0));
            }
            KeyCode::Char('u') => {
                scene.rotate_selected(Vector3::new(0.0, TURN_STEP, 0.0));
            }
            KeyCode::Char('o') => {
                scene.rotate_selected(Vector3::new(0.0, -TURN_STEP, 0.0));
            }
            KeyCode::Char(']') => {
                scene.scale_selected(Vector3::new(SCALE_STEP, SCALE_STEP, SCALE_STEP));
            }
            KeyCode::Char('[') => {
                let factor = 1.0 / SCALE_STEP;
                scene.scale_selected(Vector3::new(factor, factor, factor));
            }

            KeyCode::Char('1') => scene.settings.shading = ShadingModel::Flat,
            KeyCode::Char('2') => scene.settings.shading = ShadingModel::Gouraud,
            KeyCode::Char('3') => scene.settings.shading = ShadingModel::Phong,
            KeyCode::Char('p') => scene.settings.pipeline = scene.settings.pipeline.toggle(),
            KeyCode::Char('c') => scene.settings.clipping = !scene.settings.clipping,
            KeyCode::Char('n') => {
                let policy = match scene.settings.normals {
                    NormalPolicy::Foley => NormalPolicy::Average,
                    NormalPolicy::Average => NormalPolicy::Foley,
                };
                scene.set_normal_policy(policy);
            }
            KeyCode::Char(' ') => self.auto_rotate = !self.auto_rotate,
            _ => {}
        }
    }

    fn update(&mut self) {
        if self.auto_rotate {
            self.scene.camera.orbit(AUTO_ORBIT, 0.0);
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let buffers = self.scene.render();

        let mut stdout = stdout();
        self.presenter.draw(buffers, &mut stdout)?;

        let frame = self.scene.frame();
        debug!(
            faces_drawn = frame.faces_drawn(),
            pixels = frame.pixels_written(),
            "presented frame"
        );
        let settings = &self.scene.settings;
        let selected = self
            .scene
            .selected_mesh()
            .map(|mesh| mesh.name.as_str())
            .unwrap_or("-");
        let status = format!(
            "Hedra | FPS: {:.1} | {:?} | {:?}{} | faces {} | selected {}",
            self.fps,
            settings.shading,
            settings.pipeline,
            if settings.clips_in_3d() { " clip" } else { "" },
            frame.faces_drawn(),
            selected,
        );

        // Draw UI overlay
        let (_, rows) = terminal::size()?;
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            SetBackgroundColor(Color::Black),
            Print(status),
            cursor::MoveTo(0, rows.saturating_sub(1)),
            SetForegroundColor(Color::DarkGrey),
            Print(CONTROLS),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hedra_core::PipelineModel;

    fn app() -> TerminalApp {
        TerminalApp::with_size(demo_scene(80, 48).expect("demo scene"), 80, 24)
    }

    #[test]
    fn test_demo_scene_renders_every_mesh() {
        let mut scene = demo_scene(120, 80).expect("demo scene");
        scene.render();
        assert_eq!(scene.meshes().len(), 4);
        for mesh in &scene.frame().meshes {
            assert!(mesh.faces_drawn > 0, "mesh {} drew nothing", mesh.mesh);
        }
    }

    #[test]
    fn test_app_fits_scene_to_terminal() {
        let app = app();
        assert_eq!(app.scene().buffers().width(), 80);
        assert_eq!(app.scene().buffers().height(), 48);
    }

    #[test]
    fn test_keys_change_settings() {
        let mut app = app();
        app.handle_key(KeyCode::Char('3'));
        app.handle_key(KeyCode::Char('p'));
        assert_eq!(app.scene().settings.shading, ShadingModel::Phong);
        assert_eq!(app.scene().settings.pipeline, PipelineModel::Smith);

        app.handle_key(KeyCode::Char('n'));
        assert_eq!(app.scene().settings.normals, NormalPolicy::Average);

        app.handle_key(KeyCode::Char('q'));
        assert!(!app.is_running());
    }

    #[test]
    fn test_keys_move_selection_and_camera() {
        let mut app = app();
        let before = app.scene().selected_mesh().expect("pyramid").bounding_box();
        app.handle_key(KeyCode::Char('r'));
        let after = app.scene().selected_mesh().expect("pyramid").bounding_box();
        assert!((after.min.y - before.min.y - MOVE_STEP).abs() < 1e-9);

        let distance = app.scene().camera.distance_to_target();
        app.handle_key(KeyCode::Char('+'));
        assert!((app.scene().camera.distance_to_target() - distance * ZOOM_STEP).abs() < 1e-9);

        let selected = app.scene().selected();
        app.handle_key(KeyCode::Tab);
        assert_ne!(app.scene().selected(), selected);
    }
}
