/// Terminal globe viewer drawn with ASCII characters
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use geoglobe_core::flyline::animation_phase;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod camera;
pub mod renderer;
pub mod scene;

pub use camera::Camera;
pub use renderer::{AsciiRenderer, Frame};
pub use scene::GlobeScene;

const ORBIT_STEP: f64 = 0.1;
const SPIN_PER_FRAME: f64 = 0.005;
const ZOOM_STEP: f64 = 0.9;

/// Head characters from tail to tip
const HEAD_RAMP: &[char] = &['.', 'o', 'O', '@'];

/// Main application struct for the terminal globe
pub struct TerminalApp {
    scene: GlobeScene,
    camera: Camera,
    renderer: AsciiRenderer,
    running: bool,
    spinning: bool,
    started: Instant,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(scene: GlobeScene) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        Ok(Self {
            camera: Camera::new(width as u32, height as u32, scene.config.radius),
            renderer: AsciiRenderer::new(width as usize, height as usize),
            scene,
            running: true,
            spinning: true,
            started: Instant::now(),
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            if self.spinning {
                self.camera.orbit(SPIN_PER_FRAME, 0.0);
            }

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

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press | KeyEventKind::Repeat,
                ..
            }) => self.handle_key(code),
            Event::Resize(width, height) => {
                log::debug!("terminal resized to {width}x{height}");
                self.camera.resize(width as u32, height as u32);
                self.renderer.resize(width as usize, height as usize);
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        let radius = self.scene.config.radius;
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('w') | KeyCode::Up => self.camera.orbit(0.0, ORBIT_STEP),
            KeyCode::Char('s') | KeyCode::Down => self.camera.orbit(0.0, -ORBIT_STEP),
            KeyCode::Char('a') | KeyCode::Left => self.camera.orbit(-ORBIT_STEP, 0.0),
            KeyCode::Char('d') | KeyCode::Right => self.camera.orbit(ORBIT_STEP, 0.0),
            KeyCode::Char('+') | KeyCode::Char('=') => self.camera.zoom(ZOOM_STEP, radius * 1.2),
            KeyCode::Char('-') => self.camera.zoom(1.0 / ZOOM_STEP, radius * 1.2),
            KeyCode::Char(' ') => self.spinning = !self.spinning,
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let scene = &self.scene;
        let frame = Frame::new(&self.camera);
        self.renderer.clear();

        self.renderer
            .render_mesh(&scene.ocean, &scene.ocean_normals, &frame, Color::DarkBlue);

        for country in &scene.countries {
            self.renderer
                .render_mesh(&country.mesh.fill, &country.normals, &frame, Color::DarkGreen);
            for outline in &country.mesh.outlines {
                self.renderer
                    .render_polyline(&outline.points, true, &frame, '+', Color::Green);
            }
        }

        let phase = animation_phase(
            self.started.elapsed().as_secs_f64(),
            scene.config.animation_duration_secs,
        );
        for line in &scene.fly_lines {
            let path = line.world_points(scene.config.arc_divisions);
            self.renderer
                .render_polyline(&path, false, &frame, '.', Color::DarkYellow);

            let head = line.head_world_points(phase, &scene.config);
            let count = head.len().max(1);
            let marked: Vec<_> = head
                .into_iter()
                .enumerate()
                .map(|(i, point)| (point, HEAD_RAMP[i * HEAD_RAMP.len() / count]))
                .collect();
            self.renderer.render_points(&marked, &frame, Color::Yellow);
        }

        let mut stdout = stdout();
        self.renderer.draw(&mut stdout)?;

        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "geoglobe | FPS: {:.1} | {} countries, {} fly lines | WASD/Arrows=Orbit +/-=Zoom Space=Spin Q=Quit",
                self.fps,
                scene.countries.len(),
                scene.fly_lines.len(),
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
