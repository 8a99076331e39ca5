/// Terminal frontend for the wire3d software renderer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use log::{error, info};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use wire3d_core::{Camera, Model, Pipeline};

pub mod renderer;

pub use renderer::TermSurface;

/// Per-tick rotation delta in degrees (X, Y, Z). This constant defines the
/// animation and is kept in lockstep with the original renderer.
const SPIN_DEGREES: (f32, f32, f32) = (0.1, 0.5, 0.0);

/// Main application struct: drives the update/draw cycle at a fixed cadence
pub struct App {
    model: Model,
    camera: Camera,
    pipeline: Pipeline,
    surface: TermSurface,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl App {
    pub fn new(model: Model, camera: Camera) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let pipeline = Pipeline::for_model(&model);

        Ok(Self {
            model,
            camera,
            pipeline,
            surface: TermSurface::new(width as usize, height as usize),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        info!("entered raw mode, starting main loop");

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;
        info!("left raw mode");

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(16); // ~60 FPS

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            // Update
            self.update();

            // Render
            self.draw()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
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
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                KeyCode::Char('w') | KeyCode::Up => {
                    self.model.transform.rotate(5.0, 0.0, 0.0);
                }
                KeyCode::Char('s') | KeyCode::Down => {
                    self.model.transform.rotate(-5.0, 0.0, 0.0);
                }
                KeyCode::Char('a') | KeyCode::Left => {
                    self.model.transform.rotate(0.0, -5.0, 0.0);
                }
                KeyCode::Char('d') | KeyCode::Right => {
                    self.model.transform.rotate(0.0, 5.0, 0.0);
                }
                KeyCode::Char('e') => {
                    self.model.transform.rotate(0.0, 0.0, 5.0);
                }
                KeyCode::Char('r') => {
                    self.model.transform.rotate(0.0, 0.0, -5.0);
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn update(&mut self) {
        let (dx, dy, dz) = SPIN_DEGREES;
        self.model.transform.rotate(dx, dy, dz);
    }

    fn draw(&mut self) -> io::Result<()> {
        let width = self.surface.width() as u32;
        let height = self.surface.height() as u32;

        // A frame error skips the rest of this frame's drawing; the next
        // tick re-runs the pipeline with updated state.
        if let Err(err) = self.pipeline.render(
            &self.model,
            &self.camera,
            width,
            height,
            &mut self.surface,
        ) {
            error!("frame dropped: {err}");
        }

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.surface.present(&mut stdout)?;

        // Status line overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "wire3d | FPS: {:.1} | Controls: WASD/Arrows=Rotate E/R=Roll Q=Quit",
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
