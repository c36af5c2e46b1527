/// Terminal frame driver for the rotating-cubes scene
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal,
};
use cubes_core::capture::save_screenshot;
use cubes_core::{DisplaySize, Rasterizer, SceneConfig, Stage};
use std::io::{self, stdout, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::HalfBlockRenderer;

/// Runtime knobs for the terminal driver
#[derive(Debug, Clone)]
pub struct TerminalOptions {
    /// Drawing-buffer pixels per half-block pixel
    pub pixel_ratio: f64,
    pub target_fps: u32,
    /// Where screenshots are written
    pub out_dir: PathBuf,
}

impl Default for TerminalOptions {
    fn default() -> Self {
        Self {
            pixel_ratio: 1.0,
            target_fps: 30,
            out_dir: PathBuf::from("."),
        }
    }
}

/// Terminal cells shown as a surface: each cell is one pixel wide and two
/// half-block pixels tall.
pub fn display_size(columns: u16, rows: u16, pixel_ratio: f64) -> DisplaySize {
    DisplaySize::new(f64::from(columns), f64::from(rows) * 2.0, pixel_ratio)
}

/// Main application struct for terminal rendering
pub struct TerminalApp {
    stage: Stage,
    raster: Rasterizer,
    presenter: HalfBlockRenderer,
    options: TerminalOptions,
    running: bool,
    started: Instant,
    last_fps_sample: Instant,
    frame_count: u32,
    fps: f32,
    status: Option<String>,
}

impl TerminalApp {
    pub fn new(config: &SceneConfig, options: TerminalOptions) -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        let now = Instant::now();

        Ok(Self {
            stage: Stage::new(config),
            raster: Rasterizer::new(display_size(columns, rows, options.pixel_ratio)),
            presenter: HalfBlockRenderer::new(columns, rows),
            options,
            running: true,
            started: now,
            last_fps_sample: now,
            frame_count: 0,
            fps: 0.0,
            status: None,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        log::info!("frame loop stopped after {:.1}s", self.stage.state().seconds());
        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_fps = u64::from(self.options.target_fps.max(1));
        let target_frame_time = Duration::from_millis(1000 / target_fps);

        while self.running {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }
            if !self.running {
                break;
            }

            // Advance the clock and draw
            let elapsed_ms = self.started.elapsed().as_secs_f64() * 1000.0;
            self.stage
                .frame(elapsed_ms, &mut self.raster)
                .unwrap_or_else(|never| match never {});
            self.present()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_fps_sample).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_fps_sample).as_secs_f32();
                self.frame_count = 0;
                self.last_fps_sample = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                KeyCode::Char('s') => self.screenshot(),
                _ => {}
            },
            Event::Resize(columns, rows) => {
                self.presenter.resize(columns, rows);
                self.raster
                    .set_display_size(display_size(columns, rows, self.options.pixel_ratio));
            }
            _ => {}
        }
    }

    /// Redraw with the stored time, then save exactly that frame.
    fn screenshot(&mut self) {
        self.stage
            .render(&mut self.raster)
            .unwrap_or_else(|never| match never {});

        self.status = Some(match save_screenshot(self.raster.frame(), &self.options.out_dir) {
            Ok(path) => format!("saved {}", path.display()),
            Err(err) => {
                log::error!("screenshot failed: {err}");
                format!("screenshot failed: {err}")
            }
        });
    }

    fn present(&mut self) -> io::Result<()> {
        let mut stdout = stdout();
        self.presenter.draw(self.raster.frame(), &mut stdout)?;

        // Draw UI overlay
        let size = self.raster.frame().size();
        let mut line = format!(
            "Cubes | {size} @ {:.1} FPS | t={:.2}s | S=Screenshot Q=Quit",
            self.fps,
            self.stage.state().seconds()
        );
        if let Some(status) = &self.status {
            line.push_str(" | ");
            line.push_str(status);
        }
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetBackgroundColor(Color::Black),
            SetForegroundColor(Color::Yellow),
            Print(line),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubes_core::PixelSize;

    #[test]
    fn test_display_size_doubles_rows() {
        let display = display_size(80, 24, 1.0);
        assert_eq!(display.drawing_buffer_size(), PixelSize::new(80, 48));
        let aspect = display.aspect().unwrap();
        assert!((aspect - 80.0 / 48.0).abs() < 1e-6);
    }

    #[test]
    fn test_display_size_with_ratio() {
        let display = display_size(80, 24, 2.5);
        assert_eq!(display.drawing_buffer_size(), PixelSize::new(200, 120));
    }
}
