/// Cubes Terminal - three rotating cubes rendered in the terminal
///
/// Controls:
///   - S: Save the current frame as screencapture-<W>x<H>.png
///   - Q/ESC: Quit
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cubes_core::capture::save_screenshot;
use cubes_core::{DisplaySize, Rasterizer, SceneConfig, Stage};
use cubes_terminal::{TerminalApp, TerminalOptions};
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "cubes-terminal", about = "Three rotating cubes with frame capture")]
struct Cli {
    /// Scene config in TOML; built-in scene when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Drawing-buffer pixels per displayed pixel
    #[arg(long, default_value_t = 1.0)]
    pixel_ratio: f64,

    /// Target frames per second
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Directory screenshots are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Log file used while the terminal renderer owns the screen
    #[arg(long, default_value = "cubes-terminal.log")]
    log_file: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame without a terminal and save it as PNG
    Snapshot {
        /// Animation time in seconds
        #[arg(long, default_value_t = 0.0)]
        time: f64,
        /// Displayed width
        #[arg(long, default_value_t = 300.0)]
        width: f64,
        /// Displayed height
        #[arg(long, default_value_t = 150.0)]
        height: f64,
    },
}

impl Cli {
    /// Where log records go: a file while frames are drawn to the terminal,
    /// stderr for `snapshot`.
    fn log_target(&self) -> Option<&Path> {
        match self.command {
            Some(Command::Snapshot { .. }) => None,
            None => Some(&self.log_file),
        }
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_target())?;

    let config = match &cli.config {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("failed to load scene config {}", path.display()))?,
        None => SceneConfig::default(),
    };

    match cli.command {
        Some(Command::Snapshot { time, width, height }) => {
            let mut stage = Stage::new(&config);
            let mut raster = Rasterizer::new(DisplaySize::new(width, height, cli.pixel_ratio));
            stage
                .frame(time * 1000.0, &mut raster)
                .unwrap_or_else(|never| match never {});

            let path = save_screenshot(raster.frame(), &cli.out_dir)
                .context("failed to save snapshot")?;
            println!("{}", path.display());
        }
        None => {
            log::info!("starting terminal renderer");
            let options = TerminalOptions {
                pixel_ratio: cli.pixel_ratio,
                target_fps: cli.fps,
                out_dir: cli.out_dir,
            };
            let mut app =
                TerminalApp::new(&config, options).context("failed to query terminal size")?;
            app.run().context("terminal renderer failed")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_interactive_logs_to_file() {
        let cli = Cli::parse_from(["cubes-terminal"]);
        assert_eq!(cli.log_target(), Some(Path::new("cubes-terminal.log")));

        let cli = Cli::parse_from(["cubes-terminal", "--log-file", "/tmp/cubes.log"]);
        assert_eq!(cli.log_target(), Some(Path::new("/tmp/cubes.log")));
    }

    #[test]
    fn test_snapshot_logs_to_stderr() {
        let cli = Cli::parse_from(["cubes-terminal", "snapshot", "--time", "1.5"]);
        assert_eq!(cli.log_target(), None);
    }
}
