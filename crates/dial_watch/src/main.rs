use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use dial_app::{App, AppConfig, LocalClock, LoggingComplications};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file with window settings and a `[face]` table
    #[arg(long)]
    config: Option<PathBuf>,

    /// error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Render against the recording backend instead of opening a window
    #[arg(long)]
    headless: bool,

    /// Frames to simulate in headless mode
    #[arg(long, default_value_t = 10)]
    frames: u32,

    /// Start (and stay) in ambient mode
    #[arg(long)]
    ambient: bool,

    /// Square surface size in pixels; overrides the config file
    #[arg(long)]
    size: Option<u32>,

    /// Present without waiting for vertical sync
    #[arg(long)]
    no_vsync: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    dial_app::logging::init(dial_app::logging::parse_level(&args.log_level)?)?;

    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(size) = args.size {
        config.width = size;
        config.height = size;
    }

    let mut app = App::new(config).with_complications(Box::new(LoggingComplications::default()));
    if args.ambient {
        app = app.with_always_ambient(true);
    }
    if args.no_vsync {
        app = app.with_vsync(false);
    }

    if args.headless {
        let summary = dial_app::simulate(
            app.config(),
            LocalClock,
            Box::new(LoggingComplications::default()),
            args.frames,
        )?;
        log::info!(
            "{} frames, {} draw calls, {} idle waits",
            summary.frames,
            summary.draw_calls,
            summary.idle_waits
        );
        return Ok(());
    }

    app.run()
}
