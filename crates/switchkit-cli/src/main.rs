use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use skia_safe::Rect;
use std::fs;
use std::path::PathBuf;
use switchkit_core::compositing::RecordingCompositor;
use switchkit_core::systems::render_to_png;
use switchkit_core::{DefaultAssetLoader, SwitchConfig, ToggleSwitchView};
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Switch width before the border stroke is added
    #[arg(long, default_value_t = 100.0)]
    width: f32,

    /// Switch height before the border stroke is added
    #[arg(long, default_value_t = 40.0)]
    height: f32,

    /// JSON switch configuration
    #[arg(long, value_name = "JSON")]
    config: Option<PathBuf>,

    /// Timeline time (seconds) of the first frame
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Number of frames to render
    #[arg(long, default_value_t = 1)]
    frames: u32,

    /// Frames per second when rendering more than one frame
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Directory that receives frame_NNNN.png files
    #[arg(long, value_name = "DIR", default_value = "switchkit-frames")]
    output: PathBuf,

    /// Walk the layer tree without rasterizing or writing files
    #[arg(long)]
    dry_run: bool,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogFormat {
    Pretty,
    Json,
}

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from(cli.log_level).into())
        .from_env_lossy();

    let subscriber_builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match cli.log_format {
        LogFormat::Json => subscriber_builder.json().init(),
        LogFormat::Pretty => subscriber_builder.pretty().init(),
    }

    if let Err(e) = run(&cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    if cli.fps == 0 {
        bail!("--fps must be greater than zero");
    }

    let config = match &cli.config {
        Some(path) => SwitchConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SwitchConfig::default(),
    };

    let bounds = Rect::from_wh(cli.width, cli.height);
    let mut view = ToggleSwitchView::with_config(bounds, config, &DefaultAssetLoader)
        .context("building switch")?;
    info!(frame = ?view.frame(), "switch ready");

    if !cli.dry_run {
        fs::create_dir_all(&cli.output)
            .with_context(|| format!("creating {}", cli.output.display()))?;
    }

    for index in 0..cli.frames {
        let time = cli.time + index as f64 / cli.fps as f64;
        view.update(time);

        if cli.dry_run {
            let mut recorder = RecordingCompositor::new();
            view.render(&mut recorder)?;
            info!(
                index,
                time,
                state = ?view.state(),
                ops = recorder.ops().len(),
                depth = recorder.max_depth(),
                balanced = recorder.is_balanced(),
                "dry run"
            );
            continue;
        }

        let png = render_to_png(&view)?;
        let path = cli.output.join(format!("frame_{:04}.png", index));
        fs::write(&path, png).with_context(|| format!("writing {}", path.display()))?;
        info!(index, time, state = ?view.state(), path = %path.display(), "frame written");
    }

    info!(
        frames = cli.frames,
        completed = view.completed_transitions(),
        "render complete"
    );
    Ok(())
}
