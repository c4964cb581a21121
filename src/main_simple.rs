use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use traffic_canvas::{
    graphics::PixelCanvas, ManualScheduler, SceneConfig, SceneKind, Stage, SurfaceSize,
    TrafficPreset,
};

#[derive(Parser)]
#[command(name = "traffic-canvas-headless")]
#[command(about = "Runs an animation into an offscreen framebuffer")]
struct Args {
    /// Scene configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Traffic preset; replaces the traffic and road sections of the configuration
    #[arg(short, long, value_enum)]
    preset: Option<TrafficPreset>,

    /// Animation to run
    #[arg(long, value_enum, default_value_t = SceneKind::Traffic)]
    scene: SceneKind,

    /// Random seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of frames to draw
    #[arg(short, long, default_value_t = 300)]
    frames: u64,

    /// Frames per second to pace at; 0 runs as fast as possible
    #[arg(long, default_value_t = 60)]
    fps: u32,

    #[arg(long, default_value_t = 1200)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Write the last frame as a PNG image
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(args: &Args) -> Result<SceneConfig> {
    let mut config = match &args.config {
        Some(path) => SceneConfig::load_from_file(path)?,
        None => SceneConfig::default(),
    };

    if let Some(preset) = args.preset {
        let bundle = SceneConfig::preset(preset);
        config.traffic = bundle.traffic;
        config.road = bundle.road;
    }

    if args.seed.is_some() {
        config.random.seed = args.seed;
    }

    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info })
        .init();
    info!("Starting Traffic Canvas (headless)");

    let config = load_config(&args)?;
    let size = SurfaceSize::new(args.width, args.height);
    let animation = args.scene.build(&config, size);

    let Some(mut stage) = Stage::mount(animation, Ok(PixelCanvas::new(size)), ManualScheduler::new()) else {
        info!("Nothing to draw on a {}x{} surface", size.width, size.height);
        return Ok(());
    };

    let frame_time = if args.fps > 0 {
        Some(Duration::from_secs_f64(1.0 / args.fps as f64))
    } else {
        None
    };
    let start_time = Instant::now();
    let mut last_report = Instant::now();

    while stage.frames_drawn() < args.frames {
        let frame_start = Instant::now();
        for handle in stage.scheduler_mut().take_due() {
            stage.on_frame(handle);
        }

        if last_report.elapsed() >= Duration::from_secs(1) {
            info!("Frame {}: {:.1} FPS", stage.frames_drawn(), stage.fps());
            last_report = Instant::now();
        }

        if let Some(frame_time) = frame_time {
            let elapsed = frame_start.elapsed();
            if elapsed < frame_time {
                std::thread::sleep(frame_time - elapsed);
            }
        }
    }

    stage.unmount();

    let total_time = start_time.elapsed();
    info!("Run completed!");
    info!("Total frames: {}", stage.frames_drawn());
    info!(
        "Average FPS: {:.1}",
        stage.frames_drawn() as f64 / total_time.as_secs_f64().max(f64::EPSILON)
    );

    if let Some(path) = &args.output {
        stage
            .canvas()
            .save_png(path)
            .with_context(|| format!("failed to write frame to {}", path.display()))?;
        info!("Last frame written to {}", path.display());
    }

    Ok(())
}
