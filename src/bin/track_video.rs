//! track_video - offline ball tracking over a recorded match video
//!
//! This tool:
//! 1. Decodes the input video frame by frame
//! 2. Runs the heatmap model over a sliding three-frame window
//! 3. Extracts at most one ball position per frame (Hough circles)
//! 4. Draws the trailing trajectory onto each frame
//! 5. Re-encodes the annotated video and appends positions to a CSV

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use balltrack::config::default_output_path;
use balltrack::{
    pipeline, FileSource, FrameSource, HeatmapDetector, PositionLog, TrackerConfig, VideoFileSink,
};

#[derive(Parser, Debug)]
#[command(name = "track_video", version, about = "Ball tracking for match videos")]
struct Args {
    /// Input video file.
    input_video_path: PathBuf,

    /// Annotated output video. Defaults to the input name with the
    /// configured suffix, e.g. `match.mp4` -> `match_TrackNet.mp4`.
    #[arg(long)]
    output_video_path: Option<PathBuf>,

    /// Trained model weights (ONNX).
    #[arg(long)]
    save_weights_path: PathBuf,

    /// Number of output classes the model was trained with.
    #[arg(long)]
    n_classes: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let cfg = TrackerConfig::load()?;

    let output_path = args
        .output_video_path
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input_video_path, &cfg.output_suffix));

    let mut source = FileSource::open(&args.input_video_path)?;
    let meta = source.meta();
    log::info!(
        "tracking '{}' -> '{}'",
        args.input_video_path.display(),
        output_path.display()
    );

    let model = load_model(&args)?;
    let mut detector = HeatmapDetector::new(model);
    let mut sink = VideoFileSink::create(&output_path, &cfg.fourcc, &meta)?;
    let mut positions = PositionLog::open(&cfg.csv_path)?;

    let summary = pipeline::run(&mut source, &mut detector, &mut sink, &mut positions)
        .context("tracking run failed")?;

    log::info!(
        "done: {} frames, {} detections, positions appended to '{}'",
        summary.frames_written,
        summary.detections,
        positions.path().display()
    );
    Ok(())
}

#[cfg(feature = "backend-tract")]
fn load_model(args: &Args) -> Result<Box<dyn balltrack::HeatmapModel>> {
    let model = balltrack::TractModel::load(&args.save_weights_path, args.n_classes)
        .with_context(|| {
            format!(
                "failed to load model weights '{}'",
                args.save_weights_path.display()
            )
        })?;
    Ok(Box::new(model))
}

#[cfg(not(feature = "backend-tract"))]
fn load_model(_args: &Args) -> Result<Box<dyn balltrack::HeatmapModel>> {
    Err(anyhow::anyhow!(
        "built without the backend-tract feature; no inference backend available"
    ))
}
