//! video_probe - print decode metadata for a video file
//!
//! Quick sanity check that a recording is readable before handing it to
//! `track_video`: opens the file, reports fps, resolution, and the
//! container's frame-count hint.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use balltrack::{FileSource, FrameSource};

#[derive(Parser, Debug)]
#[command(name = "video_probe", version, about = "Probe a video file's decode metadata")]
struct Args {
    /// Video file to probe.
    video_path: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let source = FileSource::open(&args.video_path)?;
    let meta = source.meta();

    println!("path: {}", args.video_path.display());
    println!("resolution: {}x{}", meta.width, meta.height);
    println!("fps: {:.3}", meta.fps);
    println!("frames (container hint): {}", source.frame_count_hint()?);
    Ok(())
}
