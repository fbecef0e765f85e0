//! Frame ingestion sources.
//!
//! This module provides the sources the pipeline can read frames from:
//! - Local video files (OpenCV `VideoCapture`)
//! - Synthetic frames (testing, demos)
//!
//! All sources yield ordered BGR 8-bit frames at source resolution together
//! with the stream metadata (fps, width, height). Sources are finite, lazy,
//! and non-restartable: a failed read mid-stream ends the sequence, it does
//! not raise.

mod file;
mod synthetic;

pub use file::FileSource;
pub use synthetic::SyntheticSource;

use anyhow::Result;
use opencv::core::{Mat, Size};

/// Stream metadata reported by a frame source before the first read.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VideoMeta {
    /// Frames per second as reported by the container.
    pub fps: f64,
    pub width: i32,
    pub height: i32,
}

impl VideoMeta {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// A finite, ordered sequence of frames.
///
/// `next_frame` returns `Ok(None)` at end-of-stream, including when the
/// decoder fails mid-stream; only opening errors and hard I/O faults are
/// surfaced as `Err`.
pub trait FrameSource {
    fn meta(&self) -> VideoMeta;

    fn next_frame(&mut self) -> Result<Option<Mat>>;
}
