//! Local video file frame source.

use anyhow::{anyhow, Context, Result};
use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};
use std::path::Path;

use super::{FrameSource, VideoMeta};

/// Frame source backed by OpenCV's `VideoCapture`.
///
/// Accepts any container/codec the platform decoder supports. Metadata is
/// read once at open time; frames are decoded lazily on each `next_frame`.
pub struct FileSource {
    capture: VideoCapture,
    meta: VideoMeta,
    frames_read: u64,
}

impl FileSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path
            .to_str()
            .ok_or_else(|| anyhow!("video path is not valid UTF-8: {}", path.display()))?;

        let capture = VideoCapture::from_file(path_str, videoio::CAP_ANY)
            .with_context(|| format!("failed to open video '{}'", path.display()))?;
        if !capture.is_opened()? {
            return Err(anyhow!("could not open video file '{}'", path.display()));
        }

        let fps = capture.get(videoio::CAP_PROP_FPS)?;
        let width = capture.get(videoio::CAP_PROP_FRAME_WIDTH)? as i32;
        let height = capture.get(videoio::CAP_PROP_FRAME_HEIGHT)? as i32;
        if width <= 0 || height <= 0 {
            return Err(anyhow!(
                "video '{}' reports invalid dimensions {}x{}",
                path.display(),
                width,
                height
            ));
        }

        log::info!(
            "opened '{}': {}x{} @ {:.2} fps",
            path.display(),
            width,
            height,
            fps
        );

        Ok(Self {
            capture,
            meta: VideoMeta { fps, width, height },
            frames_read: 0,
        })
    }

    /// Frame count as reported by the container. Advisory only; some
    /// containers lie, and the pipeline trusts `next_frame` instead.
    pub fn frame_count_hint(&self) -> Result<i64> {
        Ok(self.capture.get(videoio::CAP_PROP_FRAME_COUNT)? as i64)
    }

    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }
}

impl FrameSource for FileSource {
    fn meta(&self) -> VideoMeta {
        self.meta
    }

    fn next_frame(&mut self) -> Result<Option<Mat>> {
        let mut frame = Mat::default();
        // A failed read is end-of-stream, not an error: the partial output
        // up to this frame stays valid.
        if !self.capture.read(&mut frame)? || frame.empty() {
            return Ok(None);
        }
        self.frames_read += 1;
        Ok(Some(frame))
    }
}
