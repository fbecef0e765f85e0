//! Synthetic frame source for tests and demos.

use anyhow::Result;
use opencv::core::{Mat, Scalar, CV_8UC3};

use super::{FrameSource, VideoMeta};

/// Generates a fixed number of solid BGR frames.
///
/// Frame `i` is filled with intensity `i % 256` on all channels, so tests
/// can verify ordering and that untouched frames pass through unmodified.
pub struct SyntheticSource {
    meta: VideoMeta,
    total: u64,
    produced: u64,
}

impl SyntheticSource {
    pub fn new(total: u64, width: i32, height: i32, fps: f64) -> Self {
        Self {
            meta: VideoMeta { fps, width, height },
            total,
            produced: 0,
        }
    }
}

impl FrameSource for SyntheticSource {
    fn meta(&self) -> VideoMeta {
        self.meta
    }

    fn next_frame(&mut self) -> Result<Option<Mat>> {
        if self.produced >= self.total {
            return Ok(None);
        }
        let value = (self.produced % 256) as f64;
        let frame = Mat::new_rows_cols_with_default(
            self.meta.height,
            self.meta.width,
            CV_8UC3,
            Scalar::all(value),
        )?;
        self.produced += 1;
        Ok(Some(frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::Vec3b;
    use opencv::prelude::*;

    #[test]
    fn produces_exactly_total_frames() {
        let mut source = SyntheticSource::new(3, 32, 24, 30.0);
        let mut count = 0;
        while let Some(frame) = source.next_frame().unwrap() {
            assert_eq!(frame.cols(), 32);
            assert_eq!(frame.rows(), 24);
            count += 1;
        }
        assert_eq!(count, 3);
        // Exhausted sources stay exhausted.
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn frame_intensity_tracks_index() {
        let mut source = SyntheticSource::new(2, 8, 8, 25.0);
        let first = source.next_frame().unwrap().unwrap();
        let second = source.next_frame().unwrap().unwrap();
        assert_eq!(*first.at_2d::<Vec3b>(0, 0).unwrap(), Vec3b::all(0));
        assert_eq!(*second.at_2d::<Vec3b>(0, 0).unwrap(), Vec3b::all(1));
    }
}
