//! Temporal window buffer.
//!
//! The detector consumes three consecutive frames jointly to exploit motion
//! cues. This module keeps the last three frames resized to the model
//! resolution and promoted to float, and assembles the channel-first input
//! tensor. At detection step `i` the window holds frames `{i-2, i-1, i}`.

use anyhow::{anyhow, Result};
use opencv::core::{Mat, Size, Vec3f, CV_32F};
use opencv::imgproc;
use opencv::prelude::*;
use std::collections::VecDeque;

/// Fixed detector input width.
pub const MODEL_WIDTH: i32 = 640;
/// Fixed detector input height.
pub const MODEL_HEIGHT: i32 = 360;

/// Number of frames fed jointly to the model.
const WINDOW_LEN: usize = 3;

/// Rolling buffer of the last three model-resolution float frames.
pub struct TemporalWindow {
    frames: VecDeque<Mat>,
}

impl TemporalWindow {
    pub fn new() -> Self {
        Self {
            frames: VecDeque::with_capacity(WINDOW_LEN),
        }
    }

    /// Resize a source frame to model resolution and add it to the window,
    /// evicting the oldest frame once three are held.
    pub fn push(&mut self, frame: &Mat) -> Result<()> {
        let resized = resize_to_model(frame)?;
        if self.frames.len() == WINDOW_LEN {
            self.frames.pop_front();
        }
        self.frames.push_back(resized);
        Ok(())
    }

    /// True once three frames have been observed.
    pub fn ready(&self) -> bool {
        self.frames.len() == WINDOW_LEN
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Assemble the channel-first detector input: shape (9, 360, 640),
    /// current frame's three channels first, then the previous frame's,
    /// then the one before that. Values stay in 0..255; the model was
    /// trained on unnormalized floats.
    pub fn tensor(&self) -> Result<Vec<f32>> {
        if !self.ready() {
            return Err(anyhow!(
                "temporal window holds {} of {} frames",
                self.frames.len(),
                WINDOW_LEN
            ));
        }

        let plane = (MODEL_WIDTH * MODEL_HEIGHT) as usize;
        let mut out = Vec::with_capacity(WINDOW_LEN * 3 * plane);
        // Newest first: frames are stored oldest -> newest.
        for frame in self.frames.iter().rev() {
            let data: &[Vec3f] = frame.data_typed()?;
            for channel in 0..3 {
                for px in data {
                    out.push(px[channel]);
                }
            }
        }
        Ok(out)
    }
}

impl Default for TemporalWindow {
    fn default() -> Self {
        Self::new()
    }
}

fn resize_to_model(frame: &Mat) -> Result<Mat> {
    let mut resized = Mat::default();
    imgproc::resize(
        frame,
        &mut resized,
        Size::new(MODEL_WIDTH, MODEL_HEIGHT),
        0.0,
        0.0,
        imgproc::INTER_LINEAR,
    )?;
    let mut float = Mat::default();
    resized.convert_to(&mut float, CV_32F, 1.0, 0.0)?;
    Ok(float)
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{Scalar, CV_8UC3};

    fn solid_frame(value: f64) -> Mat {
        Mat::new_rows_cols_with_default(48, 64, CV_8UC3, Scalar::all(value)).unwrap()
    }

    #[test]
    fn not_ready_until_three_frames() {
        let mut window = TemporalWindow::new();
        assert!(!window.ready());
        window.push(&solid_frame(1.0)).unwrap();
        window.push(&solid_frame(2.0)).unwrap();
        assert!(!window.ready());
        assert!(window.tensor().is_err());
        window.push(&solid_frame(3.0)).unwrap();
        assert!(window.ready());
    }

    #[test]
    fn window_slides_and_orders_newest_first() {
        let mut window = TemporalWindow::new();
        for value in [10.0, 20.0, 30.0, 40.0] {
            window.push(&solid_frame(value)).unwrap();
        }
        assert_eq!(window.len(), 3);

        let tensor = window.tensor().unwrap();
        let plane = (MODEL_WIDTH * MODEL_HEIGHT) as usize;
        assert_eq!(tensor.len(), 9 * plane);
        // Channels 0..2 come from the current frame (40), 3..5 from the
        // previous (30), 6..8 from the one before (20). Frame 10 was evicted.
        assert_eq!(tensor[0], 40.0);
        assert_eq!(tensor[3 * plane], 30.0);
        assert_eq!(tensor[6 * plane], 20.0);
    }

    #[test]
    fn tensor_values_stay_unnormalized() {
        let mut window = TemporalWindow::new();
        for _ in 0..3 {
            window.push(&solid_frame(255.0)).unwrap();
        }
        let tensor = window.tensor().unwrap();
        assert_eq!(tensor[0], 255.0);
    }
}
