//! Ball detector.
//!
//! Turns the three-frame temporal window into at most one ball position:
//! model inference, per-pixel argmax to a label map, upscale to source
//! resolution, binary threshold, Hough circle extraction, and the
//! exactly-one-circle decision policy.

use anyhow::{anyhow, Context, Result};
use opencv::core::{Mat, Scalar, Size, Vec3f, Vector, CV_8U};
use opencv::imgproc;
use opencv::prelude::*;

use crate::detect::model::HeatmapModel;
use crate::detect::result::{BallPoint, Circle, Detection};
use crate::window::{TemporalWindow, MODEL_HEIGHT, MODEL_WIDTH};
use std::collections::VecDeque;

/// Binarization cutoff on the upscaled label map: strictly above becomes
/// 255, everything else 0 (classic binary threshold, not inverse).
const MASK_THRESHOLD: f64 = 127.0;

// Hough transform parameters, reproduced verbatim from the trained system.
// minDist=1 and an accumulator threshold of 2 are deliberately permissive;
// the decision policy downstream rejects ambiguous frames instead.
const HOUGH_DP: f64 = 1.0;
const HOUGH_MIN_DIST: f64 = 1.0;
const HOUGH_CANNY_THRESHOLD: f64 = 50.0;
const HOUGH_ACCUMULATOR_THRESHOLD: f64 = 2.0;
const MIN_RADIUS: i32 = 2;
const MAX_RADIUS: i32 = 7;

/// Per-frame ball detector.
///
/// Implementations must be deterministic given fixed weights: the same
/// window produces the same detection on every pass.
pub trait Detector {
    fn name(&self) -> &'static str;

    /// Detect the ball on the newest frame of the window. `source_size` is
    /// the original video resolution the result coordinates refer to.
    fn detect(&mut self, window: &TemporalWindow, source_size: Size) -> Result<Detection>;
}

/// Production detector: heatmap model plus classical circle extraction.
pub struct HeatmapDetector {
    model: Box<dyn HeatmapModel>,
}

impl HeatmapDetector {
    pub fn new(model: Box<dyn HeatmapModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &'static str {
        self.model.name()
    }
}

impl Detector for HeatmapDetector {
    fn name(&self) -> &'static str {
        "heatmap"
    }

    fn detect(&mut self, window: &TemporalWindow, source_size: Size) -> Result<Detection> {
        let input = window.tensor()?;
        let scores = self
            .model
            .predict(&input)
            .context("heatmap inference failed")?;
        let labels = label_map(&scores, self.model.n_classes())?;
        let mask = binarize_to_source(&labels, source_size)?;
        let circles = find_circles(&mask)?;
        Ok(select_candidate(&circles))
    }
}

/// Scripted detector for tests: replays a fixed per-frame answer sequence,
/// then reports no detection.
pub struct ScriptedDetector {
    script: VecDeque<Detection>,
}

impl ScriptedDetector {
    pub fn new<I: IntoIterator<Item = Detection>>(script: I) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }
}

impl Detector for ScriptedDetector {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn detect(&mut self, _window: &TemporalWindow, _source_size: Size) -> Result<Detection> {
        Ok(self.script.pop_front().flatten())
    }
}

/// Reduce per-pixel class scores to a label map via argmax.
///
/// `scores` is row-major (360 * 640, n_classes); the winning class index is
/// cast to u8 before thresholding.
fn label_map(scores: &[f32], n_classes: usize) -> Result<Vec<u8>> {
    let plane = (MODEL_WIDTH * MODEL_HEIGHT) as usize;
    if n_classes == 0 || scores.len() != plane * n_classes {
        return Err(anyhow!(
            "score map has {} values, expected {} ({} classes per pixel)",
            scores.len(),
            plane * n_classes,
            n_classes
        ));
    }

    let mut labels = Vec::with_capacity(plane);
    for pixel in scores.chunks_exact(n_classes) {
        let mut best = 0usize;
        let mut best_score = pixel[0];
        for (class, &score) in pixel.iter().enumerate().skip(1) {
            if score > best_score {
                best = class;
                best_score = score;
            }
        }
        labels.push(best as u8);
    }
    Ok(labels)
}

/// Upscale the model-resolution label map to source resolution and binarize
/// at the fixed cutoff.
fn binarize_to_source(labels: &[u8], source_size: Size) -> Result<Mat> {
    let mut map =
        Mat::new_rows_cols_with_default(MODEL_HEIGHT, MODEL_WIDTH, CV_8U, Scalar::all(0.0))?;
    map.data_bytes_mut()?.copy_from_slice(labels);

    let mut scaled = Mat::default();
    imgproc::resize(
        &map,
        &mut scaled,
        source_size,
        0.0,
        0.0,
        imgproc::INTER_LINEAR,
    )?;

    let mut mask = Mat::default();
    imgproc::threshold(&scaled, &mut mask, MASK_THRESHOLD, 255.0, imgproc::THRESH_BINARY)?;
    Ok(mask)
}

/// Run the Hough circle transform on the binary mask.
fn find_circles(mask: &Mat) -> Result<Vec<Circle>> {
    let mut raw = Vector::<Vec3f>::new();
    imgproc::hough_circles(
        mask,
        &mut raw,
        imgproc::HOUGH_GRADIENT,
        HOUGH_DP,
        HOUGH_MIN_DIST,
        HOUGH_CANNY_THRESHOLD,
        HOUGH_ACCUMULATOR_THRESHOLD,
        MIN_RADIUS,
        MAX_RADIUS,
    )?;

    let mut circles = Vec::with_capacity(raw.len());
    for c in raw.iter() {
        circles.push(Circle {
            x: c[0],
            y: c[1],
            radius: c[2],
        });
    }
    Ok(circles)
}

/// Decision policy: exactly one candidate circle is a detection; zero or
/// several candidates are ambiguous and recorded as no detection.
fn select_candidate(circles: &[Circle]) -> Detection {
    match circles {
        [only] => Some(BallPoint::new(only.x as i32, only.y as i32)),
        _ => None,
    }
}
