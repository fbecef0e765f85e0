#![cfg(feature = "backend-tract")]

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tract_onnx::prelude::*;

use crate::detect::model::HeatmapModel;
use crate::window::{MODEL_HEIGHT, MODEL_WIDTH};

/// Tract-based heatmap model for ONNX artifacts.
///
/// Loads the pretrained weights once at startup and performs inference on
/// the stacked three-frame input. No network I/O, no writes beyond model
/// loading. A load failure is fatal before any frame is processed.
pub struct TractModel {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
    n_classes: usize,
}

impl TractModel {
    pub fn load<P: AsRef<Path>>(model_path: P, n_classes: usize) -> Result<Self> {
        let model_path = model_path.as_ref();
        if n_classes == 0 {
            return Err(anyhow!("n_classes must be at least 1"));
        }
        let model = tract_onnx::onnx()
            .model_for_path(model_path)
            .with_context(|| format!("failed to load ONNX model from {}", model_path.display()))?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(
                    f32::datum_type(),
                    tvec!(1, 9, MODEL_HEIGHT as usize, MODEL_WIDTH as usize),
                ),
            )
            .context("failed to set input fact")?
            .into_optimized()
            .context("failed to optimize ONNX model")?
            .into_runnable()
            .context("failed to build runnable ONNX model")?;

        Ok(Self { model, n_classes })
    }
}

impl HeatmapModel for TractModel {
    fn name(&self) -> &'static str {
        "tract"
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn predict(&mut self, input: &[f32]) -> Result<Vec<f32>> {
        let plane = (MODEL_WIDTH * MODEL_HEIGHT) as usize;
        let expected = 9 * plane;
        if input.len() != expected {
            return Err(anyhow!(
                "expected {} input values, received {}",
                expected,
                input.len()
            ));
        }

        let tensor = tract_ndarray::Array4::from_shape_vec(
            (1, 9, MODEL_HEIGHT as usize, MODEL_WIDTH as usize),
            input.to_vec(),
        )
        .context("input tensor shape mismatch")?
        .into_tensor();

        let outputs = self
            .model
            .run(tvec!(tensor.into()))
            .context("ONNX inference failed")?;
        let output = outputs
            .first()
            .ok_or_else(|| anyhow!("model produced no outputs"))?;
        let scores = output
            .to_array_view::<f32>()
            .context("model output tensor was not f32")?;

        let flat: Vec<f32> = scores.iter().copied().collect();
        if flat.len() != plane * self.n_classes {
            return Err(anyhow!(
                "model output has {} values, expected {} ({} classes per pixel)",
                flat.len(),
                plane * self.n_classes,
                self.n_classes
            ));
        }
        Ok(flat)
    }
}
