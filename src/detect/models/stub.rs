use std::collections::VecDeque;

use anyhow::{anyhow, Result};

use crate::detect::model::HeatmapModel;
use crate::window::{MODEL_HEIGHT, MODEL_WIDTH};

/// Stub model for testing. Replays queued score maps, then all-background.
pub struct StubModel {
    n_classes: usize,
    responses: VecDeque<Vec<f32>>,
}

impl StubModel {
    pub fn new(n_classes: usize) -> Self {
        Self {
            n_classes,
            responses: VecDeque::new(),
        }
    }

    /// Queue a canned response for the next `predict` call.
    pub fn push_response(&mut self, scores: Vec<f32>) {
        self.responses.push_back(scores);
    }

    /// Build a score map whose per-pixel argmax equals `labels`.
    pub fn response_from_labels(&self, labels: &[u8]) -> Vec<f32> {
        let plane = (MODEL_WIDTH * MODEL_HEIGHT) as usize;
        assert_eq!(labels.len(), plane, "label map must cover the model plane");
        let mut scores = vec![0.0; plane * self.n_classes];
        for (i, &label) in labels.iter().enumerate() {
            scores[i * self.n_classes + label as usize] = 1.0;
        }
        scores
    }

    fn background(&self) -> Vec<f32> {
        let plane = (MODEL_WIDTH * MODEL_HEIGHT) as usize;
        let mut scores = vec![0.0; plane * self.n_classes];
        for i in 0..plane {
            scores[i * self.n_classes] = 1.0;
        }
        scores
    }
}

impl HeatmapModel for StubModel {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn predict(&mut self, input: &[f32]) -> Result<Vec<f32>> {
        let expected = 9 * (MODEL_WIDTH * MODEL_HEIGHT) as usize;
        if input.len() != expected {
            return Err(anyhow!(
                "expected {} input values, received {}",
                expected,
                input.len()
            ));
        }
        Ok(self
            .responses
            .pop_front()
            .unwrap_or_else(|| self.background()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_queued_responses_then_background() {
        let plane = (MODEL_WIDTH * MODEL_HEIGHT) as usize;
        let mut model = StubModel::new(2);

        let mut labels = vec![0u8; plane];
        labels[42] = 1;
        model.push_response(model.response_from_labels(&labels));

        let input = vec![0.0f32; 9 * plane];
        let first = model.predict(&input).unwrap();
        assert_eq!(first[42 * 2 + 1], 1.0);

        // Queue drained: everything argmaxes to class 0.
        let second = model.predict(&input).unwrap();
        assert_eq!(second[42 * 2], 1.0);
        assert_eq!(second[42 * 2 + 1], 0.0);
    }

    #[test]
    fn rejects_short_input() {
        let mut model = StubModel::new(2);
        assert!(model.predict(&[0.0; 16]).is_err());
    }
}
