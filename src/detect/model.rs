use anyhow::Result;

/// Pretrained heatmap-regression model.
///
/// The pipeline only relies on the inference contract: a channel-first
/// (9, 360, 640) float input produces per-pixel class scores. Whatever
/// loss/optimizer configuration the artifact was trained with is irrelevant
/// here; implementations load weights read-only and are reused across every
/// frame of a run.
pub trait HeatmapModel: Send {
    /// Model identifier for logs.
    fn name(&self) -> &'static str;

    /// Number of per-pixel output classes.
    fn n_classes(&self) -> usize;

    /// Run inference on one stacked three-frame input.
    ///
    /// `input` is the flattened (9, 360, 640) tensor, values in 0..255.
    /// The returned scores are row-major (360 * 640, n_classes).
    fn predict(&mut self, input: &[f32]) -> Result<Vec<f32>>;
}
