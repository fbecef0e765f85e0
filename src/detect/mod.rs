mod detector;
mod model;
mod models;
mod result;

pub use detector::{Detector, HeatmapDetector, ScriptedDetector};
pub use model::HeatmapModel;
#[cfg(feature = "backend-tract")]
pub use models::TractModel;
pub use models::StubModel;
pub use result::{BallPoint, Circle, Detection};
