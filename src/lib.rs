//! Ball tracking for match videos.
//!
//! This crate implements a single-pass, offline pipeline that locates a ball
//! in every frame of a video using a pretrained heatmap-regression model
//! (TrackNet-style), draws a fading trajectory trail, and re-encodes the
//! annotated video. Detected positions are appended to a CSV side file so
//! the upstream match service can pick them up.
//!
//! # Architecture
//!
//! Processing is strictly sequential over frame index:
//!
//! 1. **Frame source** (`ingest`): decodes ordered frames plus fps/size.
//! 2. **Temporal window** (`window`): the last three frames, resized to the
//!    model resolution and promoted to float, feed the detector jointly.
//! 3. **Ball detector** (`detect`): model inference, per-pixel argmax,
//!    threshold, Hough circle extraction, exactly-one-circle decision.
//! 4. **Trajectory history** (`trajectory`): fixed 8-slot buffer of the most
//!    recent detections, cosmetic only.
//! 5. **Overlay renderer** (`overlay`): draws the trail on the full-size
//!    frame.
//! 6. **Sinks** (`sink`): annotated video writer plus the position CSV.
//!
//! There is no concurrency and no retry anywhere: one reader, one writer,
//! one model instance, one deterministic pass.

pub mod config;
pub mod detect;
pub mod ingest;
pub mod overlay;
pub mod pipeline;
pub mod sink;
pub mod trajectory;
pub mod window;

pub use config::TrackerConfig;
pub use detect::{BallPoint, Circle, Detection, Detector, HeatmapDetector, ScriptedDetector};
#[cfg(feature = "backend-tract")]
pub use detect::TractModel;
pub use detect::{HeatmapModel, StubModel};
pub use ingest::{FileSource, FrameSource, SyntheticSource, VideoMeta};
pub use pipeline::{run, RunSummary};
pub use sink::{FrameSink, MemorySink, PositionLog, VideoFileSink};
pub use trajectory::{TrajectoryHistory, TRAIL_LEN};
pub use window::{TemporalWindow, MODEL_HEIGHT, MODEL_WIDTH};
