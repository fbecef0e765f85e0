//! Pipeline control flow.
//!
//! Single-threaded, single-pass: Frame Source -> Temporal Window -> Ball
//! Detector -> Trajectory History -> Overlay Renderer -> Video Sink, frame
//! by frame until the source is exhausted. There is no retry policy: a
//! detector or sink error aborts the run, and the partial video/CSV written
//! so far remain valid.

use anyhow::{anyhow, Context, Result};
use opencv::prelude::*;

use crate::detect::Detector;
use crate::ingest::FrameSource;
use crate::overlay::draw_trail;
use crate::sink::{FrameSink, PositionLog};
use crate::trajectory::TrajectoryHistory;
use crate::window::TemporalWindow;

/// Number of leading frames written through unmodified: the detector needs
/// a full three-frame window before it can run.
const WARMUP_FRAMES: u64 = 2;

/// Outcome of a completed run, reported back to the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames successfully read from the source.
    pub frames_read: u64,
    /// Frames written to the sink; equals `frames_read` on completion.
    pub frames_written: u64,
    /// Frames with a confirmed ball position (CSV rows appended).
    pub detections: u64,
}

/// Run the tracking pipeline to completion.
///
/// Fails before producing output when the source yields no frames at all;
/// a mid-stream decode failure instead ends the run normally with whatever
/// was processed so far.
pub fn run(
    source: &mut dyn FrameSource,
    detector: &mut dyn Detector,
    sink: &mut dyn FrameSink,
    positions: &mut PositionLog,
) -> Result<RunSummary> {
    let meta = source.meta();
    let source_size = meta.size();

    let mut window = TemporalWindow::new();
    let mut history = TrajectoryHistory::new();
    let mut summary = RunSummary::default();

    while let Some(frame) = source.next_frame()? {
        let frame_index = summary.frames_read;
        summary.frames_read += 1;

        if frame_index < WARMUP_FRAMES {
            // No detection context yet: pass the frame through untouched.
            sink.write(&frame)?;
            summary.frames_written += 1;
            window.push(&frame)?;
            continue;
        }

        window.push(&frame)?;
        let detection = detector
            .detect(&window, source_size)
            .with_context(|| format!("detection failed on frame {}", frame_index))?;

        if let Some(point) = detection {
            positions.append(frame_index, point)?;
            summary.detections += 1;
            log::info!("frame {}: ball at ({}, {})", frame_index, point.x, point.y);
        }
        history.push(detection);

        let mut annotated = frame.try_clone()?;
        draw_trail(&mut annotated, &history)?;
        sink.write(&annotated)?;
        summary.frames_written += 1;

        if summary.frames_read % 100 == 0 {
            log::debug!(
                "processed {} frames, {} detections",
                summary.frames_read,
                summary.detections
            );
        }
    }

    if summary.frames_read == 0 {
        return Err(anyhow!("input video has no readable frames"));
    }

    log::info!(
        "run complete: {} frames read, {} written, {} detections",
        summary.frames_read,
        summary.frames_written,
        summary.detections
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::ScriptedDetector;
    use crate::ingest::SyntheticSource;
    use crate::sink::MemorySink;

    #[test]
    fn empty_source_is_a_fatal_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut positions = PositionLog::open(dir.path().join("p.csv")).unwrap();
        let mut source = SyntheticSource::new(0, 64, 48, 30.0);
        let mut detector = ScriptedDetector::new(vec![]);
        let mut sink = MemorySink::new();

        let result = run(&mut source, &mut detector, &mut sink, &mut positions);
        assert!(result.is_err());
        assert_eq!(sink.frames_written(), 0);
    }

    #[test]
    fn short_videos_pass_through_without_detection() {
        let dir = tempfile::tempdir().unwrap();
        let mut positions = PositionLog::open(dir.path().join("p.csv")).unwrap();
        let mut source = SyntheticSource::new(2, 64, 48, 30.0);
        let mut detector = ScriptedDetector::new(vec![]);
        let mut sink = MemorySink::new();

        let summary = run(&mut source, &mut detector, &mut sink, &mut positions).unwrap();
        assert_eq!(summary.frames_read, 2);
        assert_eq!(summary.frames_written, 2);
        assert_eq!(summary.detections, 0);
        assert_eq!(positions.rows_written(), 0);
    }
}
