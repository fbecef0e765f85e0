//! Output sinks: annotated video writer and the position CSV log.

use anyhow::{anyhow, Context, Result};
use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::VideoWriter;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::detect::BallPoint;
use crate::ingest::VideoMeta;

const CSV_HEADER: &str = "Frame,X_Position,Y_Position";

/// Receives annotated frames in strict append order, one write per frame
/// consumed from the source. No reordering, no drops.
pub trait FrameSink {
    fn write(&mut self, frame: &Mat) -> Result<()>;

    fn frames_written(&self) -> u64;
}

/// Video file sink backed by OpenCV's `VideoWriter`.
///
/// The output container carries the source fps and resolution; the codec
/// tag comes from configuration (XVID by default).
pub struct VideoFileSink {
    writer: VideoWriter,
    frames_written: u64,
}

impl VideoFileSink {
    pub fn create<P: AsRef<Path>>(path: P, fourcc: &str, meta: &VideoMeta) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path
            .to_str()
            .ok_or_else(|| anyhow!("output path is not valid UTF-8: {}", path.display()))?;

        let tag = fourcc_code(fourcc)?;
        let writer = VideoWriter::new(path_str, tag, meta.fps, meta.size(), true)
            .with_context(|| format!("failed to create video writer for '{}'", path.display()))?;
        if !writer.is_opened()? {
            return Err(anyhow!(
                "video writer refused '{}' (codec '{}' unavailable?)",
                path.display(),
                fourcc
            ));
        }

        log::info!(
            "writing '{}': {}x{} @ {:.2} fps, codec {}",
            path.display(),
            meta.width,
            meta.height,
            meta.fps,
            fourcc
        );

        Ok(Self {
            writer,
            frames_written: 0,
        })
    }
}

impl FrameSink for VideoFileSink {
    fn write(&mut self, frame: &Mat) -> Result<()> {
        self.writer.write(frame).context("failed to write frame")?;
        self.frames_written += 1;
        Ok(())
    }

    fn frames_written(&self) -> u64 {
        self.frames_written
    }
}

/// In-memory sink for tests: keeps a clone of every written frame.
pub struct MemorySink {
    frames: Vec<Mat>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    pub fn frames(&self) -> &[Mat] {
        &self.frames
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSink for MemorySink {
    fn write(&mut self, frame: &Mat) -> Result<()> {
        self.frames.push(frame.try_clone()?);
        Ok(())
    }

    fn frames_written(&self) -> u64 {
        self.frames.len() as u64
    }
}

/// Append-only CSV log of successful detections.
///
/// The file is opened once per run and kept open until drop. The header is
/// written exactly once per file lifetime: only when the file was empty at
/// open time, so repeated runs keep appending rows under a single header.
pub struct PositionLog {
    file: File,
    path: PathBuf,
    rows_written: u64,
}

impl PositionLog {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open position log '{}'", path.display()))?;

        if file.metadata()?.len() == 0 {
            writeln!(file, "{}", CSV_HEADER)
                .with_context(|| format!("failed to write header to '{}'", path.display()))?;
        }

        Ok(Self {
            file,
            path,
            rows_written: 0,
        })
    }

    /// Record one detection. Only called for frames with a confirmed ball.
    pub fn append(&mut self, frame_index: u64, point: BallPoint) -> Result<()> {
        writeln!(self.file, "{},{},{}", frame_index, point.x, point.y)
            .with_context(|| format!("failed to append to '{}'", self.path.display()))?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn fourcc_code(fourcc: &str) -> Result<i32> {
    let bytes: Vec<char> = fourcc.chars().collect();
    if bytes.len() != 4 {
        return Err(anyhow!("fourcc must be 4 characters, got '{}'", fourcc));
    }
    Ok(VideoWriter::fourcc(bytes[0], bytes[1], bytes[2], bytes[3])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{Scalar, CV_8UC3};

    #[test]
    fn header_written_once_for_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("positions.csv");

        {
            let mut log = PositionLog::open(&path).unwrap();
            log.append(4, BallPoint::new(100, 50)).unwrap();
            log.append(7, BallPoint::new(110, 55)).unwrap();
            assert_eq!(log.rows_written(), 2);
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(
            lines,
            vec!["Frame,X_Position,Y_Position", "4,100,50", "7,110,55"]
        );
    }

    #[test]
    fn reopening_nonempty_file_appends_without_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("positions.csv");

        {
            let mut log = PositionLog::open(&path).unwrap();
            log.append(2, BallPoint::new(1, 2)).unwrap();
        }
        {
            let mut log = PositionLog::open(&path).unwrap();
            log.append(3, BallPoint::new(4, 5)).unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents.matches("Frame,X_Position,Y_Position").count(),
            1
        );
        assert!(contents.ends_with("3,4,5\n"));
    }

    #[test]
    fn memory_sink_counts_and_keeps_frames() {
        let mut sink = MemorySink::new();
        let frame =
            Mat::new_rows_cols_with_default(8, 8, CV_8UC3, Scalar::all(9.0)).unwrap();
        sink.write(&frame).unwrap();
        sink.write(&frame).unwrap();
        assert_eq!(sink.frames_written(), 2);
        assert_eq!(sink.frames().len(), 2);
    }

    #[test]
    fn fourcc_requires_four_characters() {
        assert!(fourcc_code("XVI").is_err());
        assert!(fourcc_code("XVIDX").is_err());
    }
}
