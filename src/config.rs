use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_CSV_PATH: &str = "ball_positions.csv";
const DEFAULT_FOURCC: &str = "XVID";
const DEFAULT_OUTPUT_SUFFIX: &str = "_TrackNet";

#[derive(Debug, Deserialize, Default)]
struct TrackerConfigFile {
    csv_path: Option<String>,
    fourcc: Option<String>,
    output_suffix: Option<String>,
}

/// Runtime settings for a tracking run.
///
/// Loaded from an optional JSON file pointed at by `BALLTRACK_CONFIG`, with
/// individual env overrides on top. Defaults reproduce the behavior the
/// upstream match service expects: `ball_positions.csv` in the working
/// directory, an XVID-encoded output video, and a `_TrackNet` name suffix.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// CSV side file receiving one row per detection, append mode.
    pub csv_path: PathBuf,
    /// Four-character codec tag for the output video.
    pub fourcc: String,
    /// Suffix inserted before the extension when no output path is given.
    pub output_suffix: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            fourcc: DEFAULT_FOURCC.to_string(),
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
        }
    }
}

impl TrackerConfig {
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("BALLTRACK_CONFIG").ok();
        let file_cfg = match config_path.as_deref() {
            Some(path) => Some(read_config_file(Path::new(path))?),
            None => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default());
        cfg.apply_env();
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: TrackerConfigFile) -> Self {
        Self {
            csv_path: file
                .csv_path
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CSV_PATH)),
            fourcc: file.fourcc.unwrap_or_else(|| DEFAULT_FOURCC.to_string()),
            output_suffix: file
                .output_suffix
                .unwrap_or_else(|| DEFAULT_OUTPUT_SUFFIX.to_string()),
        }
    }

    fn apply_env(&mut self) {
        if let Ok(path) = std::env::var("BALLTRACK_CSV_PATH") {
            if !path.trim().is_empty() {
                self.csv_path = PathBuf::from(path);
            }
        }
        if let Ok(fourcc) = std::env::var("BALLTRACK_FOURCC") {
            if !fourcc.trim().is_empty() {
                self.fourcc = fourcc;
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.fourcc.len() != 4 || !self.fourcc.is_ascii() {
            return Err(anyhow!(
                "fourcc must be exactly 4 ASCII characters, got '{}'",
                self.fourcc
            ));
        }
        if self.output_suffix.is_empty() {
            return Err(anyhow!("output_suffix must not be empty"));
        }
        Ok(())
    }
}

fn read_config_file(path: &Path) -> Result<TrackerConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = serde_json::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}

/// Derive the default output video path from the input path: the file name
/// keeps its stem, gains the configured suffix, and gets an `.mp4` extension.
/// `match.mp4` becomes `match_TrackNet.mp4` next to the input.
pub fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{}{}.mp4", stem, suffix))
}
