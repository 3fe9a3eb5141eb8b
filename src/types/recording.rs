use crate::types::Coordinate;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// What the scanner reduces one telemetry file to
#[derive(Debug, Clone)]
pub struct ScanSummary {
    /// First fix time combined with the recording date, in host-local time
    pub started_local: DateTime<Local>,
    pub start: Coordinate,
    pub end: Coordinate,
}

/// One telemetry/video pair discovered on the card
#[derive(Debug, Clone)]
pub struct Recording {
    pub telemetry_path: PathBuf,
    /// Same base name as the telemetry file, `.MP4` extension
    pub video_path: PathBuf,
    pub base_name: String,
    pub summary: ScanSummary,
}

impl Recording {
    /// Pair a scanned telemetry file with its sibling video file.
    pub fn from_telemetry_path(path: &Path, summary: ScanSummary) -> Result<Self> {
        let base_name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .with_context(|| format!("bad telemetry file name: {}", path.display()))?
            .to_string();
        Ok(Self {
            telemetry_path: path.to_path_buf(),
            video_path: path.with_extension("MP4"),
            base_name,
            summary,
        })
    }
}
