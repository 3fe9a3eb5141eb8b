//! Destination directory naming and file relocation
//!
//! Accepted recordings land in `<work_dir><YYYY-MM-DD>[_<place>]`. The
//! telemetry file is renamed to a lowercase extension on the way in; the
//! paired video keeps its name. The organizer tracks each distinct
//! destination directory once, in the order first used, for the external
//! processing passes.

use crate::types::Recording;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelocationMode {
    Copy,
    Move,
}

#[derive(Debug, Default)]
pub struct Organizer {
    /// Distinct destination directories in the order first used
    directories: Vec<PathBuf>,
}

impl Organizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Relocate one recording's telemetry and video files into their
    /// destination directory, creating it if needed. Returns the directory.
    pub fn organize(
        &mut self,
        recording: &Recording,
        work_dir: &str,
        place: Option<&str>,
        mode: RelocationMode,
    ) -> Result<PathBuf> {
        let dir = destination_dir(work_dir, &recording.summary.started_local, place);
        fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
        if !self.directories.contains(&dir) {
            self.directories.push(dir.clone());
        }

        let verb = match mode {
            RelocationMode::Copy => "Copy",
            RelocationMode::Move => "Move",
        };
        println!("++ {} {} files to {}", verb, recording.base_name, dir.display());

        let telemetry_name = lowercased_extension_name(&recording.telemetry_path)?;
        relocate(&recording.telemetry_path, &dir.join(telemetry_name), mode)?;

        if recording.video_path.exists() {
            let video_name = recording
                .video_path
                .file_name()
                .with_context(|| format!("bad video file name: {}", recording.video_path.display()))?;
            relocate(&recording.video_path, &dir.join(video_name), mode)?;
        } else {
            eprintln!(
                "Warning: no paired video for {}",
                recording.telemetry_path.display()
            );
        }

        Ok(dir)
    }

    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    pub fn into_directories(self) -> Vec<PathBuf> {
        self.directories
    }
}

/// `<work_dir><YYYY-MM-DD>` with an optional `_<place>` suffix. The work
/// directory is a plain string prefix, not a joined path component.
pub fn destination_dir(
    work_dir: &str,
    started_local: &DateTime<Local>,
    place: Option<&str>,
) -> PathBuf {
    let date = started_local.format("%Y-%m-%d");
    match place {
        Some(place) if !place.is_empty() => PathBuf::from(format!("{}{}_{}", work_dir, date, place)),
        _ => PathBuf::from(format!("{}{}", work_dir, date)),
    }
}

/// File name with the extension lowercased (`FILE0001.NMEA` -> `FILE0001.nmea`)
fn lowercased_extension_name(path: &Path) -> Result<String> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("bad file name: {}", path.display()))?;
    Ok(match name.rsplit_once('.') {
        Some((stem, extension)) => format!("{}.{}", stem, extension.to_ascii_lowercase()),
        None => name.to_string(),
    })
}

fn relocate(src: &Path, dest: &Path, mode: RelocationMode) -> Result<()> {
    match mode {
        RelocationMode::Copy => {
            fs::copy(src, dest)
                .with_context(|| format!("copying {} to {}", src.display(), dest.display()))?;
        }
        RelocationMode::Move => {
            // The card and the work directory are usually different
            // filesystems, where rename fails with EXDEV.
            if fs::rename(src, dest).is_err() {
                fs::copy(src, dest)
                    .with_context(|| format!("copying {} to {}", src.display(), dest.display()))?;
                fs::remove_file(src)
                    .with_context(|| format!("removing {}", src.display()))?;
            }
        }
    }
    Ok(())
}
