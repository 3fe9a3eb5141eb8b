//! One pass over the card: scan, name, filter, relocate
//!
//! Drives every `*.NMEA` file on the card through the scanner, the place
//! namer, the exclusion filter, and the organizer, strictly in that order.
//! Per-recording failures are reported and skip that recording, leaving its
//! files on the card.

use crate::config::RunConfig;
use crate::filters::matching_zone;
use crate::geocode::Geocoder;
use crate::organize::{Organizer, RelocationMode};
use crate::parser::scan::scan_telemetry_file;
use crate::types::Recording;
use anyhow::{Context, Result};
use glob::glob;
use std::path::PathBuf;

/// Behavior toggles from the command line
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Copy files from the card instead of moving them
    pub copy: bool,
    /// Skip external processing (implies skipping upload)
    pub dont_process: bool,
    /// Skip the external upload pass only
    pub dont_upload: bool,
}

/// Scan, filter and relocate every telemetry/video pair on the card.
/// Returns the destination directories in the order first used.
pub fn organize_card(config: &RunConfig, options: &RunOptions) -> Result<Vec<PathBuf>> {
    let mut geocoder = Geocoder::new();
    let mut organizer = Organizer::new();
    let mode = if options.copy {
        RelocationMode::Copy
    } else {
        RelocationMode::Move
    };

    for path in telemetry_files(&config.sdcard_dir)? {
        let summary = match scan_telemetry_file(&path, config.stationary_check) {
            Ok(Some(summary)) => summary,
            Ok(None) => {
                let base = path
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_default();
                println!("-- No time/date parsed from NMEA or stationary video, skip {}", base);
                continue;
            }
            Err(e) => {
                eprintln!("Error scanning {}: {:#}", path.display(), e);
                continue;
            }
        };

        let recording = match Recording::from_telemetry_path(&path, summary) {
            Ok(recording) => recording,
            Err(e) => {
                eprintln!("Error pairing {}: {:#}", path.display(), e);
                continue;
            }
        };

        let place = if config.geocode_names {
            geocoder.reverse(Some(recording.summary.start))
        } else {
            None
        };

        if let Some((zone, endpoint)) = matching_zone(
            &config.ignore,
            recording.summary.start,
            recording.summary.end,
        ) {
            let label = match place.as_deref() {
                Some(place) => format!("{} {}", place, recording.base_name),
                None => recording.base_name.clone(),
            };
            println!("-- {} close to {}, skip {}", endpoint, zone.name, label);
            continue;
        }

        if let Err(e) = organizer.organize(&recording, &config.work_dir, place.as_deref(), mode) {
            eprintln!("Error relocating {}: {:#}", recording.base_name, e);
        }
    }

    Ok(organizer.into_directories())
}

/// All telemetry files on the card, sorted for deterministic order.
fn telemetry_files(sdcard_dir: &str) -> Result<Vec<PathBuf>> {
    let pattern = format!("{}/*.NMEA", sdcard_dir.trim_end_matches('/'));
    let entries = glob(&pattern).with_context(|| format!("bad card pattern '{}'", pattern))?;
    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => files.push(path),
            Err(e) => eprintln!("Warning: unreadable card entry: {}", e),
        }
    }
    files.sort();
    Ok(files)
}
