//! Telemetry file scanning
//!
//! Replays one NMEA file's sentence stream and reduces it to the fields the
//! pipeline needs: local start timestamp, start coordinate, end coordinate.
//! A sentence that fails to parse is reported and skipped; it never aborts
//! the scan.

use crate::parser::sentence::{parse_sentence, Sentence};
use crate::types::{Coordinate, ScanSummary};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveTime, TimeZone, Utc};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Scan one telemetry file.
///
/// Returns `None` when the file yields no usable fix: no date-bearing
/// sentence, no fix time, no start position (the receiver never got a lock),
/// or — when `stationary_check` is set — a position that never changed.
/// The first GGA sentence fixes the start time and start coordinate; every
/// position-bearing GGA updates the running end coordinate; the first RMC
/// sentence fixes the recording date.
pub fn scan_telemetry_file(path: &Path, stationary_check: bool) -> Result<Option<ScanSummary>> {
    let file =
        File::open(path).with_context(|| format!("opening telemetry file {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut start_time: Option<NaiveTime> = None;
    let mut start: Option<Coordinate> = None;
    let mut end: Option<Coordinate> = None;
    let mut date: Option<NaiveDate> = None;
    let mut stationary = true;

    // Read raw lines so a stray binary byte only spoils one sentence, not
    // the whole stream.
    for raw in reader.split(b'\n') {
        let raw = raw.with_context(|| format!("reading {}", path.display()))?;
        let text = String::from_utf8_lossy(&raw);
        let line = text.trim();
        if line.is_empty() {
            continue;
        }
        match parse_sentence(line) {
            Ok(Sentence::Gga(fix)) => {
                if start_time.is_none() {
                    start_time = Some(fix.time);
                    start = fix.position;
                }
                if let Some(position) = fix.position {
                    end = Some(position);
                    if start != Some(position) {
                        stationary = false;
                    }
                }
            }
            Ok(Sentence::Rmc { date: sentence_date }) => {
                if date.is_none() {
                    date = sentence_date;
                }
            }
            Ok(Sentence::Other) => {}
            Err(e) => {
                eprintln!("ERROR parsing NMEA sentence: {}", e);
            }
        }
    }

    if stationary_check && stationary {
        println!("-- Stationary video, {}", path.display());
        return Ok(None);
    }

    let (date, start_time, start) = match (date, start_time, start) {
        (Some(date), Some(time), Some(start)) => (date, time, start),
        _ => return Ok(None),
    };

    // The receiver reports UTC; directory naming wants the local wall date.
    let started_utc = Utc.from_utc_datetime(&date.and_time(start_time));
    let started_local = started_utc.with_timezone(&Local);

    Ok(Some(ScanSummary {
        started_local,
        start,
        end: end.unwrap_or(start),
    }))
}
