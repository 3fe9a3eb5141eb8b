//! End-to-end organization over a scratch card and work directory

use chrono::{Local, TimeZone, Utc};
use dashcam_organizer::{organize_card, process_and_upload, ExclusionZone, RunConfig, RunOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn nmea_line(body: &str) -> String {
    let checksum = body.bytes().fold(0u8, |acc, b| acc ^ b);
    format!("${}*{:02X}", body, checksum)
}

/// A telemetry stream starting 2024-03-01T10:00:00 UTC at (45.0, -73.0),
/// ending at (45.1, -73.0).
fn moving_telemetry() -> String {
    [
        nmea_line("GPGGA,100000.00,4500.0000,N,07300.0000,W,1,08,0.9,12.0,M,0.0,M,,"),
        nmea_line("GPRMC,100000.00,A,4500.0000,N,07300.0000,W,12.5,000.0,010324,,,A"),
        nmea_line("GPGGA,100200.00,4506.0000,N,07300.0000,W,1,08,0.9,12.0,M,0.0,M,,"),
    ]
    .join("\n")
}

fn write_pair(card: &Path, base: &str, telemetry: &str) {
    fs::write(card.join(format!("{}.NMEA", base)), telemetry).expect("writing telemetry");
    fs::write(card.join(format!("{}.MP4", base)), b"video bytes").expect("writing video");
}

fn config_for(card: &TempDir, work: &TempDir) -> RunConfig {
    RunConfig {
        sdcard_dir: card.path().to_string_lossy().into_owned(),
        work_dir: format!("{}/", work.path().display()),
        ignore: Vec::new(),
        stationary_check: false,
        geocode_names: false,
        tool_command: "mapillary_tools".to_string(),
    }
}

/// The date directory the pipeline should derive for 2024-03-01T10:00:00 UTC
/// on this host.
fn expected_date() -> String {
    Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0)
        .unwrap()
        .with_timezone(&Local)
        .format("%Y-%m-%d")
        .to_string()
}

#[test]
fn test_accepted_pair_is_moved_with_lowercased_extension() {
    let card = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    write_pair(card.path(), "FILE0001", &moving_telemetry());

    let config = config_for(&card, &work);
    let directories = organize_card(&config, &RunOptions::default()).expect("pipeline run");

    let dest = work.path().join(expected_date());
    assert_eq!(directories, vec![dest.clone()]);
    assert!(dest.join("FILE0001.nmea").is_file());
    assert!(dest.join("FILE0001.MP4").is_file());
    // Move mode leaves nothing on the card
    assert!(!card.path().join("FILE0001.NMEA").exists());
    assert!(!card.path().join("FILE0001.MP4").exists());
}

#[test]
fn test_copy_mode_leaves_sources_on_card() {
    let card = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    write_pair(card.path(), "FILE0002", &moving_telemetry());

    let config = config_for(&card, &work);
    let options = RunOptions {
        copy: true,
        ..Default::default()
    };
    organize_card(&config, &options).expect("pipeline run");

    let dest = work.path().join(expected_date());
    assert!(dest.join("FILE0002.nmea").is_file());
    assert!(dest.join("FILE0002.MP4").is_file());
    assert!(card.path().join("FILE0002.NMEA").is_file());
    assert!(card.path().join("FILE0002.MP4").is_file());
}

#[test]
fn test_rerun_into_existing_directory_succeeds() {
    let card = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    write_pair(card.path(), "FILE0003", &moving_telemetry());

    let config = config_for(&card, &work);
    let options = RunOptions {
        copy: true,
        ..Default::default()
    };
    organize_card(&config, &options).expect("first run");
    let directories = organize_card(&config, &options).expect("second run over existing directory");
    assert_eq!(directories.len(), 1);
    assert!(work.path().join(expected_date()).join("FILE0003.nmea").is_file());
}

#[test]
fn test_exclusion_zone_at_start_rejects_and_leaves_files() {
    let card = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    write_pair(card.path(), "FILE0004", &moving_telemetry());

    let mut config = config_for(&card, &work);
    config.ignore = vec![ExclusionZone {
        lat: 45.0,
        lon: -73.0,
        delta: 1.0,
        name: "home".to_string(),
    }];
    let directories = organize_card(&config, &RunOptions::default()).expect("pipeline run");

    assert!(directories.is_empty());
    assert!(card.path().join("FILE0004.NMEA").is_file());
    assert!(card.path().join("FILE0004.MP4").is_file());
    assert!(!work.path().join(expected_date()).exists());
}

#[test]
fn test_recording_without_lock_is_left_on_card() {
    let card = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let telemetry = [
        nmea_line("GPGGA,100000.00,,,,,0,00,,,M,,M,,"),
        nmea_line("GPRMC,100000.00,V,,,,,,,010324,,,N"),
    ]
    .join("\n");
    write_pair(card.path(), "FILE0005", &telemetry);

    let config = config_for(&card, &work);
    let directories = organize_card(&config, &RunOptions::default()).expect("pipeline run");

    assert!(directories.is_empty());
    assert!(card.path().join("FILE0005.NMEA").is_file());
}

#[test]
fn test_telemetry_without_video_still_relocates() {
    let card = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    fs::write(card.path().join("FILE0006.NMEA"), moving_telemetry()).unwrap();

    let config = config_for(&card, &work);
    let directories = organize_card(&config, &RunOptions::default()).expect("pipeline run");

    assert_eq!(directories.len(), 1);
    assert!(work
        .path()
        .join(expected_date())
        .join("FILE0006.nmea")
        .is_file());
}

#[test]
fn test_recordings_share_a_destination_directory() {
    let card = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    write_pair(card.path(), "FILE0007", &moving_telemetry());
    write_pair(card.path(), "FILE0008", &moving_telemetry());

    let config = config_for(&card, &work);
    let directories = organize_card(&config, &RunOptions::default()).expect("pipeline run");

    // Same date: one tracked directory, both pairs inside
    assert_eq!(directories.len(), 1);
    let dest = &directories[0];
    assert!(dest.join("FILE0007.nmea").is_file());
    assert!(dest.join("FILE0008.nmea").is_file());
}

#[cfg(unix)]
mod invoker {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// A stand-in tool that appends its arguments to a log file.
    fn fake_tool(dir: &Path, log: &Path) -> String {
        let script = dir.join("fake_tool.sh");
        fs::write(
            &script,
            format!("#!/bin/sh\necho \"$@\" >> \"{}\"\n", log.display()),
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        script.to_string_lossy().into_owned()
    }

    fn invoker_fixture() -> (TempDir, RunConfig, Vec<PathBuf>, PathBuf) {
        let scratch = TempDir::new().unwrap();
        let log = scratch.path().join("calls.log");
        let dest = scratch.path().join("2024-03-01");
        fs::create_dir(&dest).unwrap();
        let config = RunConfig {
            sdcard_dir: String::new(),
            work_dir: String::new(),
            ignore: Vec::new(),
            stationary_check: false,
            geocode_names: false,
            tool_command: fake_tool(scratch.path(), &log),
        };
        let directories = vec![dest];
        (scratch, config, directories, log)
    }

    #[test]
    fn test_process_then_upload_per_directory() {
        let (_scratch, config, directories, log) = invoker_fixture();
        process_and_upload(&config, &RunOptions::default(), &directories);

        let calls = fs::read_to_string(&log).expect("tool should have been invoked");
        let lines: Vec<&str> = calls.lines().collect();
        assert_eq!(lines.len(), 2);
        let dir = directories[0].display().to_string();
        assert_eq!(
            lines[0],
            format!("process --video_geotag_source nmea {}", dir)
        );
        assert_eq!(lines[1], format!("upload {}", dir));
    }

    #[test]
    fn test_dont_upload_skips_only_upload() {
        let (_scratch, config, directories, log) = invoker_fixture();
        let options = RunOptions {
            dont_upload: true,
            ..Default::default()
        };
        process_and_upload(&config, &options, &directories);

        let calls = fs::read_to_string(&log).expect("process should have been invoked");
        let lines: Vec<&str> = calls.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("process"));
    }

    #[test]
    fn test_dont_process_skips_both_passes() {
        let (_scratch, config, directories, log) = invoker_fixture();
        let options = RunOptions {
            dont_process: true,
            ..Default::default()
        };
        process_and_upload(&config, &options, &directories);

        assert!(!log.exists(), "tool must not run when processing is skipped");
    }

    #[test]
    fn test_missing_tool_is_not_fatal() {
        let scratch = TempDir::new().unwrap();
        let dest = scratch.path().join("2024-03-01");
        fs::create_dir(&dest).unwrap();
        let config = RunConfig {
            sdcard_dir: String::new(),
            work_dir: String::new(),
            ignore: Vec::new(),
            stationary_check: false,
            geocode_names: false,
            tool_command: "definitely_not_a_real_tool_xyz".to_string(),
        };
        // Spawn failure is reported, never propagated
        process_and_upload(&config, &RunOptions::default(), &[dest]);
    }
}
