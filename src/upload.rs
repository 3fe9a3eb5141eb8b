//! External processing and upload passes
//!
//! Two passes over the tracked destination directories, preserving their
//! discovery order: first processing, then upload. Both calls block until
//! the tool exits; the tool's exit status is deliberately not inspected.

use crate::config::RunConfig;
use crate::pipeline::RunOptions;
use std::path::{Path, PathBuf};
use std::process::Command;

pub fn process_and_upload(config: &RunConfig, options: &RunOptions, directories: &[PathBuf]) {
    for dir in directories {
        if options.dont_process {
            println!("Not processing {}", dir.display());
        } else {
            println!("Process {}", dir.display());
            run_tool(
                &config.tool_command,
                &["process", "--video_geotag_source", "nmea"],
                dir,
            );
        }
    }

    for dir in directories {
        // Upload needs the processing output, so skipping processing skips
        // upload as well.
        if options.dont_process || options.dont_upload {
            println!("Not uploading {}", dir.display());
        } else {
            println!("Upload {}", dir.display());
            run_tool(&config.tool_command, &["upload"], dir);
        }
    }
}

fn run_tool(tool: &str, args: &[&str], dir: &Path) {
    if let Err(e) = Command::new(tool).args(args).arg(dir).status() {
        eprintln!("Failed to run {}: {}", tool, e);
    }
}
