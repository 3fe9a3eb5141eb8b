use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use dashcam_organizer::config::RunConfig;
use dashcam_organizer::pipeline::{organize_card, RunOptions};
use dashcam_organizer::upload::process_and_upload;
use std::path::Path;

fn build_command() -> Command {
    Command::new("dashcam_organizer")
        .version(env!("CARGO_PKG_VERSION"))
        .about(
            "Organize paired dash-cam video/NMEA recordings from an SD card into \
             date-named directories and hand them to mapillary_tools.",
        )
        .arg(
            Arg::new("copy")
                .long("copy")
                .short('c')
                .help("Copy files from the SD card instead of moving them")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dont_process")
                .long("dont_process")
                .visible_alias("dp")
                .help("Don't process or upload videos to Mapillary")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dont_upload")
                .long("dont_upload")
                .visible_alias("du")
                .help("Don't upload videos to Mapillary")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .default_value("dashcam.json")
                .help("Path to the JSON run configuration"),
        )
}

fn main() -> Result<()> {
    let matches = build_command().get_matches();
    let options = RunOptions {
        copy: matches.get_flag("copy"),
        dont_process: matches.get_flag("dont_process"),
        dont_upload: matches.get_flag("dont_upload"),
    };

    let config_path = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or("dashcam.json");
    let config = RunConfig::load_from(config_path)?;

    if !Path::new(&config.sdcard_dir).is_dir() {
        eprintln!("SDCard directory '{}' does not exist", config.sdcard_dir);
        std::process::exit(1);
    }
    if !Path::new(&config.work_dir).is_dir() {
        eprintln!("Destination '{}' does not exist", config.work_dir);
        std::process::exit(1);
    }

    let directories = organize_card(&config, &options)?;
    process_and_upload(&config, &options, &directories);

    Ok(())
}
