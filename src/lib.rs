//! Dashcam Telemetry Organizer Library
//!
//! Batch-processes dash-cam footage from an SD card: scans for paired
//! video/NMEA recordings, extracts GPS start/end fixes from the telemetry,
//! drops stationary or geographically-excluded recordings, relocates the
//! survivors into date-named (optionally place-named) directories, and hands
//! each directory to `mapillary_tools` for processing and upload.
//!
//! # Quick Start
//!
//! Organize a card without invoking the external tool:
//! ```rust,no_run
//! use dashcam_organizer::{organize_card, RunConfig, RunOptions};
//!
//! let config = RunConfig::load_from("dashcam.json").unwrap();
//! let options = RunOptions { dont_process: true, ..Default::default() };
//! let directories = organize_card(&config, &options).unwrap();
//! println!("Populated {} directories", directories.len());
//! ```
//!
//! # Pipeline
//!
//! Data flows strictly forward, one recording at a time:
//!
//! - [`RunConfig`] - card path, work directory, exclusion zones, toggles
//! - [`scan_telemetry_file`] - reduce one NMEA file to start/end fixes
//! - [`Geocoder`] - reverse-geocode the start fix to a place name
//! - [`matching_zone`] - reject recordings inside an exclusion zone
//! - [`Organizer`] - relocate accepted pairs into destination directories
//! - [`process_and_upload`] - invoke the external tool per directory

// Module declarations
pub mod config;
pub mod conversion;
pub mod error;
pub mod filters;
pub mod geocode;
pub mod organize;
pub mod parser;
pub mod pipeline;
pub mod types;
pub mod upload;

// Re-export everything from modules for convenience
pub use config::*;
pub use conversion::*;
pub use filters::*;
pub use geocode::*;
pub use organize::*;
pub use parser::*;
pub use pipeline::*;
pub use types::*;
pub use upload::*;

pub use error::NmeaError;
