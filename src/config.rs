//! Run configuration loaded once from a JSON document
//!
//! The document names the card and work directories, the exclusion zones,
//! and the pipeline toggles that unify the historical copy/move and
//! geocoding behaviors behind explicit options.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A circular region that disqualifies recordings starting or ending in it
#[derive(Debug, Clone, Deserialize)]
pub struct ExclusionZone {
    pub lat: f64,
    pub lon: f64,
    /// Rejection radius in kilometres; comparison is strict less-than
    pub delta: f64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// Card directory scanned for `*.NMEA` files
    pub sdcard_dir: String,
    /// Destination prefix; directory names are `<work_dir><YYYY-MM-DD>[_<place>]`,
    /// so it normally ends with a path separator
    pub work_dir: String,
    #[serde(default)]
    pub ignore: Vec<ExclusionZone>,
    /// Reject recordings whose position never changed
    #[serde(default = "default_true")]
    pub stationary_check: bool,
    /// Suffix destination directories with a reverse-geocoded place name
    #[serde(default = "default_true")]
    pub geocode_names: bool,
    /// External processing/upload tool invoked per destination directory
    #[serde(default = "default_tool_command")]
    pub tool_command: String,
}

fn default_true() -> bool {
    true
}

fn default_tool_command() -> String {
    "mapillary_tools".to_string()
}

impl RunConfig {
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }
}
