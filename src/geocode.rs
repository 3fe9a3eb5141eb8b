//! Reverse geocoding against the Nominatim HTTP API
//!
//! Maps a start coordinate to a short place name for directory naming. The
//! client carries its own last-query marker to honor Nominatim's courtesy
//! rate limit; lookups that fail for any reason simply yield no name and the
//! pipeline falls back to a date-only directory.

use crate::types::Coordinate;
use serde_json::Value;
use std::io::Read;
use std::time::{Duration, Instant};

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/reverse";
const USER_AGENT: &str = concat!("dashcam_organizer/", env!("CARGO_PKG_VERSION"));
/// Minimum spacing between consecutive queries, per Nominatim's usage policy
const QUERY_SPACING: Duration = Duration::from_secs(3);

/// Address keys inspected for a short place name, most specific first
const PLACE_KEYS: [&str; 5] = ["hamlet", "village", "suburb", "town", "city"];

pub struct Geocoder {
    agent: ureq::Agent,
    last_query: Option<Instant>,
}

impl Geocoder {
    pub fn new() -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_connect(Some(Duration::from_secs(10)))
            .build()
            .into();
        Self {
            agent,
            last_query: None,
        }
    }

    /// Reverse-geocode a coordinate to a short place name with spaces
    /// replaced by underscores. An absent coordinate skips the query
    /// entirely; a failed lookup or an address with none of the recognized
    /// keys yields `None`.
    pub fn reverse(&mut self, position: Option<Coordinate>) -> Option<String> {
        let position = match position {
            Some(position) => position,
            None => {
                println!("No lat/lon, not moving");
                return None;
            }
        };

        if let Some(last) = self.last_query {
            if last.elapsed() < QUERY_SPACING {
                std::thread::sleep(QUERY_SPACING);
            }
        }

        let url = format!(
            "{}?format=jsonv2&lat={}&lon={}",
            NOMINATIM_URL, position.latitude, position.longitude
        );
        let result = self.query(&url);
        self.last_query = Some(Instant::now());

        match result {
            Ok(document) => {
                let name = place_name(&document);
                if name.is_none() {
                    println!("No location from {}", document);
                }
                name
            }
            Err(e) => {
                eprintln!("Reverse geocoding failed: {:#}", e);
                None
            }
        }
    }

    fn query(&self, url: &str) -> anyhow::Result<Value> {
        let response = self
            .agent
            .get(url)
            .header("User-Agent", USER_AGENT)
            .call()?;
        let mut body = String::new();
        response.into_body().into_reader().read_to_string(&mut body)?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl Default for Geocoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick the most specific place name from a Nominatim address object,
/// underscoring internal spaces.
fn place_name(document: &Value) -> Option<String> {
    let address = document.get("address")?;
    for key in PLACE_KEYS {
        if let Some(name) = address.get(key).and_then(Value::as_str) {
            return Some(name.replace(' ', "_"));
        }
    }
    None
}
