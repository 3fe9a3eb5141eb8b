//! Exclusion-zone filtering for scanned recordings
//!
//! A recording is disqualified when its start or end coordinate falls
//! strictly inside any configured zone's radius. Zones are evaluated in
//! configuration order and evaluation stops at the first match; later
//! matches would not change the outcome and are not user-visible.

use crate::config::ExclusionZone;
use crate::types::Coordinate;
use std::fmt;

/// Mean earth radius in kilometres (IUGG)
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Which end of a recording fell inside a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "Start"),
            Endpoint::End => write!(f, "End"),
        }
    }
}

/// Great-circle distance in kilometres between two coordinates (haversine)
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// First zone whose radius strictly contains the recording's start or end
/// coordinate, with the endpoint that matched. The start coordinate is
/// checked before the end coordinate for each zone.
pub fn matching_zone<'a>(
    zones: &'a [ExclusionZone],
    start: Coordinate,
    end: Coordinate,
) -> Option<(&'a ExclusionZone, Endpoint)> {
    for zone in zones {
        let center = Coordinate {
            latitude: zone.lat,
            longitude: zone.lon,
        };
        if haversine_km(center, start) < zone.delta {
            return Some((zone, Endpoint::Start));
        }
        if haversine_km(center, end) < zone.delta {
            return Some((zone, Endpoint::End));
        }
    }
    None
}
