use chrono::NaiveTime;

/// A position on the WGS-84 ellipsoid in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// One decoded GGA sample: UTC time of day plus the receiver's position.
/// The position is `None` until the receiver has a satellite lock.
#[derive(Debug, Clone, Copy)]
pub struct Fix {
    pub time: NaiveTime,
    pub position: Option<Coordinate>,
}
