//! Field conversion helpers for NMEA sentences
//!
//! Contains the pure conversions from raw NMEA field text to typed values:
//! ddmm.mmmm coordinates to decimal degrees, hhmmss times and ddmmyy dates
//! to chrono types. Used by the sentence parser.

use crate::error::{NmeaError, Result};
use chrono::{NaiveDate, NaiveTime};

/// Convert an NMEA ddmm.mmmm (or dddmm.mmmm for longitude) coordinate field
/// to decimal degrees, negated for the S and W hemispheres.
pub fn convert_nmea_coordinate(raw: &str, hemisphere: &str) -> Result<f64> {
    let value: f64 = raw
        .parse()
        .map_err(|_| NmeaError::Field(format!("bad coordinate field '{}'", raw)))?;
    let degrees = (value / 100.0).trunc();
    let minutes = value - degrees * 100.0;
    let decimal = degrees + minutes / 60.0;
    match hemisphere {
        "N" | "E" => Ok(decimal),
        "S" | "W" => Ok(-decimal),
        _ => Err(NmeaError::Field(format!(
            "bad hemisphere field '{}'",
            hemisphere
        ))),
    }
}

/// Parse an NMEA hhmmss[.sss] time-of-day field. Sub-second precision is
/// discarded.
pub fn parse_nmea_time(raw: &str) -> Result<NaiveTime> {
    let digits = match raw.split_once('.') {
        Some((whole, _)) => whole,
        None => raw,
    };
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NmeaError::Field(format!("bad time field '{}'", raw)));
    }
    let field_err = || NmeaError::Field(format!("bad time field '{}'", raw));
    let hour: u32 = digits[0..2].parse().map_err(|_| field_err())?;
    let minute: u32 = digits[2..4].parse().map_err(|_| field_err())?;
    let second: u32 = digits[4..6].parse().map_err(|_| field_err())?;
    NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(field_err)
}

/// Parse an NMEA ddmmyy date field. Years are 2000-based.
pub fn parse_nmea_date(raw: &str) -> Result<NaiveDate> {
    if raw.len() != 6 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NmeaError::Field(format!("bad date field '{}'", raw)));
    }
    let field_err = || NmeaError::Field(format!("bad date field '{}'", raw));
    let day: u32 = raw[0..2].parse().map_err(|_| field_err())?;
    let month: u32 = raw[2..4].parse().map_err(|_| field_err())?;
    let year: i32 = raw[4..6].parse().map_err(|_| field_err())?;
    NaiveDate::from_ymd_opt(2000 + year, month, day).ok_or_else(field_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_north() {
        let lat = convert_nmea_coordinate("4530.0000", "N").unwrap();
        assert!((lat - 45.5).abs() < 1e-9);
    }

    #[test]
    fn test_coordinate_south() {
        let lat = convert_nmea_coordinate("4530.0000", "S").unwrap();
        assert!((lat + 45.5).abs() < 1e-9);
    }

    #[test]
    fn test_coordinate_longitude_three_digit_degrees() {
        let lon = convert_nmea_coordinate("12315.0000", "E").unwrap();
        assert!((lon - 123.25).abs() < 1e-9);
        let lon = convert_nmea_coordinate("07300.0000", "W").unwrap();
        assert!((lon + 73.0).abs() < 1e-9);
    }

    #[test]
    fn test_coordinate_bad_hemisphere() {
        assert!(convert_nmea_coordinate("4530.0000", "Q").is_err());
        assert!(convert_nmea_coordinate("4530.0000", "").is_err());
    }

    #[test]
    fn test_coordinate_bad_number() {
        assert!(convert_nmea_coordinate("not-a-number", "N").is_err());
    }

    #[test]
    fn test_time_with_fraction() {
        let time = parse_nmea_time("102015.25").unwrap();
        assert_eq!(time, NaiveTime::from_hms_opt(10, 20, 15).unwrap());
    }

    #[test]
    fn test_time_without_fraction() {
        let time = parse_nmea_time("000000").unwrap();
        assert_eq!(time, NaiveTime::from_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn test_time_invalid() {
        assert!(parse_nmea_time("").is_err());
        assert!(parse_nmea_time("1020").is_err());
        assert!(parse_nmea_time("256060").is_err());
    }

    #[test]
    fn test_date() {
        let date = parse_nmea_date("010324").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_date_invalid() {
        assert!(parse_nmea_date("").is_err());
        assert!(parse_nmea_date("320124").is_err());
        assert!(parse_nmea_date("01032024").is_err());
    }
}
