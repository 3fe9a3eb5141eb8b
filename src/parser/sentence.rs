//! NMEA 0183 sentence parsing
//!
//! Decodes the two sentence kinds the scanner consumes: GGA (fix time of day
//! plus position) and RMC (recording date, field 9). Every other sentence
//! kind parses to [`Sentence::Other`] and is ignored upstream. Framing and
//! checksum problems are reported as [`NmeaError`] so the scanner can skip
//! the offending line without aborting the file.

use crate::conversion::{convert_nmea_coordinate, parse_nmea_date, parse_nmea_time};
use crate::error::{NmeaError, Result};
use crate::types::{Coordinate, Fix};
use chrono::NaiveDate;

/// One parsed NMEA sentence, reduced to what the scanner needs
#[derive(Debug, Clone)]
pub enum Sentence {
    /// GGA fix: time of day plus position once the receiver has a lock
    Gga(Fix),
    /// RMC: carries the UTC date (empty before first lock)
    Rmc { date: Option<NaiveDate> },
    /// Any sentence kind the pipeline does not consume
    Other,
}

/// Parse a single `$...*hh` sentence line (without line terminator).
pub fn parse_sentence(line: &str) -> Result<Sentence> {
    let (body, declared) = split_checksum(line)?;
    let computed = body.bytes().fold(0u8, |acc, b| acc ^ b);
    if computed != declared {
        return Err(NmeaError::Checksum { computed, declared });
    }

    let fields: Vec<&str> = body.split(',').collect();
    let msg_id = fields[0];
    // Talker prefix is two letters, so the sentence kind is the last three
    // characters of a five-letter message id.
    let kind = if msg_id.len() >= 5 && msg_id.is_ascii() {
        &msg_id[msg_id.len() - 3..]
    } else {
        ""
    };
    match kind {
        "GGA" => parse_gga(&fields),
        "RMC" => parse_rmc(&fields),
        _ => Ok(Sentence::Other),
    }
}

/// Split a sentence into its checksummed body and the declared checksum.
fn split_checksum(line: &str) -> Result<(&str, u8)> {
    let inner = line
        .strip_prefix('$')
        .ok_or_else(|| NmeaError::Malformed("missing leading '$'".to_string()))?;
    let (body, checksum) = inner
        .rsplit_once('*')
        .ok_or_else(|| NmeaError::Malformed("missing checksum delimiter".to_string()))?;
    let declared = u8::from_str_radix(checksum, 16)
        .map_err(|_| NmeaError::Malformed(format!("bad checksum field '{}'", checksum)))?;
    Ok((body, declared))
}

fn parse_gga(fields: &[&str]) -> Result<Sentence> {
    let time_field = fields.get(1).copied().unwrap_or("");
    if time_field.is_empty() {
        return Err(NmeaError::Field("GGA sentence has no fix time".to_string()));
    }
    let time = parse_nmea_time(time_field)?;

    let lat = fields.get(2).copied().unwrap_or("");
    let ns = fields.get(3).copied().unwrap_or("");
    let lon = fields.get(4).copied().unwrap_or("");
    let ew = fields.get(5).copied().unwrap_or("");
    // Empty position fields are not an error; the receiver simply has no
    // lock yet.
    let position = if lat.is_empty() || ns.is_empty() || lon.is_empty() || ew.is_empty() {
        None
    } else {
        Some(Coordinate {
            latitude: convert_nmea_coordinate(lat, ns)?,
            longitude: convert_nmea_coordinate(lon, ew)?,
        })
    };

    Ok(Sentence::Gga(Fix { time, position }))
}

fn parse_rmc(fields: &[&str]) -> Result<Sentence> {
    let date_field = fields.get(9).copied().unwrap_or("");
    let date = if date_field.is_empty() {
        None
    } else {
        Some(parse_nmea_date(date_field)?)
    };
    Ok(Sentence::Rmc { date })
}
