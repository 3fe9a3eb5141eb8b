use std::fmt;

/// Errors produced by the NMEA sentence layer
#[derive(Debug)]
pub enum NmeaError {
    /// Sentence framing errors (missing `$`, missing checksum delimiter)
    Malformed(String),
    /// Checksum mismatch between the sentence body and its trailer
    Checksum { computed: u8, declared: u8 },
    /// Field-level parse errors with context
    Field(String),
}

impl fmt::Display for NmeaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NmeaError::Malformed(msg) => write!(f, "malformed sentence: {}", msg),
            NmeaError::Checksum { computed, declared } => write!(
                f,
                "checksum mismatch: computed {:02X}, sentence declares {:02X}",
                computed, declared
            ),
            NmeaError::Field(msg) => write!(f, "invalid field: {}", msg),
        }
    }
}

impl std::error::Error for NmeaError {}

pub type Result<T> = std::result::Result<T, NmeaError>;
