//! Conversions between millisecond offsets and the `MM:SS.mmm` display timecode.
//!
//! Minutes are not wrapped into hours: one hour renders as `60:00.000`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TimecodeError;

/// Format a millisecond offset as `MM:SS.mmm`.
pub fn format_timecode(ms: u64) -> String {
    let total_secs = ms / 1000;
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    let millis = ms % 1000;
    format!("{minutes:02}:{seconds:02}.{millis:03}")
}

/// Parse a `MM:SS.mmm` timecode back into milliseconds.
///
/// The millisecond part is optional (`"01:05"` is 65000 ms). Every present
/// component must be an unsigned decimal integer.
pub fn parse_timecode(input: &str) -> Result<u64, TimecodeError> {
    let text = input.trim();
    let (min_sec, millis) = match text.split_once('.') {
        Some((head, tail)) => (head, Some(tail)),
        None => (text, None),
    };
    let (minutes, seconds) = min_sec
        .split_once(':')
        .ok_or_else(|| TimecodeError::Malformed(input.to_string()))?;

    let minutes = parse_component(minutes, input)?;
    let seconds = parse_component(seconds, input)?;
    let millis = match millis {
        Some(m) => parse_component(m, input)?,
        None => 0,
    };

    minutes
        .checked_mul(60_000)
        .and_then(|m| m.checked_add(seconds.checked_mul(1000)?))
        .and_then(|m| m.checked_add(millis))
        .ok_or_else(|| TimecodeError::OutOfRange(input.to_string()))
}

fn parse_component(part: &str, input: &str) -> Result<u64, TimecodeError> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimecodeError::Malformed(input.to_string()));
    }
    part.parse::<u64>()
        .map_err(|_| TimecodeError::OutOfRange(input.to_string()))
}

/// Format a millisecond duration as seconds with millisecond precision (`"2.500"`).
pub fn format_seconds(ms: u64) -> String {
    format!("{:.3}", ms as f64 / 1000.0)
}

/// Parse a seconds value (`"2.5"`) into milliseconds, rounding to the nearest
/// millisecond. Rejects negative and non-finite input.
pub fn parse_seconds(input: &str) -> Result<u64, TimecodeError> {
    let secs: f64 = input
        .trim()
        .parse()
        .map_err(|_| TimecodeError::Malformed(input.to_string()))?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(TimecodeError::OutOfRange(input.to_string()));
    }
    Ok((secs * 1000.0).round() as u64)
}

/// A millisecond offset that displays as a timecode.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timecode(pub u64);

impl Timecode {
    pub const ZERO: Self = Self(0);

    pub fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }

    pub fn as_secs(self) -> f64 {
        self.0 as f64 / 1000.0
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_timecode(self.0))
    }
}

impl FromStr for Timecode {
    type Err = TimecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_timecode(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero_and_millis() {
        assert_eq!(format_timecode(0), "00:00.000");
        assert_eq!(format_timecode(500), "00:00.500");
        assert_eq!(format_timecode(12_345), "00:12.345");
    }

    #[test]
    fn formats_minutes_without_wrapping_hours() {
        assert_eq!(format_timecode(65_432), "01:05.432");
        assert_eq!(format_timecode(3_599_999), "59:59.999");
        assert_eq!(format_timecode(3_600_000), "60:00.000");
    }

    #[test]
    fn parses_full_timecodes() {
        assert_eq!(parse_timecode("00:00.000").unwrap(), 0);
        assert_eq!(parse_timecode("02:05.999").unwrap(), 125_999);
        assert_eq!(parse_timecode(" 10:00.000 ").unwrap(), 600_000);
    }

    #[test]
    fn millis_part_is_optional() {
        assert_eq!(parse_timecode("01:05").unwrap(), 65_000);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            parse_timecode("abc"),
            Err(TimecodeError::Malformed(_))
        ));
        assert!(parse_timecode("1:xx.000").is_err());
        assert!(parse_timecode("-1:00.000").is_err());
        assert!(parse_timecode("00:.100").is_err());
        assert!(parse_timecode("").is_err());
    }

    #[test]
    fn seconds_helpers() {
        assert_eq!(format_seconds(2_500), "2.500");
        assert_eq!(parse_seconds("2.5").unwrap(), 2_500);
        assert_eq!(parse_seconds("0.0334").unwrap(), 33);
        assert!(parse_seconds("-1").is_err());
        assert!(parse_seconds("NaN").is_err());
        assert!(parse_seconds("soon").is_err());
    }

    #[test]
    fn timecode_newtype_display_and_parse() {
        let tc: Timecode = "01:30.250".parse().unwrap();
        assert_eq!(tc.as_millis(), 90_250);
        assert_eq!(tc.to_string(), "01:30.250");
        assert!((tc.as_secs() - 90.25).abs() < 1e-9);
    }
}
