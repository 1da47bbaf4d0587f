//! Duration text format used by the config file and CLI flags.
//!
//! A duration is one or more `<number><unit>` groups with units `h`, `m`,
//! `s` and `ms`, e.g. `25m`, `1h30m`, `1.5h`, `90s`. A bare `0` is also
//! accepted.

use std::time::Duration;

use super::error::ConfigError;

const UNITS: &[(&str, f64)] = &[("h", 3600.0), ("m", 60.0), ("s", 1.0), ("ms", 0.001)];

/// Parses duration text such as `25m` or `1h30m`.
///
/// # Errors
///
/// Returns `ConfigError::InvalidDuration` for empty input, missing or
/// unknown units, malformed numbers, or values too large to represent.
pub fn parse_duration(text: &str) -> Result<Duration, ConfigError> {
    let input = text.trim();
    if input.is_empty() {
        return Err(ConfigError::invalid_duration(text, "empty duration"));
    }
    if input == "0" {
        return Ok(Duration::ZERO);
    }
    if !input.is_ascii() {
        return Err(ConfigError::invalid_duration(text, "unexpected character"));
    }

    let bytes = input.as_bytes();
    let mut pos = 0;
    let mut total_secs = 0.0_f64;

    while pos < bytes.len() {
        let number_start = pos;
        while pos < bytes.len() && (bytes[pos].is_ascii_digit() || bytes[pos] == b'.') {
            pos += 1;
        }
        let number = &input[number_start..pos];
        if number.is_empty() {
            return Err(ConfigError::invalid_duration(text, "expected a number"));
        }
        let value: f64 = number
            .parse()
            .map_err(|_| ConfigError::invalid_duration(text, format!("bad number '{}'", number)))?;

        let unit_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
            pos += 1;
        }
        let unit = &input[unit_start..pos];
        if unit.is_empty() {
            return Err(ConfigError::invalid_duration(text, "missing unit"));
        }
        let scale = UNITS
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, scale)| *scale)
            .ok_or_else(|| ConfigError::invalid_duration(text, format!("unknown unit '{}'", unit)))?;

        total_secs += value * scale;
    }

    Duration::try_from_secs_f64(total_secs)
        .map_err(|_| ConfigError::invalid_duration(text, "out of range"))
}

/// Formats a duration in the compact form accepted by [`parse_duration`].
///
/// Sub-millisecond precision is dropped.
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();
    if total_ms == 0 {
        return "0s".to_string();
    }

    let hours = total_ms / 3_600_000;
    let minutes = total_ms % 3_600_000 / 60_000;
    let seconds = total_ms % 60_000 / 1000;
    let millis = total_ms % 1000;

    let mut out = String::new();
    for (value, unit) in [(hours, "h"), (minutes, "m"), (seconds, "s"), (millis, "ms")] {
        if value > 0 {
            out.push_str(&value.to_string());
            out.push_str(unit);
        }
    }
    out
}

/// Serde adapter storing a `Duration` as duration text.
pub mod serde_text {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_duration(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_duration(&text).map_err(serde::de::Error::custom)
    }
}
