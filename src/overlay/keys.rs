//! Recording option keys and raw value parsing
//!
//! Every [`OptionKey`] declares the domain its raw string value is parsed
//! into. Parsing happens only when the overlay is applied, never at stage time.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Identifier of a recording option understood by the configuration sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionKey {
    /// Whether the recording is written to disk
    ToDisk,
    /// Maximum age of data kept in the disk repository
    MaxAge,
    /// Maximum size of data kept in the disk repository
    MaxSize,
    /// Human readable recording name
    Name,
    /// Fixed recording duration
    Duration,
    /// Dump destination path
    Destination,
    /// Dump the recording when the monitored runtime exits
    DumpOnExit,
}

/// Native value domain of an option key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueDomain {
    Boolean,
    Duration,
    Size,
    Text,
}

/// A raw value converted into its key's native domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Boolean(bool),
    Duration(Duration),
    Size(u64),
    Text(String),
}

impl OptionKey {
    /// All keys in declaration order
    pub const ALL: [OptionKey; 7] = [
        OptionKey::ToDisk,
        OptionKey::MaxAge,
        OptionKey::MaxSize,
        OptionKey::Name,
        OptionKey::Duration,
        OptionKey::Destination,
        OptionKey::DumpOnExit,
    ];

    /// Canonical external option name
    pub fn name(self) -> &'static str {
        match self {
            OptionKey::ToDisk => "disk",
            OptionKey::MaxAge => "maxAge",
            OptionKey::MaxSize => "maxSize",
            OptionKey::Name => "name",
            OptionKey::Duration => "duration",
            OptionKey::Destination => "destination",
            OptionKey::DumpOnExit => "dumpOnExit",
        }
    }

    pub fn domain(self) -> ValueDomain {
        match self {
            OptionKey::ToDisk | OptionKey::DumpOnExit => ValueDomain::Boolean,
            OptionKey::MaxAge | OptionKey::Duration => ValueDomain::Duration,
            OptionKey::MaxSize => ValueDomain::Size,
            OptionKey::Name | OptionKey::Destination => ValueDomain::Text,
        }
    }

    /// Parse a raw staged value into this key's domain
    pub fn parse_value(self, raw: &str) -> Result<OptionValue, String> {
        match self.domain() {
            ValueDomain::Boolean => parse_bool(raw).map(OptionValue::Boolean),
            ValueDomain::Duration => parse_duration(raw).map(OptionValue::Duration),
            ValueDomain::Size => parse_size(raw).map(OptionValue::Size),
            ValueDomain::Text => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    Err("value must not be empty".to_string())
                } else {
                    Ok(OptionValue::Text(trimmed.to_string()))
                }
            }
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OptionKey {
    type Err = String;

    /// Accepts the canonical name in any case, with `-`/`_` separators ignored
    /// (`maxAge`, `max-age` and `MAX_AGE` all resolve to [`OptionKey::MaxAge`]).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let key = match normalized.as_str() {
            "disk" | "todisk" => OptionKey::ToDisk,
            "maxage" => OptionKey::MaxAge,
            "maxsize" => OptionKey::MaxSize,
            "name" => OptionKey::Name,
            "duration" => OptionKey::Duration,
            "destination" => OptionKey::Destination,
            "dumponexit" => OptionKey::DumpOnExit,
            _ => return Err(format!("unknown recording option: {s}")),
        };
        Ok(key)
    }
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(format!("expected true or false, got {trimmed:?}"))
    }
}

/// Split `"30 s"` / `"30s"` / `"30"` into the magnitude and the unit suffix
fn split_quantity(raw: &str) -> Result<(u64, String), String> {
    let trimmed = raw.trim();
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    if digits_end == 0 {
        return Err(format!("expected a non-negative integer, got {trimmed:?}"));
    }
    let magnitude = trimmed[..digits_end]
        .parse::<u64>()
        .map_err(|e| format!("invalid number {:?}: {e}", &trimmed[..digits_end]))?;
    let unit = trimmed[digits_end..].trim().to_ascii_lowercase();
    Ok((magnitude, unit))
}

/// Bare integers are milliseconds
fn parse_duration(raw: &str) -> Result<Duration, String> {
    let (magnitude, unit) = split_quantity(raw)?;
    let overflow = || format!("duration {:?} is out of range", raw.trim());
    let duration = match unit.as_str() {
        "ns" => Duration::from_nanos(magnitude),
        "us" => Duration::from_micros(magnitude),
        "" | "ms" => Duration::from_millis(magnitude),
        "s" => Duration::from_secs(magnitude),
        "m" | "min" => Duration::from_secs(magnitude.checked_mul(60).ok_or_else(overflow)?),
        "h" => Duration::from_secs(magnitude.checked_mul(3_600).ok_or_else(overflow)?),
        "d" => Duration::from_secs(magnitude.checked_mul(86_400).ok_or_else(overflow)?),
        other => return Err(format!("unknown duration unit {other:?}")),
    };
    Ok(duration)
}

/// Bare integers are bytes; unit multiples are binary
fn parse_size(raw: &str) -> Result<u64, String> {
    let (magnitude, unit) = split_quantity(raw)?;
    let shift = match unit.as_str() {
        "" | "b" => 0,
        "k" | "kb" => 10,
        "m" | "mb" => 20,
        "g" | "gb" => 30,
        "t" | "tb" => 40,
        other => return Err(format!("unknown size unit {other:?}")),
    };
    magnitude
        .checked_mul(1u64 << shift)
        .ok_or_else(|| format!("size {:?} is out of range", raw.trim()))
}
