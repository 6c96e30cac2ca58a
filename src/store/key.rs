//! Structured store keys
//!
//! Generated keys render as `<seq>_store` or `<seq>_store_<family>`. Any
//! caller-supplied string with that exact shape parses back into a generated
//! key, so it takes part in family eviction like a real generated one.

use std::fmt;

/// Literal middle segment of every generated key
pub const GENERATED_TAG: &str = "store";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Generated { seq: u64, family: Option<String> },
    Custom(String),
}

impl StoreKey {
    /// Build a generated key. An empty family is treated as no family.
    pub fn generated(seq: u64, family: Option<&str>) -> Self {
        StoreKey::Generated {
            seq,
            family: family.filter(|f| !f.is_empty()).map(str::to_string),
        }
    }

    /// Interpret a caller-supplied key string
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.splitn(3, '_');
        let (Some(seq), Some(tag)) = (parts.next(), parts.next()) else {
            return StoreKey::Custom(raw.to_string());
        };
        let family = parts.next();

        let seq_is_canonical = !seq.is_empty()
            && seq.bytes().all(|b| b.is_ascii_digit())
            && (seq == "0" || !seq.starts_with('0'));
        if tag != GENERATED_TAG || !seq_is_canonical || family == Some("") {
            return StoreKey::Custom(raw.to_string());
        }

        match seq.parse::<u64>() {
            Ok(seq) => StoreKey::generated(seq, family),
            Err(_) => StoreKey::Custom(raw.to_string()),
        }
    }

    /// True only for generated keys tagged with exactly `family`
    pub fn matches_family(&self, family: &str) -> bool {
        matches!(self, StoreKey::Generated { family: Some(f), .. } if f == family)
    }

    pub fn family(&self) -> Option<&str> {
        match self {
            StoreKey::Generated { family, .. } => family.as_deref(),
            StoreKey::Custom(_) => None,
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKey::Generated { seq, family: None } => write!(f, "{seq}_{GENERATED_TAG}"),
            StoreKey::Generated {
                seq,
                family: Some(family),
            } => write!(f, "{seq}_{GENERATED_TAG}_{family}"),
            StoreKey::Custom(raw) => f.write_str(raw),
        }
    }
}

impl From<&str> for StoreKey {
    fn from(raw: &str) -> Self {
        StoreKey::parse(raw)
    }
}
