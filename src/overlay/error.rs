use thiserror::Error;

use super::keys::OptionKey;

/// Failure raised by a configuration sink setter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    #[error("value rejected: {0}")]
    Rejected(String),
    #[error("sink unavailable: {0}")]
    Unavailable(String),
}

/// Per-key failure while applying staged options
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OverlayError {
    #[error("cannot parse {key} value {value:?}: {reason}")]
    Parse {
        key: OptionKey,
        value: String,
        reason: String,
    },
    #[error("sink rejected {key}: {source}")]
    SinkRejected {
        key: OptionKey,
        #[source]
        source: SinkError,
    },
}

impl OverlayError {
    /// The option key the failure belongs to
    pub fn key(&self) -> OptionKey {
        match self {
            OverlayError::Parse { key, .. } | OverlayError::SinkRejected { key, .. } => *key,
        }
    }
}
