use thiserror::Error;

/// Failure to derive a connection identity
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("runtime metrics unavailable: {0}")]
    MetricsUnavailable(String),
    #[error("unsupported identity attribute: {0}")]
    UnsupportedAttribute(String),
}
