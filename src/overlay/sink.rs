//! Capabilities the overlay calls into: the configuration sink and the
//! diagnostic reporter.

use std::time::Duration;

use super::error::{OverlayError, SinkError};
use super::keys::{OptionKey, OptionValue};

/// Receiver of committed recording options.
///
/// One setter per [`OptionKey`]; each may fail independently of the others.
///
/// Durations arrive as [`Duration`], so a sink never sees a bare number.
/// A staged duration without a unit (`"123"`) is taken as milliseconds;
/// a sink that needs another unit converts from the `Duration`.
pub trait RecordingSink {
    fn set_to_disk(&mut self, enabled: bool) -> Result<(), SinkError>;
    fn set_max_age(&mut self, max_age: Duration) -> Result<(), SinkError>;
    /// Size in bytes
    fn set_max_size(&mut self, max_size: u64) -> Result<(), SinkError>;
    fn set_name(&mut self, name: &str) -> Result<(), SinkError>;
    fn set_duration(&mut self, duration: Duration) -> Result<(), SinkError>;
    fn set_destination(&mut self, destination: &str) -> Result<(), SinkError>;
    fn set_dump_on_exit(&mut self, enabled: bool) -> Result<(), SinkError>;
}

/// Receives per-key failures that `apply` swallows
pub trait DiagnosticReporter: Send + Sync {
    fn report(&self, error: &OverlayError);
}

/// Default reporter: logs each failure as a warning
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl DiagnosticReporter for TracingReporter {
    fn report(&self, error: &OverlayError) {
        match error {
            OverlayError::Parse { key, value, .. } => {
                tracing::warn!(%key, %value, %error, "Failed to parse recording option");
            }
            OverlayError::SinkRejected { key, .. } => {
                tracing::warn!(%key, %error, "Sink rejected recording option");
            }
        }
    }
}

/// Route a parsed value to the single setter owned by `key`.
///
/// The caller guarantees `value` came from `key.parse_value`, so a domain
/// mismatch is a rejection rather than a panic.
pub(crate) fn dispatch(
    sink: &mut dyn RecordingSink,
    key: OptionKey,
    value: &OptionValue,
) -> Result<(), SinkError> {
    match (key, value) {
        (OptionKey::ToDisk, OptionValue::Boolean(v)) => sink.set_to_disk(*v),
        (OptionKey::MaxAge, OptionValue::Duration(v)) => sink.set_max_age(*v),
        (OptionKey::MaxSize, OptionValue::Size(v)) => sink.set_max_size(*v),
        (OptionKey::Name, OptionValue::Text(v)) => sink.set_name(v),
        (OptionKey::Duration, OptionValue::Duration(v)) => sink.set_duration(*v),
        (OptionKey::Destination, OptionValue::Text(v)) => sink.set_destination(v),
        (OptionKey::DumpOnExit, OptionValue::Boolean(v)) => sink.set_dump_on_exit(*v),
        (key, value) => Err(SinkError::Rejected(format!(
            "{value:?} is not a {:?} value for {key}",
            key.domain()
        ))),
    }
}
