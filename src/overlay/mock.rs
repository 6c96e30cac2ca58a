//! Mock sink and reporter for deterministic testing
//!
//! `MockSink` records every setter call instead of configuring a live
//! recording, and can be told to reject chosen keys. `CollectingReporter`
//! keeps every reported failure for later assertions.
//!
//! # Example
//! ```
//! use std::sync::Arc;
//! use vmprobe::overlay::mock::{CollectingReporter, MockSink, SinkCall};
//! use vmprobe::overlay::{OptionKey, OptionOverlay};
//!
//! let reporter = Arc::new(CollectingReporter::default());
//! let mut overlay = OptionOverlay::with_reporter(reporter.clone());
//! overlay.set(OptionKey::MaxSize, "123");
//!
//! let mut sink = MockSink::default();
//! overlay.apply(&mut sink);
//! assert_eq!(sink.calls(), vec![SinkCall::MaxSize(123)]);
//! assert!(reporter.errors().is_empty());
//! ```

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use super::error::{OverlayError, SinkError};
use super::keys::OptionKey;
use super::sink::{DiagnosticReporter, RecordingSink};

/// One recorded setter invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall {
    ToDisk(bool),
    MaxAge(Duration),
    MaxSize(u64),
    Name(String),
    Duration(Duration),
    Destination(String),
    DumpOnExit(bool),
}

impl SinkCall {
    pub fn key(&self) -> OptionKey {
        match self {
            SinkCall::ToDisk(_) => OptionKey::ToDisk,
            SinkCall::MaxAge(_) => OptionKey::MaxAge,
            SinkCall::MaxSize(_) => OptionKey::MaxSize,
            SinkCall::Name(_) => OptionKey::Name,
            SinkCall::Duration(_) => OptionKey::Duration,
            SinkCall::Destination(_) => OptionKey::Destination,
            SinkCall::DumpOnExit(_) => OptionKey::DumpOnExit,
        }
    }
}

/// Recording sink double. Clones share the same call log.
#[derive(Clone, Default)]
pub struct MockSink {
    calls: Arc<Mutex<Vec<SinkCall>>>,
    rejected: HashSet<OptionKey>,
}

impl MockSink {
    /// Reject every call for `key` with [`SinkError::Rejected`]
    pub fn rejecting(mut self, key: OptionKey) -> Self {
        self.rejected.insert(key);
        self
    }

    /// Calls received so far, in order, including rejected ones
    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().clone()
    }

    /// Number of calls received for `key`
    pub fn call_count(&self, key: OptionKey) -> usize {
        self.calls.lock().iter().filter(|c| c.key() == key).count()
    }

    pub fn reset(&self) {
        self.calls.lock().clear();
    }

    fn record(&mut self, call: SinkCall) -> Result<(), SinkError> {
        let key = call.key();
        self.calls.lock().push(call);
        if self.rejected.contains(&key) {
            Err(SinkError::Rejected(format!("mock rejects {key}")))
        } else {
            Ok(())
        }
    }
}

impl RecordingSink for MockSink {
    fn set_to_disk(&mut self, enabled: bool) -> Result<(), SinkError> {
        self.record(SinkCall::ToDisk(enabled))
    }

    fn set_max_age(&mut self, max_age: Duration) -> Result<(), SinkError> {
        self.record(SinkCall::MaxAge(max_age))
    }

    fn set_max_size(&mut self, max_size: u64) -> Result<(), SinkError> {
        self.record(SinkCall::MaxSize(max_size))
    }

    fn set_name(&mut self, name: &str) -> Result<(), SinkError> {
        self.record(SinkCall::Name(name.to_string()))
    }

    fn set_duration(&mut self, duration: Duration) -> Result<(), SinkError> {
        self.record(SinkCall::Duration(duration))
    }

    fn set_destination(&mut self, destination: &str) -> Result<(), SinkError> {
        self.record(SinkCall::Destination(destination.to_string()))
    }

    fn set_dump_on_exit(&mut self, enabled: bool) -> Result<(), SinkError> {
        self.record(SinkCall::DumpOnExit(enabled))
    }
}

/// Reporter that keeps every reported failure
#[derive(Default)]
pub struct CollectingReporter {
    errors: Mutex<Vec<OverlayError>>,
}

impl CollectingReporter {
    pub fn errors(&self) -> Vec<OverlayError> {
        self.errors.lock().clone()
    }
}

impl DiagnosticReporter for CollectingReporter {
    fn report(&self, error: &OverlayError) {
        self.errors.lock().push(error.clone());
    }
}
