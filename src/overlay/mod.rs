//! Staged recording options
//!
//! [`OptionOverlay`] collects raw option values for a recording and pushes
//! them to a [`RecordingSink`] when the recording starts. Values are parsed
//! only at apply time, and a failure for one key is reported through the
//! injected [`DiagnosticReporter`] without stopping the remaining keys.

pub mod error;
pub mod keys;
pub mod mock;
pub mod sink;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

pub use error::{OverlayError, SinkError};
pub use keys::{OptionKey, OptionValue, ValueDomain};
pub use sink::{DiagnosticReporter, RecordingSink, TracingReporter};

/// Outcome of one `apply` pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Keys whose setter accepted the value
    pub applied: Vec<OptionKey>,
    /// Keys that failed to parse or were rejected by the sink
    pub failed: Vec<OptionKey>,
}

impl ApplyReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Last-write-wins map of staged raw option values
pub struct OptionOverlay {
    staged: BTreeMap<OptionKey, String>,
    reporter: Arc<dyn DiagnosticReporter>,
}

impl OptionOverlay {
    /// Create an empty overlay that logs failures through `tracing`
    pub fn new() -> Self {
        Self::with_reporter(Arc::new(TracingReporter))
    }

    pub fn with_reporter(reporter: Arc<dyn DiagnosticReporter>) -> Self {
        Self {
            staged: BTreeMap::new(),
            reporter,
        }
    }

    /// Stage `raw` for `key`, replacing any earlier value. No validation.
    pub fn set(&mut self, key: OptionKey, raw: impl Into<String>) {
        let raw = raw.into();
        tracing::trace!(%key, value = %raw, "Staged recording option");
        self.staged.insert(key, raw);
    }

    /// Drop the staged value for `key`; no-op if none is staged
    pub fn unset(&mut self, key: OptionKey) {
        if self.staged.remove(&key).is_some() {
            tracing::trace!(%key, "Unstaged recording option");
        }
    }

    pub fn get(&self, key: OptionKey) -> Option<&str> {
        self.staged.get(&key).map(String::as_str)
    }

    /// Snapshot of the staged values in key order
    pub fn staged(&self) -> Vec<(OptionKey, String)> {
        self.staged
            .iter()
            .map(|(k, v)| (*k, v.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    pub fn clear(&mut self) {
        self.staged.clear();
    }

    /// Push every staged value to `sink`.
    ///
    /// Each key is attempted exactly once per call. Parse failures and sink
    /// rejections go to the reporter and never abort the pass; keys that are
    /// not staged are never sent, so the sink keeps its own default for them.
    pub fn apply(&self, sink: &mut dyn RecordingSink) -> ApplyReport {
        let mut report = ApplyReport::default();

        for (key, raw) in &self.staged {
            match self.apply_one(sink, *key, raw) {
                Ok(()) => report.applied.push(*key),
                Err(error) => {
                    self.reporter.report(&error);
                    report.failed.push(*key);
                }
            }
        }

        tracing::debug!(
            applied = report.applied.len(),
            failed = report.failed.len(),
            "Applied staged recording options"
        );
        report
    }

    fn apply_one(
        &self,
        sink: &mut dyn RecordingSink,
        key: OptionKey,
        raw: &str,
    ) -> Result<(), OverlayError> {
        let value = key.parse_value(raw).map_err(|reason| OverlayError::Parse {
            key,
            value: raw.to_string(),
            reason,
        })?;
        sink::dispatch(sink, key, &value)
            .map_err(|source| OverlayError::SinkRejected { key, source })
    }
}

impl Default for OptionOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OptionOverlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionOverlay")
            .field("staged", &self.staged)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::mock::{CollectingReporter, MockSink, SinkCall};
    use super::*;

    fn overlay_with_collector() -> (OptionOverlay, Arc<CollectingReporter>) {
        let reporter = Arc::new(CollectingReporter::default());
        (OptionOverlay::with_reporter(reporter.clone()), reporter)
    }

    #[test]
    fn test_apply_invokes_only_staged_setter() {
        let (mut overlay, reporter) = overlay_with_collector();
        overlay.set(OptionKey::ToDisk, "true");

        let mut sink = MockSink::default();
        let report = overlay.apply(&mut sink);

        assert_eq!(sink.calls(), vec![SinkCall::ToDisk(true)]);
        assert_eq!(report.applied, vec![OptionKey::ToDisk]);
        assert!(report.is_clean());
        assert!(reporter.errors().is_empty());
    }

    #[test]
    fn test_last_write_wins() {
        let (mut overlay, _) = overlay_with_collector();
        overlay.set(OptionKey::MaxAge, "1");
        overlay.set(OptionKey::MaxAge, "2 s");

        let mut sink = MockSink::default();
        overlay.apply(&mut sink);

        assert_eq!(sink.calls(), vec![SinkCall::MaxAge(Duration::from_secs(2))]);
    }

    #[test]
    fn test_reapply_uses_current_value() {
        let (mut overlay, _) = overlay_with_collector();
        let mut sink = MockSink::default();

        overlay.set(OptionKey::MaxAge, "123");
        overlay.apply(&mut sink);
        assert_eq!(sink.calls(), vec![SinkCall::MaxAge(Duration::from_millis(123))]);

        sink.reset();
        overlay.set(OptionKey::MaxAge, "456");
        overlay.apply(&mut sink);
        assert_eq!(sink.calls(), vec![SinkCall::MaxAge(Duration::from_millis(456))]);
    }

    #[test]
    fn test_unset_prevents_call() {
        let (mut overlay, _) = overlay_with_collector();
        overlay.set(OptionKey::MaxSize, "123");
        overlay.unset(OptionKey::MaxSize);
        overlay.unset(OptionKey::MaxSize);

        let mut sink = MockSink::default();
        let report = overlay.apply(&mut sink);

        assert!(sink.calls().is_empty());
        assert_eq!(report, ApplyReport::default());
    }

    #[test]
    fn test_sink_rejection_does_not_stop_other_keys() {
        let (mut overlay, reporter) = overlay_with_collector();
        overlay.set(OptionKey::ToDisk, "true");
        overlay.set(OptionKey::MaxAge, "10 s");
        overlay.set(OptionKey::MaxSize, "1 MB");

        let mut sink = MockSink::default().rejecting(OptionKey::MaxAge);
        let report = overlay.apply(&mut sink);

        assert_eq!(sink.call_count(OptionKey::ToDisk), 1);
        assert_eq!(sink.call_count(OptionKey::MaxAge), 1);
        assert_eq!(sink.call_count(OptionKey::MaxSize), 1);
        assert_eq!(report.failed, vec![OptionKey::MaxAge]);

        let errors = reporter.errors();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            OverlayError::SinkRejected { key: OptionKey::MaxAge, .. }
        ));
    }

    #[test]
    fn test_parse_failure_is_reported_and_skipped() {
        let (mut overlay, reporter) = overlay_with_collector();
        overlay.set(OptionKey::MaxSize, "lots");
        overlay.set(OptionKey::Name, "startup");

        let mut sink = MockSink::default();
        let report = overlay.apply(&mut sink);

        assert_eq!(sink.calls(), vec![SinkCall::Name("startup".to_string())]);
        assert_eq!(report.failed, vec![OptionKey::MaxSize]);
        assert!(matches!(
            &reporter.errors()[0],
            OverlayError::Parse { key: OptionKey::MaxSize, value, .. } if value == "lots"
        ));
    }

    #[test]
    fn test_staged_snapshot_and_clear() {
        let mut overlay = OptionOverlay::new();
        overlay.set(OptionKey::Destination, "/tmp/a.jfr");
        overlay.set(OptionKey::ToDisk, "false");

        assert_eq!(overlay.len(), 2);
        assert_eq!(overlay.get(OptionKey::ToDisk), Some("false"));
        assert_eq!(
            overlay.staged(),
            vec![
                (OptionKey::ToDisk, "false".to_string()),
                (OptionKey::Destination, "/tmp/a.jfr".to_string()),
            ]
        );

        overlay.clear();
        assert!(overlay.is_empty());
        assert_eq!(overlay.get(OptionKey::ToDisk), None);
    }
}
