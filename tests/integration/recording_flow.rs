//! Integration tests for starting a recording and analysing it
//!
//! Tests the flow: settings -> staged overlay -> user edits -> apply to a
//! sink, and settings -> rule filter -> selected rules.

use std::sync::Arc;
use std::time::Duration;

use vmprobe::overlay::mock::{CollectingReporter, MockSink, SinkCall};
use vmprobe::{OptionKey, OptionOverlay, OverlayError, RuleFilterCompiler, Settings};

use super::common::fixtures::rule_catalog;

const CONFIG: &str = r#"
[recording]
disk = "true"
max-age = "30 min"
max-size = "oops"

[analysis]
rule-filter = "gc, HotMethods, NoSuchRule"
"#;

#[test]
fn test_configured_recording_applies_around_bad_value() {
    let settings = Settings::from_toml_str(CONFIG).expect("config parses");
    let reporter = Arc::new(CollectingReporter::default());
    let mut overlay = OptionOverlay::with_reporter(reporter.clone());
    settings.stage_into(&mut overlay);

    let mut sink = MockSink::default();
    let report = overlay.apply(&mut sink);

    assert_eq!(
        sink.calls(),
        vec![
            SinkCall::ToDisk(true),
            SinkCall::MaxAge(Duration::from_secs(30 * 60)),
        ]
    );
    assert_eq!(report.failed, vec![OptionKey::MaxSize]);
    assert!(matches!(
        reporter.errors().as_slice(),
        [OverlayError::Parse { key: OptionKey::MaxSize, .. }]
    ));
}

#[test]
fn test_user_edits_before_second_start() {
    let settings = Settings::from_toml_str(CONFIG).unwrap();
    let reporter = Arc::new(CollectingReporter::default());
    let mut overlay = OptionOverlay::with_reporter(reporter.clone());
    settings.stage_into(&mut overlay);

    overlay.set(OptionKey::MaxSize, "64 MB");
    overlay.unset(OptionKey::ToDisk);
    overlay.set(OptionKey::DumpOnExit, "true");

    let mut sink = MockSink::default().rejecting(OptionKey::DumpOnExit);
    let report = overlay.apply(&mut sink);

    assert_eq!(sink.call_count(OptionKey::ToDisk), 0);
    assert_eq!(sink.call_count(OptionKey::MaxAge), 1);
    assert_eq!(sink.call_count(OptionKey::MaxSize), 1);
    assert_eq!(sink.call_count(OptionKey::DumpOnExit), 1);
    assert!(sink.calls().contains(&SinkCall::MaxSize(64 * 1024 * 1024)));
    assert_eq!(report.applied, vec![OptionKey::MaxAge, OptionKey::MaxSize]);
    assert_eq!(report.failed, vec![OptionKey::DumpOnExit]);
    assert_eq!(reporter.errors().len(), 1);
}

#[test]
fn test_configured_rule_filter_selects_rules() {
    let settings = Settings::from_toml_str(CONFIG).unwrap();
    let catalog = rule_catalog();
    let compiler = RuleFilterCompiler::from_catalog(&catalog);

    let filter = compiler.parse(settings.rule_filter());
    let ids: Vec<String> = filter.select(&catalog).into_iter().map(|e| e.id).collect();

    assert_eq!(ids, vec!["GcPause", "GcFrequency", "HotMethods"]);
    assert_eq!(filter.ignored_tokens(), ["NoSuchRule".to_string()]);
}

#[test]
fn test_missing_rule_filter_runs_every_rule() {
    let settings = Settings::default();
    let catalog = rule_catalog();
    let filter = RuleFilterCompiler::from_catalog(&catalog).parse(settings.rule_filter());
    assert_eq!(filter.select(&catalog).len(), catalog.len());
}
