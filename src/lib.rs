//! Session-state building blocks for a runtime-monitoring agent.
//!
//! - [`overlay`]: staged recording options applied key by key to a sink
//! - [`store`]: family-scoped in-memory cache for connection-lifetime values
//! - [`identity`]: stable identity of a monitored runtime across reconnects
//! - [`filter`]: rule filter compilation over a rule catalog
//! - [`config`]: TOML settings that seed the above

pub mod config;
pub mod filter;
pub mod identity;
pub mod overlay;
pub mod store;
pub mod util;

pub use config::{ConfigError, Settings};
pub use filter::{RuleCatalog, RuleEntry, RuleFilter, RuleFilterCompiler, StaticCatalog};
pub use identity::{
    ConnectionIdentity, IdentityError, InputArguments, LocalRuntime, RuntimeAttributes,
    RuntimeMetricsSource,
};
pub use overlay::{
    ApplyReport, DiagnosticReporter, OptionKey, OptionOverlay, OverlayError, RecordingSink,
    SinkError, TracingReporter,
};
pub use store::{ScopedStore, StoreKey, StoreValue};
