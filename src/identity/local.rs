//! Metrics source for the current process

use std::sync::OnceLock;

use super::attributes::{InputArguments, RuntimeAttributes};
use super::error::IdentityError;

/// Supplies the identity attribute tuple of a runtime
pub trait RuntimeMetricsSource {
    fn runtime_attributes(&self) -> Result<RuntimeAttributes, IdentityError>;
}

impl RuntimeMetricsSource for RuntimeAttributes {
    fn runtime_attributes(&self) -> Result<RuntimeAttributes, IdentityError> {
        Ok(self.clone())
    }
}

/// The process this crate runs in
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalRuntime;

#[cfg(target_os = "macos")]
const LIBRARY_PATH_VAR: &str = "DYLD_LIBRARY_PATH";
#[cfg(windows)]
const LIBRARY_PATH_VAR: &str = "PATH";
#[cfg(not(any(target_os = "macos", windows)))]
const LIBRARY_PATH_VAR: &str = "LD_LIBRARY_PATH";

/// Start time is pinned the first time the local runtime is asked for it
fn start_time_ms() -> i64 {
    static START: OnceLock<i64> = OnceLock::new();
    *START.get_or_init(|| chrono::Utc::now().timestamp_millis())
}

fn host_name() -> String {
    std::env::var("HOSTNAME")
        .or_else(|_| std::env::var("COMPUTERNAME"))
        .ok()
        .filter(|h| !h.trim().is_empty())
        .unwrap_or_else(|| "localhost".to_string())
}

impl RuntimeMetricsSource for LocalRuntime {
    fn runtime_attributes(&self) -> Result<RuntimeAttributes, IdentityError> {
        let exe = std::env::current_exe()
            .map_err(|e| IdentityError::MetricsUnavailable(format!("current executable: {e}")))?;

        Ok(RuntimeAttributes {
            class_path: exe.display().to_string(),
            name: format!("{}@{}", std::process::id(), host_name()),
            input_arguments: InputArguments::Strings(std::env::args().skip(1).collect()),
            library_path: std::env::var(LIBRARY_PATH_VAR).unwrap_or_default(),
            vm_vendor: env!("CARGO_PKG_NAME").to_string(),
            vm_version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: start_time_ms(),
        })
    }
}
