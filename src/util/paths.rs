//! Where vmprobe looks for its files

use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// `~/.vmprobe`, or `./.vmprobe` when there is no home directory
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".vmprobe"))
        .unwrap_or_else(|| PathBuf::from(".vmprobe"))
}

/// Config file inside `dir`
pub fn config_path_in(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}

/// `~/.vmprobe/config.toml`
pub fn config_path() -> PathBuf {
    config_path_in(&default_data_dir())
}
