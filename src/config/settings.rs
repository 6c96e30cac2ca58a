use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::overlay::{OptionKey, OptionOverlay};
use crate::util::paths::{config_path, config_path_in};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid recording option: {0}")]
    InvalidOption(String),
}

/// Session settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Raw recording option values, in key order
    pub recording: Vec<(OptionKey, String)>,
    /// Raw rule filter for analysis runs
    pub rule_filter: Option<String>,
}

/// TOML representation of the `[recording]` table.
///
/// Values stay raw strings; they are parsed when the overlay is applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TomlRecordingConfig {
    pub disk: Option<String>,
    pub max_age: Option<String>,
    pub max_size: Option<String>,
    pub name: Option<String>,
    pub duration: Option<String>,
    pub destination: Option<String>,
    pub dump_on_exit: Option<String>,
}

/// TOML representation of the `[analysis]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TomlAnalysisConfig {
    pub rule_filter: Option<String>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub recording: Option<TomlRecordingConfig>,
    pub analysis: Option<TomlAnalysisConfig>,
}

impl TomlRecordingConfig {
    fn into_options(self) -> Vec<(OptionKey, String)> {
        [
            (OptionKey::ToDisk, self.disk),
            (OptionKey::MaxAge, self.max_age),
            (OptionKey::MaxSize, self.max_size),
            (OptionKey::Name, self.name),
            (OptionKey::Duration, self.duration),
            (OptionKey::Destination, self.destination),
            (OptionKey::DumpOnExit, self.dump_on_exit),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
    }
}

impl Settings {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let toml_config: TomlConfig = toml::from_str(contents)?;
        Ok(Self::from_toml_config(toml_config))
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Load `~/.vmprobe/config.toml`, falling back to defaults when the file
    /// is missing or unreadable
    pub fn load() -> Self {
        Self::load_or_default(&config_path())
    }

    /// Load `config.toml` from `dir`, with the same fallback as [`load`](Self::load)
    pub fn load_in(dir: &Path) -> Self {
        Self::load_or_default(&config_path_in(dir))
    }

    /// Load `path`; a missing file yields defaults silently, a bad one yields
    /// defaults with a warning
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match Self::load_from_path(path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Ignoring unreadable config file"
                );
                Self::default()
            }
        }
    }

    fn from_toml_config(toml_config: TomlConfig) -> Self {
        let mut settings = Self::default();

        if let Some(recording) = toml_config.recording {
            settings.recording = recording.into_options();
        }

        if let Some(analysis) = toml_config.analysis {
            settings.rule_filter = analysis.rule_filter;
        }

        settings
    }

    /// Add a recording option by its external name (`maxAge`, `max-age`, ...)
    pub fn set_recording_option(&mut self, name: &str, raw: &str) -> Result<(), ConfigError> {
        let key: OptionKey = name.parse().map_err(ConfigError::InvalidOption)?;
        self.recording.retain(|(k, _)| *k != key);
        self.recording.push((key, raw.to_string()));
        self.recording.sort_by_key(|(k, _)| *k);
        Ok(())
    }

    /// Stage every configured recording option into `overlay`
    pub fn stage_into(&self, overlay: &mut OptionOverlay) {
        for (key, raw) in &self.recording {
            overlay.set(*key, raw.clone());
        }
    }

    /// The configured rule filter, empty when none is set
    pub fn rule_filter(&self) -> &str {
        self.rule_filter.as_deref().unwrap_or("")
    }
}
