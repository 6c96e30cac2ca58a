mod settings;

pub use settings::{ConfigError, Settings, TomlAnalysisConfig, TomlConfig, TomlRecordingConfig};
