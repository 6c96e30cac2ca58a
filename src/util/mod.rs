//! Utility modules

pub mod paths;

pub use paths::{config_path, config_path_in, default_data_dir};
