//! Tabsight Configuration Management
//!
//! Layered settings for the profiler thresholds, result construction,
//! logging and output, loaded from an optional TOML file and `TABSIGHT_*`
//! environment variables.

pub mod error;
pub mod manager;
pub mod types;

pub use error::{ConfigError, Result};
pub use manager::ConfigManager;
pub use types::{
    AppConfig, ConfigManager as ConfigManagerTrait, LoggingConfig, OutputConfig, OutputFormat,
};
