//! Configuration manager implementation
//!
//! Sources are layered lowest to highest: built-in defaults, the TOML file,
//! then environment variables such as `TABSIGHT_OUTPUT__FORMAT=json`.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use tracing::debug;

use crate::{
    error::{ConfigError, Result},
    types::{AppConfig, ConfigManager as ConfigManagerTrait, LOG_LEVELS},
};

/// Configuration manager
pub struct ConfigManager {
    /// Configuration file path
    config_path: PathBuf,
    /// Environment prefix
    env_prefix: String,
}

impl ConfigManager {
    /// Create a new configuration manager
    pub fn new() -> Self {
        Self::with_path(Self::default_config_path())
    }

    /// Create with custom config path
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_path: path,
            env_prefix: "TABSIGHT".to_string(),
        }
    }

    /// Replace the environment variable prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load, then validate
    pub fn load_validated(&mut self) -> Result<AppConfig> {
        let config = self.load_config()?;
        self.validate_config(&config)?;
        Ok(config)
    }

    /// Get default config path
    fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tabsight")
            .join("config.toml")
    }
}

fn check_ratio(name: &str, value: f64) -> Result<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "{} must be within (0, 1], got {}",
            name, value
        )))
    }
}

impl ConfigManagerTrait for ConfigManager {
    fn load_config(&mut self) -> Result<AppConfig> {
        debug!(
            path = %self.config_path.display(),
            prefix = %self.env_prefix,
            "loading configuration"
        );
        let builder = Config::builder()
            .add_source(File::from(self.config_path.clone()).required(false))
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;
        Ok(app_config)
    }

    fn save_config(&self, config: &AppConfig) -> Result<()> {
        let toml = toml::to_string(config)?;
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.config_path, toml)?;
        Ok(())
    }

    fn validate_config(&self, config: &AppConfig) -> Result<()> {
        check_ratio("profiler.numeric_ratio", config.profiler.numeric_ratio)?;
        check_ratio("profiler.datetime_ratio", config.profiler.datetime_ratio)?;
        check_ratio(
            "profiler.categorical_unique_ratio",
            config.profiler.categorical_unique_ratio,
        )?;
        if config.profiler.categorical_max_unique == 0 {
            return Err(ConfigError::Validation(
                "profiler.categorical_max_unique must be greater than 0".to_string(),
            ));
        }
        if config.analysis.histogram_bins == 0 {
            return Err(ConfigError::Validation(
                "analysis.histogram_bins must be greater than 0".to_string(),
            ));
        }
        let level = config.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "Unknown log level '{}'",
                config.logging.level
            )));
        }
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
