use std::path::PathBuf;

use proptest::prelude::*;
use tabsight_config::*;

fn manager_in(dir: &tempfile::TempDir, prefix: &str) -> ConfigManager {
    ConfigManager::with_path(dir.path().join("config.toml")).with_env_prefix(prefix)
}

#[test]
fn test_app_config_default() {
    let config = AppConfig::default();
    assert_eq!(config.profiler.numeric_ratio, 0.5);
    assert_eq!(config.profiler.categorical_max_unique, 20);
    assert_eq!(config.analysis.histogram_bins, 25);
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.output.format, OutputFormat::Text);
    assert_eq!(config.output.preview_rows, 10);
    assert!(config.output.color);
}

#[test]
fn test_config_validation() {
    let manager = ConfigManager::with_path(PathBuf::from("unused.toml"));
    let mut config = AppConfig::default();
    assert!(manager.validate_config(&config).is_ok());

    config.profiler.numeric_ratio = 0.0;
    assert!(manager.validate_config(&config).is_err());

    config = AppConfig::default();
    config.profiler.datetime_ratio = 1.5;
    assert!(manager.validate_config(&config).is_err());

    config = AppConfig::default();
    config.analysis.histogram_bins = 0;
    assert!(manager.validate_config(&config).is_err());

    config = AppConfig::default();
    config.profiler.categorical_max_unique = 0;
    assert!(manager.validate_config(&config).is_err());

    config = AppConfig::default();
    config.logging.level = "loud".to_string();
    let err = manager.validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("loud"));
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = manager_in(&dir, "TABSIGHT_TEST_MISSING");
    assert_eq!(manager.load_config().unwrap(), AppConfig::default());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[profiler]\nnumeric_ratio = 0.8\n\n[output]\nformat = \"json\"\n",
    )
    .unwrap();

    let mut manager = manager_in(&dir, "TABSIGHT_TEST_PARTIAL");
    let config = manager.load_config().unwrap();
    assert_eq!(config.profiler.numeric_ratio, 0.8);
    assert_eq!(config.profiler.datetime_ratio, 0.3);
    assert_eq!(config.output.format, OutputFormat::Json);
    assert_eq!(config.output.preview_rows, 10);
}

#[test]
fn test_environment_overrides_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[analysis]\nhistogram_bins = 10\n").unwrap();
    std::env::set_var("TABSIGHT_TEST_ENV_ANALYSIS__HISTOGRAM_BINS", "40");

    let mut manager = manager_in(&dir, "TABSIGHT_TEST_ENV");
    let config = manager.load_config().unwrap();
    std::env::remove_var("TABSIGHT_TEST_ENV_ANALYSIS__HISTOGRAM_BINS");

    assert_eq!(config.analysis.histogram_bins, 40);
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = ConfigManager::with_path(dir.path().join("nested").join("config.toml"))
        .with_env_prefix("TABSIGHT_TEST_SAVE");

    let mut config = AppConfig::default();
    config.logging.level = "debug".to_string();
    config.output.color = false;
    manager.save_config(&config).unwrap();

    assert!(manager.config_path().exists());
    assert_eq!(manager.load_config().unwrap(), config);
}

#[test]
fn test_load_validated_rejects_bad_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[analysis]\nhistogram_bins = 0\n").unwrap();
    let mut manager = manager_in(&dir, "TABSIGHT_TEST_INVALID");
    assert!(matches!(
        manager.load_validated(),
        Err(ConfigError::Validation(_))
    ));
}

proptest! {
    /// Property: every ratio inside (0, 1] passes validation
    #[test]
    fn prop_ratios_in_range_are_valid(ratio in 0.001f64..=1.0) {
        let manager = ConfigManager::with_path(PathBuf::from("unused.toml"));
        let mut config = AppConfig::default();
        config.profiler.numeric_ratio = ratio;
        config.profiler.datetime_ratio = ratio;
        config.profiler.categorical_unique_ratio = ratio;
        prop_assert!(manager.validate_config(&config).is_ok());
    }

    /// Property: ratios above one are always rejected
    #[test]
    fn prop_ratios_above_one_are_invalid(ratio in 1.001f64..100.0) {
        let manager = ConfigManager::with_path(PathBuf::from("unused.toml"));
        let mut config = AppConfig::default();
        config.profiler.numeric_ratio = ratio;
        prop_assert!(manager.validate_config(&config).is_err());
    }
}
