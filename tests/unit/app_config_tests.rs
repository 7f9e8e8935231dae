/*!
 * Tests for configuration loading and validation
 */

use anyhow::Result;
use listenup::app_config::{Config, LogLevel};
use listenup::navigation::WatchRoute;
use std::path::PathBuf;
use std::time::Duration;
use crate::common;

/// Defaults carry the documented delays and route
#[test]
fn test_default_config_withNoFile_shouldUseStandardValues() {
    let config = Config::default();
    assert_eq!(config.timing.navigation_settle(), Duration::from_millis(1000));
    assert_eq!(config.timing.acknowledgment(), Duration::from_millis(1500));
    assert_eq!(config.navigation.route(), WatchRoute::default());
    assert_eq!(config.export.output_dir, None);
    assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Info);
    assert!(config.validate().is_ok());
}

/// A missing file is created with defaults, then read back unchanged
#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = dir.path().join("conf.json");

    let created = Config::load_or_create(&path)?;
    assert!(path.exists());
    assert_eq!(created, Config::default());

    let loaded = Config::load_or_create(&path)?;
    assert_eq!(loaded, created);
    Ok(())
}

/// Saved values survive a reload
#[test]
fn test_save_withCustomValues_shouldReloadSame() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = dir.path().join("custom.json");

    let mut config = Config::default();
    config.timing.navigation_settle_ms = 250;
    config.navigation.watch_path = "/video".to_string();
    config.navigation.video_param = "id".to_string();
    config.export.output_dir = Some(PathBuf::from("/tmp/exports"));
    config.log_level = LogLevel::Debug;
    config.save(&path)?;

    let loaded = Config::load(&path)?;
    assert_eq!(loaded, config);
    assert_eq!(loaded.navigation.route(), WatchRoute::new("/video", "id"));
    Ok(())
}

/// Malformed JSON is an error naming the file
#[test]
fn test_load_withInvalidJson_shouldFail() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json")?;

    let error = Config::load(&path).unwrap_err();
    assert!(error.to_string().contains("Failed to parse config file"));
    Ok(())
}

/// Log levels are written in lowercase
#[test]
fn test_log_level_withJson_shouldUseLowercaseNames() {
    let config: Config = serde_json::from_str(r#"{"log_level": "trace"}"#).unwrap();
    assert_eq!(config.log_level, LogLevel::Trace);
    assert!(serde_json::from_str::<Config>(r#"{"log_level": "TRACE"}"#).is_err());
}
