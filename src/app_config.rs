use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::navigation::WatchRoute;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Timer settings
    #[serde(default)]
    pub timing: TimingConfig,

    /// Watch-page recognition
    #[serde(default)]
    pub navigation: NavigationConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Timer settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TimingConfig {
    /// Wait between a navigation signal and re-evaluating the page, in milliseconds
    #[serde(default = "default_navigation_settle_ms")]
    pub navigation_settle_ms: u64,

    /// How long copy acknowledgments and highlights stay visible, in milliseconds
    #[serde(default = "default_acknowledgment_ms")]
    pub acknowledgment_ms: u64,
}

impl TimingConfig {
    pub fn navigation_settle(&self) -> Duration {
        Duration::from_millis(self.navigation_settle_ms)
    }

    pub fn acknowledgment(&self) -> Duration {
        Duration::from_millis(self.acknowledgment_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            navigation_settle_ms: default_navigation_settle_ms(),
            acknowledgment_ms: default_acknowledgment_ms(),
        }
    }
}

/// Watch-page recognition settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NavigationConfig {
    /// Path prefix of video pages
    #[serde(default = "default_watch_path")]
    pub watch_path: String,

    /// Query parameter holding the video id
    #[serde(default = "default_video_param")]
    pub video_param: String,
}

impl NavigationConfig {
    pub fn route(&self) -> WatchRoute {
        WatchRoute::new(self.watch_path.clone(), self.video_param.clone())
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            watch_path: default_watch_path(),
            video_param: default_video_param(),
        }
    }
}

/// Export settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ExportConfig {
    /// Directory receiving SRT/TXT downloads; the user's download folder when unset
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl ExportConfig {
    // @returns: Configured directory, else the download dir, else the working directory
    pub fn resolved_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_navigation_settle_ms() -> u64 {
    1000 // let the page finish its own DOM update
}

fn default_acknowledgment_ms() -> u64 {
    1500
}

fn default_watch_path() -> String {
    "/watch".to_string()
}

fn default_video_param() -> String {
    "v".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.navigation.video_param.trim().is_empty() {
            return Err(anyhow!("navigation.video_param must not be empty"));
        }

        if !self.navigation.watch_path.starts_with('/') {
            return Err(anyhow!(
                "navigation.watch_path must start with '/': {}",
                self.navigation.watch_path
            ));
        }

        if self.timing.acknowledgment_ms == 0 {
            return Err(anyhow!("timing.acknowledgment_ms must be greater than zero"));
        }

        Ok(())
    }

    /// Load a JSON config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load the config file, writing a default one first if it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the config as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {:?}", path))?;

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            timing: TimingConfig::default(),
            navigation: NavigationConfig::default(),
            export: ExportConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
