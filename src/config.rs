//! Configuration management for Keystroke Features
//!
//! Configuration is read from a platform-specific TOML file and falls back
//! to defaults when the file does not exist.
//!
//! ## Config File Locations
//!
//! | Platform | Path |
//! |----------|------|
//! | Linux | `~/.config/keystroke-features/config.toml` |
//! | macOS | `~/Library/Application Support/keystroke-features/config.toml` |
//! | Windows | `%APPDATA%\keystroke-features\config.toml` |
//!
//! ## Example
//!
//! ```no_run
//! use keystroke_features::Config;
//!
//! let mut config = Config::load().unwrap_or_default();
//! config.engine.display_window = 10;
//! config.save().expect("Failed to save config");
//! ```

use crate::features::DEFAULT_DISPLAY_WINDOW;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const APP_DIR: &str = "keystroke-features";

/// Error type for configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// Returns the path to the config file.
///
/// Creates the config directory if it doesn't exist.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    let app_dir = config_dir.join(APP_DIR);

    if !app_dir.exists() {
        fs::create_dir_all(&app_dir)?;
    }

    Ok(app_dir.join("config.toml"))
}

/// Default location of the log file, if the platform has a data directory
pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(APP_DIR).join("keystroke-features.log"))
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Feature engine settings
    #[serde(default)]
    pub engine: EngineConfig,
    /// Keyboard listener settings
    #[serde(default)]
    pub listener: ListenerConfig,
    /// UI settings
    #[serde(default)]
    pub ui: UiConfig,
    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Feature engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Recent samples per metric shown in snapshots
    pub display_window: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            display_window: DEFAULT_DISPLAY_WINDOW,
        }
    }
}

/// Keyboard listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenerConfig {
    /// Delay between keyboard state polls (in milliseconds)
    pub poll_interval_ms: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self { poll_interval_ms: 1 }
    }
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Refresh rate for UI updates (in Hz)
    pub refresh_rate_hz: u32,
    /// Color theme (dark/light)
    pub theme: Theme,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_hz: 30,
            theme: Theme::Dark,
        }
    }
}

/// Color theme options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is not set
    pub level: String,
    /// Log file; the platform data directory is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Configured log file, or the default location
    pub fn resolved_file(&self) -> Option<PathBuf> {
        self.file.clone().or_else(default_log_path)
    }
}

impl Config {
    /// Load configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default config file.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = config_path()?;
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Reject settings the application cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.display_window == 0 {
            return Err(ConfigError::Invalid(
                "engine.display_window must be at least 1".to_string(),
            ));
        }
        if self.ui.refresh_rate_hz == 0 {
            return Err(ConfigError::Invalid(
                "ui.refresh_rate_hz must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Get UI refresh interval as Duration
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.ui.refresh_rate_hz.max(1) as u64)
    }

    /// Get keyboard poll interval as Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.listener.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_config_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!(
            "keystroke-features-test-{}-{}.toml",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn config_default_values() {
        let config = Config::default();
        assert_eq!(config.engine.display_window, 5);
        assert_eq!(config.listener.poll_interval_ms, 1);
        assert_eq!(config.ui.refresh_rate_hz, 30);
        assert_eq!(config.ui.theme, Theme::Dark);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn config_refresh_interval() {
        let mut config = Config::default();
        config.ui.refresh_rate_hz = 60;
        assert_eq!(config.refresh_interval().as_micros(), 16666);
    }

    #[test]
    fn config_poll_interval() {
        let config = Config::default();
        assert_eq!(config.poll_interval(), Duration::from_millis(1));
    }

    #[test]
    fn config_save_and_load_roundtrip() {
        let path = temp_config_path("roundtrip");

        let mut config = Config::default();
        config.engine.display_window = 8;
        config.ui.theme = Theme::Light;
        config.logging.file = Some(PathBuf::from("/tmp/keys.log"));

        config.save_to(&path).expect("Failed to save config");
        let loaded = Config::load_from(&path).expect("Failed to load config");

        assert_eq!(loaded.engine.display_window, 8);
        assert_eq!(loaded.ui.theme, Theme::Light);
        assert_eq!(loaded.logging.file, Some(PathBuf::from("/tmp/keys.log")));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn config_load_missing_file_is_io_error() {
        let result = Config::load_from(Path::new("/nonexistent/path/config.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn config_partial_file_uses_defaults() {
        let toml_str = r#"
[ui]
refresh_rate_hz = 144
theme = "Light"
"#;
        let config: Config = toml::from_str(toml_str).expect("Failed to deserialize");

        assert_eq!(config.ui.refresh_rate_hz, 144);
        assert_eq!(config.ui.theme, Theme::Light);
        assert_eq!(config.engine.display_window, 5);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn config_serializes_to_toml() {
        let toml_str = toml::to_string_pretty(&Config::default()).expect("Failed to serialize");

        assert!(toml_str.contains("[engine]"));
        assert!(toml_str.contains("[listener]"));
        assert!(toml_str.contains("[ui]"));
        assert!(toml_str.contains("[logging]"));
        assert!(toml_str.contains("display_window = 5"));
        assert!(!toml_str.contains("file ="));
    }

    #[test]
    fn config_rejects_zero_window() {
        let path = temp_config_path("zero-window");
        fs::write(&path, "[engine]\ndisplay_window = 0\n").expect("Failed to write config");

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn config_rejects_zero_refresh_rate() {
        let mut config = Config::default();
        config.ui.refresh_rate_hz = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_parse_error_is_reported() {
        let path = temp_config_path("garbage");
        fs::write(&path, "[engine\ndisplay_window = ").expect("Failed to write config");

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::NoConfigDir;
        assert_eq!(err.to_string(), "Could not determine config directory");

        let io_err = ConfigError::Io(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        assert!(io_err.to_string().contains("IO error"));
    }

    #[test]
    fn logging_file_override() {
        let mut logging = LoggingConfig::default();
        logging.file = Some(PathBuf::from("custom.log"));
        assert_eq!(logging.resolved_file(), Some(PathBuf::from("custom.log")));
    }
}
