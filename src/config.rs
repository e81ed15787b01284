//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Planner server connection
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Origin serving `/api/profile` and `/api/chat`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Widget timings and thresholds
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_clock_interval")]
    pub clock_interval_ms: u64,

    /// Outside clicks close the sidebar only at or below this viewport width
    #[serde(default = "default_mobile_breakpoint")]
    pub mobile_breakpoint_px: f64,

    #[serde(default = "default_toast_visible")]
    pub toast_visible_ms: u64,

    #[serde(default = "default_toast_fade")]
    pub toast_fade_ms: u64,

    /// Width of one XP band on the progress bar
    #[serde(default = "default_xp_per_level")]
    pub xp_per_level: u32,
}

fn default_clock_interval() -> u64 {
    1000
}

fn default_mobile_breakpoint() -> f64 {
    768.0
}

fn default_toast_visible() -> u64 {
    3000
}

fn default_toast_fade() -> u64 {
    300
}

fn default_xp_per_level() -> u32 {
    500
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            clock_interval_ms: default_clock_interval(),
            mobile_breakpoint_px: default_mobile_breakpoint(),
            toast_visible_ms: default_toast_visible(),
            toast_fade_ms: default_toast_fade(),
            xp_per_level: default_xp_per_level(),
        }
    }
}

impl UiConfig {
    pub fn clock_interval(&self) -> Duration {
        Duration::from_millis(self.clock_interval_ms)
    }

    pub fn toast_visible(&self) -> Duration {
        Duration::from_millis(self.toast_visible_ms)
    }

    pub fn toast_fade(&self) -> Duration {
        Duration::from_millis(self.toast_fade_ms)
    }

    /// Time from a toast appearing to its removal
    pub fn toast_lifetime(&self) -> Duration {
        self.toast_visible() + self.toast_fade()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    #[cfg(feature = "native")]
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("study-planner").join("config.toml")),
            Some(PathBuf::from("./planner.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("PLANNER_API_URL") {
            self.api.base_url = url;
        }
        if let Ok(level) = std::env::var("PLANNER_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("PLANNER_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Study Planner Configuration
#
# Environment variables override these settings:
# - PLANNER_API_URL
# - PLANNER_LOG_LEVEL
# - PLANNER_LOG_FORMAT

[api]
# Planner server serving /api/profile and /api/chat
base_url = "http://127.0.0.1:5000"

# Request timeout in seconds
request_timeout_secs = 30

[ui]
# Clock refresh interval (ms)
clock_interval_ms = 1000

# Outside clicks close the sidebar at or below this viewport width (px)
mobile_breakpoint_px = 768

# How long a toast stays fully visible, then how long it fades out (ms)
toast_visible_ms = 3000
toast_fade_ms = 300

# XP per level; the progress bar shows progress within the current band
xp_per_level = 500

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_round_trips() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.ui, UiConfig::default());
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = Config::parse("[ui]\nxp_per_level = 1000\n").unwrap();
        assert_eq!(config.ui.xp_per_level, 1000);
        assert_eq!(config.ui.toast_visible_ms, 3000);
        assert_eq!(config.api.request_timeout_secs, 30);
    }

    #[test]
    fn test_toast_lifetime() {
        let ui = UiConfig::default();
        assert_eq!(ui.toast_lifetime(), Duration::from_millis(3300));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase_url = \"http://planner.test\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://planner.test");
    }

    #[test]
    fn test_load_errors() {
        let err = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[ui\nbroken").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
