//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{FfwrapError, FfwrapResult};

/// Environment variable that overrides [`RunnerConfig::binary`].
pub const BINARY_ENV_VAR: &str = "FFWRAP_FFMPEG";

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// How the external binary is launched.
    #[serde(default)]
    pub runner: RunnerConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Process runner settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Binary to execute. Resolved through `PATH` when relative.
    pub binary: PathBuf,

    /// Whether captured diagnostics of a failed run are also written to stderr.
    pub echo_stderr: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "ffwrap_command=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("ffmpeg"),
            echo_stderr: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl RunnerConfig {
    /// Defaults with the `FFWRAP_FFMPEG` override applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    fn apply_env(&mut self) {
        if let Ok(binary) = std::env::var(BINARY_ENV_VAR) {
            if !binary.trim().is_empty() {
                self.binary = PathBuf::from(binary);
            }
        }
    }
}

impl AppConfig {
    /// Defaults with the `FFWRAP_FFMPEG` override applied.
    pub fn from_env() -> Self {
        Self {
            runner: RunnerConfig::from_env(),
            logging: LoggingConfig::default(),
        }
    }

    /// Load config from the standard location.
    ///
    /// A missing file yields [`AppConfig::from_env`]. A file that exists but
    /// cannot be read or parsed is a [`FfwrapError::Config`] error.
    pub fn load() -> FfwrapResult<Self> {
        Self::load_or_default(&config_file_path())
    }

    fn load_or_default(path: &Path) -> FfwrapResult<Self> {
        if !path.exists() {
            return Ok(Self::from_env());
        }
        let mut config = Self::load_from(path)
            .map_err(|e| FfwrapError::config(format!("{}: {e}", path.display())))?;
        config.runner.apply_env();
        Ok(config)
    }

    /// Load config from an explicit path. No environment overrides are applied.
    pub fn load_from(path: &Path) -> FfwrapResult<Self> {
        if !path.exists() {
            return Err(FfwrapError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("ffwrap").join("config.json")
}
