//! Configuration loading, validation, and management for Parley.
//!
//! Loads configuration from `~/.parley/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.parley/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Conversation history settings
    #[serde(default)]
    pub context: ContextConfig,

    /// Deferred queue settings
    #[serde(default)]
    pub queue: QueueConfig,

    /// Per-session storage settings
    #[serde(default)]
    pub sessions: SessionsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    /// How many turns the context window keeps before evicting the oldest
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,
}

fn default_max_turns() -> usize {
    10
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            max_turns: default_max_turns(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Storage backend: "file" or "memory"
    #[serde(default = "default_queue_backend")]
    pub backend: String,

    /// Where the file backend keeps the queue document
    #[serde(default = "default_queue_path")]
    pub path: PathBuf,

    /// Inputs with fewer whitespace tokens than this are deferred
    #[serde(default = "default_defer_below_tokens")]
    pub defer_below_tokens: usize,
}

fn default_queue_backend() -> String {
    "file".into()
}
fn default_queue_path() -> PathBuf {
    AppConfig::config_dir().join("queue.json")
}
fn default_defer_below_tokens() -> usize {
    3
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            backend: default_queue_backend(),
            path: default_queue_path(),
            defer_below_tokens: default_defer_below_tokens(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionsConfig {
    /// Directory holding one queue document per named session
    #[serde(default = "default_sessions_dir")]
    pub dir: PathBuf,
}

fn default_sessions_dir() -> PathBuf {
    AppConfig::config_dir().join("sessions")
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            dir: default_sessions_dir(),
        }
    }
}

const QUEUE_BACKENDS: &[&str] = &["file", "memory"];

impl AppConfig {
    /// Load configuration from the default path (~/.parley/config.toml).
    ///
    /// Environment overrides (highest priority):
    /// - `PARLEY_QUEUE_PATH`
    /// - `PARLEY_MAX_TURNS`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `PARLEY_QUEUE_PATH` and `PARLEY_MAX_TURNS` from `lookup`.
    ///
    /// Does not validate; callers run [`AppConfig::validate`] afterwards.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("PARLEY_QUEUE_PATH") {
            self.queue.path = PathBuf::from(path);
        }

        if let Some(raw) = lookup("PARLEY_MAX_TURNS") {
            self.context.max_turns = raw.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "PARLEY_MAX_TURNS must be a positive integer, got '{raw}'"
                ))
            })?;
        }

        Ok(())
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".parley")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.context.max_turns == 0 {
            return Err(ConfigError::ValidationError(
                "context.max_turns must be at least 1".into(),
            ));
        }

        if self.queue.defer_below_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "queue.defer_below_tokens must be at least 1".into(),
            ));
        }

        if !QUEUE_BACKENDS.contains(&self.queue.backend.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "queue.backend must be one of {QUEUE_BACKENDS:?}, got '{}'",
                self.queue.backend
            )));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for `config init`).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            context: ContextConfig::default(),
            queue: QueueConfig::default(),
            sessions: SessionsConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
