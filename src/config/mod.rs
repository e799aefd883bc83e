//! Engine configuration.
//!
//! Options can be embedded in a host config file and loaded from TOML:
//!
//! ```toml
//! mode = "strict"
//! failOpenOperators = false
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// How the engine reacts to malformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Degrade gracefully: dirty cells become null, unknown operators
    /// follow the fail-open policy, malformed transforms pass rows through.
    /// This is what a live editor preview wants.
    #[default]
    Lenient,
    /// Surface every degradation as a
    /// [`ValidationError`](crate::error::ValidationError).
    Strict,
}

/// Tunable engine behavior, shared by all execution stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineOptions {
    /// Lenient (default) or strict execution.
    pub mode: ExecutionMode,

    /// Whether a filter clause with an unknown operator passes rows
    /// through (the historical behavior) or rejects them. Only consulted
    /// in lenient mode; strict mode errors instead.
    pub fail_open_operators: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            mode: ExecutionMode::default(),
            fail_open_operators: true,
        }
    }
}

impl EngineOptions {
    /// Strict-mode options with defaults everywhere else.
    pub fn strict() -> Self {
        EngineOptions {
            mode: ExecutionMode::Strict,
            ..EngineOptions::default()
        }
    }

    /// Whether strict validation is active.
    pub fn is_strict(&self) -> bool {
        self.mode == ExecutionMode::Strict
    }

    /// Parse options from a TOML string.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Load options from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        Self::from_toml_str(&fs::read_to_string(path)?)
    }
}
