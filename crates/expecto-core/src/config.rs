//! Configuration for the expectation adapter.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// File looked up by [`load_config`].
pub const CONFIG_FILE_NAME: &str = "expecto.config.yaml";

/// Errors that can occur during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yml::Error),
    #[error("max-message-chars must be greater than zero")]
    ZeroMessageLimit,
}

/// Adapter settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpectConfig {
    /// Longest failure message forwarded to the error logger, in characters.
    /// Longer messages are truncated. Unset by default: messages are
    /// forwarded whole.
    #[serde(
        rename = "max-message-chars",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub max_message_chars: Option<usize>,

    /// Emit a trace event for passing expectations (default: false).
    #[serde(rename = "log-successes", default)]
    pub log_successes: bool,
}

impl ExpectConfig {
    /// Apply the configured limit, if any, to a rendered message.
    #[must_use]
    pub fn limit_message(&self, message: String) -> String {
        match self.max_message_chars {
            Some(max) => truncate_utf8(&message, max),
            None => message,
        }
    }
}

/// Load adapter configuration from `expecto.config.yaml` in `dir`.
///
/// If the file doesn't exist, returns default configuration.
///
/// # Errors
/// Returns an error if:
/// - The file exists but cannot be read
/// - The YAML is invalid
/// - `max-message-chars` is zero
pub fn load_config(dir: &Path) -> Result<ExpectConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    let config = if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        serde_yml::from_str(&content)?
    } else {
        ExpectConfig::default()
    };

    validate_config(&config)?;
    Ok(config)
}

const fn validate_config(config: &ExpectConfig) -> Result<(), ConfigError> {
    if matches!(config.max_message_chars, Some(0)) {
        return Err(ConfigError::ZeroMessageLimit);
    }
    Ok(())
}

/// Caller-supplied values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub max_message_chars: Option<usize>,
    pub log_successes: Option<bool>,
}

/// Apply overrides to a configuration.
///
/// # Errors
/// Returns `ConfigError::ZeroMessageLimit` if the result is invalid.
pub fn apply_overrides(
    mut config: ExpectConfig,
    overrides: &ConfigOverrides,
) -> Result<ExpectConfig, ConfigError> {
    if let Some(max) = overrides.max_message_chars {
        config.max_message_chars = Some(max);
    }
    if let Some(log) = overrides.log_successes {
        config.log_successes = log;
    }
    validate_config(&config)?;
    Ok(config)
}

/// Truncate at a character boundary, marking the cut.
#[must_use]
pub fn truncate_utf8(s: &str, max_chars: usize) -> String {
    let mut chars = s.chars();
    let truncated: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{truncated}... [truncated]")
    } else {
        truncated
    }
}
