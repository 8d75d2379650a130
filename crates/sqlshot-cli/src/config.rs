// crates/sqlshot-cli/src/config.rs
// ============================================================================
// Module: CLI Configuration
// Description: Optional TOML defaults for row formatting options.
// Purpose: Load caller-side defaults with strict, fail-closed input guards.
// Dependencies: serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Automation callers can keep their formatting defaults (column separator,
//! NULL substitute, quoting) in a small TOML file instead of repeating flags.
//! Loading is strict: overlong paths, oversized files, non-UTF-8 content,
//! and unknown keys are all rejected. Absent config is not an error; the
//! defaults are simply all unset, and resolution in the core reports which
//! field is still needed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum accepted config file size in bytes.
pub const MAX_CONFIG_BYTES: usize = 1_048_576;
/// Maximum total config path length.
const MAX_PATH_LENGTH: usize = 4096;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config path exceeds the total length limit.
    #[error("config path exceeds max length")]
    PathTooLong,
    /// Config path contains an overlong component.
    #[error("config path component too long")]
    PathComponentTooLong,
    /// Config file exceeds the size limit.
    #[error("config file exceeds size limit")]
    FileTooLarge,
    /// Config file is not valid UTF-8.
    #[error("config file must be utf-8")]
    NotUtf8,
    /// Config file could not be read.
    #[error("config io error: {0}")]
    Io(String),
    /// Config file could not be parsed as TOML.
    #[error("config parse error: {0}")]
    Parse(String),
}

// ============================================================================
// SECTION: Config Model
// ============================================================================

/// Formatting defaults applied when the matching flag is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormatDefaults {
    /// Default column separator.
    #[serde(default)]
    pub column_separator: Option<String>,
    /// Default NULL substitute.
    #[serde(default)]
    pub null_value: Option<String>,
    /// Default quoting switch.
    #[serde(default)]
    pub quote_strings: Option<bool>,
}

/// Root CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Row formatting defaults.
    #[serde(default)]
    pub format: FormatDefaults,
}

impl CliConfig {
    /// Loads configuration from an optional path.
    ///
    /// `None` yields the empty defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the path fails validation or the file
    /// cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        validate_config_path(path)?;
        let bytes = fs::read(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_BYTES {
            return Err(ConfigError::FileTooLarge);
        }
        let text = str::from_utf8(&bytes).map_err(|_| ConfigError::NotUtf8)?;
        toml::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Validates config paths against the length limits.
fn validate_config_path(path: &Path) -> Result<(), ConfigError> {
    if path.display().to_string().len() > MAX_PATH_LENGTH {
        return Err(ConfigError::PathTooLong);
    }
    for component in path.components() {
        if component.as_os_str().to_string_lossy().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::PathComponentTooLong);
        }
    }
    Ok(())
}
