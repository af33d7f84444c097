//! Calculator configuration.
//!
//! Glyph tables are compile-time constants shared by every component.
//! Display limits live in [`DisplayConfig`] and can be overridden from
//! `~/.config/zcalc/config.toml`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Binary operators as they appear in the expression text.
pub const OPERATORS: [char; 4] = ['+', '-', '×', '÷'];

/// Non-digit, non-operator characters an expression may end with.
pub const SPECIAL_CHARS: [char; 4] = ['%', '.', ')', '('];

/// Display value meaning "show the reset state".
pub const INITIAL_DISPLAY: &str = "0";

/// History line contents when there is nothing to show.
pub const EMPTY_HISTORY: &str = "";

/// Result shown when an expression cannot be evaluated.
pub const ERROR_DISPLAY: &str = "Error";

/// Check if a character is one of the display operators.
pub fn is_operator(c: char) -> bool {
    OPERATORS.contains(&c)
}

/// Limits applied when formatting a result for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Longest plain rendering before falling back to scientific notation.
    pub max_display_length: usize,
    /// Mantissa digits after the point in scientific notation.
    pub scientific_precision: usize,
    /// Fixed-point digits kept before trailing zeros are stripped.
    pub decimal_places: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_display_length: 12,
            scientific_precision: 6,
            decimal_places: 10,
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
}

impl Config {
    /// Default location of the config file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("zcalc")
            .join("config.toml")
    }

    /// Load from the default location, falling back to defaults if the file
    /// does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&path)
    }

    /// Load from an explicit path. The file must exist.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        tracing::debug!(?config, "Loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let config = DisplayConfig::default();
        assert_eq!(config.max_display_length, 12);
        assert_eq!(config.scientific_precision, 6);
        assert_eq!(config.decimal_places, 10);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml("[display]\nmax_display_length = 16\n").unwrap();
        assert_eq!(config.display.max_display_length, 16);
        assert_eq!(config.display.scientific_precision, 6);
    }

    #[test]
    fn test_empty_toml() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_malformed_toml_rejected() {
        assert!(Config::from_toml("[display]\nmax_display_length = \"wide\"").is_err());
    }

    #[test]
    fn test_is_operator() {
        assert!(is_operator('×'));
        assert!(is_operator('-'));
        assert!(!is_operator('*'));
        assert!(!is_operator('%'));
    }
}
