use crate::changesets::DEFAULT_CHANGESET_DIR;
use crate::error::{ChangesetCheckError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILE: &str = "changeset-check.toml";

/// Represents the complete configuration for changeset-check.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Changeset directory, relative to the repository root
    #[serde(default = "default_changeset_dir")]
    pub changeset_dir: String,

    #[serde(default)]
    pub summary: SummaryConfig,
}

fn default_changeset_dir() -> String {
    DEFAULT_CHANGESET_DIR.to_string()
}

fn default_heading() -> String {
    "Changed packages".to_string()
}

fn default_missing_changeset_label() -> String {
    "❌ (No changeset)".to_string()
}

fn default_true() -> bool {
    true
}

/// Configuration of the run summary table.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SummaryConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_heading")]
    pub heading: String,

    /// Version cell for packages without a changeset
    #[serde(default = "default_missing_changeset_label")]
    pub missing_changeset_label: String,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        SummaryConfig {
            enabled: true,
            heading: default_heading(),
            missing_changeset_label: default_missing_changeset_label(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            changeset_dir: default_changeset_dir(),
            summary: SummaryConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `changeset-check.toml` in current directory
/// 3. `changeset-check.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE).exists() {
        fs::read_to_string(CONFIG_FILE)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(CONFIG_FILE);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parse configuration from TOML text
pub fn parse_config(config_str: &str) -> Result<Config> {
    toml::from_str(config_str).map_err(|e| ChangesetCheckError::config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.changeset_dir, ".changeset");
        assert!(config.summary.enabled);
        assert_eq!(config.summary.heading, "Changed packages");
        assert_eq!(config.summary.missing_changeset_label, "❌ (No changeset)");
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_summary_section() {
        let config = parse_config("[summary]\nenabled = false\n").unwrap();
        assert!(!config.summary.enabled);
        assert_eq!(config.summary.heading, "Changed packages");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = parse_config("changeset_dir = [").unwrap_err();
        assert!(matches!(err, ChangesetCheckError::Config(_)));
    }
}
