//! Configuration types for merge-gate.

use crate::mergeable::MergeableState;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration for merge-gate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Which checks run.
    #[serde(default)]
    pub checks: ChecksConfig,

    /// Where declaration files are looked up.
    #[serde(default)]
    pub declarations: DeclarationsConfig,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }
}

/// Check toggles. Every check is off by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecksConfig {
    /// Fail when no ownership declarations file exists at the base ref.
    #[serde(default)]
    pub require_declarations_file: bool,

    /// Fail unless the actor owns every changed file.
    #[serde(default)]
    pub require_actor_is_owner: bool,

    /// Fail unless a code owner of the changed files approved.
    #[serde(default)]
    pub require_owner_review: bool,

    /// Fail when no team declarations file exists at the base ref.
    #[serde(default)]
    pub require_team_declarations_file: bool,

    /// Fail unless every team rule is labelled and approved.
    #[serde(default)]
    pub require_team_review: bool,

    /// Fail unless at least one review approves.
    #[serde(default)]
    pub require_any_approved_review: bool,

    /// Mergeable states that may pass. Empty disables the check.
    #[serde(default)]
    pub allowed_mergeable_states: Vec<MergeableState>,
}

/// Declaration file names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationsConfig {
    /// File name of the ownership declarations.
    #[serde(default = "default_ownership_file")]
    pub ownership_file: String,

    /// File name of the team declarations.
    #[serde(default = "default_team_file")]
    pub team_file: String,
}

impl Default for DeclarationsConfig {
    fn default() -> Self {
        Self {
            ownership_file: default_ownership_file(),
            team_file: default_team_file(),
        }
    }
}

fn default_ownership_file() -> String {
    "CODEOWNERS".to_string()
}

fn default_team_file() -> String {
    "TEAMOWNERS".to_string()
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.checks, ChecksConfig::default());
        assert!(config.checks.allowed_mergeable_states.is_empty());
        assert_eq!(config.declarations.ownership_file, "CODEOWNERS");
        assert_eq!(config.declarations.team_file, "TEAMOWNERS");
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[checks]
require_declarations_file = true
require_owner_review = true
allowed_mergeable_states = ["clean", "has_hooks", "queued"]

[declarations]
team_file = "REVIEW_TEAMS"
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert!(config.checks.require_declarations_file);
        assert!(config.checks.require_owner_review);
        assert!(!config.checks.require_team_review);
        assert_eq!(
            config.checks.allowed_mergeable_states,
            vec![
                MergeableState::Clean,
                MergeableState::HasHooks,
                MergeableState::Unknown("queued".to_string()),
            ]
        );
        assert_eq!(config.declarations.ownership_file, "CODEOWNERS");
        assert_eq!(config.declarations.team_file, "REVIEW_TEAMS");
    }

    #[test]
    fn test_parse_rejects_wrong_types() {
        let result = Config::parse("[checks]\nrequire_owner_review = \"yes\"\n");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
