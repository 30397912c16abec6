//! Locating and loading the gate configuration.
//!
//! Priority, highest first:
//!
//! 1. `--config` flag
//! 2. `merge-gate.toml` or `.merge-gate.toml` in the working directory
//! 3. `config.toml` in `$MERGE_GATE_CONFIG_DIR`, else `~/.merge-gate/`
//! 4. built-in defaults (every check off)

use anyhow::{Context, Result};
use merge_gate_core::Config;
use std::path::{Path, PathBuf};

/// Where the configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found in the working directory.
    Project(PathBuf),
    /// Found in the user's config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Returns the file path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Loads the configuration this source points at.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            tracing::debug!("No config file found, all checks disabled");
            return Ok(Config::default());
        };
        if matches!(self, Self::Global(_)) {
            tracing::info!("Using global config: {}", path.display());
        }
        Config::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

const PROJECT_CONFIG_NAMES: &[&str] = &["merge-gate.toml", ".merge-gate.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration source for `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_in(project_dir, explicit, global_config_dir().as_deref())
}

fn resolve_in(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<&Path>,
) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }

    if let Some(found) = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file())
    {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    match global_dir.map(|dir| dir.join(GLOBAL_CONFIG_NAME)) {
        Some(candidate) if candidate.is_file() => {
            tracing::debug!("Found global config: {}", candidate.display());
            ConfigSource::Global(candidate)
        }
        _ => ConfigSource::Default,
    }
}

/// Returns the user's config directory.
///
/// `$MERGE_GATE_CONFIG_DIR` wins over `~/.merge-gate/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("MERGE_GATE_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".merge-gate"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_wins_and_is_not_checked() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("merge-gate.toml"), "").unwrap();

        let result = resolve_in(project.path(), Some(Path::new("/nonexistent.toml")), None);
        assert_eq!(
            result,
            ConfigSource::Explicit(PathBuf::from("/nonexistent.toml"))
        );
        assert!(result.load().is_err());
    }

    #[test]
    fn plain_name_preferred_over_dot_prefix() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("merge-gate.toml"), "").unwrap();
        fs::write(project.path().join(".merge-gate.toml"), "").unwrap();

        assert_eq!(
            resolve_in(project.path(), None, None),
            ConfigSource::Project(project.path().join("merge-gate.toml"))
        );
    }

    #[test]
    fn dot_prefixed_project_config_found() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join(".merge-gate.toml"), "").unwrap();

        assert_eq!(
            resolve_in(project.path(), None, None),
            ConfigSource::Project(project.path().join(".merge-gate.toml"))
        );
    }

    #[test]
    fn global_used_only_without_project_config() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "").unwrap();

        assert_eq!(
            resolve_in(project.path(), None, Some(global.path())),
            ConfigSource::Global(global.path().join("config.toml"))
        );

        fs::write(project.path().join("merge-gate.toml"), "").unwrap();
        assert!(matches!(
            resolve_in(project.path(), None, Some(global.path())),
            ConfigSource::Project(_)
        ));
    }

    #[test]
    fn empty_global_dir_falls_back_to_defaults() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();

        let result = resolve_in(project.path(), None, Some(global.path()));
        assert_eq!(result, ConfigSource::Default);
        assert_eq!(result.load().unwrap(), Config::default());
    }

    #[test]
    fn load_reads_check_toggles() {
        let project = TempDir::new().unwrap();
        fs::write(
            project.path().join("merge-gate.toml"),
            "[checks]\nrequire_owner_review = true\nallowed_mergeable_states = [\"clean\"]\n",
        )
        .unwrap();

        let config = resolve_in(project.path(), None, None).load().unwrap();
        assert!(config.checks.require_owner_review);
        assert_eq!(config.checks.allowed_mergeable_states.len(), 1);
    }
}
