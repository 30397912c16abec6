//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# merge-gate configuration
#
# Checks run in a fixed order and the gate stops at the first failure.
# Every check is disabled unless enabled here.

[checks]
# MG001: an ownership declarations file must exist on the base branch
require_declarations_file = true

# MG002: the actor (--actor) must own every changed file
require_actor_is_owner = false

# MG003: a code owner of the changed files must approve
require_owner_review = true

# MG004: a team declarations file must exist on the base branch
require_team_declarations_file = false

# MG005: every team rule's label must be set and one of its users must approve
require_team_review = false

# MG006: at least one review must approve
require_any_approved_review = false

# MG007: the pull request must be mergeable in one of these states
# (empty disables the check)
allowed_mergeable_states = ["clean", "has_hooks", "unstable"]

[declarations]
# Looked up at the repository root, then .github/, .gitlab/ and docs/
ownership_file = "CODEOWNERS"
team_file = "TEAMOWNERS"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_default(Path::new("merge-gate.toml"), force)?;

    println!("Created merge-gate.toml");
    println!("\nNext steps:");
    println!("  1. Edit merge-gate.toml to enable checks");
    println!("  2. Run: merge-gate check <snapshot.json> --actor <login>");

    Ok(())
}

fn write_default(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }
    std::fs::write(path, DEFAULT_CONFIG)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use merge_gate_core::{Config, MergeableState};
    use tempfile::TempDir;

    #[test]
    fn default_config_parses() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert!(config.checks.require_owner_review);
        assert!(!config.checks.require_actor_is_owner);
        assert_eq!(
            config.checks.allowed_mergeable_states,
            vec![
                MergeableState::Clean,
                MergeableState::HasHooks,
                MergeableState::Unstable
            ]
        );
        assert_eq!(config.declarations.team_file, "TEAMOWNERS");
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("merge-gate.toml");
        std::fs::write(&path, "# mine\n").unwrap();

        assert!(write_default(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

        write_default(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
