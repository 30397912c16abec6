//! Checks that require a declarations file at the base ref.
//!
//! A file that exists but declares nothing counts as missing.

use merge_gate_core::declarations::candidate_paths;
use merge_gate_core::{Check, CheckFailure, EvaluationContext, FailureKind, GateError};

/// Check code for require-declarations-file.
pub const CODE: &str = "MG001";

/// Check name for require-declarations-file.
pub const NAME: &str = "require-declarations-file";

/// Check code for require-team-declarations-file.
pub const TEAM_CODE: &str = "MG004";

/// Check name for require-team-declarations-file.
pub const TEAM_NAME: &str = "require-team-declarations-file";

/// Requires an ownership declarations file with at least one entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireDeclarationsFile;

impl RequireDeclarationsFile {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for RequireDeclarationsFile {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires an ownership declarations file at the base ref"
    }

    fn check(&self, ctx: &EvaluationContext<'_>) -> Result<Option<CheckFailure>, GateError> {
        let set = ctx.ownership()?;
        let file_name = &ctx.declarations_config().ownership_file;
        Ok(missing(
            ctx,
            CODE,
            NAME,
            file_name,
            set.path.as_deref(),
            set.entries.is_empty(),
        ))
    }
}

/// Requires a team declarations file with at least one entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireTeamDeclarationsFile;

impl RequireTeamDeclarationsFile {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for RequireTeamDeclarationsFile {
    fn name(&self) -> &'static str {
        TEAM_NAME
    }

    fn code(&self) -> &'static str {
        TEAM_CODE
    }

    fn description(&self) -> &'static str {
        "Requires a team declarations file at the base ref"
    }

    fn check(&self, ctx: &EvaluationContext<'_>) -> Result<Option<CheckFailure>, GateError> {
        let set = ctx.team_rules()?;
        let file_name = &ctx.declarations_config().team_file;
        Ok(missing(
            ctx,
            TEAM_CODE,
            TEAM_NAME,
            file_name,
            set.path.as_deref(),
            set.entries.is_empty(),
        ))
    }
}

fn missing(
    ctx: &EvaluationContext<'_>,
    code: &str,
    name: &str,
    file_name: &str,
    found_at: Option<&str>,
    empty: bool,
) -> Option<CheckFailure> {
    let base_ref = &ctx.summary().base_ref;
    let message = match found_at {
        None => format!(
            "no {file_name} file found on base ref `{base_ref}` (looked at {})",
            candidate_paths(file_name).join(", ")
        ),
        Some(path) if empty => format!("{path} on base ref `{base_ref}` declares no entries"),
        Some(_) => return None,
    };
    Some(
        CheckFailure::new(code, name, FailureKind::Configuration, ctx.number(), message)
            .with_help(format!("add a {file_name} file to `{base_ref}`")),
    )
}
