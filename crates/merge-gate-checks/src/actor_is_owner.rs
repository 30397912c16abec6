//! Check that the actor owns every changed file.
//!
//! Used to let an automation account merge pull requests that only touch
//! paths it owns. The actor must be passed to the gate; without one the
//! check fails as misconfigured.

use merge_gate_core::declarations::owner_token;
use merge_gate_core::{
    is_sole_owner, Check, CheckFailure, EvaluationContext, FailureKind, GateError,
};
use tracing::debug;

/// Check code for require-actor-is-owner.
pub const CODE: &str = "MG002";

/// Check name for require-actor-is-owner.
pub const NAME: &str = "require-actor-is-owner";

/// Requires the actor to own every changed file.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireActorIsOwner;

impl RequireActorIsOwner {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for RequireActorIsOwner {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires the actor to be a code owner of every changed file"
    }

    fn check(&self, ctx: &EvaluationContext<'_>) -> Result<Option<CheckFailure>, GateError> {
        let Some(actor) = ctx.actor() else {
            return Ok(Some(
                CheckFailure::new(
                    CODE,
                    NAME,
                    FailureKind::Configuration,
                    ctx.number(),
                    "no actor given, cannot test code ownership",
                )
                .with_help("pass the triggering login with --actor"),
            ));
        };

        let files = ctx.changed_files()?;
        let entries = &ctx.ownership()?.entries;
        debug!("Testing {} against {} changed file(s)", actor, files.len());

        if is_sole_owner(actor, files, entries) {
            return Ok(None);
        }

        Ok(Some(CheckFailure::new(
            CODE,
            NAME,
            FailureKind::Attribution,
            ctx.number(),
            format!(
                "actor {} is not a code owner of every changed file",
                owner_token(actor)
            ),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{host, run};

    #[test]
    fn owner_of_all_files_passes() {
        let host = host()
            .content("main", "CODEOWNERS", "* @alice\n/deps/ @bot\n")
            .file("deps/lock.json");
        assert!(run(&RequireActorIsOwner::new(), &host, Some("bot")).is_none());
    }

    #[test]
    fn partial_owner_fails_with_attribution() {
        let host = host()
            .content("main", "CODEOWNERS", "* @alice\n/deps/ @bot\n")
            .file("deps/lock.json")
            .file("src/main.rs");
        let failure = run(&RequireActorIsOwner::new(), &host, Some("bot")).unwrap();
        assert_eq!(failure.kind, FailureKind::Attribution);
        assert_eq!(
            failure.message,
            "actor @bot is not a code owner of every changed file"
        );
    }

    #[test]
    fn missing_actor_is_a_configuration_failure() {
        let failure = run(&RequireActorIsOwner::new(), &host(), None).unwrap();
        assert_eq!(failure.kind, FailureKind::Configuration);
    }

    #[test]
    fn no_changed_files_passes() {
        assert!(run(&RequireActorIsOwner::new(), &host(), Some("bot")).is_none());
    }
}
