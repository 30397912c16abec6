//! Check that the host reports the pull request as mergeable in an allowed state.
//!
//! # Configuration
//!
//! - `allowed_mergeable_states`: states that may pass (e.g. `clean`,
//!   `has_hooks`, `unstable`). An already merged pull request always passes.

use merge_gate_core::{
    interpret, Check, CheckFailure, EvaluationContext, FailureKind, GateError, MergeVerdict,
    MergeableState,
};
use tracing::debug;

/// Check code for mergeable-state.
pub const CODE: &str = "MG007";

/// Check name for mergeable-state.
pub const NAME: &str = "mergeable-state";

/// Requires a mergeable pull request in one of the allowed states.
#[derive(Debug, Clone, Default)]
pub struct MergeableStateCheck {
    /// States that pass.
    pub allowed: Vec<MergeableState>,
}

impl MergeableStateCheck {
    /// Creates the check with the given allow-list.
    #[must_use]
    pub fn new(allowed: Vec<MergeableState>) -> Self {
        Self { allowed }
    }

    /// Adds an allowed state.
    #[must_use]
    pub fn allow(mut self, state: impl Into<MergeableState>) -> Self {
        self.allowed.push(state.into());
        self
    }
}

impl Check for MergeableStateCheck {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires the pull request to be mergeable in an allowed state"
    }

    fn check(&self, ctx: &EvaluationContext<'_>) -> Result<Option<CheckFailure>, GateError> {
        let pr = ctx.summary();
        match interpret(pr.merged, pr.mergeable, &pr.mergeable_state, &self.allowed) {
            Ok(MergeVerdict::AlreadyMerged) => {
                debug!("Pull request #{} is already merged", pr.number);
                Ok(None)
            }
            Ok(MergeVerdict::Allowed(state)) => {
                debug!("Mergeable state {} is allowed", state);
                Ok(None)
            }
            Err(rejection) => {
                let allowed = self
                    .allowed
                    .iter()
                    .map(MergeableState::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                Ok(Some(
                    CheckFailure::new(
                        CODE,
                        NAME,
                        FailureKind::Mergeability,
                        ctx.number(),
                        rejection.to_string(),
                    )
                    .with_help(format!("allowed states: {allowed}")),
                ))
            }
        }
    }
}
