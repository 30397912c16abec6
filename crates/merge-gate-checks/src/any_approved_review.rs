//! Check that at least one review approves the pull request.

use merge_gate_core::{
    is_approved, AuthorExclusion, Check, CheckFailure, EvaluationContext, FailureKind, GateError,
};

/// Check code for require-any-approved-review.
pub const CODE: &str = "MG006";

/// Check name for require-any-approved-review.
pub const NAME: &str = "require-any-approved-review";

/// Requires at least one approving review from anyone.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireAnyApprovedReview;

impl RequireAnyApprovedReview {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for RequireAnyApprovedReview {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires at least one approving review"
    }

    fn check(&self, ctx: &EvaluationContext<'_>) -> Result<Option<CheckFailure>, GateError> {
        if is_approved(ctx.reviews()?, &[], AuthorExclusion::Skip) {
            return Ok(None);
        }
        Ok(Some(CheckFailure::new(
            CODE,
            NAME,
            FailureKind::Approval,
            ctx.number(),
            "pull request has no approving review",
        )))
    }
}
