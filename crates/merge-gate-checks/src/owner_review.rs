//! Check that a code owner of the changed files approved.
//!
//! # Self approval
//!
//! The author's own approval only counts when they are the single owner of
//! everything changed. With no owners at all, any approval will do.

use merge_gate_core::approval::first_qualifying_review;
use merge_gate_core::declarations::owner_token;
use merge_gate_core::{
    collect_owners, AuthorExclusion, Check, CheckFailure, EvaluationContext, FailureKind,
    GateError,
};
use tracing::debug;

/// Check code for require-owner-review.
pub const CODE: &str = "MG003";

/// Check name for require-owner-review.
pub const NAME: &str = "require-owner-review";

/// Requires an approving review from a code owner.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireOwnerReview;

impl RequireOwnerReview {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for RequireOwnerReview {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires an approving review from a code owner of the changed files"
    }

    fn check(&self, ctx: &EvaluationContext<'_>) -> Result<Option<CheckFailure>, GateError> {
        let owners = collect_owners(ctx.changed_files()?, &ctx.ownership()?.entries);
        let author = &ctx.summary().author_login;

        if let Some(review) = first_qualifying_review(
            ctx.reviews()?,
            &owners,
            AuthorExclusion::Exclude(author),
        ) {
            debug!("Owner approval from {}", review.reviewer_login);
            return Ok(None);
        }

        let message = if owners.is_empty() {
            "no approving review (changed files have no code owners)".to_string()
        } else {
            format!("no approving review from code owners {}", owners.join(", "))
        };
        let failure = CheckFailure::new(CODE, NAME, FailureKind::Approval, ctx.number(), message);

        let author_token = owner_token(author);
        let author_approved = ctx
            .reviews()?
            .iter()
            .any(|r| r.is_approval() && &r.reviewer_login == author);
        if author_approved && owners.contains(&author_token) {
            return Ok(Some(failure.with_help(format!(
                "the author {author_token} cannot approve as an owner unless they are the only one"
            ))));
        }
        Ok(Some(failure))
    }
}
