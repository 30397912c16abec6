//! Check that every team rule is labelled on the pull request and approved.
//!
//! Without any team declarations this check is a no-op and only logs a
//! warning.

use merge_gate_core::{
    evaluate_team_rules, Check, CheckFailure, EvaluationContext, FailureKind, GateError,
    TeamOutcome,
};
use tracing::warn;

/// Check code for require-team-review.
pub const CODE: &str = "MG005";

/// Check name for require-team-review.
pub const NAME: &str = "require-team-review";

/// Requires the label and an approval for every team rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireTeamReview;

impl RequireTeamReview {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for RequireTeamReview {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires each team rule's label and an approval from one of its users"
    }

    fn check(&self, ctx: &EvaluationContext<'_>) -> Result<Option<CheckFailure>, GateError> {
        let rules = &ctx.team_rules()?.entries;
        if rules.is_empty() {
            warn!("Team review required, but no team rules are declared");
            return Ok(None);
        }

        let labels = ctx.labels()?;
        if labels.is_empty() {
            return Ok(Some(
                CheckFailure::new(
                    CODE,
                    NAME,
                    FailureKind::Label,
                    ctx.number(),
                    "pull request has no labels, but team review is required",
                )
                .with_help(format!("add one of: {}", quoted_labels(rules))),
            ));
        }

        let outcome = evaluate_team_rules(
            rules,
            labels,
            ctx.reviews()?,
            &ctx.summary().author_login,
        );

        Ok(match outcome {
            TeamOutcome::Satisfied | TeamOutcome::NoRules => None,
            TeamOutcome::MissingLabel { label } => Some(CheckFailure::new(
                CODE,
                NAME,
                FailureKind::Label,
                ctx.number(),
                format!("pull request is missing the label `{label}` required by a team rule"),
            )),
            TeamOutcome::NotApproved { label, users } => Some(CheckFailure::new(
                CODE,
                NAME,
                FailureKind::Approval,
                ctx.number(),
                format!(
                    "team rule `{label}` needs an approving review from {}",
                    if users.is_empty() {
                        "anyone".to_string()
                    } else {
                        users.join(", ")
                    }
                ),
            )),
        })
    }
}

fn quoted_labels(rules: &[merge_gate_core::TeamRuleEntry]) -> String {
    rules
        .iter()
        .map(|r| format!("`{}`", r.label()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{host, run};
    use merge_gate_core::Review;

    #[test]
    fn labelled_and_approved_passes() {
        let host = host()
            .content("main", "TEAMOWNERS", "security @alice @bob\n")
            .label("security")
            .review(Review::approved("bob"));
        assert!(run(&RequireTeamReview::new(), &host, None).is_none());
    }

    #[test]
    fn no_team_rules_is_a_no_op() {
        assert!(run(&RequireTeamReview::new(), &host(), None).is_none());
    }

    #[test]
    fn unlabelled_pull_request_fails() {
        let host = host().content("main", "TEAMOWNERS", "security @alice\n");
        let failure = run(&RequireTeamReview::new(), &host, None).unwrap();
        assert_eq!(failure.kind, FailureKind::Label);
        assert_eq!(failure.help.as_deref(), Some("add one of: `security`"));
    }

    #[test]
    fn missing_label_names_the_rule() {
        let host = host()
            .content("main", "TEAMOWNERS", "security @alice\n\"db migration\" @dba\n")
            .label("security")
            .review(Review::approved("alice"));
        let failure = run(&RequireTeamReview::new(), &host, None).unwrap();
        assert_eq!(failure.kind, FailureKind::Label);
        assert!(failure.message.contains("`db migration`"));
    }

    #[test]
    fn unapproved_rule_names_its_users() {
        let host = host()
            .content("main", "TEAMOWNERS", "security @alice @bob\n")
            .label("security")
            .review(Review::approved("carol"));
        let failure = run(&RequireTeamReview::new(), &host, None).unwrap();
        assert_eq!(failure.kind, FailureKind::Approval);
        assert_eq!(
            failure.message,
            "team rule `security` needs an approving review from @alice, @bob"
        );
    }
}
