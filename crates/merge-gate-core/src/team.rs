//! Label-driven team review requirements.

use crate::approval::{is_approved, AuthorExclusion};
use crate::declarations::{OwnerKind, TeamRuleEntry};
use crate::host::Review;
use tracing::{debug, warn};

/// Result of checking the team rules against a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamOutcome {
    /// Every rule is labelled on the pull request and approved.
    Satisfied,
    /// There are no team rules to check.
    NoRules,
    /// The pull request lacks the label a rule is keyed on.
    MissingLabel {
        /// The missing label.
        label: String,
    },
    /// The label is present but no qualifying approval exists.
    NotApproved {
        /// The rule's label.
        label: String,
        /// The users allowed to approve.
        users: Vec<String>,
    },
}

/// Checks every team rule, in precedence order, stopping at the first failure.
///
/// A rule listing exactly one user lets that user approve their own pull
/// request; otherwise the author's approval does not count. Team references
/// and malformed tokens are logged and still count as listed users, but can
/// never approve, so a rule naming only teams is never satisfied.
#[must_use]
pub fn evaluate_team_rules(
    entries: &[TeamRuleEntry],
    labels: &[String],
    reviews: &[Review],
    author_login: &str,
) -> TeamOutcome {
    if entries.is_empty() {
        return TeamOutcome::NoRules;
    }

    for entry in entries {
        if !labels.iter().any(|l| l == entry.label()) {
            return TeamOutcome::MissingLabel {
                label: entry.label().to_string(),
            };
        }

        let users = entry.users().to_vec();
        warn_unusable_users(entry);
        let author = if users.len() == 1 {
            AuthorExclusion::Skip
        } else {
            AuthorExclusion::Exclude(author_login)
        };

        if !is_approved(reviews, &users, author) {
            return TeamOutcome::NotApproved {
                label: entry.label().to_string(),
                users,
            };
        }
        debug!("Team rule `{}` approved", entry.label());
    }

    TeamOutcome::Satisfied
}

fn warn_unusable_users(entry: &TeamRuleEntry) {
    for user in entry.users() {
        match OwnerKind::classify(user) {
            OwnerKind::User => {}
            OwnerKind::Team => warn!(
                "Team {} in rule `{}` cannot approve: team review is not supported",
                user,
                entry.label()
            ),
            OwnerKind::Invalid => {
                warn!("Ignoring invalid user {} in rule `{}`", user, entry.label());
            }
        }
    }
}
