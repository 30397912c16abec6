//! Decides whether the reviews on a pull request satisfy an approval requirement.

use crate::declarations::owner_token;
use crate::host::Review;

/// Whose approval does not count toward the requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorExclusion<'a> {
    /// The pull request author (login without `@`) cannot approve as an owner.
    Exclude(&'a str),
    /// No author test; any listed owner may approve.
    Skip,
}

/// Returns the first review that satisfies the requirement, if any.
///
/// `required_owners` holds `@login` tokens. A review qualifies when it is an
/// approval and:
///
/// - `required_owners` is empty (any approval will do), or
/// - there is exactly one required owner and the reviewer is that owner,
///   including when they authored the pull request, or
/// - the reviewer is a required owner and is not the excluded author.
///
/// Reviews are scanned in the order given, without deduplicating by
/// reviewer; earlier non-approving reviews from the same user do not cancel
/// a later approval.
#[must_use]
pub fn first_qualifying_review<'r>(
    reviews: &'r [Review],
    required_owners: &[String],
    author: AuthorExclusion<'_>,
) -> Option<&'r Review> {
    reviews.iter().find(|review| {
        if !review.is_approval() {
            return false;
        }
        if required_owners.is_empty() {
            return true;
        }

        let token = owner_token(&review.reviewer_login);
        if required_owners.len() == 1 && required_owners[0] == token {
            return true;
        }

        let is_author = match author {
            AuthorExclusion::Exclude(login) => login == review.reviewer_login,
            AuthorExclusion::Skip => false,
        };
        required_owners.contains(&token) && !is_author
    })
}

/// Tests whether any review satisfies the requirement.
///
/// See [`first_qualifying_review`] for the rules.
#[must_use]
pub fn is_approved(
    reviews: &[Review],
    required_owners: &[String],
    author: AuthorExclusion<'_>,
) -> bool {
    first_qualifying_review(reviews, required_owners, author).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ReviewState;

    fn owners(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn no_reviews_never_approve() {
        assert!(!is_approved(&[], &[], AuthorExclusion::Skip));
        assert!(!is_approved(
            &[],
            &owners(&["@alice"]),
            AuthorExclusion::Exclude("bob")
        ));
    }

    #[test]
    fn any_approval_mode() {
        let reviews = [
            Review::new("x", ReviewState::Commented),
            Review::approved("y"),
        ];
        assert!(is_approved(&reviews, &[], AuthorExclusion::Exclude("y")));
    }

    #[test]
    fn non_approving_states_do_not_count() {
        let reviews = [
            Review::new("alice", ReviewState::ChangesRequested),
            Review::new("alice", ReviewState::Other("ESCALATED".into())),
        ];
        assert!(!is_approved(&reviews, &[], AuthorExclusion::Skip));
    }

    #[test]
    fn sole_owner_may_approve_own_pull_request() {
        let reviews = [Review::approved("alice")];
        assert!(is_approved(
            &reviews,
            &owners(&["@alice"]),
            AuthorExclusion::Exclude("alice")
        ));
    }

    #[test]
    fn author_excluded_when_several_owners() {
        let reviews = [Review::approved("alice")];
        assert!(!is_approved(
            &reviews,
            &owners(&["@alice", "@bob"]),
            AuthorExclusion::Exclude("alice")
        ));
        assert!(is_approved(
            &reviews,
            &owners(&["@alice", "@bob"]),
            AuthorExclusion::Skip
        ));
    }

    #[test]
    fn reviewer_must_be_a_required_owner() {
        let reviews = [Review::approved("mallory")];
        assert!(!is_approved(
            &reviews,
            &owners(&["@alice", "@bob"]),
            AuthorExclusion::Exclude("carol")
        ));
    }

    #[test]
    fn stale_states_do_not_shadow_a_later_approval() {
        let reviews = [
            Review::new("bob", ReviewState::ChangesRequested),
            Review::approved("bob"),
            Review::new("bob", ReviewState::Dismissed),
        ];
        let found = first_qualifying_review(
            &reviews,
            &owners(&["@alice", "@bob"]),
            AuthorExclusion::Exclude("carol"),
        );
        assert_eq!(found, Some(&reviews[1]));
    }
}
