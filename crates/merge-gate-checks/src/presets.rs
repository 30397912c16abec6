//! Check sets built from configuration.

use crate::{
    MergeableStateCheck, RequireActorIsOwner, RequireAnyApprovedReview, RequireDeclarationsFile,
    RequireOwnerReview, RequireTeamDeclarationsFile, RequireTeamReview,
};
use merge_gate_core::{CheckBox, ChecksConfig};

/// Returns the enabled checks in evaluation order.
///
/// The order is fixed regardless of how the toggles are written:
/// - `require-declarations-file` (MG001)
/// - `require-actor-is-owner` (MG002)
/// - `require-owner-review` (MG003)
/// - `require-team-declarations-file` (MG004)
/// - `require-team-review` (MG005)
/// - `require-any-approved-review` (MG006)
/// - `mergeable-state` (MG007), enabled by a non-empty allow-list
#[must_use]
pub fn checks_from_config(config: &ChecksConfig) -> Vec<CheckBox> {
    let mut checks: Vec<CheckBox> = Vec::new();

    if config.require_declarations_file {
        checks.push(Box::new(RequireDeclarationsFile::new()));
    }
    if config.require_actor_is_owner {
        checks.push(Box::new(RequireActorIsOwner::new()));
    }
    if config.require_owner_review {
        checks.push(Box::new(RequireOwnerReview::new()));
    }
    if config.require_team_declarations_file {
        checks.push(Box::new(RequireTeamDeclarationsFile::new()));
    }
    if config.require_team_review {
        checks.push(Box::new(RequireTeamReview::new()));
    }
    if config.require_any_approved_review {
        checks.push(Box::new(RequireAnyApprovedReview::new()));
    }
    if !config.allowed_mergeable_states.is_empty() {
        checks.push(Box::new(MergeableStateCheck::new(
            config.allowed_mergeable_states.clone(),
        )));
    }

    checks
}

/// Returns every available check, in evaluation order.
///
/// The mergeable-state check allows `clean`, `has_hooks` and `unstable`.
#[must_use]
pub fn all_checks() -> Vec<CheckBox> {
    vec![
        Box::new(RequireDeclarationsFile::new()),
        Box::new(RequireActorIsOwner::new()),
        Box::new(RequireOwnerReview::new()),
        Box::new(RequireTeamDeclarationsFile::new()),
        Box::new(RequireTeamReview::new()),
        Box::new(RequireAnyApprovedReview::new()),
        Box::new(
            MergeableStateCheck::default()
                .allow("clean")
                .allow("has_hooks")
                .allow("unstable"),
        ),
    ]
}
