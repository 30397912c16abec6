//! Interpretation of the merge status a code host reports for a pull request.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Detailed merge status of a pull request.
///
/// Known states form a closed table. Anything else is kept verbatim in
/// [`MergeableState::Unknown`] so it can still be matched against an
/// allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MergeableState {
    /// Mergeable and passing commit status.
    Clean,
    /// Mergeable with passing commit status and pre-receive hooks.
    HasHooks,
    /// Mergeable with non-passing commit status.
    Unstable,
    /// The head ref is out of date.
    Behind,
    /// The merge is blocked.
    Blocked,
    /// The merge commit cannot be cleanly created.
    Dirty,
    /// The pull request is a draft.
    Draft,
    /// Any other state string.
    Unknown(String),
}

impl MergeableState {
    /// Returns the host's spelling of this state.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Clean => "clean",
            Self::HasHooks => "has_hooks",
            Self::Unstable => "unstable",
            Self::Behind => "behind",
            Self::Blocked => "blocked",
            Self::Dirty => "dirty",
            Self::Draft => "draft",
            Self::Unknown(s) => s,
        }
    }

    /// Human-readable description of the state.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Clean => "the pull request is mergeable and passing commit status",
            Self::HasHooks => {
                "the pull request is mergeable with passing commit status and pre-receive hooks"
            }
            Self::Unstable => "the pull request is mergeable, but commit status is not passing",
            Self::Behind => "the head ref is out of date",
            Self::Blocked => "the merge is blocked",
            Self::Dirty => "the merge commit cannot be cleanly created",
            Self::Draft => "the merge is blocked due to the pull request being a draft",
            Self::Unknown(_) => "undetermined",
        }
    }

    /// `"<state>, <description>"`, as used in verdict messages.
    #[must_use]
    pub fn phrase(&self) -> String {
        format!("{}, {}", self.as_str(), self.description())
    }
}

impl Default for MergeableState {
    fn default() -> Self {
        Self::Unknown("unknown".to_string())
    }
}

impl From<String> for MergeableState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "clean" => Self::Clean,
            "has_hooks" => Self::HasHooks,
            "unstable" => Self::Unstable,
            "behind" => Self::Behind,
            "blocked" => Self::Blocked,
            "dirty" => Self::Dirty,
            "draft" => Self::Draft,
            _ => Self::Unknown(value),
        }
    }
}

impl From<&str> for MergeableState {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<MergeableState> for String {
    fn from(value: MergeableState) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for MergeableState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pull request the gate may let through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeVerdict {
    /// Already merged; nothing left to guard.
    AlreadyMerged,
    /// Mergeable and in an allowed state.
    Allowed(MergeableState),
}

/// Why a pull request's merge status is not acceptable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeRejection {
    /// The host has not finished computing mergeability.
    #[error("mergeable state cannot currently be determined")]
    Indeterminate,

    /// The host reports the pull request as not mergeable.
    #[error("pull request is not mergeable")]
    NotMergeable,

    /// Mergeable, but the state is not in the allow-list.
    #[error("mergeable state is {phrase}")]
    DisallowedState {
        /// The reported state.
        state: MergeableState,
        /// Descriptive phrase for the state.
        phrase: String,
    },
}

/// Classifies a reported merge status against an allow-list.
///
/// A merged pull request always passes. An unknown mergeability never does.
/// A mergeable pull request passes iff its state is in `allowed`; states
/// outside the known table are compared verbatim.
///
/// # Errors
///
/// Returns the [`MergeRejection`] describing why the status is not acceptable.
pub fn interpret(
    merged: bool,
    mergeable: Option<bool>,
    state: &MergeableState,
    allowed: &[MergeableState],
) -> Result<MergeVerdict, MergeRejection> {
    if merged {
        return Ok(MergeVerdict::AlreadyMerged);
    }
    match mergeable {
        None => Err(MergeRejection::Indeterminate),
        Some(true) => {
            if allowed.contains(state) {
                Ok(MergeVerdict::Allowed(state.clone()))
            } else {
                Err(MergeRejection::DisallowedState {
                    state: state.clone(),
                    phrase: state.phrase(),
                })
            }
        }
        Some(false) => Err(MergeRejection::NotMergeable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states(names: &[&str]) -> Vec<MergeableState> {
        names.iter().map(|s| MergeableState::from(*s)).collect()
    }

    #[test]
    fn merged_passes_regardless_of_allow_list() {
        let verdict = interpret(true, None, &MergeableState::Dirty, &[]);
        assert_eq!(verdict, Ok(MergeVerdict::AlreadyMerged));
    }

    #[test]
    fn unknown_mergeability_is_indeterminate() {
        let verdict = interpret(false, None, &MergeableState::Clean, &states(&["clean"]));
        assert_eq!(verdict, Err(MergeRejection::Indeterminate));
    }

    #[test]
    fn unstable_allowed_when_listed() {
        let allowed = states(&["clean", "has_hooks", "unstable"]);
        let verdict = interpret(false, Some(true), &MergeableState::Unstable, &allowed);
        assert_eq!(
            verdict,
            Ok(MergeVerdict::Allowed(MergeableState::Unstable))
        );
    }

    #[test]
    fn dirty_rejected_with_phrase() {
        let err = interpret(false, Some(true), &MergeableState::Dirty, &states(&["clean"]))
            .unwrap_err();
        assert!(err
            .to_string()
            .contains("dirty, the merge commit cannot be cleanly created"));
    }

    #[test]
    fn not_mergeable_rejected_even_if_state_allowed() {
        let verdict = interpret(false, Some(false), &MergeableState::Clean, &states(&["clean"]));
        assert_eq!(verdict, Err(MergeRejection::NotMergeable));
    }

    #[test]
    fn unrecognized_state_is_matched_verbatim() {
        let state = MergeableState::from("queued");
        assert_eq!(state.phrase(), "queued, undetermined");

        let allowed = states(&["queued"]);
        assert!(interpret(false, Some(true), &state, &allowed).is_ok());
        assert!(interpret(false, Some(true), &state, &states(&["clean"])).is_err());
    }
}
