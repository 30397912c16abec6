//! Boundary to the code-hosting service.
//!
//! The gate never talks to the network itself. Everything it needs about a
//! pull request is requested through [`CodeHost`], one blocking call at a
//! time.

use crate::mergeable::MergeableState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one pull request on the code host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PullRequestRef {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Pull request number.
    pub number: u64,
}

impl PullRequestRef {
    /// Creates a new pull request reference.
    #[must_use]
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, number: u64) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            number,
        }
    }
}

impl fmt::Display for PullRequestRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

/// The pull request fields the gate reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestSummary {
    /// Pull request number.
    pub number: u64,
    /// Branch the pull request merges into. Declaration files are read here.
    pub base_ref: String,
    /// Login of the pull request author.
    pub author_login: String,
    /// Whether the pull request has already been merged.
    #[serde(default)]
    pub merged: bool,
    /// `None` while the host is still computing mergeability.
    #[serde(default)]
    pub mergeable: Option<bool>,
    /// Detailed merge status reported by the host.
    #[serde(default)]
    pub mergeable_state: MergeableState,
}

/// State of a single review.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReviewState {
    /// The reviewer approved the changes.
    Approved,
    /// The reviewer requested changes.
    ChangesRequested,
    /// The reviewer only left comments.
    Commented,
    /// The review was dismissed.
    Dismissed,
    /// The review has not been submitted yet.
    Pending,
    /// Any state this crate does not know about.
    Other(String),
}

impl ReviewState {
    /// Returns the host's spelling of this state.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Approved => "APPROVED",
            Self::ChangesRequested => "CHANGES_REQUESTED",
            Self::Commented => "COMMENTED",
            Self::Dismissed => "DISMISSED",
            Self::Pending => "PENDING",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for ReviewState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "APPROVED" => Self::Approved,
            "CHANGES_REQUESTED" => Self::ChangesRequested,
            "COMMENTED" => Self::Commented,
            "DISMISSED" => Self::Dismissed,
            "PENDING" => Self::Pending,
            _ => Self::Other(value),
        }
    }
}

impl From<ReviewState> for String {
    fn from(value: ReviewState) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ReviewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A review left on a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Login of the reviewer, without a leading `@`.
    #[serde(rename = "user")]
    pub reviewer_login: String,
    /// Review state.
    pub state: ReviewState,
}

impl Review {
    /// Creates a new review.
    #[must_use]
    pub fn new(reviewer_login: impl Into<String>, state: ReviewState) -> Self {
        Self {
            reviewer_login: reviewer_login.into(),
            state,
        }
    }

    /// Shorthand for an approving review.
    #[must_use]
    pub fn approved(reviewer_login: impl Into<String>) -> Self {
        Self::new(reviewer_login, ReviewState::Approved)
    }

    /// Returns true if this review approves the pull request.
    #[must_use]
    pub fn is_approval(&self) -> bool {
        self.state == ReviewState::Approved
    }
}

/// Errors reported by a [`CodeHost`].
///
/// "Not found" is not an error: methods that can legitimately miss return
/// `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// The host could not be reached or returned an unexpected status.
    #[error("request failed: {message}")]
    Request {
        /// Description of the failure.
        message: String,
    },

    /// The host answered with a payload that could not be understood.
    #[error("malformed response: {message}")]
    Malformed {
        /// Description of the failure.
        message: String,
    },

    /// IO error on a host backed by local files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read-only access to pull request data on a code host.
///
/// Implementations perform one blocking request per call. Timeouts and
/// retries, if any, are their business.
pub trait CodeHost {
    /// Fetches the pull request summary, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the host request fails.
    fn pull_request(&self, pr: &PullRequestRef) -> Result<Option<PullRequestSummary>, HostError>;

    /// Lists the paths changed by the pull request.
    ///
    /// # Errors
    ///
    /// Returns an error if the host request fails.
    fn changed_files(&self, pr: &PullRequestRef) -> Result<Vec<String>, HostError>;

    /// Lists the reviews in the order the host returns them.
    ///
    /// # Errors
    ///
    /// Returns an error if the host request fails.
    fn reviews(&self, pr: &PullRequestRef) -> Result<Vec<Review>, HostError>;

    /// Lists the label names on the pull request.
    ///
    /// # Errors
    ///
    /// Returns an error if the host request fails.
    fn labels(&self, pr: &PullRequestRef) -> Result<Vec<String>, HostError>;

    /// Reads a file at a git ref, or `None` if it does not exist there.
    ///
    /// # Errors
    ///
    /// Returns an error if the host request fails.
    fn file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> Result<Option<Vec<u8>>, HostError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_state_round_trips_known_and_unknown_values() {
        assert_eq!(
            ReviewState::from("APPROVED".to_string()),
            ReviewState::Approved
        );
        let other = ReviewState::from("ESCALATED".to_string());
        assert_eq!(other, ReviewState::Other("ESCALATED".to_string()));
        assert_eq!(other.as_str(), "ESCALATED");
    }

    #[test]
    fn review_deserializes_from_host_json() {
        let review: Review =
            serde_json::from_str(r#"{"user": "bob", "state": "APPROVED"}"#).unwrap();
        assert_eq!(review, Review::approved("bob"));
        assert!(review.is_approval());
    }

    #[test]
    fn summary_defaults_missing_merge_fields() {
        let summary: PullRequestSummary = serde_json::from_str(
            r#"{"number": 3, "base_ref": "main", "author_login": "carol"}"#,
        )
        .unwrap();
        assert!(!summary.merged);
        assert_eq!(summary.mergeable, None);
        assert_eq!(
            summary.mergeable_state,
            MergeableState::Unknown("unknown".to_string())
        );
    }

    #[test]
    fn pull_request_ref_display() {
        assert_eq!(
            PullRequestRef::new("acme", "widgets", 7).to_string(),
            "acme/widgets#7"
        );
    }
}
