//! In-memory [`CodeHost`] holding the data of a single pull request.
//!
//! Deserializes from the snapshot document the CLI reads, and backs the
//! integration tests.

use crate::host::{CodeHost, HostError, PullRequestRef, PullRequestSummary, Review};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A code host that answers from memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryHost {
    /// Repository owner.
    #[serde(default)]
    pub owner: String,
    /// Repository name.
    #[serde(default)]
    pub repo: String,
    /// The pull request, if it exists.
    #[serde(default)]
    pub pull_request: Option<PullRequestSummary>,
    /// Changed file paths.
    #[serde(default)]
    pub files: Vec<String>,
    /// Reviews, in host order.
    #[serde(default)]
    pub reviews: Vec<Review>,
    /// Label names.
    #[serde(default)]
    pub labels: Vec<String>,
    /// File contents by git ref, then by path.
    #[serde(default)]
    pub contents: BTreeMap<String, BTreeMap<String, String>>,
    /// Operations that fail with [`HostError::Request`]
    /// (`pull_request`, `changed_files`, `reviews`, `labels`, `file_content`).
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub failing: BTreeSet<String>,
}

impl MemoryHost {
    /// Creates a host for `owner/repo` holding the given pull request.
    #[must_use]
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        pull_request: PullRequestSummary,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            pull_request: Some(pull_request),
            ..Self::default()
        }
    }

    /// Returns a reference to the held pull request, or `None` if there is none.
    #[must_use]
    pub fn pull_request_ref(&self) -> Option<PullRequestRef> {
        self.pull_request
            .as_ref()
            .map(|pr| PullRequestRef::new(&self.owner, &self.repo, pr.number))
    }

    /// Adds a changed file.
    #[must_use]
    pub fn file(mut self, path: impl Into<String>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Adds a review.
    #[must_use]
    pub fn review(mut self, review: Review) -> Self {
        self.reviews.push(review);
        self
    }

    /// Adds a label.
    #[must_use]
    pub fn label(mut self, name: impl Into<String>) -> Self {
        self.labels.push(name.into());
        self
    }

    /// Stores a file at a git ref.
    #[must_use]
    pub fn content(
        mut self,
        git_ref: impl Into<String>,
        path: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.contents
            .entry(git_ref.into())
            .or_default()
            .insert(path.into(), text.into());
        self
    }

    /// Makes an operation fail.
    #[must_use]
    pub fn failing(mut self, operation: impl Into<String>) -> Self {
        self.failing.insert(operation.into());
        self
    }

    fn guard(&self, operation: &str) -> Result<(), HostError> {
        if self.failing.contains(operation) {
            return Err(HostError::Request {
                message: format!("{operation} unavailable"),
            });
        }
        Ok(())
    }

    fn holds(&self, pr: &PullRequestRef) -> bool {
        pr.owner == self.owner
            && pr.repo == self.repo
            && self
                .pull_request
                .as_ref()
                .is_some_and(|summary| summary.number == pr.number)
    }
}

impl CodeHost for MemoryHost {
    fn pull_request(&self, pr: &PullRequestRef) -> Result<Option<PullRequestSummary>, HostError> {
        self.guard("pull_request")?;
        Ok(self.pull_request.clone().filter(|_| self.holds(pr)))
    }

    fn changed_files(&self, pr: &PullRequestRef) -> Result<Vec<String>, HostError> {
        self.guard("changed_files")?;
        Ok(if self.holds(pr) {
            self.files.clone()
        } else {
            Vec::new()
        })
    }

    fn reviews(&self, pr: &PullRequestRef) -> Result<Vec<Review>, HostError> {
        self.guard("reviews")?;
        Ok(if self.holds(pr) {
            self.reviews.clone()
        } else {
            Vec::new()
        })
    }

    fn labels(&self, pr: &PullRequestRef) -> Result<Vec<String>, HostError> {
        self.guard("labels")?;
        Ok(if self.holds(pr) {
            self.labels.clone()
        } else {
            Vec::new()
        })
    }

    fn file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> Result<Option<Vec<u8>>, HostError> {
        self.guard("file_content")?;
        if owner != self.owner || repo != self.repo {
            return Ok(None);
        }
        Ok(self
            .contents
            .get(git_ref)
            .and_then(|files| files.get(path))
            .map(|text| text.as_bytes().to_vec()))
    }
}
