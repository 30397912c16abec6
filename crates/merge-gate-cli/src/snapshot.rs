//! Code host backed by a JSON snapshot of one pull request.
//!
//! The snapshot is the serialized form of [`MemoryHost`]. Declaration files
//! missing from its `contents` table may be read from a checkout on disk
//! instead; the checkout is assumed to be at the base ref.

use anyhow::{Context, Result};
use merge_gate_core::{
    CodeHost, HostError, MemoryHost, PullRequestRef, PullRequestSummary, Review,
};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A [`CodeHost`] reading from a snapshot file.
#[derive(Debug)]
pub struct SnapshotHost {
    inner: MemoryHost,
    repo_dir: Option<PathBuf>,
}

impl SnapshotHost {
    /// Reads and parses a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid snapshot.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid snapshot: {}", path.display()))
    }

    /// Parses a snapshot document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a snapshot.
    pub fn parse(text: &str) -> Result<Self> {
        let inner: MemoryHost = serde_json::from_str(text)?;
        Ok(Self {
            inner,
            repo_dir: None,
        })
    }

    /// Falls back to files under `dir` for declarations the snapshot lacks.
    #[must_use]
    pub fn with_repo_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.repo_dir = dir;
        self
    }

    /// Returns the pull request the snapshot describes.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot holds no pull request.
    pub fn pull_request_ref(&self) -> Result<PullRequestRef> {
        self.inner
            .pull_request_ref()
            .context("Snapshot has no pull_request")
    }

    fn read_checkout(&self, path: &str) -> Result<Option<Vec<u8>>, HostError> {
        let Some(dir) = &self.repo_dir else {
            return Ok(None);
        };
        let full = dir.join(path);
        match std::fs::read(&full) {
            Ok(bytes) => {
                tracing::debug!("Read {} from checkout", full.display());
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(HostError::Io(e)),
        }
    }
}

impl CodeHost for SnapshotHost {
    fn pull_request(&self, pr: &PullRequestRef) -> Result<Option<PullRequestSummary>, HostError> {
        self.inner.pull_request(pr)
    }

    fn changed_files(&self, pr: &PullRequestRef) -> Result<Vec<String>, HostError> {
        self.inner.changed_files(pr)
    }

    fn reviews(&self, pr: &PullRequestRef) -> Result<Vec<Review>, HostError> {
        self.inner.reviews(pr)
    }

    fn labels(&self, pr: &PullRequestRef) -> Result<Vec<String>, HostError> {
        self.inner.labels(pr)
    }

    fn file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> Result<Option<Vec<u8>>, HostError> {
        match self.inner.file_content(owner, repo, path, git_ref)? {
            Some(bytes) => Ok(Some(bytes)),
            None => self.read_checkout(path),
        }
    }
}
