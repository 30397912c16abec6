//! Per-evaluation view of one pull request.

use crate::config::DeclarationsConfig;
use crate::declarations::{
    load_ownership, load_team_rules, DeclarationSet, OwnershipEntry, TeamRuleEntry,
};
use crate::gate::GateError;
use crate::host::{CodeHost, PullRequestRef, PullRequestSummary, Review};
use crate::ownership::normalize_path;
use std::cell::OnceCell;
use tracing::debug;

/// Context provided to checks.
///
/// Holds the pull request summary and lazily fetches everything else from
/// the code host. Each resource is requested at most once; nothing outlives
/// the evaluation.
pub struct EvaluationContext<'a> {
    host: &'a dyn CodeHost,
    pull_request: &'a PullRequestRef,
    summary: PullRequestSummary,
    declarations: &'a DeclarationsConfig,
    actor: Option<&'a str>,
    changed_files: OnceCell<Vec<String>>,
    reviews: OnceCell<Vec<Review>>,
    labels: OnceCell<Vec<String>>,
    ownership: OnceCell<DeclarationSet<OwnershipEntry>>,
    team_rules: OnceCell<DeclarationSet<TeamRuleEntry>>,
}

impl<'a> EvaluationContext<'a> {
    /// Creates a new context for an already fetched pull request.
    #[must_use]
    pub fn new(
        host: &'a dyn CodeHost,
        pull_request: &'a PullRequestRef,
        summary: PullRequestSummary,
        declarations: &'a DeclarationsConfig,
        actor: Option<&'a str>,
    ) -> Self {
        Self {
            host,
            pull_request,
            summary,
            declarations,
            actor,
            changed_files: OnceCell::new(),
            reviews: OnceCell::new(),
            labels: OnceCell::new(),
            ownership: OnceCell::new(),
            team_rules: OnceCell::new(),
        }
    }

    /// Pull request number.
    #[must_use]
    pub fn number(&self) -> u64 {
        self.pull_request.number
    }

    /// The pull request summary.
    #[must_use]
    pub fn summary(&self) -> &PullRequestSummary {
        &self.summary
    }

    /// Login of whoever triggered the evaluation, if known.
    #[must_use]
    pub fn actor(&self) -> Option<&str> {
        self.actor
    }

    /// Declaration file names in use.
    #[must_use]
    pub fn declarations_config(&self) -> &DeclarationsConfig {
        self.declarations
    }

    /// Changed files, normalized to start with `/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the host request fails.
    pub fn changed_files(&self) -> Result<&[String], GateError> {
        memo(&self.changed_files, || {
            let files = self
                .host
                .changed_files(self.pull_request)
                .map_err(|source| self.host_error("list changed files", source))?;
            debug!("{} changed file(s)", files.len());
            Ok(files.iter().map(|f| normalize_path(f)).collect())
        })
        .map(Vec::as_slice)
    }

    /// Reviews in host order.
    ///
    /// # Errors
    ///
    /// Returns an error if the host request fails.
    pub fn reviews(&self) -> Result<&[Review], GateError> {
        memo(&self.reviews, || {
            self.host
                .reviews(self.pull_request)
                .map_err(|source| self.host_error("list reviews", source))
        })
        .map(Vec::as_slice)
    }

    /// Label names.
    ///
    /// # Errors
    ///
    /// Returns an error if the host request fails.
    pub fn labels(&self) -> Result<&[String], GateError> {
        memo(&self.labels, || {
            self.host
                .labels(self.pull_request)
                .map_err(|source| self.host_error("list labels", source))
        })
        .map(Vec::as_slice)
    }

    /// Ownership declarations at the base ref.
    ///
    /// # Errors
    ///
    /// Returns an error if the host request fails.
    pub fn ownership(&self) -> Result<&DeclarationSet<OwnershipEntry>, GateError> {
        memo(&self.ownership, || {
            load_ownership(
                self.host,
                self.pull_request,
                &self.summary.base_ref,
                &self.declarations.ownership_file,
            )
        })
    }

    /// Team declarations at the base ref.
    ///
    /// # Errors
    ///
    /// Returns an error if the host request fails.
    pub fn team_rules(&self) -> Result<&DeclarationSet<TeamRuleEntry>, GateError> {
        memo(&self.team_rules, || {
            load_team_rules(
                self.host,
                self.pull_request,
                &self.summary.base_ref,
                &self.declarations.team_file,
            )
        })
    }

    fn host_error(&self, operation: &'static str, source: crate::host::HostError) -> GateError {
        GateError::Host {
            operation,
            resource: self.pull_request.to_string(),
            source,
        }
    }
}

fn memo<T>(
    cell: &OnceCell<T>,
    fetch: impl FnOnce() -> Result<T, GateError>,
) -> Result<&T, GateError> {
    if let Some(value) = cell.get() {
        return Ok(value);
    }
    let value = fetch()?;
    Ok(cell.get_or_init(|| value))
}
