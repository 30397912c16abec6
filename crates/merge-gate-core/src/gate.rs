//! Gate orchestrating check execution for one pull request.

use crate::check::{Check, CheckBox};
use crate::config::{Config, DeclarationsConfig};
use crate::context::EvaluationContext;
use crate::host::{CodeHost, HostError, PullRequestRef};
use crate::types::GateResult;

use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that abort an evaluation.
///
/// An unsatisfied requirement is not an error; it is reported in
/// [`GateResult::failure`].
#[derive(Debug, Error)]
pub enum GateError {
    /// The code host failed for a reason other than "not found".
    #[error("failed to {operation} for {resource}: {source}")]
    Host {
        /// What was being fetched.
        operation: &'static str,
        /// Which resource.
        resource: String,
        /// Underlying host error.
        source: HostError,
    },

    /// The pull request does not exist.
    #[error("pull request {pull_request} not found")]
    PullRequestNotFound {
        /// The missing pull request.
        pull_request: String,
    },
}

/// Builder for configuring a [`Gate`].
#[derive(Default)]
pub struct GateBuilder {
    checks: Vec<CheckBox>,
    declarations: Option<DeclarationsConfig>,
    actor: Option<String>,
}

impl GateBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a check. Checks run in the order they are added.
    #[must_use]
    pub fn check<C: Check + 'static>(mut self, check: C) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Adds several boxed checks.
    #[must_use]
    pub fn checks<I>(mut self, checks: I) -> Self
    where
        I: IntoIterator<Item = CheckBox>,
    {
        self.checks.extend(checks);
        self
    }

    /// Takes declaration file names from a configuration.
    #[must_use]
    pub fn config(mut self, config: &Config) -> Self {
        self.declarations = Some(config.declarations.clone());
        self
    }

    /// Sets the declaration file names.
    #[must_use]
    pub fn declarations(mut self, declarations: DeclarationsConfig) -> Self {
        self.declarations = Some(declarations);
        self
    }

    /// Sets the login that triggered the evaluation.
    #[must_use]
    pub fn actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Builds the gate.
    #[must_use]
    pub fn build(self) -> Gate {
        Gate {
            checks: self.checks,
            declarations: self.declarations.unwrap_or_default(),
            actor: self.actor,
        }
    }
}

/// Runs checks against a pull request, stopping at the first failure.
///
/// Use [`Gate::builder()`] to construct an instance.
pub struct Gate {
    checks: Vec<CheckBox>,
    declarations: DeclarationsConfig,
    actor: Option<String>,
}

impl Gate {
    /// Creates a new builder for configuring a gate.
    #[must_use]
    pub fn builder() -> GateBuilder {
        GateBuilder::new()
    }

    /// Returns the number of registered checks.
    #[must_use]
    pub fn check_count(&self) -> usize {
        self.checks.len()
    }

    /// Returns the registered checks, in run order.
    #[must_use]
    pub fn checks(&self) -> &[CheckBox] {
        &self.checks
    }

    /// Evaluates the pull request.
    ///
    /// Every call fetches fresh data from `host`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pull request does not exist or the host fails.
    pub fn evaluate(
        &self,
        host: &dyn CodeHost,
        pull_request: &PullRequestRef,
    ) -> Result<GateResult, GateError> {
        info!("Evaluating {} with {} check(s)", pull_request, self.checks.len());

        let summary = host
            .pull_request(pull_request)
            .map_err(|source| GateError::Host {
                operation: "fetch pull request",
                resource: pull_request.to_string(),
                source,
            })?
            .ok_or_else(|| GateError::PullRequestNotFound {
                pull_request: pull_request.to_string(),
            })?;

        let ctx = EvaluationContext::new(
            host,
            pull_request,
            summary,
            &self.declarations,
            self.actor.as_deref(),
        );
        let mut result = GateResult::new(pull_request.clone());

        for check in &self.checks {
            debug!("Running check: {} ({})", check.name(), check.code());
            if let Some(failure) = check.check(&ctx)? {
                warn!("{}", failure);
                result.failure = Some(failure);
                break;
            }
            result.passed.push(check.name().to_string());
        }

        info!(
            "Evaluation complete: {} ({} check(s) passed)",
            if result.is_success() { "passed" } else { "failed" },
            result.passed.len()
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::PullRequestSummary;
    use crate::memory::MemoryHost;
    use crate::mergeable::MergeableState;
    use crate::types::{CheckFailure, FailureKind};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Counting {
        name: &'static str,
        fail: bool,
        runs: Arc<AtomicUsize>,
    }

    impl Check for Counting {
        fn name(&self) -> &'static str {
            self.name
        }
        fn code(&self) -> &'static str {
            "TEST"
        }
        fn check(&self, ctx: &EvaluationContext<'_>) -> Result<Option<CheckFailure>, GateError> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            Ok(self.fail.then(|| {
                CheckFailure::new(
                    self.code(),
                    self.name,
                    FailureKind::Approval,
                    ctx.number(),
                    "nope",
                )
            }))
        }
    }

    fn host() -> MemoryHost {
        MemoryHost::new(
            "acme",
            "widgets",
            PullRequestSummary {
                number: 9,
                base_ref: "main".to_string(),
                author_login: "carol".to_string(),
                merged: false,
                mergeable: Some(true),
                mergeable_state: MergeableState::Clean,
            },
        )
    }

    fn counting(name: &'static str, fail: bool, runs: &Arc<AtomicUsize>) -> Counting {
        Counting {
            name,
            fail,
            runs: Arc::clone(runs),
        }
    }

    #[test]
    fn stops_at_first_failure() {
        let runs = Arc::new(AtomicUsize::new(0));
        let gate = Gate::builder()
            .check(counting("first", false, &runs))
            .check(counting("second", true, &runs))
            .check(counting("third", false, &runs))
            .build();
        let host = host();
        let pr = host.pull_request_ref().unwrap();

        let result = gate.evaluate(&host, &pr).unwrap();
        assert_eq!(result.passed, ["first"]);
        assert_eq!(result.failure.map(|f| f.check), Some("second".to_string()));
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn no_checks_passes() {
        let host = host();
        let pr = host.pull_request_ref().unwrap();
        let result = Gate::builder().build().evaluate(&host, &pr).unwrap();
        assert!(result.is_success());
        assert!(result.passed.is_empty());
    }

    #[test]
    fn missing_pull_request_is_an_error() {
        let host = host();
        let pr = PullRequestRef::new("acme", "widgets", 404);
        let err = Gate::builder().build().evaluate(&host, &pr).unwrap_err();
        assert!(matches!(err, GateError::PullRequestNotFound { .. }));
    }

    #[test]
    fn host_failure_is_an_error() {
        let host = host().failing("pull_request");
        let pr = PullRequestRef::new("acme", "widgets", 9);
        let err = Gate::builder().build().evaluate(&host, &pr).unwrap_err();
        assert!(err.to_string().starts_with("failed to fetch pull request"));
    }
}
