//! Core types for check failures and gate results.

use crate::host::PullRequestRef;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of an unsatisfied requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    /// A required declarations file or input is missing.
    Configuration,
    /// The actor does not own every changed file.
    Attribution,
    /// No qualifying approving review.
    Approval,
    /// A label required by a team rule is missing.
    Label,
    /// The merge status is unknown, not mergeable or not allowed.
    Mergeability,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "configuration"),
            Self::Attribution => write!(f, "attribution"),
            Self::Approval => write!(f, "approval"),
            Self::Label => write!(f, "label"),
            Self::Mergeability => write!(f, "mergeability"),
        }
    }
}

/// The first requirement a pull request did not meet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckFailure {
    /// Check code (e.g., "MG003").
    pub code: String,
    /// Check name (e.g., "require-owner-review").
    pub check: String,
    /// Failure category.
    pub kind: FailureKind,
    /// Pull request number.
    pub pull_request: u64,
    /// Human-readable message naming the actor, owners, label or state.
    pub message: String,
    /// Optional hint on how to satisfy the check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl CheckFailure {
    /// Creates a new failure.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        check: impl Into<String>,
        kind: FailureKind,
        pull_request: u64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            check: check.into(),
            kind,
            pull_request,
            message: message.into(),
            help: None,
        }
    }

    /// Adds a hint.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Formats the failure for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!(
            "{} {} failed for pull request #{}\n",
            self.code, self.check, self.pull_request
        );
        let _ = writeln!(output, "  {}: {}", self.kind, self.message);
        if let Some(help) = &self.help {
            let _ = writeln!(output, "  = help: {help}");
        }
        output
    }
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{}: {} [{}] {}",
            self.pull_request, self.kind, self.code, self.message
        )
    }
}

/// Renders a [`CheckFailure`] as a miette diagnostic.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("[{code}] {message}")]
pub struct FailureDiagnostic {
    code: String,
    message: String,
    #[help]
    help: Option<String>,
}

impl From<&CheckFailure> for FailureDiagnostic {
    fn from(f: &CheckFailure) -> Self {
        Self {
            code: f.code.clone(),
            message: format!("{} (pull request #{})", f.message, f.pull_request),
            help: f.help.clone(),
        }
    }
}

/// Outcome of running the gate over one pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateResult {
    /// The evaluated pull request.
    pub pull_request: PullRequestRef,
    /// Names of the checks that ran and passed, in order.
    pub passed: Vec<String>,
    /// The first failing check, if any. No check runs after it.
    pub failure: Option<CheckFailure>,
}

impl GateResult {
    /// Creates an empty, passing result.
    #[must_use]
    pub fn new(pull_request: PullRequestRef) -> Self {
        Self {
            pull_request,
            passed: Vec::new(),
            failure: None,
        }
    }

    /// Returns true if every configured check passed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    /// Formats a multi-line report.
    #[must_use]
    pub fn format_report(&self) -> String {
        use std::fmt::Write;

        let mut report = String::new();
        for name in &self.passed {
            let _ = writeln!(report, "  ok   {name}");
        }
        if let Some(failure) = &self.failure {
            let _ = writeln!(report, "  FAIL {}", failure.check);
            let _ = writeln!(report);
            report.push_str(&failure.format());
        }
        let verdict = if self.is_success() { "passed" } else { "failed" };
        let _ = writeln!(
            report,
            "\n{}: merge gate {} ({} check(s) passed)",
            self.pull_request,
            verdict,
            self.passed.len()
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_failure() -> CheckFailure {
        CheckFailure::new(
            "MG003",
            "require-owner-review",
            FailureKind::Approval,
            42,
            "no approving review from @alice, @bob",
        )
    }

    #[test]
    fn failure_new_has_no_help() {
        assert!(make_failure().help.is_none());
    }

    #[test]
    fn failure_format_includes_help() {
        let formatted = make_failure()
            .with_help("request a review from a code owner")
            .format();
        assert!(formatted.contains("MG003 require-owner-review failed for pull request #42"));
        assert!(formatted.contains("= help: request a review from a code owner"));
    }

    #[test]
    fn failure_display_is_one_line() {
        insta::assert_snapshot!(
            make_failure().to_string(),
            @"#42: approval [MG003] no approving review from @alice, @bob"
        );
    }

    #[test]
    fn diagnostic_carries_pull_request_number() {
        let diagnostic = FailureDiagnostic::from(&make_failure());
        assert_eq!(
            diagnostic.to_string(),
            "[MG003] no approving review from @alice, @bob (pull request #42)"
        );
    }

    #[test]
    fn report_lists_passed_checks_and_failure() {
        let mut result = GateResult::new(PullRequestRef::new("acme", "widgets", 42));
        result.passed.push("require-declarations-file".into());
        result.failure = Some(make_failure());

        let report = result.format_report();
        assert!(report.contains("ok   require-declarations-file"));
        assert!(report.contains("FAIL require-owner-review"));
        assert!(report.contains("acme/widgets#42: merge gate failed (1 check(s) passed)"));
        assert!(!result.is_success());
    }

    #[test]
    fn failure_serializes_kind_lowercase() {
        let json = serde_json::to_string(&make_failure()).unwrap();
        assert!(json.contains(r#""kind":"approval""#));
        assert!(!json.contains("help"));
    }
}
