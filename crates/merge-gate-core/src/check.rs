//! Check trait for defining gate requirements.

use crate::context::EvaluationContext;
use crate::gate::GateError;
use crate::types::CheckFailure;

/// One requirement a pull request must satisfy.
///
/// Checks read whatever they need from the [`EvaluationContext`], which
/// fetches each resource from the code host at most once per evaluation.
///
/// # Example
///
/// ```ignore
/// use merge_gate_core::{Check, CheckFailure, EvaluationContext, FailureKind, GateError};
///
/// pub struct RequireLabels;
///
/// impl Check for RequireLabels {
///     fn name(&self) -> &'static str { "require-labels" }
///     fn code(&self) -> &'static str { "MG100" }
///
///     fn check(&self, ctx: &EvaluationContext<'_>) -> Result<Option<CheckFailure>, GateError> {
///         if ctx.labels()?.is_empty() {
///             return Ok(Some(CheckFailure::new(
///                 self.code(),
///                 self.name(),
///                 FailureKind::Label,
///                 ctx.number(),
///                 "pull request has no labels",
///             )));
///         }
///         Ok(None)
///     }
/// }
/// ```
pub trait Check: Send + Sync {
    /// Returns the kebab-case name of this check (e.g., "require-owner-review").
    fn name(&self) -> &'static str;

    /// Returns the check code (e.g., "MG003").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this check requires.
    fn description(&self) -> &'static str {
        ""
    }

    /// Evaluates the check.
    ///
    /// Returns `Ok(None)` when satisfied and `Ok(Some(failure))` when not.
    ///
    /// # Errors
    ///
    /// Returns an error when data needed by the check cannot be fetched.
    fn check(&self, ctx: &EvaluationContext<'_>) -> Result<Option<CheckFailure>, GateError>;
}

/// Type alias for boxed Check trait objects.
pub type CheckBox = Box<dyn Check>;
