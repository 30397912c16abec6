//! # merge-gate-core
//!
//! Rule-evaluation engine deciding whether a pull request may be merged by
//! automation.
//!
//! This crate provides:
//!
//! - [`declarations`] parsing of ownership (`CODEOWNERS`) and team
//!   (`TEAMOWNERS`) files
//! - [`matcher`] gitignore-style path matching behind [`PathMatcher`]
//! - [`ownership`], [`approval`] and [`team`] evaluators
//! - [`mergeable`] interpretation of the host's merge status
//! - [`Check`] trait and the [`Gate`] that runs checks in order, stopping at
//!   the first failure
//!
//! ## Example
//!
//! ```ignore
//! use merge_gate_core::{Gate, MemoryHost};
//!
//! let gate = Gate::builder()
//!     .check(MyCheck::new())
//!     .actor("release-bot")
//!     .build();
//!
//! let result = gate.evaluate(&host, &pull_request)?;
//! print!("{}", result.format_report());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod approval;
mod check;
mod config;
mod context;
pub mod declarations;
mod gate;
mod host;
pub mod matcher;
mod memory;
pub mod mergeable;
pub mod ownership;
pub mod team;
mod types;

pub use approval::{is_approved, AuthorExclusion};
pub use check::{Check, CheckBox};
pub use config::{ChecksConfig, Config, ConfigError, DeclarationsConfig};
pub use context::EvaluationContext;
pub use declarations::{DeclarationSet, OwnershipEntry, TeamRuleEntry};
pub use gate::{Gate, GateBuilder, GateError};
pub use host::{CodeHost, HostError, PullRequestRef, PullRequestSummary, Review, ReviewState};
pub use matcher::{GitignoreMatcher, PathMatcher};
pub use memory::MemoryHost;
pub use mergeable::{interpret, MergeRejection, MergeVerdict, MergeableState};
pub use ownership::{collect_owners, is_sole_owner, FileOwnership};
pub use team::{evaluate_team_rules, TeamOutcome};
pub use types::{CheckFailure, FailureDiagnostic, FailureKind, GateResult};
