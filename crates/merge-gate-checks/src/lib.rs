//! # merge-gate-checks
//!
//! Built-in checks for merge-gate.
//!
//! Each check maps to one configuration toggle. Checks run in a fixed order
//! and the gate stops at the first failure.
//!
//! ## Available Checks
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | MG001 | `require-declarations-file` | Requires an ownership declarations file at the base ref |
//! | MG002 | `require-actor-is-owner` | Requires the actor to own every changed file |
//! | MG003 | `require-owner-review` | Requires an approving review from a code owner |
//! | MG004 | `require-team-declarations-file` | Requires a team declarations file at the base ref |
//! | MG005 | `require-team-review` | Requires each team rule's label and approval |
//! | MG006 | `require-any-approved-review` | Requires at least one approving review |
//! | MG007 | `mergeable-state` | Requires a mergeable pull request in an allowed state |
//!
//! ## Usage
//!
//! ```ignore
//! use merge_gate_core::Gate;
//! use merge_gate_checks::{RequireOwnerReview, MergeableStateCheck};
//!
//! let gate = Gate::builder()
//!     .check(RequireOwnerReview::new())
//!     .check(MergeableStateCheck::default().allow("clean"))
//!     .build();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod actor_is_owner;
mod any_approved_review;
mod declarations_file;
mod mergeable_state;
mod owner_review;
mod presets;
mod team_review;

#[cfg(test)]
mod test_support;

pub use actor_is_owner::RequireActorIsOwner;
pub use any_approved_review::RequireAnyApprovedReview;
pub use declarations_file::{RequireDeclarationsFile, RequireTeamDeclarationsFile};
pub use mergeable_state::MergeableStateCheck;
pub use owner_review::RequireOwnerReview;
pub use presets::{all_checks, checks_from_config};
pub use team_review::RequireTeamReview;

/// Re-export core types for convenience.
pub use merge_gate_core::{Check, CheckFailure, FailureKind};
