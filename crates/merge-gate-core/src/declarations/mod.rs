//! Ownership and team declaration files.
//!
//! ```text
//! CODEOWNERS / TEAMOWNERS text
//!   ↓ parser (strip comments, tokenize, dedupe, reverse)
//! Vec<OwnershipEntry> / Vec<TeamRuleEntry>
//!   ↓ ownership / team evaluators
//! ```

pub mod locator;
pub mod model;
pub mod parser;

pub use locator::{
    candidate_paths, load_ownership, load_team_rules, locate, DeclarationSet, DeclarationsFile,
    CANDIDATE_DIRS,
};
pub use model::{owner_token, OwnerKind, OwnershipEntry, TeamRuleEntry};
pub use parser::{parse_ownership, parse_team_rules};
