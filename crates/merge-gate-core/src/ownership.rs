//! Attribution of changed files to owners.
//!
//! Entries are expected in precedence order (as returned by
//! [`parse_ownership`](crate::declarations::parse_ownership)): the last
//! declared pattern comes first.

use crate::declarations::{owner_token, OwnerKind, OwnershipEntry};
use serde::Serialize;
use tracing::{debug, warn};

/// Collects the owners whose approval the changed files require.
///
/// Every matching entry contributes, in precedence order; the result keeps
/// first appearance order without duplicates. Team references and bare names
/// are skipped with a warning.
#[must_use]
pub fn collect_owners(files: &[String], entries: &[OwnershipEntry]) -> Vec<String> {
    let mut owners: Vec<String> = Vec::new();

    for file in files {
        for entry in entries.iter().filter(|e| e.matches(file)) {
            for owner in entry.owners() {
                match OwnerKind::classify(owner) {
                    OwnerKind::User => {
                        if !owners.contains(owner) {
                            owners.push(owner.clone());
                        }
                    }
                    OwnerKind::Team => {
                        warn!(
                            "Ignoring team owner {} for `{}`: team ownership is not supported",
                            owner,
                            entry.pattern()
                        );
                    }
                    OwnerKind::Invalid => {
                        warn!("Ignoring invalid owner {} for `{}`", owner, entry.pattern());
                    }
                }
            }
        }
    }

    debug!("Collected {} owner(s) for {} file(s)", owners.len(), files.len());
    owners
}

/// Tests whether `actor` owns every changed file.
///
/// Fails closed when no entry lists the actor. For each file the first
/// matching entry decides whether the file is owned at all; if it is, the
/// actor must be listed by any of the matching entries. A file no entry
/// matches cannot be attributed to the actor.
#[must_use]
pub fn is_sole_owner(actor: &str, files: &[String], entries: &[OwnershipEntry]) -> bool {
    if files.is_empty() {
        return true;
    }

    let token = owner_token(actor);
    if !entries.iter().any(|e| e.lists(&token)) {
        debug!("{} is not listed in any ownership entry", token);
        return false;
    }

    for file in files {
        let mut matching = entries.iter().filter(|e| e.matches(file)).peekable();

        match matching.peek() {
            None => {
                debug!("{} matches no ownership entry", file);
                return false;
            }
            Some(first) if first.is_unowned() => {
                debug!("{} is explicitly unowned by `{}`", file, first.pattern());
                return false;
            }
            Some(_) => {}
        }

        if !matching.any(|e| e.lists(&token)) {
            debug!("{} is not owned by {}", file, token);
            return false;
        }
    }

    true
}

/// Ownership of one changed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOwnership {
    /// Normalized path.
    pub path: String,
    /// Matching patterns, in precedence order.
    pub patterns: Vec<String>,
    /// Valid owners from all matching entries, first appearance order.
    pub owners: Vec<String>,
    /// True when the highest-precedence match lists no valid owner.
    pub unowned: bool,
}

/// Per-file ownership report.
#[must_use]
pub fn owners_by_file(files: &[String], entries: &[OwnershipEntry]) -> Vec<FileOwnership> {
    files
        .iter()
        .map(|file| {
            let matching: Vec<&OwnershipEntry> =
                entries.iter().filter(|e| e.matches(file)).collect();
            let mut owners: Vec<String> = Vec::new();
            for owner in matching.iter().flat_map(|e| e.valid_owners()) {
                if !owners.iter().any(|o| o == owner) {
                    owners.push(owner.to_string());
                }
            }
            FileOwnership {
                path: file.clone(),
                patterns: matching.iter().map(|e| e.pattern().to_string()).collect(),
                unowned: matching.first().map_or(true, |e| e.is_unowned()),
                owners,
            }
        })
        .collect()
}

/// Normalizes a changed path to start with `/`.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
