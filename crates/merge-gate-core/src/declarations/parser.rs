//! Line-oriented parser shared by ownership and team declaration files.
//!
//! Grammar, per line:
//!
//! ```text
//! # full-line comment
//! <pattern|label> <owner|user>* [# trailing comment]
//! ```
//!
//! Entries are deduplicated on their first token (first occurrence wins) and
//! returned in reversed file order, so the last declared line is evaluated
//! first.

use super::model::{OwnershipEntry, TeamRuleEntry};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Parses an ownership declarations file.
#[must_use]
pub fn parse_ownership(text: &str) -> Vec<OwnershipEntry> {
    let entries: Vec<OwnershipEntry> =
        dedup_reversed(significant_lines(text).filter_map(split_plain))
            .into_iter()
            .map(|(pattern, owners)| OwnershipEntry::new(pattern, owners))
            .collect();

    debug!("Parsed {} ownership entries", entries.len());
    entries
}

/// Parses a team declarations file.
///
/// A label may be double-quoted to include spaces:
/// `"needs security review" @alice @bob`.
#[must_use]
pub fn parse_team_rules(text: &str) -> Vec<TeamRuleEntry> {
    let entries: Vec<TeamRuleEntry> =
        dedup_reversed(significant_lines(text).filter_map(split_team_line))
            .into_iter()
            .map(|(label, users)| TeamRuleEntry::new(label, users))
            .collect();

    debug!("Parsed {} team rule entries", entries.len());
    entries
}

/// Yields lines with comments removed, skipping the ones left blank.
fn significant_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(['\r', '\n']).filter_map(|raw| {
        let line = raw.split('#').next().unwrap_or_default().trim();
        (!line.is_empty()).then_some(line)
    })
}

fn split_plain(line: &str) -> Option<(String, Vec<String>)> {
    let mut tokens = line.split_whitespace();
    let head = tokens.next()?;
    Some((head.to_string(), tokens.map(String::from).collect()))
}

fn split_team_line(line: &str) -> Option<(String, Vec<String>)> {
    let Some(quoted) = line.strip_prefix('"') else {
        return split_plain(line);
    };
    let Some(end) = quoted.find('"') else {
        warn!("Unterminated quoted label in team declaration: {}", line);
        return split_plain(line);
    };
    let label = &quoted[..end];
    if label.trim().is_empty() {
        warn!("Empty quoted label in team declaration: {}", line);
        return None;
    }
    let users = quoted[end + 1..]
        .split_whitespace()
        .map(String::from)
        .collect();
    Some((label.to_string(), users))
}

fn dedup_reversed(
    lines: impl Iterator<Item = (String, Vec<String>)>,
) -> Vec<(String, Vec<String>)> {
    let mut seen = HashSet::new();
    let mut kept: Vec<(String, Vec<String>)> = lines
        .filter(|(head, _)| {
            let first = seen.insert(head.clone());
            if !first {
                debug!("Skipping duplicate declaration for `{}`", head);
            }
            first
        })
        .collect();
    kept.reverse();
    kept
}
