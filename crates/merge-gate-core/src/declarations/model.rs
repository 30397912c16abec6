//! Entries parsed from ownership and team declaration files.

use crate::matcher::{GitignoreMatcher, PathMatcher};
use std::fmt;
use std::sync::Arc;

/// Classification of one owner/user token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerKind {
    /// `@login`: an individual user.
    User,
    /// `@org/team` or any token containing `/`: a team reference.
    Team,
    /// Neither form, e.g. a bare name or an email address.
    Invalid,
}

impl OwnerKind {
    /// Classifies a raw token.
    #[must_use]
    pub fn classify(token: &str) -> Self {
        if token.contains('/') {
            Self::Team
        } else if token.len() > 1 && token.starts_with('@') {
            Self::User
        } else {
            Self::Invalid
        }
    }
}

/// Formats a login the way it appears in declaration files.
#[must_use]
pub fn owner_token(login: &str) -> String {
    format!("@{login}")
}

/// One line of an ownership declarations file.
#[derive(Clone)]
pub struct OwnershipEntry {
    pattern: String,
    owners: Vec<String>,
    matcher: Arc<dyn PathMatcher>,
}

impl OwnershipEntry {
    /// Creates an entry matched with gitignore semantics.
    #[must_use]
    pub fn new(pattern: impl Into<String>, owners: Vec<String>) -> Self {
        let pattern = pattern.into();
        let matcher = Arc::new(GitignoreMatcher::new(&pattern));
        Self::with_matcher(pattern, owners, matcher)
    }

    /// Creates an entry with a custom matcher.
    #[must_use]
    pub fn with_matcher(
        pattern: impl Into<String>,
        owners: Vec<String>,
        matcher: Arc<dyn PathMatcher>,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            owners,
            matcher,
        }
    }

    /// Returns the raw pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns every owner token as written, including invalid ones.
    #[must_use]
    pub fn owners(&self) -> &[String] {
        &self.owners
    }

    /// Returns the `@user` owners, in declaration order.
    pub fn valid_owners(&self) -> impl Iterator<Item = &str> {
        self.owners
            .iter()
            .map(String::as_str)
            .filter(|o| OwnerKind::classify(o) == OwnerKind::User)
    }

    /// True when the entry lists no `@user` owner, which marks its paths unowned.
    #[must_use]
    pub fn is_unowned(&self) -> bool {
        self.valid_owners().next().is_none()
    }

    /// True when `token` (e.g. `@alice`) is among the valid owners.
    #[must_use]
    pub fn lists(&self, token: &str) -> bool {
        self.valid_owners().any(|o| o == token)
    }

    /// Tests whether this entry's pattern covers a normalized path.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.matcher.matches(path)
    }
}

impl fmt::Debug for OwnershipEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnershipEntry")
            .field("pattern", &self.pattern)
            .field("owners", &self.owners)
            .finish_non_exhaustive()
    }
}

// Matchers are derived from the pattern, so pattern + owners is the identity.
impl PartialEq for OwnershipEntry {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern && self.owners == other.owners
    }
}

impl Eq for OwnershipEntry {}

/// One line of a team declarations file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRuleEntry {
    label: String,
    users: Vec<String>,
}

impl TeamRuleEntry {
    /// Creates a new team rule.
    #[must_use]
    pub fn new(label: impl Into<String>, users: Vec<String>) -> Self {
        Self {
            label: label.into(),
            users,
        }
    }

    /// Returns the pull request label this rule is keyed on.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns every user token as written.
    #[must_use]
    pub fn users(&self) -> &[String] {
        &self.users
    }
}
