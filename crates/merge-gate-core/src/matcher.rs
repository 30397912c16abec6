//! Path matching for declaration patterns.
//!
//! [`PathMatcher`] is the only thing the ownership resolver knows about
//! patterns. [`GitignoreMatcher`] implements it with gitignore semantics via
//! the `ignore` crate.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fmt;
use tracing::warn;

/// Decides whether a declared pattern covers a changed file.
pub trait PathMatcher: Send + Sync + fmt::Debug {
    /// Tests a normalized path (leading `/`, relative to the repository root).
    fn matches(&self, path: &str) -> bool;
}

/// A single gitignore-style pattern.
///
/// Supports `*`, `**`, character classes, leading-`/` anchoring, trailing-`/`
/// directory patterns and `!` negation. A path matches when the pattern
/// covers it or any of its parent directories. A negated pattern on its own
/// only re-includes paths, so it never reports a match.
pub struct GitignoreMatcher {
    pattern: String,
    gitignore: Gitignore,
}

impl GitignoreMatcher {
    /// Compiles a pattern.
    ///
    /// An unparsable pattern is logged and compiles to a matcher that
    /// matches nothing.
    #[must_use]
    pub fn new(pattern: &str) -> Self {
        let gitignore = match compile(pattern) {
            Ok(gitignore) => gitignore,
            Err(e) => {
                warn!("Ignoring unparsable pattern `{}`: {}", pattern, e);
                Gitignore::empty()
            }
        };
        Self {
            pattern: pattern.to_string(),
            gitignore,
        }
    }

    /// Returns the raw pattern.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}

fn compile(pattern: &str) -> Result<Gitignore, ignore::Error> {
    let mut builder = GitignoreBuilder::new("/");
    builder.add_line(None, pattern)?;
    builder.build()
}

impl PathMatcher for GitignoreMatcher {
    fn matches(&self, path: &str) -> bool {
        let relative = path.trim_start_matches('/');
        if relative.is_empty() {
            return false;
        }
        self.gitignore
            .matched_path_or_any_parents(relative, false)
            .is_ignore()
    }
}

impl fmt::Debug for GitignoreMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitignoreMatcher")
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}
