//! Finds a declarations file at the pull request's base ref.

use super::model::{OwnershipEntry, TeamRuleEntry};
use super::parser::{parse_ownership, parse_team_rules};
use crate::gate::GateError;
use crate::host::{CodeHost, PullRequestRef};
use tracing::debug;

/// Directories searched for a declarations file, in order.
pub const CANDIDATE_DIRS: &[&str] = &["", ".github/", ".gitlab/", "docs/"];

/// Returns the candidate paths for a declarations file name, in lookup order.
#[must_use]
pub fn candidate_paths(file_name: &str) -> Vec<String> {
    CANDIDATE_DIRS
        .iter()
        .map(|dir| format!("{dir}{file_name}"))
        .collect()
}

/// A declarations file found on the code host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationsFile {
    /// Repository path the file was read from.
    pub path: String,
    /// File content, decoded as UTF-8 (invalid sequences replaced).
    pub text: String,
}

/// Reads the first candidate that exists at `git_ref`.
///
/// Returns `Ok(None)` when no candidate exists.
///
/// # Errors
///
/// Returns [`GateError::Host`] for any host failure other than "not found".
pub fn locate(
    host: &dyn CodeHost,
    pr: &PullRequestRef,
    git_ref: &str,
    file_name: &str,
) -> Result<Option<DeclarationsFile>, GateError> {
    for path in candidate_paths(file_name) {
        let content = host
            .file_content(&pr.owner, &pr.repo, &path, git_ref)
            .map_err(|source| GateError::Host {
                operation: "read declarations file",
                resource: format!("{}/{}:{path}@{git_ref}", pr.owner, pr.repo),
                source,
            })?;

        if let Some(bytes) = content {
            debug!("Found {} at {}@{}", file_name, path, git_ref);
            return Ok(Some(DeclarationsFile {
                path,
                text: String::from_utf8_lossy(&bytes).into_owned(),
            }));
        }
        debug!("No {} at {}@{}", file_name, path, git_ref);
    }

    Ok(None)
}

/// Parsed entries together with the file they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationSet<E> {
    /// Repository path of the file, or `None` if no candidate existed.
    pub path: Option<String>,
    /// Entries in precedence order.
    pub entries: Vec<E>,
}

impl<E> DeclarationSet<E> {
    /// True when a declarations file was found.
    #[must_use]
    pub fn is_found(&self) -> bool {
        self.path.is_some()
    }
}

/// Locates and parses the ownership declarations file.
///
/// # Errors
///
/// See [`locate`].
pub fn load_ownership(
    host: &dyn CodeHost,
    pr: &PullRequestRef,
    git_ref: &str,
    file_name: &str,
) -> Result<DeclarationSet<OwnershipEntry>, GateError> {
    Ok(match locate(host, pr, git_ref, file_name)? {
        Some(file) => DeclarationSet {
            entries: parse_ownership(&file.text),
            path: Some(file.path),
        },
        None => DeclarationSet {
            path: None,
            entries: Vec::new(),
        },
    })
}

/// Locates and parses the team declarations file.
///
/// # Errors
///
/// See [`locate`].
pub fn load_team_rules(
    host: &dyn CodeHost,
    pr: &PullRequestRef,
    git_ref: &str,
    file_name: &str,
) -> Result<DeclarationSet<TeamRuleEntry>, GateError> {
    Ok(match locate(host, pr, git_ref, file_name)? {
        Some(file) => DeclarationSet {
            entries: parse_team_rules(&file.text),
            path: Some(file.path),
        },
        None => DeclarationSet {
            path: None,
            entries: Vec::new(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostError, PullRequestSummary, Review};
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FilesOnly {
        files: HashMap<String, Vec<u8>>,
        fail_on: Option<String>,
        requested: RefCell<Vec<String>>,
    }

    impl CodeHost for FilesOnly {
        fn pull_request(
            &self,
            _: &PullRequestRef,
        ) -> Result<Option<PullRequestSummary>, HostError> {
            Ok(None)
        }
        fn changed_files(&self, _: &PullRequestRef) -> Result<Vec<String>, HostError> {
            Ok(Vec::new())
        }
        fn reviews(&self, _: &PullRequestRef) -> Result<Vec<Review>, HostError> {
            Ok(Vec::new())
        }
        fn labels(&self, _: &PullRequestRef) -> Result<Vec<String>, HostError> {
            Ok(Vec::new())
        }
        fn file_content(
            &self,
            _owner: &str,
            _repo: &str,
            path: &str,
            _git_ref: &str,
        ) -> Result<Option<Vec<u8>>, HostError> {
            self.requested.borrow_mut().push(path.to_string());
            if self.fail_on.as_deref() == Some(path) {
                return Err(HostError::Request {
                    message: "503".to_string(),
                });
            }
            Ok(self.files.get(path).cloned())
        }
    }

    fn pr() -> PullRequestRef {
        PullRequestRef::new("acme", "widgets", 1)
    }

    #[test]
    fn candidates_are_in_lookup_order() {
        assert_eq!(
            candidate_paths("CODEOWNERS"),
            [
                "CODEOWNERS",
                ".github/CODEOWNERS",
                ".gitlab/CODEOWNERS",
                "docs/CODEOWNERS"
            ]
        );
    }

    #[test]
    fn first_existing_candidate_wins() {
        let mut host = FilesOnly::default();
        host.files
            .insert(".github/CODEOWNERS".into(), b"* @github".to_vec());
        host.files.insert("docs/CODEOWNERS".into(), b"* @docs".to_vec());

        let found = locate(&host, &pr(), "main", "CODEOWNERS").unwrap().unwrap();
        assert_eq!(found.path, ".github/CODEOWNERS");
        assert_eq!(found.text, "* @github");
        assert_eq!(
            *host.requested.borrow(),
            ["CODEOWNERS", ".github/CODEOWNERS"]
        );
    }

    #[test]
    fn missing_everywhere_is_none() {
        let host = FilesOnly::default();
        assert!(locate(&host, &pr(), "main", "CODEOWNERS").unwrap().is_none());
        assert_eq!(host.requested.borrow().len(), 4);
    }

    #[test]
    fn load_parses_the_located_file() {
        let mut host = FilesOnly::default();
        host.files.insert(
            "docs/TEAMOWNERS".into(),
            b"security @alice\ninfra @ops\n".to_vec(),
        );

        let set = load_team_rules(&host, &pr(), "main", "TEAMOWNERS").unwrap();
        assert_eq!(set.path.as_deref(), Some("docs/TEAMOWNERS"));
        assert_eq!(set.entries[0].label(), "infra");

        let missing = load_ownership(&host, &pr(), "main", "CODEOWNERS").unwrap();
        assert!(!missing.is_found());
        assert!(missing.entries.is_empty());
    }

    #[test]
    fn host_errors_propagate_with_context() {
        let host = FilesOnly {
            fail_on: Some(".gitlab/TEAMOWNERS".into()),
            ..FilesOnly::default()
        };
        let err = locate(&host, &pr(), "main", "TEAMOWNERS").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("read declarations file"));
        assert!(message.contains(".gitlab/TEAMOWNERS@main"));
    }
}
