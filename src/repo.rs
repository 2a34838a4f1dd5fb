//! Repository identifiers
//!
//! An identifier is an opaque string naming a remote repository, read
//! straight from the input stream. Two things are derived from it and
//! nothing else: the URL handed to `git clone` and the directory name the
//! checkout lands in.

use std::fmt;

/// An opaque repository identifier, e.g. `owner/name` or a full clone URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId(String);

impl RepoId {
    pub fn new(raw: impl Into<String>) -> Self {
        RepoId(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The URL to clone from.
    ///
    /// Identifiers that already carry a URL scheme or an scp-style `git@`
    /// remote pass through unchanged; bare `owner/name` pairs resolve
    /// against GitHub.
    pub fn clone_url(&self) -> String {
        if self.0.contains("://") || self.0.starts_with("git@") {
            self.0.clone()
        } else {
            format!("https://github.com/{}", self.0)
        }
    }

    /// The local directory name the clone would be checked out under:
    /// the last path segment with any trailing `.git` stripped.
    pub fn dir_name(&self) -> &str {
        let last = self
            .0
            .trim_end_matches('/')
            .rsplit(['/', ':'])
            .next()
            .unwrap_or(&self.0);
        last.strip_suffix(".git").unwrap_or(last)
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
