//! # Error Handling
//!
//! Centralized error type for `reposize`, built with `thiserror`. Every
//! failure a size probe can hit is scoped to a single repository identifier
//! and carries enough context (identifier, stage, underlying reason) for its
//! diagnostic line to stand on its own.
//!
//! Failures never abort the run: they are caught at the probe boundary and
//! logged by the reporter. Only input-stream errors (`Io`) propagate out of
//! the dispatcher.

use thiserror::Error;

/// Main error type for reposize operations
#[derive(Error, Debug)]
pub enum Error {
    /// The external `git clone` exited with a non-zero status.
    ///
    /// Carries the combined stdout/stderr of the clone command.
    #[error("clone failed for {repo}: {output}")]
    CloneFailed { repo: String, output: String },

    /// The size walk over the checkout could not start at all.
    ///
    /// Per-entry walk errors are tolerated and never produce this; only a
    /// top-level failure (e.g. the checkout root is missing) does.
    #[error("size computation failed for {repo}: {message}")]
    Traversal { repo: String, message: String },

    /// The scratch directory could not be removed after the probe.
    #[error("cleanup failed for {repo} at {path}: {message}")]
    Cleanup {
        repo: String,
        path: String,
        message: String,
    },

    /// The unit-private scratch directory could not be created.
    #[error("scratch directory setup failed for {repo}: {message}")]
    Scratch { repo: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The probe stage this error belongs to.
    pub fn stage(&self) -> &'static str {
        match self {
            Error::CloneFailed { .. } => "clone",
            Error::Traversal { .. } => "size",
            Error::Cleanup { .. } => "cleanup",
            Error::Scratch { .. } => "setup",
            Error::Io(_) => "io",
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
