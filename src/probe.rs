//! # The Size Prober
//!
//! One probe measures one repository: clone it into a unit-private scratch
//! directory, sum the byte sizes of every regular file in the checkout, then
//! remove the scratch directory. The removal is unconditional, whatever the
//! clone or the walk did.
//!
//! The clone step sits behind the [`GitOperations`] trait so tests can
//! substitute it without touching the network, mirroring how the clone is a
//! plain external command in production.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::repo::RepoId;

/// Trait for the clone step - allows mocking in tests
pub trait GitOperations: Send + Sync {
    /// Clone `repo` into `dest` without ever prompting for credentials.
    ///
    /// A non-zero exit must surface as [`Error::CloneFailed`] carrying the
    /// command's combined output.
    fn clone_quiet(&self, repo: &RepoId, dest: &Path) -> Result<()>;
}

/// Runs the system `git` binary.
///
/// Uses the system git command, which automatically handles SSH keys,
/// credential helpers and anything configured in `~/.gitconfig`, but with
/// terminal prompting disabled, so missing credentials fail fast instead of
/// hanging a work unit (and its gate slot) forever.
pub struct SystemGit;

impl GitOperations for SystemGit {
    fn clone_quiet(&self, repo: &RepoId, dest: &Path) -> Result<()> {
        let output = Command::new("git")
            .arg("clone")
            .arg(repo.clone_url())
            .arg(dest)
            .env("GIT_TERMINAL_PROMPT", "0")
            // Askpass helper that answers nothing, so auth fails instead of blocking.
            .env("GIT_ASKPASS", "echo")
            .output()?;

        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(Error::CloneFailed {
                repo: repo.to_string(),
                output: combined.trim().to_string(),
            });
        }
        Ok(())
    }
}

/// Measure one repository: clone, sum file sizes, remove the clone.
///
/// The scratch directory is freshly created per call and never shared with
/// another probe. It is removed on every path; when both the probe and the
/// removal fail, the probe failure wins.
pub fn probe(git: &dyn GitOperations, repo: &RepoId) -> Result<u64> {
    let scratch = TempDir::with_prefix("reposize-").map_err(|e| Error::Scratch {
        repo: repo.to_string(),
        message: e.to_string(),
    })?;
    let checkout = scratch.path().join(repo.dir_name());

    let outcome = git
        .clone_quiet(repo, &checkout)
        .and_then(|()| checkout_size(repo, &checkout));

    let scratch_path = scratch.path().to_path_buf();
    match (outcome, scratch.close()) {
        (Ok(bytes), Ok(())) => Ok(bytes),
        (Err(e), _) => Err(e),
        (Ok(_), Err(e)) => Err(Error::Cleanup {
            repo: repo.to_string(),
            path: scratch_path.display().to_string(),
            message: e.to_string(),
        }),
    }
}

/// Sum the byte length of every regular file under `root`.
///
/// Individual unreadable entries (permissions, broken symlinks, concurrent
/// mutation) contribute nothing rather than failing the whole probe; an
/// undercount beats aborting the measurement.
fn checkout_size(repo: &RepoId, root: &Path) -> Result<u64> {
    if !root.is_dir() {
        return Err(Error::Traversal {
            repo: repo.to_string(),
            message: format!("{} is not a directory", root.display()),
        });
    }

    let mut total = 0u64;
    for entry in WalkDir::new(root) {
        let Ok(entry) = entry else { continue };
        if entry.file_type().is_file() {
            if let Ok(metadata) = entry.metadata() {
                total += metadata.len();
            }
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Mock clone that materializes a fixed tree at the destination and
    /// records where it was asked to clone.
    struct FakeCheckout {
        files: Vec<(&'static str, usize)>,
        dests: Mutex<Vec<PathBuf>>,
    }

    impl FakeCheckout {
        fn new(files: Vec<(&'static str, usize)>) -> Self {
            Self {
                files,
                dests: Mutex::new(Vec::new()),
            }
        }
    }

    impl GitOperations for FakeCheckout {
        fn clone_quiet(&self, _repo: &RepoId, dest: &Path) -> Result<()> {
            self.dests.lock().unwrap().push(dest.to_path_buf());
            for (name, size) in &self.files {
                let path = dest.join(name);
                fs::create_dir_all(path.parent().unwrap()).unwrap();
                fs::write(&path, vec![0u8; *size]).unwrap();
            }
            Ok(())
        }
    }

    /// Mock clone that always fails, recording whether it was invoked.
    struct FailingClone {
        dests: Mutex<Vec<PathBuf>>,
    }

    impl GitOperations for FailingClone {
        fn clone_quiet(&self, repo: &RepoId, dest: &Path) -> Result<()> {
            self.dests.lock().unwrap().push(dest.to_path_buf());
            Err(Error::CloneFailed {
                repo: repo.to_string(),
                output: "fatal: repository not found".to_string(),
            })
        }
    }

    /// Mock clone that claims success but creates nothing on disk.
    struct NoopClone;

    impl GitOperations for NoopClone {
        fn clone_quiet(&self, _repo: &RepoId, _dest: &Path) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_probe_sums_all_regular_files() {
        let git = FakeCheckout::new(vec![
            ("README.md", 1000),
            ("src/main.rs", 200),
            ("src/deep/nested.rs", 34),
        ]);
        let repo = RepoId::new("owner/repo");

        let bytes = probe(&git, &repo).unwrap();
        assert_eq!(bytes, 1234);
    }

    #[test]
    fn test_probe_empty_checkout_is_zero_bytes() {
        // The clone creates the checkout directory with nothing in it.
        struct EmptyDir;
        impl GitOperations for EmptyDir {
            fn clone_quiet(&self, _repo: &RepoId, dest: &Path) -> Result<()> {
                fs::create_dir_all(dest).unwrap();
                Ok(())
            }
        }

        let repo = RepoId::new("owner/empty");
        let bytes = probe(&EmptyDir, &repo).unwrap();
        assert_eq!(bytes, 0);
    }

    #[test]
    fn test_probe_removes_scratch_dir_on_success() {
        let git = FakeCheckout::new(vec![("file", 10)]);
        let repo = RepoId::new("owner/repo");

        probe(&git, &repo).unwrap();

        let dests = git.dests.lock().unwrap();
        assert_eq!(dests.len(), 1);
        // The checkout and its scratch parent are both gone.
        assert!(!dests[0].exists());
        assert!(!dests[0].parent().unwrap().exists());
    }

    #[test]
    fn test_probe_clone_failure_skips_walk_and_still_cleans_up() {
        let git = FailingClone {
            dests: Mutex::new(Vec::new()),
        };
        let repo = RepoId::new("owner/missing");

        let err = probe(&git, &repo).unwrap_err();
        assert!(matches!(err, Error::CloneFailed { .. }));
        assert!(err.to_string().contains("owner/missing"));
        assert!(err.to_string().contains("repository not found"));

        // The clone was attempted once and its scratch root no longer exists,
        // so nothing was ever there to traverse.
        let dests = git.dests.lock().unwrap();
        assert_eq!(dests.len(), 1);
        assert!(!dests[0].parent().unwrap().exists());
    }

    #[test]
    fn test_probe_missing_checkout_is_traversal_failure() {
        // Clone "succeeds" without producing a directory.
        let repo = RepoId::new("owner/ghost");
        let err = probe(&NoopClone, &repo).unwrap_err();
        assert!(matches!(err, Error::Traversal { .. }));
        assert_eq!(err.stage(), "size");
    }

    #[test]
    fn test_probes_use_distinct_scratch_dirs() {
        let git = FakeCheckout::new(vec![("file", 1)]);
        let repo = RepoId::new("owner/repo");

        probe(&git, &repo).unwrap();
        probe(&git, &repo).unwrap();

        let dests = git.dests.lock().unwrap();
        assert_eq!(dests.len(), 2);
        assert_ne!(dests[0], dests[1]);
        assert_ne!(dests[0].parent(), dests[1].parent());
    }

    #[test]
    fn test_checkout_size_ignores_directories() {
        let scratch = TempDir::new().unwrap();
        let root = scratch.path().join("repo");
        fs::create_dir_all(root.join("empty/dirs/only")).unwrap();
        fs::write(root.join("empty/dirs/only/file"), b"12345").unwrap();

        let repo = RepoId::new("owner/repo");
        assert_eq!(checkout_size(&repo, &root).unwrap(), 5);
    }
}
