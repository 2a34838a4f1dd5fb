//! # The Dispatcher
//!
//! The work-dispatch loop at the heart of reposize. It reads repository
//! identifiers lazily from the input stream and, for each one, admits a work
//! unit through the [`Gate`], probes the repository on its own thread, and
//! hands the outcome to the [`Reporter`].
//!
//! ## Contract
//!
//! - At most `concurrency` units are between admission and release at any
//!   moment; admission is the only point where submission blocks.
//! - Reading the next identifier never waits on an in-flight probe.
//! - Every admitted unit reaches a terminal outcome before `run` returns;
//!   after end of input the dispatcher drains all outstanding units.
//! - A failed probe is terminal for that identifier and isolated to its
//!   unit; it never aborts the loop or any other unit.
//!
//! The probe itself sits behind the [`Prober`] trait so tests can drive the
//! loop with stub probes and instrument gate occupancy.

use std::io::{BufRead, Write};
use std::sync::Arc;
use std::thread;

use log::{debug, error};

use crate::config::Config;
use crate::error::Result;
use crate::gate::Gate;
use crate::probe::{self, GitOperations};
use crate::repo::RepoId;
use crate::reporter::Reporter;

/// Trait for probing one repository - allows stubbing in tests
pub trait Prober: Send + Sync {
    /// Measure one repository, returning its total byte size.
    fn probe(&self, repo: &RepoId) -> Result<u64>;
}

/// The production prober: clone, walk, clean up via [`probe::probe`].
pub struct CloneProber<G> {
    git: G,
}

impl<G: GitOperations> CloneProber<G> {
    pub fn new(git: G) -> Self {
        CloneProber { git }
    }
}

impl<G: GitOperations> Prober for CloneProber<G> {
    fn probe(&self, repo: &RepoId) -> Result<u64> {
        probe::probe(&self.git, repo)
    }
}

/// Process every identifier on `input`, at most `config.concurrency` at a
/// time, and report each outcome as soon as it is known.
///
/// Blank (whitespace-only) lines produce no work unit. Returns once every
/// admitted unit has reached its terminal outcome; only a failure to read
/// the input stream itself is an error.
pub fn run<R, W>(
    input: R,
    prober: Arc<dyn Prober>,
    reporter: Arc<Reporter<W>>,
    config: &Config,
) -> Result<()>
where
    R: BufRead,
    W: Write + Send + 'static,
{
    let gate = Arc::new(Gate::new(config.concurrency));
    let mut units = Vec::new();

    // A read failure stops admission but must not skip the drain below.
    let mut read_error = None;
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                read_error = Some(e);
                break;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let repo = RepoId::new(trimmed);

        // The only point where submission of new work may block.
        let permit = Arc::clone(&gate).acquire();
        debug!("sizing {}", repo);

        let label = repo.to_string();
        let prober = Arc::clone(&prober);
        let reporter = Arc::clone(&reporter);
        let handle = thread::spawn(move || {
            // Held for the unit's whole lifetime; dropped after the outcome
            // is reported, freeing the slot on every exit path.
            let _permit = permit;
            match prober.probe(&repo) {
                Ok(bytes) => reporter.success(&repo, bytes),
                Err(e) => reporter.failure(&e),
            }
        });
        units.push((label, handle));
    }

    // Drain: no unit is ever abandoned, even when reading stopped early.
    for (label, handle) in units {
        if handle.join().is_err() {
            error!("size probe for {} panicked", label);
        }
    }

    match read_error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
