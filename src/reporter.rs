//! # The Reporter
//!
//! Sole owner of the shared output stream. Successful probes become one
//! `<bytes>,<identifier>` row each; failures become diagnostic lines on the
//! log stream and never touch the output. A mutex around the writer keeps
//! concurrent rows from interleaving.
//!
//! The reporter also accumulates run totals so the end-of-run summary does
//! not need any shared counters inside the work units themselves.

use std::io::Write;
use std::sync::Mutex;

use log::{error, info};

use crate::error::Error;
use crate::repo::RepoId;

/// Serializes result rows from concurrent work units onto one writer.
pub struct Reporter<W: Write> {
    inner: Mutex<Inner<W>>,
}

struct Inner<W> {
    out: W,
    total_bytes: u64,
    sized: u64,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Reporter {
            inner: Mutex::new(Inner {
                out,
                total_bytes: 0,
                sized: 0,
            }),
        }
    }

    /// Emit one `<bytes>,<identifier>` row.
    ///
    /// Rows from concurrent units never interleave. A write failure is
    /// logged rather than propagated; the run keeps going.
    pub fn success(&self, repo: &RepoId, bytes: u64) {
        let mut inner = self.inner.lock().unwrap();
        inner.total_bytes += bytes;
        inner.sized += 1;
        if let Err(e) = writeln!(inner.out, "{},{}", bytes, repo) {
            error!("writing result row for {}: {}", repo, e);
        }
    }

    /// Log one diagnostic line for a failed probe.
    ///
    /// The error's display already names the identifier and stage; nothing
    /// goes to the output stream.
    pub fn failure(&self, err: &Error) {
        error!("{}", err);
    }

    /// Log run totals to the diagnostic stream, never to the output stream.
    pub fn summary(&self) {
        let inner = self.inner.lock().unwrap();
        let gib = inner.total_bytes as f64 / (1024.0 * 1024.0 * 1024.0);
        info!(
            "{} bytes ({:.3}G) in {} repos",
            inner.total_bytes, gib, inner.sized
        );
    }

    /// Running totals: (bytes across successful probes, successful probes).
    pub fn totals(&self) -> (u64, u64) {
        let inner = self.inner.lock().unwrap();
        (inner.total_bytes, inner.sized)
    }

    /// Recover the writer, e.g. to inspect captured output in tests.
    pub fn into_inner(self) -> W {
        self.inner.into_inner().unwrap().out
    }
}
