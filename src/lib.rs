//! # reposize Library
//!
//! Core functionality for the `reposize` command-line tool: measure the
//! on-disk size of remote git repositories by cloning each one into a
//! private scratch directory, summing its file sizes, and discarding the
//! clone, many repositories at a time up to a configurable bound.
//!
//! ## Quick Example
//!
//! ```
//! use std::sync::Arc;
//! use reposize::gate::Gate;
//!
//! let gate = Arc::new(Gate::new(2));
//! let permit = Arc::clone(&gate).acquire();
//! assert_eq!(gate.occupancy(), 1);
//! drop(permit);
//! assert_eq!(gate.occupancy(), 0);
//! ```
//!
//! ## Core Concepts
//!
//! - **Repository Identifiers (`repo`)**: opaque strings from the input
//!   stream, from which a clone URL and a checkout directory name are
//!   derived.
//! - **The Concurrency Gate (`gate`)**: a counting resource with RAII
//!   permits that bounds how many work units are in flight.
//! - **The Size Prober (`probe`)**: the clone → measure → cleanup sequence
//!   for one repository, with the clone behind a trait seam for testing.
//! - **The Dispatcher (`dispatcher`)**: the loop that reads identifiers,
//!   admits work units through the gate, and drains every outstanding unit
//!   before returning. This is the only component with real invariants.
//! - **The Reporter (`reporter`)**: serialized result rows on the output
//!   stream, failure diagnostics on the log stream, and the run summary.
//!
//! ## Execution Flow
//!
//! 1. The CLI captures an immutable [`config::Config`] at startup.
//! 2. The dispatcher reads stdin line by line, skipping blanks.
//! 3. Each identifier becomes a work unit once a gate slot is free; the
//!    unit probes its repository concurrently with further reading.
//! 4. Outcomes stream to the reporter as they complete, in no particular
//!    order; failures are logged and never abort other units.
//! 5. After end of input the dispatcher joins every outstanding unit, then
//!    the reporter logs the run totals.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod gate;
pub mod probe;
pub mod repo;
pub mod reporter;
