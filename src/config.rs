//! Run configuration
//!
//! Captured once at startup from the CLI and threaded explicitly into the
//! dispatcher. Nothing reads ambient process state mid-run, which keeps
//! lifetimes obvious and lets tests inject whatever configuration they need.

/// Immutable configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of repositories in flight at once.
    pub concurrency: usize,
    /// Whether per-repository progress goes to the diagnostic stream.
    pub verbose: bool,
}

impl Config {
    /// Build a configuration, clamping `concurrency` to at least 1.
    pub fn new(concurrency: usize, verbose: bool) -> Self {
        Config {
            concurrency: concurrency.max(1),
            verbose,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new(10, false)
    }
}
