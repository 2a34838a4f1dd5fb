//! CLI argument parsing and run wiring

use std::io;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;

use reposize::config::Config;
use reposize::dispatcher::{self, CloneProber, Prober};
use reposize::probe::SystemGit;
use reposize::reporter::Reporter;

/// Measure the on-disk size of remote git repositories
///
/// Reads repository identifiers from stdin, one per line, clones each into
/// a private scratch directory, sums its file sizes, deletes the clone, and
/// writes one `<bytes>,<identifier>` row per sized repository to stdout.
/// Failures are logged to stderr and never stop the run.
#[derive(Parser, Debug)]
#[command(name = "reposize")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Maximum number of repositories cloned and measured at once
    #[arg(short = 'j', long, value_name = "N", default_value_t = 10)]
    concurrency: usize,

    /// Log per-repository progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Execute the run over stdin/stdout.
    pub fn execute(self) -> Result<()> {
        let config = Config::new(self.concurrency, self.verbose);

        // Diagnostics go to stderr; --verbose raises the default level so
        // per-repository progress shows up. RUST_LOG still wins if set.
        let default_level = if config.verbose { "debug" } else { "warn" };
        env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

        let prober: Arc<dyn Prober> = Arc::new(CloneProber::new(SystemGit));
        let reporter = Arc::new(Reporter::new(io::stdout()));

        dispatcher::run(io::stdin().lock(), prober, Arc::clone(&reporter), &config)?;
        reporter.summary();
        Ok(())
    }
}
