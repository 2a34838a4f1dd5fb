//! # reposize CLI
//!
//! Binary entry point for the `reposize` command-line tool.
//!
//! Its responsibilities are parsing command-line arguments with `clap`,
//! initializing logging, and running the dispatcher over stdin/stdout. The
//! core logic lives in the library crate; the binary is a thin wrapper.

mod cli;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
