//! CLI subcommand implementation. Use via `pssmscan target`.
use anyhow::{Context, Result};
use clap::Args;
use pssmscan::*;

use crate::search_args::{execute, SearchArgs};

/// Options for the `target` subcommand.
#[derive(Debug, Args)]
pub struct TargetCmd {
    /// IUPAC pattern; each position scores -1 for a matching base and 0 otherwise.
    #[arg(long, value_name="IUPAC")]
    pub pattern: String,
    #[command(flatten)]
    pub search: SearchArgs,
}

pub fn run(cmd: TargetCmd, verbosity: Verbosity) -> Result<()> {
    let matrix = ScoringMatrix::from_target(&cmd.pattern)
        .with_context(|| format!("build matrix for target {}", cmd.pattern))?;
    if verbosity >= Verbosity::Verbose {
        log::debug!("Target matrix:\n{matrix}");
    }
    execute(matrix, &cmd.search, verbosity)
}
