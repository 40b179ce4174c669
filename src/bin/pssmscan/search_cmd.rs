//! CLI subcommand implementation. Use via `pssmscan search`.
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Args;
use pssmscan::*;

use crate::search_args::{execute, SearchArgs};

/// Options for the `search` subcommand.
#[derive(Debug, Args)]
pub struct SearchCmd {
    /// Scoring matrix file (`key` line, then one weight row per position).
    #[arg(short, long, value_name="FILE")]
    pub pssm: PathBuf,
    /// Negate every weight, so the highest-scoring windows rank first.
    #[arg(short, long)]
    pub invert: bool,
    #[command(flatten)]
    pub search: SearchArgs,
}

pub fn run(cmd: SearchCmd, verbosity: Verbosity) -> Result<()> {
    let opts = MatrixOptions { invert: cmd.invert, verbosity };
    let matrix = ScoringMatrix::from_file(&cmd.pssm, &opts)
        .with_context(|| format!("load scoring matrix {}", cmd.pssm.display()))?;
    execute(matrix, &cmd.search, verbosity)
}
