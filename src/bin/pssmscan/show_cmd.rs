//! CLI subcommand implementation. Use via `pssmscan show`.
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Args;
use pssmscan::*;

/// Options for the `show` subcommand.
#[derive(Debug, Args)]
pub struct ShowCmd {
    /// Scoring matrix file.
    #[arg(short, long, value_name="FILE")]
    pub pssm: PathBuf,
    /// Negate every weight before printing.
    #[arg(short, long)]
    pub invert: bool,
}

pub fn run(cmd: ShowCmd, verbosity: Verbosity) -> Result<()> {
    // the tables are printed below, keep the loader quiet about them
    let opts = MatrixOptions { invert: cmd.invert, verbosity: verbosity.min(Verbosity::Normal) };
    let matrix = ScoringMatrix::from_file(&cmd.pssm, &opts)
        .with_context(|| format!("load scoring matrix {}", cmd.pssm.display()))?;
    print!("{matrix}");
    println!();
    print!("{}", matrix.priority_tables());
    println!();
    println!("Best possible score: {}", matrix.best_score());
    Ok(())
}
