//! Command-line interface for the `pssmscan` crate.
//!
//! Subcommands are implemented in separate files (modules) under `src/bin/pssmscan/`:
//! - `search_cmd.rs`
//! - `target_cmd.rs`
//! - `show_cmd.rs`
//!
//! `search_args.rs` holds the sequence-input and output options the two
//! searching subcommands share.
use clap::{Parser, Subcommand};
use anyhow::Result;
use pssmscan::Verbosity;

#[derive(Debug, Parser)]
#[command(name="pssmscan", version=env!("CARGO_PKG_VERSION"), about="Branch-and-bound PSSM search over DNA sequences", disable_help_subcommand=true)]
struct Cli {
    /// Print matrix dumps, priority tables and scan progress.
    #[arg(short, long, global=true, conflicts_with="minimal")]
    verbose: bool,
    /// Only print warnings and errors besides the report.
    #[arg(short, long, global=true)]
    minimal: bool,
    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn verbosity(&self) -> Verbosity {
        if self.verbose {
            Verbosity::Verbose
        } else if self.minimal {
            Verbosity::Minimal
        } else {
            Verbosity::Normal
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search sequences with a scoring matrix file.
    Search(search_cmd::SearchCmd),
    /// Search sequences with an IUPAC target pattern.
    Target(target_cmd::TargetCmd),
    /// Print a scoring matrix with its priority order and bounds.
    Show(show_cmd::ShowCmd),
}

#[path = "pssmscan/search_args.rs"] mod search_args;
#[path = "pssmscan/search_cmd.rs"] mod search_cmd;
#[path = "pssmscan/target_cmd.rs"] mod target_cmd;
#[path = "pssmscan/show_cmd.rs"] mod show_cmd;

fn init_logging(verbosity: Verbosity) {
    // RUST_LOG may still narrow or widen individual modules
    env_logger::builder()
        .filter_level(verbosity.level_filter())
        .format_timestamp(None)
        .format_target(false)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let verbosity = cli.verbosity();
    init_logging(verbosity);
    match cli.command {
        Command::Search(cmd) => search_cmd::run(cmd, verbosity),
        Command::Target(cmd) => target_cmd::run(cmd, verbosity),
        Command::Show(cmd) => show_cmd::run(cmd, verbosity),
    }
}
