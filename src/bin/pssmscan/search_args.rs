//! Options and driver shared by `pssmscan search` and `pssmscan target`.
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Args;
use pssmscan::*;

/// Sequence inputs, search limits and output files.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// FASTA file to search (repeatable).
    #[arg(short, long="seq", value_name="FILE")]
    pub seqs: Vec<PathBuf>,
    /// File listing one FASTA path per line (ignored when --seq is given).
    #[arg(short, long, value_name="FILE")]
    pub list: Option<PathBuf>,
    /// Directory scanned for *.fa, *.dna and *.seq files when neither --seq nor --list is given.
    #[arg(long, value_name="DIR", default_value=".")]
    pub dir: PathBuf,
    /// Number of hits to report.
    #[arg(short, long, default_value_t=20)]
    pub numhits: usize,
    /// Worker threads (0 = all cores).
    #[arg(short, long, default_value_t=1)]
    pub threads: usize,
    /// Score every window in full instead of pruning.
    #[arg(long)]
    pub no_prune: bool,
    /// Keep N symbols in the sequences (they score with the fallback weight).
    #[arg(long)]
    pub keep_n: bool,
    /// Write the report here instead of stdout.
    #[arg(short, long, value_name="FILE")]
    pub outfile: Option<PathBuf>,
    /// Also write the hits as a TSV table.
    #[arg(long, value_name="FILE")]
    pub tsv: Option<PathBuf>,
}

impl SearchArgs {
    fn options(&self, verbosity: Verbosity) -> SearchOptions {
        SearchOptions {
            max_hits: self.numhits,
            threads: self.threads,
            scan: ScanOptions {
                pruning: if self.no_prune { Pruning::Disabled } else { Pruning::Enabled },
                verbosity,
            },
            fasta: FastaOptions { keep_ambiguous: self.keep_n },
        }
    }

    fn source(&self) -> SequenceSource {
        SequenceSource::choose(self.seqs.clone(), self.list.clone(), self.dir.clone())
    }
}

/// Scan every input with `matrix` and write the report.
pub fn execute(matrix: ScoringMatrix, args: &SearchArgs, verbosity: Verbosity) -> Result<()> {
    if args.threads != 1 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build_global()
            .context("Failed to build thread pool")?;
    }

    let files = args.source().resolve().context("resolve sequence inputs")?;
    if files.is_empty() {
        log::warn!("no sequence files to search");
    }

    let mut search = TargetSearch::new(matrix, args.options(verbosity));
    for path in &files {
        // an unreadable file is skipped, the run goes on
        if let Err(err) = search.scan_file(path) {
            log::error!("{err}");
        }
    }

    let stats = search.stats();
    if stats.sequences == 0 {
        log::warn!("no genes searched");
    }
    log::debug!("{} windows evaluated, {} pruned, {} rejected, {} submitted",
        stats.windows, stats.pruned, stats.rejected, stats.submitted);

    match &args.outfile {
        Some(path) => {
            let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
            write_report(BufWriter::new(f), search.matrix(), search.hits(), stats)
                .with_context(|| format!("write {}", path.display()))?;
        }
        None => {
            let stdout = io::stdout();
            write_report(stdout.lock(), search.matrix(), search.hits(), stats).context("write report")?;
        }
    }

    if let Some(path) = &args.tsv {
        let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
        let mut w = BufWriter::new(f);
        write_tsv(&mut w, search.hits()).with_context(|| format!("write {}", path.display()))?;
        w.flush()?;
    }

    if !search.anomalies().is_empty() {
        log::warn!("unknown symbols scored with fallback weight {}: {}", UNKNOWN_SYMBOL_SCORE, search.anomalies());
    }
    Ok(())
}
