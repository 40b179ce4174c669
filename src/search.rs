//! Whole-run orchestration: one matrix, one result set, many sequence files.
//!
//! [`TargetSearch`] owns the [`ScoringMatrix`] and the [`TopKResults`] for a
//! run, feeds every sequence buffer through a [`Scanner`] (or
//! [`scan_parallel`] when more than one thread is requested), and keeps the
//! totals the final report needs.
//!
//! ### Example
//! ```rust
//! use pssmscan::{ScoringMatrix, SearchOptions, TargetSearch, parse_fasta};
//! let matrix = ScoringMatrix::from_target("TATA").unwrap();
//! let mut search = TargetSearch::new(matrix, SearchOptions { max_hits: 3, ..Default::default() });
//! let recs = parse_fasta(">p\nGCGTATAGC\n", &Default::default());
//! search.scan_records(&recs);
//! assert_eq!(search.stats().sequences, 1);
//! assert_eq!(search.hits().matches()[0].score, -4.0);
//! ```

use std::path::Path;

use crate::common::{PssmScanError, Verbosity};
use crate::fasta::{read_fasta, FastaOptions, SequenceRecord};
use crate::hits::TopKResults;
use crate::matrix::{ScoringMatrix, SymbolAnomalies};
use crate::scanner::{scan_parallel, ScanOptions, ScanStats, Scanner};

/// Run-level options.
#[derive(Clone, Debug)]
pub struct SearchOptions {
    /// Number of hits to keep (K).
    pub max_hits: usize,
    /// Worker threads; `1` scans sequentially, anything else uses the rayon pool.
    pub threads: usize,
    pub scan: ScanOptions,
    pub fasta: FastaOptions,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self { max_hits: 20, threads: 1, scan: ScanOptions::default(), fasta: FastaOptions::default() }
    }
}

/// A search of one matrix over any number of sequences.
#[derive(Debug)]
pub struct TargetSearch {
    matrix: ScoringMatrix,
    hits: TopKResults,
    stats: ScanStats,
    anomalies: SymbolAnomalies,
    options: SearchOptions,
}

impl TargetSearch {
    pub fn new(matrix: ScoringMatrix, options: SearchOptions) -> Self {
        Self {
            matrix,
            hits: TopKResults::new(options.max_hits),
            stats: ScanStats::default(),
            anomalies: SymbolAnomalies::default(),
            options,
        }
    }

    /// Load a sequence file and scan every record in it.
    ///
    /// Only an unreadable file is an error; the search state is untouched in
    /// that case, so callers may report it and carry on.
    pub fn scan_file(&mut self, path: &Path) -> Result<(), PssmScanError> {
        if self.options.scan.verbosity >= Verbosity::Normal {
            log::info!("Reading sequence file {}", path.display());
        }
        let records = read_fasta(path, &self.options.fasta)?;
        self.scan_records(&records);
        Ok(())
    }

    /// Scan records already in memory.
    pub fn scan_records(&mut self, records: &[SequenceRecord]) {
        if self.options.threads == 1 || records.len() < 2 {
            let mut scanner = Scanner::new(&self.matrix, &self.options.scan);
            for record in records {
                scanner.scan(record, &mut self.hits);
            }
            let (stats, anomalies) = scanner.finish();
            self.stats.merge(&stats);
            self.anomalies.merge(&anomalies);
        } else {
            let outcome = scan_parallel(&self.matrix, records, self.options.max_hits, &self.options.scan);
            self.hits.merge(outcome.results);
            self.stats.merge(&outcome.stats);
            self.anomalies.merge(&outcome.anomalies);
        }
    }

    pub fn matrix(&self) -> &ScoringMatrix { &self.matrix }

    pub fn hits(&self) -> &TopKResults { &self.hits }

    pub fn stats(&self) -> &ScanStats { &self.stats }

    /// Unknown symbols met while scoring, over the whole run.
    pub fn anomalies(&self) -> &SymbolAnomalies { &self.anomalies }

    pub fn options(&self) -> &SearchOptions { &self.options }
}
