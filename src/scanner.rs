//! Branch-and-bound window scan over both strands.
//!
//! For every start offset `s` in `0..=len(seq) - L` the [`Scanner`] scores the
//! forward window and then the reverse-complement window, each time visiting
//! matrix positions in [`ScoringMatrix::priority`] order:
//!
//! - forward, position `p` reads `seq[s + p]`;
//! - reverse, position `p` reads `complement(seq[s + L - p - 1])`, so the raw
//!   matrix position stays in the matrix's own frame.
//!
//! The rejection threshold is read from [`TopKResults`] once per window and
//! orientation. Once the results are full, a window is abandoned as soon as
//! `running + best_remaining[step]` exceeds it, and a completed window is only
//! submitted if it scores strictly below it. Pruning never changes the final
//! results; [`Pruning::Disabled`] exists to check exactly that.
//!
//! ### Example
//! ```rust
//! use pssmscan::{ScoringMatrix, Scanner, ScanOptions, SequenceRecord, TopKResults};
//! let matrix = ScoringMatrix::from_target("GAATTC").unwrap();
//! let record = SequenceRecord { id: "toy".into(), seq: b"TTGAATTCAA".to_vec() };
//! let mut results = TopKResults::new(1);
//! let mut scanner = Scanner::new(&matrix, &ScanOptions::default());
//! scanner.scan(&record, &mut results);
//! assert_eq!(results.matches()[0].offset, 2);
//! assert_eq!(results.matches()[0].score, -6.0);
//! ```

use rayon::prelude::*;

use crate::common::{complement, reverse_complement, Verbosity};
use crate::fasta::SequenceRecord;
use crate::hits::{Match, TopKResults};
use crate::matrix::{ScoringMatrix, SymbolAnomalies};

/// Start offsets between progress messages at [`Verbosity::Verbose`].
const PROGRESS_INTERVAL: usize = 100_000;

/// Whether the scan may abandon windows early.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Pruning {
    /// Abandon windows that can no longer beat the current worst result.
    #[default]
    Enabled,
    /// Score every window completely and submit it.
    Disabled,
}

/// Options for a [`Scanner`].
#[derive(Clone, Debug, Default)]
pub struct ScanOptions {
    pub pruning: Pruning,
    pub verbosity: Verbosity,
}

/// Window orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strand {
    Forward,
    Reverse,
}

/// Counters accumulated over one or more scans.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Sequence buffers scanned.
    pub sequences: usize,
    /// Symbols in those buffers.
    pub symbols: usize,
    /// Window evaluations started (two per start offset).
    pub windows: u64,
    /// Evaluations abandoned before the last position.
    pub pruned: u64,
    /// Completed windows that could not beat the worst retained match.
    pub rejected: u64,
    /// Windows handed to the results.
    pub submitted: u64,
}

impl ScanStats {
    pub fn merge(&mut self, other: &ScanStats) {
        self.sequences += other.sequences;
        self.symbols += other.symbols;
        self.windows += other.windows;
        self.pruned += other.pruned;
        self.rejected += other.rejected;
        self.submitted += other.submitted;
    }
}

/// Scans sequence buffers against one matrix. Holds the per-scan counters and
/// the unknown-symbol diagnostics; the matrix is only read.
#[derive(Debug)]
pub struct Scanner<'m> {
    matrix: &'m ScoringMatrix,
    options: ScanOptions,
    stats: ScanStats,
    anomalies: SymbolAnomalies,
}

impl<'m> Scanner<'m> {
    pub fn new(matrix: &'m ScoringMatrix, options: &ScanOptions) -> Self {
        Self { matrix, options: options.clone(), stats: ScanStats::default(), anomalies: SymbolAnomalies::default() }
    }

    /// Scan every window of `record` on both strands, submitting accepted
    /// windows to `results`.
    pub fn scan(&mut self, record: &SequenceRecord, results: &mut TopKResults) {
        let seq = record.seq.as_slice();
        let len = self.matrix.len();
        let verbosity = self.options.verbosity;
        self.stats.sequences += 1;
        self.stats.symbols += seq.len();

        if verbosity >= Verbosity::Normal {
            log::info!("Searching gene {}", record);
        }
        if seq.len() < len {
            log::debug!("{}: shorter than the {}-position matrix, nothing to scan", record.id, len);
            return;
        }

        for start in 0..=seq.len() - len {
            for strand in [Strand::Forward, Strand::Reverse] {
                let threshold = match self.options.pruning {
                    Pruning::Enabled => results.rejection_threshold(),
                    Pruning::Disabled => None,
                };
                let Some(score) = self.score_window(seq, start, strand, threshold) else { continue };
                let window = &seq[start..start + len];
                let window = match strand {
                    Strand::Forward => window.to_vec(),
                    Strand::Reverse => reverse_complement(window),
                };
                results.insert(Match {
                    score,
                    window,
                    source_id: record.id.clone(),
                    offset: start,
                    reverse: strand == Strand::Reverse,
                });
                self.stats.submitted += 1;
            }
            if verbosity >= Verbosity::Verbose && start > 0 && start % PROGRESS_INTERVAL == 0 {
                log::debug!("{}: {} positions searched", record.id, start);
            }
        }
    }

    /// Score the window at `start` in priority order.
    ///
    /// With a `threshold`, returns `None` as soon as the window provably cannot
    /// score below it, or when its full score does not. Without one, always
    /// returns the full score.
    pub fn score_window(&mut self, seq: &[u8], start: usize, strand: Strand, threshold: Option<f64>) -> Option<f64> {
        let matrix = self.matrix;
        let len = matrix.len();
        let best_remaining = matrix.best_remaining();
        self.stats.windows += 1;

        let mut score = 0.0;
        for (step, &p) in matrix.priority().iter().enumerate() {
            let symbol = match strand {
                Strand::Forward => seq[start + p],
                // forward matrix position, mirrored and complemented symbol
                Strand::Reverse => complement(seq[start + len - p - 1]),
            };
            score += matrix.score(p, symbol, &mut self.anomalies);
            if let Some(worst) = threshold {
                if step + 1 < len && score + best_remaining[step] > worst {
                    self.stats.pruned += 1;
                    return None;
                }
            }
        }
        if let Some(worst) = threshold {
            if score >= worst {
                self.stats.rejected += 1;
                return None;
            }
        }
        Some(score)
    }

    pub fn stats(&self) -> &ScanStats { &self.stats }

    pub fn anomalies(&self) -> &SymbolAnomalies { &self.anomalies }

    /// Counters and diagnostics gathered so far.
    pub fn finish(self) -> (ScanStats, SymbolAnomalies) {
        (self.stats, self.anomalies)
    }
}

/// Results of [`scan_parallel`].
#[derive(Debug)]
pub struct ScanOutcome {
    pub results: TopKResults,
    pub stats: ScanStats,
    pub anomalies: SymbolAnomalies,
}

/// Scan `records` on the current rayon pool, one local result set per record,
/// merged in record order.
///
/// The merged results equal those of scanning the records one after another
/// into a single [`TopKResults`] of the same capacity.
pub fn scan_parallel(
    matrix: &ScoringMatrix,
    records: &[SequenceRecord],
    capacity: usize,
    options: &ScanOptions,
) -> ScanOutcome {
    let partials: Vec<(TopKResults, ScanStats, SymbolAnomalies)> = records
        .par_iter()
        .map(|record| {
            let mut local = TopKResults::new(capacity);
            let mut scanner = Scanner::new(matrix, options);
            scanner.scan(record, &mut local);
            let (stats, anomalies) = scanner.finish();
            (local, stats, anomalies)
        })
        .collect();

    let mut outcome = ScanOutcome {
        results: TopKResults::new(capacity),
        stats: ScanStats::default(),
        anomalies: SymbolAnomalies::default(),
    };
    for (local, stats, anomalies) in partials {
        outcome.results.merge(local);
        outcome.stats.merge(&stats);
        outcome.anomalies.merge(&anomalies);
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn record(id: &str, seq: &[u8]) -> SequenceRecord {
        SequenceRecord { id: id.into(), seq: seq.to_vec() }
    }

    fn scan_one(matrix: &ScoringMatrix, rec: &SequenceRecord, capacity: usize, pruning: Pruning) -> (TopKResults, ScanStats) {
        let mut results = TopKResults::new(capacity);
        let mut scanner = Scanner::new(matrix, &ScanOptions { pruning, ..Default::default() });
        scanner.scan(rec, &mut results);
        (results, scanner.finish().0)
    }

    fn key(m: &Match) -> (i64, usize, bool) {
        ((m.score * 4.0) as i64, m.offset, m.reverse)
    }

    fn random_dna(rng: &mut StdRng, n: usize) -> Vec<u8> {
        (0..n).map(|_| b"ACGT"[rng.gen_range(0..4)]).collect()
    }

    fn random_matrix(rng: &mut StdRng, len: usize) -> ScoringMatrix {
        let rows: Vec<Vec<f64>> = (0..len)
            .map(|_| (0..4).map(|_| rng.gen_range(-4i32..=4) as f64 * 0.5).collect())
            .collect();
        ScoringMatrix::from_weights(b"ACGT", &rows).unwrap()
    }

    /// Every candidate in scan order, stably sorted, first `capacity` kept.
    fn brute_force(matrix: &ScoringMatrix, rec: &SequenceRecord, capacity: usize) -> Vec<(i64, usize, bool)> {
        let len = matrix.len();
        let mut anomalies = SymbolAnomalies::default();
        let mut all = Vec::new();
        if rec.seq.len() >= len {
            for s in 0..=rec.seq.len() - len {
                let w = &rec.seq[s..s + len];
                all.push(((matrix.score_window(w, &mut anomalies) * 4.0) as i64, s, false));
                all.push(((matrix.score_window(&reverse_complement(w), &mut anomalies) * 4.0) as i64, s, true));
            }
        }
        all.sort_by_key(|c| c.0);
        all.truncate(capacity);
        all
    }

    #[test]
    fn two_position_scenario() {
        let m = ScoringMatrix::from_weights(b"ACGT", &[vec![0.0, 1.0, 1.0, 1.0], vec![1.0, 1.0, 1.0, 0.0]]).unwrap();
        let (results, stats) = scan_one(&m, &record("s1", b"AT"), 1, Pruning::Enabled);
        assert_eq!(results.len(), 1);
        let hit = &results.matches()[0];
        assert_eq!(hit.score, 0.0);
        assert_eq!(hit.window, b"AT".to_vec());
        assert_eq!(hit.offset, 0);
        assert!(!hit.reverse);
        assert_eq!(hit.to_string(), "0.00 AT s1 0");
        assert_eq!(stats.windows, 2);
        assert_eq!(stats.sequences, 1);
        assert_eq!(stats.symbols, 2);
    }

    #[test]
    fn reverse_hit_reports_reverse_complement_window() {
        let m = ScoringMatrix::from_target("AAC").unwrap();
        // GTT on the forward strand is AAC on the reverse strand
        let (results, _) = scan_one(&m, &record("r", b"CCGTTCC"), 1, Pruning::Enabled);
        let hit = &results.matches()[0];
        assert!(hit.reverse);
        assert_eq!(hit.offset, 2);
        assert_eq!(hit.window, b"AAC".to_vec());
        assert_eq!(hit.score, -3.0);
    }

    #[test]
    fn short_and_empty_sequences_produce_nothing() {
        let m = ScoringMatrix::from_target("ACGT").unwrap();
        let (results, stats) = scan_one(&m, &record("short", b"ACG"), 5, Pruning::Enabled);
        assert!(results.is_empty());
        assert_eq!(stats.windows, 0);
        assert_eq!(stats.symbols, 3);
        let (results, _) = scan_one(&m, &record("empty", b""), 5, Pruning::Enabled);
        assert!(results.is_empty());
    }

    #[test]
    fn unknown_symbols_score_neutral_and_scan_continues() {
        let m = ScoringMatrix::from_target("AA").unwrap();
        let rec = record("n", b"ANAAN");
        let mut results = TopKResults::new(10);
        let mut scanner = Scanner::new(&m, &ScanOptions::default());
        scanner.scan(&rec, &mut results);
        assert_eq!(results.len(), 8);
        assert_eq!(results.matches()[0].score, -2.0);
        assert!(scanner.anomalies().count(b'N') > 0);
    }

    #[test]
    fn zero_capacity_prunes_everything() {
        let m = ScoringMatrix::from_target("ACG").unwrap();
        let (results, stats) = scan_one(&m, &record("z", b"ACGACGACG"), 0, Pruning::Enabled);
        assert!(results.is_empty());
        assert!(results.is_full());
        assert_eq!(stats.submitted, 1);
        assert_eq!(stats.pruned + stats.rejected, stats.windows - 1);
    }

    #[test]
    fn pruning_skips_work_on_a_random_genome() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let m = random_matrix(&mut rng, 16);
        let rec = record("chr", &random_dna(&mut rng, 20_000));
        let (pruned, stats) = scan_one(&m, &rec, 10, Pruning::Enabled);
        let (full, full_stats) = scan_one(&m, &rec, 10, Pruning::Disabled);
        assert!(stats.pruned > stats.windows / 2, "{:?}", stats);
        assert_eq!(full_stats.pruned, 0);
        assert_eq!(pruned.matches(), full.matches());
        assert_eq!(pruned.matches().iter().map(key).collect::<Vec<_>>(), brute_force(&m, &rec, 10));
    }

    #[test]
    fn parallel_matches_sequential() {
        let mut rng = StdRng::seed_from_u64(42);
        let m = random_matrix(&mut rng, 8);
        let records: Vec<SequenceRecord> = (0..6)
            .map(|i| record(&format!("seq{}", i), &random_dna(&mut rng, 500 + 100 * i)))
            .collect();

        let mut sequential = TopKResults::new(7);
        let mut scanner = Scanner::new(&m, &ScanOptions::default());
        for r in &records {
            scanner.scan(r, &mut sequential);
        }
        let outcome = scan_parallel(&m, &records, 7, &ScanOptions::default());
        assert_eq!(outcome.results.matches(), sequential.matches());
        assert_eq!(outcome.stats.sequences, 6);
        assert_eq!(outcome.stats.symbols, scanner.stats().symbols);
    }

    fn dna(max: usize) -> impl Strategy<Value = Vec<u8>> {
        prop::collection::vec(prop::sample::select(b"ACGT".to_vec()), 0..max)
    }

    fn matrix_rows() -> impl Strategy<Value = Vec<Vec<f64>>> {
        prop::collection::vec(prop::collection::vec((-6i32..6).prop_map(|w| w as f64 * 0.25), 4), 1..7)
    }

    proptest! {
        #[test]
        fn pruning_does_not_change_results(rows in matrix_rows(), seq in dna(120), capacity in 0usize..8) {
            let m = ScoringMatrix::from_weights(b"ACGT", &rows).unwrap();
            let rec = record("p", &seq);
            let (with, _) = scan_one(&m, &rec, capacity, Pruning::Enabled);
            let (without, _) = scan_one(&m, &rec, capacity, Pruning::Disabled);
            let with: Vec<_> = with.iter().map(key).collect();
            prop_assert_eq!(&with, &without.iter().map(key).collect::<Vec<_>>());
            prop_assert_eq!(with, brute_force(&m, &rec, capacity));
        }

        #[test]
        fn reverse_score_equals_forward_score_of_reverse_complement(rows in matrix_rows(), seq in dna(40)) {
            let m = ScoringMatrix::from_weights(b"ACGT", &rows).unwrap();
            prop_assume!(seq.len() >= m.len());
            let mut scanner = Scanner::new(&m, &ScanOptions::default());
            for s in 0..=seq.len() - m.len() {
                let rc = reverse_complement(&seq[s..s + m.len()]);
                let reverse = scanner.score_window(&seq, s, Strand::Reverse, None);
                let forward = scanner.score_window(&rc, 0, Strand::Forward, None);
                prop_assert_eq!(reverse, forward);
            }
        }
    }
}
