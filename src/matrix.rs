//! Position-specific scoring matrices with a precomputed scan order.
//!
//! A [`ScoringMatrix`] holds one weight per alphabet symbol for each of the `L`
//! window positions. **Lower weights are better**: a perfect site scores the
//! sum of each position's minimum weight.
//!
//! At construction time the matrix also derives the two tables that make the
//! branch-and-bound scan cheap:
//!
//! - [`priority`](ScoringMatrix::priority): positions ordered by weight range
//!   (`|best - worst|`), widest first, ties by position index. Scoring the most
//!   discriminating positions first makes early rejection fire sooner.
//! - [`best_remaining`](ScoringMatrix::best_remaining): for step `i` of the
//!   priority order, the sum of the best weights of every position visited
//!   after step `i`. `running + best_remaining[i]` is therefore a lower bound on
//!   the final score of a partially scored window.
//!
//! ## Matrix files
//! ```text
//! # comment
//! key A C G T
//! 0  0.0 1.2 1.2 0.8
//! 1  1.5 0.0 1.5 1.5
//! ```
//! The `key` token is case-insensitive and its letters are uppercased. Every
//! other non-blank line is an integer position label (informational; rows are
//! taken in file order) followed by exactly one weight per key letter.
//!
//! ### Example
//! ```rust
//! use pssmscan::{ScoringMatrix, MatrixOptions};
//! let m = ScoringMatrix::parse("key A C G T\n0 0 1 1 1\n1 1 1 1 0\n", &MatrixOptions::default()).unwrap();
//! assert_eq!(m.len(), 2);
//! assert_eq!(m.weight(1, b'T'), Some(0.0));
//! assert_eq!(m.best_remaining()[m.len() - 1], 0.0);
//! ```

use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::fs;
use std::path::Path;

use crate::common::{degenerate_bases, PssmScanError, Verbosity, NUCLEOTIDES};

/// Score used for a symbol that is not in the matrix alphabet.
///
/// Zero treats an unknown symbol as neutral rather than as a mismatch. The
/// lookup reports it through [`SymbolAnomalies`] so the choice stays visible.
pub const UNKNOWN_SYMBOL_SCORE: f64 = 0.0;

/// Weight given to nucleotides allowed by a degenerate target symbol.
pub const PREFERRED_WEIGHT: f64 = -1.0;

/// Weight given to nucleotides excluded by a degenerate target symbol.
pub const NEUTRAL_WEIGHT: f64 = 0.0;

const NO_SYMBOL: u8 = u8::MAX;

/// Options for reading a matrix file.
#[derive(Clone, Debug, Default)]
pub struct MatrixOptions {
    /// Negate every weight, for matrices written with "higher = better" weights.
    pub invert: bool,
    /// What to report while loading.
    pub verbosity: Verbosity,
}

/// Counts of symbols that had no column in the matrix during scoring.
///
/// This is the diagnostics channel of [`ScoringMatrix::score`]: the first
/// occurrence of each symbol is logged, later ones are only counted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolAnomalies {
    counts: BTreeMap<u8, u64>,
}

impl SymbolAnomalies {
    /// Note one failed lookup of `symbol` at raw matrix `position`.
    pub fn record(&mut self, symbol: u8, position: usize) {
        let count = self.counts.entry(symbol).or_insert(0);
        if *count == 0 {
            log::warn!("score failed for unknown character ({}) at position {}; scoring it as {}",
                (symbol as char).escape_default(), position, UNKNOWN_SYMBOL_SCORE);
        }
        *count += 1;
    }

    /// Fold another set of counts into this one without logging again.
    pub fn merge(&mut self, other: &SymbolAnomalies) {
        for (&symbol, &n) in &other.counts {
            *self.counts.entry(symbol).or_insert(0) += n;
        }
    }

    /// Failed lookups for one symbol.
    pub fn count(&self, symbol: u8) -> u64 {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    /// Failed lookups over all symbols.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// `(symbol, count)` pairs in byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&s, &n)| (s, n))
    }
}

impl fmt::Display for SymbolAnomalies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (symbol, n)) in self.iter().enumerate() {
            if i > 0 { f.write_str(", ")?; }
            write!(f, "'{}' x{}", (symbol as char).escape_default(), n)?;
        }
        Ok(())
    }
}

/// An immutable weight table plus its derived scan order and pruning bounds.
#[derive(Clone, Debug)]
pub struct ScoringMatrix {
    alphabet: Vec<u8>,
    /// Byte -> column, `NO_SYMBOL` when absent.
    index: [u8; 256],
    /// Position labels as given in the input.
    sites: Vec<i64>,
    /// Row-major weights, `alphabet.len()` per position.
    table: Vec<f64>,
    best: Vec<f64>,
    ranges: Vec<f64>,
    priority: Vec<usize>,
    best_remaining: Vec<f64>,
}

impl ScoringMatrix {
    /// Build a matrix from one weight row per position over `alphabet`.
    ///
    /// Alphabet letters are uppercased; position labels are `0..L`.
    pub fn from_weights(alphabet: &[u8], rows: &[Vec<f64>]) -> Result<Self, PssmScanError> {
        let mut table = Vec::with_capacity(rows.len() * alphabet.len());
        for (i, row) in rows.iter().enumerate() {
            if row.len() != alphabet.len() {
                return Err(PssmScanError::InvalidWeights(format!(
                    "position {} has {} weights, alphabet has {} symbols", i, row.len(), alphabet.len())));
            }
            if let Some(w) = row.iter().find(|w| !w.is_finite()) {
                return Err(PssmScanError::InvalidWeights(format!("position {} has non-finite weight {}", i, w)));
            }
            table.extend_from_slice(row);
        }
        let sites = (0..rows.len() as i64).collect();
        Self::build(alphabet.iter().map(u8::to_ascii_uppercase).collect(), sites, table)
    }

    /// Derive a binary matrix from a degenerate (IUPAC) target pattern over `ACGT`.
    ///
    /// Nucleotides consistent with the pattern symbol get [`PREFERRED_WEIGHT`],
    /// the others [`NEUTRAL_WEIGHT`]. An unrecognized symbol is reported and
    /// yields an all-neutral position.
    pub fn from_target(pattern: &str) -> Result<Self, PssmScanError> {
        let pattern = pattern.trim();
        let mut table = Vec::with_capacity(pattern.len() * NUCLEOTIDES.len());
        for (i, code) in pattern.bytes().enumerate() {
            let code = code.to_ascii_uppercase();
            let bases: &[u8] = match degenerate_bases(code) {
                Some(bases) => bases,
                None => {
                    log::warn!("letter {} at target position {} not recognized", (code as char).escape_default(), i);
                    &[]
                }
            };
            table.extend(NUCLEOTIDES.iter().map(|nt| if bases.contains(nt) { PREFERRED_WEIGHT } else { NEUTRAL_WEIGHT }));
        }
        let sites = (0..pattern.len() as i64).collect();
        Self::build(NUCLEOTIDES.to_vec(), sites, table)
    }

    /// Read a matrix file (see the module docs for the format).
    pub fn from_file(path: &Path, opts: &MatrixOptions) -> Result<Self, PssmScanError> {
        if opts.verbosity >= Verbosity::Normal {
            log::info!("Reading PSSM file {}", path.display());
        }
        let text = fs::read_to_string(path)
            .map_err(|source| PssmScanError::Io { path: path.to_path_buf(), source })?;
        Self::parse(&text, opts)
    }

    /// Parse matrix text.
    pub fn parse(text: &str, opts: &MatrixOptions) -> Result<Self, PssmScanError> {
        let mut alphabet: Option<Vec<u8>> = None;
        let mut sites = Vec::new();
        let mut table = Vec::new();

        for (i, raw) in text.lines().enumerate() {
            let line = i + 1;
            let mut tokens = raw.split_whitespace();
            let Some(first) = tokens.next() else { continue };
            if first.starts_with('#') { continue; }

            if first.eq_ignore_ascii_case("key") {
                if alphabet.is_some() {
                    return Err(PssmScanError::DuplicateKey { line });
                }
                alphabet = Some(parse_key(tokens, line)?);
                continue;
            }

            let site: i64 = first.parse().map_err(|_| PssmScanError::Parse {
                line,
                message: format!("expected an integer position index, found '{}'", first),
            })?;
            let weights = tokens
                .map(|tok| parse_weight(tok, site, line))
                .collect::<Result<Vec<f64>, _>>()?;
            let Some(expected) = alphabet.as_ref().map(Vec::len) else {
                return Err(PssmScanError::MissingKey);
            };
            if weights.len() != expected {
                return Err(PssmScanError::WeightCount { line, site, found: weights.len(), expected });
            }
            sites.push(site);
            table.extend(weights);
        }

        let alphabet = alphabet.ok_or(PssmScanError::MissingKey)?;
        if opts.invert {
            table.iter_mut().for_each(|w| *w = -*w);
        }
        let matrix = Self::build(alphabet, sites, table)?;
        matrix.log_loaded(opts.verbosity);
        Ok(matrix)
    }

    fn build(alphabet: Vec<u8>, sites: Vec<i64>, table: Vec<f64>) -> Result<Self, PssmScanError> {
        if alphabet.is_empty() {
            return Err(PssmScanError::MissingKey);
        }
        if alphabet.len() >= NO_SYMBOL as usize {
            return Err(PssmScanError::InvalidWeights(format!("alphabet of {} symbols is too large", alphabet.len())));
        }
        let mut index = [NO_SYMBOL; 256];
        for (col, &symbol) in alphabet.iter().enumerate() {
            if index[symbol as usize] != NO_SYMBOL {
                return Err(PssmScanError::DuplicateSymbol(symbol as char));
            }
            index[symbol as usize] = col as u8;
            index[symbol.to_ascii_lowercase() as usize] = col as u8;
        }
        if sites.is_empty() {
            return Err(PssmScanError::EmptyMatrix);
        }

        let k = alphabet.len();
        let rows = table.chunks_exact(k);
        let best: Vec<f64> = rows.clone().map(|r| r.iter().copied().fold(f64::INFINITY, f64::min)).collect();
        let worst = rows.map(|r| r.iter().copied().fold(f64::NEG_INFINITY, f64::max));
        let ranges: Vec<f64> = best.iter().zip(worst).map(|(b, w)| (b - w).abs()).collect();
        let (priority, best_remaining) = derive_priority(&best, &ranges);

        Ok(Self { alphabet, index, sites, table, best, ranges, priority, best_remaining })
    }

    fn log_loaded(&self, verbosity: Verbosity) {
        if verbosity >= Verbosity::Normal {
            log::info!("PSSM of {} positions over alphabet {}", self.len(), String::from_utf8_lossy(&self.alphabet));
        }
        if verbosity >= Verbosity::Verbose {
            log::debug!("PSSM weights:\n{}", self);
            log::debug!("PSSM debug output:\n{}", self.priority_tables());
        }
    }

    /// Window length `L`.
    pub fn len(&self) -> usize { self.sites.len() }

    /// Always `false` for a constructed matrix; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool { self.sites.is_empty() }

    /// Alphabet symbols in column order.
    pub fn alphabet(&self) -> &[u8] { &self.alphabet }

    /// Input label of a raw position.
    pub fn site(&self, position: usize) -> i64 { self.sites[position] }

    /// Weights of a raw position, in alphabet order.
    pub fn weights(&self, position: usize) -> &[f64] {
        let k = self.alphabet.len();
        &self.table[position * k..(position + 1) * k]
    }

    /// Minimum (best) weight of a raw position.
    pub fn best_weight(&self, position: usize) -> f64 { self.best[position] }

    /// `|best - worst|` for a raw position.
    pub fn range(&self, position: usize) -> f64 { self.ranges[position] }

    /// Raw position indices in scan order.
    pub fn priority(&self) -> &[usize] { &self.priority }

    /// Best achievable score from the positions after each priority step.
    pub fn best_remaining(&self) -> &[f64] { &self.best_remaining }

    /// Score of a perfect window.
    pub fn best_score(&self) -> f64 {
        self.best_remaining[0] + self.best[self.priority[0]]
    }

    /// Weight of `symbol` at raw `position`, or `None` if the symbol has no column.
    #[inline]
    pub fn weight(&self, position: usize, symbol: u8) -> Option<f64> {
        match self.index[symbol as usize] {
            NO_SYMBOL => None,
            col => Some(self.table[position * self.alphabet.len() + col as usize]),
        }
    }

    /// Weight of `symbol` at raw `position`; an unknown symbol is recorded in
    /// `anomalies` and scores [`UNKNOWN_SYMBOL_SCORE`].
    #[inline]
    pub fn score(&self, position: usize, symbol: u8, anomalies: &mut SymbolAnomalies) -> f64 {
        match self.weight(position, symbol) {
            Some(w) => w,
            None => {
                anomalies.record(symbol, position);
                UNKNOWN_SYMBOL_SCORE
            }
        }
    }

    /// Plain left-to-right score of a full window (no pruning).
    pub fn score_window(&self, window: &[u8], anomalies: &mut SymbolAnomalies) -> f64 {
        debug_assert_eq!(window.len(), self.len());
        window.iter().enumerate().map(|(p, &b)| self.score(p, b, anomalies)).sum()
    }

    /// Human-readable priority order (step, position, range) and best-remaining table.
    pub fn priority_tables(&self) -> String {
        let mut out = String::from("Optimal priorities for the order of scoring positions:\n");
        for (step, &p) in self.priority.iter().enumerate() {
            let _ = writeln!(out, "{} {} {}", step, p, self.ranges[p]);
        }
        out.push_str("\nBest additional score possible given remaining positions:\n");
        for (step, b) in self.best_remaining.iter().enumerate() {
            let _ = writeln!(out, "{} {}", step, b);
        }
        out
    }
}

/// Matrix-file rendering: the key line, then one row per position.
impl fmt::Display for ScoringMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("key")?;
        for &s in &self.alphabet {
            write!(f, " {}", s as char)?;
        }
        writeln!(f)?;
        for p in 0..self.len() {
            write!(f, "{}", self.sites[p])?;
            for w in self.weights(p) {
                write!(f, " {}", w)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn parse_key<'a>(tokens: impl Iterator<Item = &'a str>, line: usize) -> Result<Vec<u8>, PssmScanError> {
    let mut alphabet = Vec::new();
    for c in tokens.flat_map(str::chars) {
        if !c.is_ascii_graphic() {
            return Err(PssmScanError::Parse { line, message: format!("unsupported key symbol '{}'", c) });
        }
        let u = c.to_ascii_uppercase() as u8;
        if alphabet.contains(&u) {
            return Err(PssmScanError::DuplicateSymbol(u as char));
        }
        alphabet.push(u);
    }
    Ok(alphabet)
}

fn parse_weight(tok: &str, site: i64, line: usize) -> Result<f64, PssmScanError> {
    match tok.parse::<f64>() {
        Ok(w) if w.is_finite() => Ok(w),
        _ => Err(PssmScanError::Parse { line, message: format!("invalid weight '{}' for position {}", tok, site) }),
    }
}

/// Order positions by range (descending, stable on index) and accumulate the
/// best weights of the positions that follow each step.
fn derive_priority(best: &[f64], ranges: &[f64]) -> (Vec<usize>, Vec<f64>) {
    let mut priority: Vec<usize> = (0..best.len()).collect();
    priority.sort_by(|&a, &b| ranges[b].total_cmp(&ranges[a]));

    let mut best_remaining = vec![0.0; best.len()];
    let mut acc = 0.0;
    for step in (0..priority.len()).rev() {
        best_remaining[step] = acc;
        acc += best[priority[step]];
    }
    (priority, best_remaining)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write;

    fn opts() -> MatrixOptions { MatrixOptions::default() }

    const SMALL: &str = "\
# a comment
KEY a c g t

10 0 1 1 1
11 1 1 1 0
";

    #[test]
    fn parse_small_matrix() {
        let m = ScoringMatrix::parse(SMALL, &opts()).unwrap();
        assert_eq!(m.alphabet(), b"ACGT");
        assert_eq!(m.len(), 2);
        assert_eq!(m.site(0), 10);
        assert_eq!(m.weights(1), &[1.0, 1.0, 1.0, 0.0]);
        assert_eq!(m.weight(0, b'A'), Some(0.0));
        assert_eq!(m.weight(0, b'a'), Some(0.0));
        assert_eq!(m.weight(0, b'N'), None);
        assert_eq!(m.best_score(), 0.0);
    }

    #[test]
    fn key_letters_may_be_packed() {
        let m = ScoringMatrix::parse("key ACGT\n0 1 2 3 4\n", &opts()).unwrap();
        assert_eq!(m.alphabet(), b"ACGT");
    }

    #[test]
    fn weight_count_mismatch_is_fatal() {
        let more = ScoringMatrix::parse("key A C\n0 1 2 3\n", &opts()).unwrap_err();
        assert!(matches!(more, PssmScanError::WeightCount { line: 2, site: 0, found: 3, expected: 2 }));
        assert!(more.to_string().contains("more weights"));

        let less = ScoringMatrix::parse("key A C G\n7 1 2\n", &opts()).unwrap_err();
        assert!(matches!(less, PssmScanError::WeightCount { site: 7, found: 2, expected: 3, .. }));
        assert!(less.to_string().contains("less weights"));
    }

    #[test]
    fn malformed_inputs() {
        assert!(matches!(ScoringMatrix::parse("# nothing\n", &opts()), Err(PssmScanError::MissingKey)));
        assert!(matches!(ScoringMatrix::parse("key A C\n", &opts()), Err(PssmScanError::EmptyMatrix)));
        assert!(matches!(ScoringMatrix::parse("key A C\nkey G\n", &opts()), Err(PssmScanError::DuplicateKey { line: 2 })));
        assert!(matches!(ScoringMatrix::parse("key A a\n", &opts()), Err(PssmScanError::DuplicateSymbol('A'))));
        assert!(matches!(ScoringMatrix::parse("key A C\nx 1 2\n", &opts()), Err(PssmScanError::Parse { line: 2, .. })));
        assert!(matches!(ScoringMatrix::parse("key A C\n0 1 z\n", &opts()), Err(PssmScanError::Parse { .. })));
        assert!(matches!(ScoringMatrix::parse("key A C\n0 1 NaN\n", &opts()), Err(PssmScanError::Parse { .. })));
        // a position before the key has no columns to fill
        assert!(matches!(ScoringMatrix::parse("0 1 2\nkey A C\n", &opts()), Err(PssmScanError::MissingKey)));
    }

    #[test]
    fn invert_negates_weights() {
        let inv = MatrixOptions { invert: true, ..Default::default() };
        let m = ScoringMatrix::parse("key A C\n0 2 -1\n", &inv).unwrap();
        assert_eq!(m.weights(0), &[-2.0, 1.0]);
        assert_eq!(m.best_weight(0), -2.0);
    }

    #[test]
    fn priority_orders_by_range_with_stable_ties() {
        let rows = vec![
            vec![0.0, 1.0],  // range 1
            vec![0.0, 3.0],  // range 3
            vec![2.0, 1.0],  // range 1
            vec![-1.0, 1.0], // range 2
        ];
        let m = ScoringMatrix::from_weights(b"AC", &rows).unwrap();
        assert_eq!(m.priority(), &[1, 3, 0, 2]);
        // best weights by priority: 0, -1, 0, 1
        assert_eq!(m.best_remaining(), &[0.0, 1.0, 1.0, 0.0]);
        assert_eq!(m.best_score(), 0.0);
    }

    #[test]
    fn from_weights_validates_rows() {
        assert!(matches!(ScoringMatrix::from_weights(b"AC", &[vec![1.0]]), Err(PssmScanError::InvalidWeights(_))));
        assert!(matches!(ScoringMatrix::from_weights(b"AC", &[vec![1.0, f64::NAN]]), Err(PssmScanError::InvalidWeights(_))));
        assert!(matches!(ScoringMatrix::from_weights(b"AC", &[]), Err(PssmScanError::EmptyMatrix)));
    }

    #[test]
    fn degenerate_target_weights() {
        let m = ScoringMatrix::from_target("R").unwrap();
        assert_eq!(m.alphabet(), b"ACGT");
        assert_eq!(m.weights(0), &[-1.0, 0.0, -1.0, 0.0]);

        let m = ScoringMatrix::from_target("nA").unwrap();
        assert_eq!(m.weights(0), &[-1.0; 4]);
        assert_eq!(m.weights(1), &[-1.0, 0.0, 0.0, 0.0]);
        assert_eq!(m.priority(), &[1, 0]);
    }

    #[test]
    fn unknown_target_symbol_is_neutral() {
        let m = ScoringMatrix::from_target("A?").unwrap();
        assert_eq!(m.weights(1), &[0.0; 4]);
    }

    #[test]
    fn unknown_symbol_falls_back_and_is_counted() {
        let m = ScoringMatrix::from_target("AC").unwrap();
        let mut anomalies = SymbolAnomalies::default();
        assert_eq!(m.score(0, b'N', &mut anomalies), UNKNOWN_SYMBOL_SCORE);
        assert_eq!(m.score(1, b'N', &mut anomalies), UNKNOWN_SYMBOL_SCORE);
        assert_eq!(m.score(1, b'C', &mut anomalies), -1.0);
        assert_eq!(anomalies.count(b'N'), 2);
        assert_eq!(anomalies.total(), 2);
        assert_eq!(anomalies.to_string(), "'N' x2");

        let mut merged = SymbolAnomalies::default();
        merged.merge(&anomalies);
        merged.merge(&anomalies);
        assert_eq!(merged.count(b'N'), 4);
    }

    #[test]
    fn display_reparses_to_same_table() {
        let m = ScoringMatrix::parse("key A C G T\n3 0.5 -1 2 0\n4 1 1 1 1.25\n", &opts()).unwrap();
        let text = m.to_string();
        assert!(text.starts_with("key A C G T\n3 0.5 -1 2 0\n"));
        let again = ScoringMatrix::parse(&text, &opts()).unwrap();
        assert_eq!(again.weights(1), m.weights(1));
        assert_eq!(again.priority(), m.priority());
    }

    #[test]
    fn priority_tables_list_every_step() {
        let m = ScoringMatrix::from_target("RAN").unwrap();
        let t = m.priority_tables();
        assert!(t.starts_with("Optimal priorities"));
        assert_eq!(t.lines().count(), 1 + 3 + 1 + 1 + 3);
    }

    #[test]
    fn from_file_reads_and_reports_missing() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "{}", SMALL).unwrap();
        let m = ScoringMatrix::from_file(f.path(), &opts()).unwrap();
        assert_eq!(m.len(), 2);
        let err = ScoringMatrix::from_file(Path::new("/no/such/matrix.pssm"), &opts()).unwrap_err();
        assert!(matches!(err, PssmScanError::Io { .. }));
    }

    fn weight_rows(max_len: usize) -> impl Strategy<Value = Vec<Vec<f64>>> {
        prop::collection::vec(prop::collection::vec((-8i32..8).prop_map(|w| w as f64 * 0.25), 4), 1..max_len)
    }

    proptest! {
        #[test]
        fn priority_is_a_permutation(rows in weight_rows(24)) {
            let m = ScoringMatrix::from_weights(b"ACGT", &rows).unwrap();
            let mut seen = m.priority().to_vec();
            seen.sort_unstable();
            prop_assert_eq!(seen, (0..rows.len()).collect::<Vec<_>>());
            prop_assert_eq!(m.best_remaining()[rows.len() - 1], 0.0);
            for w in m.priority().windows(2) {
                prop_assert!(m.range(w[0]) >= m.range(w[1]));
                if m.range(w[0]) == m.range(w[1]) { prop_assert!(w[0] < w[1]); }
            }
            for i in 0..rows.len() - 1 {
                let step = m.best_remaining()[i] - m.best_remaining()[i + 1];
                prop_assert_eq!(step, m.best_weight(m.priority()[i + 1]));
            }
        }

        #[test]
        fn best_remaining_is_non_increasing_for_non_negative_weights(rows in weight_rows(24)) {
            let rows: Vec<Vec<f64>> = rows.into_iter().map(|r| r.into_iter().map(f64::abs).collect()).collect();
            let m = ScoringMatrix::from_weights(b"ACGT", &rows).unwrap();
            for w in m.best_remaining().windows(2) {
                prop_assert!(w[0] >= w[1]);
            }
            prop_assert!(m.best_remaining().iter().all(|&b| b >= 0.0));
        }
    }
}
