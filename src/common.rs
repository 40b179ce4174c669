//! Common helpers shared by the search components: the crate error type,
//! output verbosity, and nucleotide utilities (complement, reverse complement,
//! IUPAC degeneracy).
//!
//! ## Errors
//! [`PssmScanError`] covers *fatal configuration* problems only (unreadable
//! files, malformed scoring matrices). Content anomalies met while loading or
//! scanning sequences never surface as errors; they are counted and logged.
//!
//! ## Nucleotides
//! Complements are resolved through a 256-entry table so the reverse-strand
//! scan pays one load per symbol. Bytes with no complement map to themselves.
//!
//! ## Examples
//! ```rust
//! use pssmscan::{complement, reverse_complement, degenerate_bases};
//! assert_eq!(complement(b'A'), b'T');
//! assert_eq!(reverse_complement(b"AACG"), b"CGTT".to_vec());
//! assert_eq!(degenerate_bases(b'R'), Some(&b"AG"[..]));
//! ```

use std::path::PathBuf;

/// Errors that can be returned while building a search.
#[derive(thiserror::Error, Debug)]
pub enum PssmScanError {
    /// A matrix or sequence file could not be opened or read.
    #[error("unable to read {}: {source}", path.display())]
    Io { path: PathBuf, #[source] source: std::io::Error },
    /// A line of a scoring-matrix file could not be interpreted.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    /// A position supplied more or fewer weights than the alphabet key declares.
    #[error("line {line}: {} weights given for position {site} than denoted in key ({found} found, {expected} expected)",
        if found > expected { "more" } else { "less" })]
    WeightCount { line: usize, site: i64, found: usize, expected: usize },
    /// The matrix declares no alphabet (`key` line) at all.
    #[error("scoring matrix declares no alphabet key")]
    MissingKey,
    /// A second `key` line was found.
    #[error("line {line}: alphabet key declared more than once")]
    DuplicateKey { line: usize },
    /// The same letter occurs twice in the alphabet key.
    #[error("alphabet key lists '{0}' more than once")]
    DuplicateSymbol(char),
    /// The matrix has no positions, so there is nothing to scan with.
    #[error("scoring matrix has no positions")]
    EmptyMatrix,
    /// A weight table handed to [`ScoringMatrix::from_weights`](crate::ScoringMatrix::from_weights) is unusable.
    #[error("invalid weight table: {0}")]
    InvalidWeights(String),
}

/// How much the library reports while it works.
///
/// This value is passed explicitly to the components that log; the binary maps
/// it onto the `env_logger` filter with [`Verbosity::level_filter`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Warnings and errors only.
    Minimal,
    /// One line per matrix, file and sequence.
    #[default]
    Normal,
    /// Matrix dumps, priority tables and scan progress.
    Verbose,
}

impl Verbosity {
    /// Logger filter matching this verbosity.
    pub fn level_filter(self) -> log::LevelFilter {
        match self {
            Verbosity::Minimal => log::LevelFilter::Warn,
            Verbosity::Normal => log::LevelFilter::Info,
            Verbosity::Verbose => log::LevelFilter::Debug,
        }
    }
}

/// The four unambiguous nucleotides, in the column order used by derived matrices.
pub const NUCLEOTIDES: [u8; 4] = *b"ACGT";

const COMPLEMENT: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 { table[i] = i as u8; i += 1; }
    let pairs: [(u8, u8); 15] = [
        (b'A', b'T'), (b'C', b'G'), (b'G', b'C'), (b'T', b'A'),
        (b'R', b'Y'), (b'Y', b'R'), (b'S', b'W'), (b'W', b'S'),
        (b'K', b'M'), (b'M', b'K'), (b'B', b'V'), (b'D', b'H'),
        (b'H', b'D'), (b'V', b'B'), (b'N', b'N'),
    ];
    let mut p = 0;
    while p < pairs.len() {
        let (from, to) = pairs[p];
        table[from as usize] = to;
        table[from.to_ascii_lowercase() as usize] = to.to_ascii_lowercase();
        p += 1;
    }
    table
};

/// Complement of a nucleotide or IUPAC code, preserving case.
/// Bytes that have no complement are returned unchanged.
#[inline]
pub fn complement(base: u8) -> u8 {
    COMPLEMENT[base as usize]
}

/// Reverse complement of a nucleotide slice.
pub fn reverse_complement(seq: &[u8]) -> Vec<u8> {
    seq.iter().rev().map(|&b| complement(b)).collect()
}

/// Nucleotides represented by an (uppercase) IUPAC code, or `None` for an
/// unknown code.
pub fn degenerate_bases(code: u8) -> Option<&'static [u8]> {
    let bases: &'static [u8] = match code {
        b'A' => b"A",
        b'C' => b"C",
        b'G' => b"G",
        b'T' => b"T",
        b'R' => b"AG",  // purine
        b'Y' => b"CT",  // pyrimidine
        b'M' => b"AC",
        b'K' => b"GT",
        b'S' => b"CG",
        b'W' => b"AT",
        b'B' => b"CGT",
        b'D' => b"AGT",
        b'H' => b"ACT",
        b'V' => b"ACG",
        b'N' => b"ACGT",
        _ => return None,
    };
    Some(bases)
}
