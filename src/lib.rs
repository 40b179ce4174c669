//! # pssmscan
//!
//! Position-specific scoring matrix (PSSM) search over DNA sequences.
//!
//! A [`ScoringMatrix`] assigns a weight to every alphabet symbol at each of its
//! `L` positions; lower sums are better. The [`Scanner`] slides an `L`-wide
//! window along each sequence, scores it on the forward strand and on the
//! reverse complement, and hands good windows to a bounded [`TopKResults`].
//!
//! ## Branch and bound
//! Positions are visited from the widest weight range to the narrowest, and
//! [`ScoringMatrix::best_remaining`] gives the best total the unvisited
//! positions can still add. Once the results are full, a window whose running
//! score plus that bound already exceeds the worst retained score is dropped.
//! The bound is exact for non-negative weights and never removes a window that
//! would have been kept.
//!
//! ## Modules
//! - `matrix`: matrix file parsing, IUPAC targets, priority order and bounds.
//! - `hits`: ranked, bounded match collection.
//! - `scanner`: the two-strand pruned scan, sequential or on the rayon pool.
//! - `search`: one matrix over many files with run totals.
//! - `fasta`, `inputs`: sequence loading and sequence-file discovery.
//! - `report`: the ranked text report and TSV export.
//!
//! ### Example
//! ```
//! use pssmscan::{MatrixOptions, ScoringMatrix, SearchOptions, TargetSearch, parse_fasta};
//! let text = "# toy matrix\nkey A C G T\n0 0 1 1 1\n1 1 1 1 0\n";
//! let matrix = ScoringMatrix::parse(text, &MatrixOptions::default()).unwrap();
//! let mut search = TargetSearch::new(matrix, SearchOptions { max_hits: 1, ..Default::default() });
//! search.scan_records(&parse_fasta(">s1\nAT\n", &Default::default()));
//! assert_eq!(search.hits().matches()[0].to_string(), "0.00 AT s1 0");
//! ```
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod common;
pub mod fasta;
pub mod hits;
pub mod inputs;
pub mod matrix;
pub mod report;
pub mod scanner;
pub mod search;

pub use common::{complement, degenerate_bases, reverse_complement, PssmScanError, Verbosity, NUCLEOTIDES};
pub use fasta::{parse_fasta, read_fasta, FastaOptions, SequenceRecord};
pub use hits::{Match, TopKResults};
pub use inputs::{discover_sequence_files, read_list_file, SequenceSource, SEQUENCE_EXTENSIONS};
pub use matrix::{MatrixOptions, ScoringMatrix, SymbolAnomalies, UNKNOWN_SYMBOL_SCORE};
pub use report::{marked_window, report_line, write_report, write_tsv};
pub use scanner::{scan_parallel, Pruning, ScanOptions, ScanOutcome, ScanStats, Scanner, Strand};
pub use search::{SearchOptions, TargetSearch};
