//! FASTA-like sequence loading with alphabet filtering.
//!
//! *Lines starting with `>` start a new record.* The identifier is the first
//! whitespace-delimited token of the header. Every other line is appended to
//! the current record after filtering: only nucleotides are kept (and `N` when
//! [`FastaOptions::keep_ambiguous`] is set), everything else is dropped and
//! reported once per record. Buffers are uppercased.
//!
//! ## Examples
//! ```rust
//! use pssmscan::{parse_fasta, FastaOptions};
//! let recs = parse_fasta(">chr1 test\nacgt\nAC-GT\n>chr2\nTT\n", &FastaOptions::default());
//! assert_eq!(recs.len(), 2);
//! assert_eq!(recs[0].id, "chr1");
//! assert_eq!(recs[0].seq, b"ACGTACGT".to_vec());
//! ```

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::common::PssmScanError;

/// Options for sequence loading.
#[derive(Clone, Debug, Default)]
pub struct FastaOptions {
    /// Keep `N`/`n` in the buffer instead of dropping it. Such symbols are not
    /// part of a nucleotide matrix key and score through the unknown-symbol fallback.
    pub keep_ambiguous: bool,
}

/// One named sequence buffer, uppercased and filtered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceRecord {
    /// Identifier from the header (first token after `>`).
    pub id: String,
    /// Filtered, uppercase symbols.
    pub seq: Vec<u8>,
}

impl SequenceRecord {
    /// Build a record from raw symbols, applying the same filter as the parser.
    /// Returns the record and the number of dropped symbols.
    pub fn from_raw(id: impl Into<String>, raw: &[u8], opts: &FastaOptions) -> (Self, usize) {
        let mut filter = RecordBuilder::new(id.into());
        filter.push_line(raw, 1, opts);
        let dropped = filter.dropped;
        (filter.finish(), dropped)
    }

    /// Number of symbols in the buffer.
    pub fn len(&self) -> usize { self.seq.len() }

    /// `true` if the buffer holds no symbols.
    pub fn is_empty(&self) -> bool { self.seq.is_empty() }
}

/// Abbreviated one-line summary: clipped header, clipped sequence and length.
impl fmt::Display for SequenceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const MAX_ID: usize = 15;
        const MAX_SEQ: usize = 40;
        let id: String = self.id.chars().take(MAX_ID).collect();
        write!(f, "{}: ", id)?;
        let n = self.seq.len();
        if n <= MAX_SEQ {
            write!(f, "{}", String::from_utf8_lossy(&self.seq))?;
        } else {
            let half = MAX_SEQ / 2;
            write!(f, "{} ... {}",
                String::from_utf8_lossy(&self.seq[..half]),
                String::from_utf8_lossy(&self.seq[n - half..]))?;
        }
        write!(f, " ({} bp)", n)
    }
}

#[inline]
fn accepted(b: u8, opts: &FastaOptions) -> bool {
    match b {
        b'A' | b'C' | b'G' | b'T' | b'a' | b'c' | b'g' | b't' => true,
        b'N' | b'n' => opts.keep_ambiguous,
        _ => false,
    }
}

struct RecordBuilder {
    id: String,
    seq: Vec<u8>,
    dropped: usize,
    first_dropped: Option<(u8, usize, usize)>,
}

impl RecordBuilder {
    fn new(id: String) -> Self {
        Self { id, seq: Vec::new(), dropped: 0, first_dropped: None }
    }

    fn push_line(&mut self, line: &[u8], line_no: usize, opts: &FastaOptions) {
        self.seq.reserve(line.len());
        for (col, &b) in line.iter().enumerate() {
            if accepted(b, opts) {
                self.seq.push(b.to_ascii_uppercase());
            } else if !b.is_ascii_whitespace() {
                self.dropped += 1;
                if self.first_dropped.is_none() {
                    self.first_dropped = Some((b, line_no, col + 1));
                }
            }
        }
    }

    fn finish(self) -> SequenceRecord {
        if let Some((b, line, col)) = self.first_dropped {
            log::warn!("{}: dropped {} unrecognized letter(s), first '{}' at line {}, column {}",
                self.id, self.dropped, (b as char).escape_default(), line, col);
        }
        SequenceRecord { id: self.id, seq: self.seq }
    }
}

/// Incremental parser fed one line at a time.
struct FastaParser<'o> {
    opts: &'o FastaOptions,
    records: Vec<SequenceRecord>,
    current: Option<RecordBuilder>,
    line_no: usize,
}

impl<'o> FastaParser<'o> {
    fn new(opts: &'o FastaOptions) -> Self {
        Self { opts, records: Vec::new(), current: None, line_no: 0 }
    }

    fn push_line(&mut self, line: &[u8]) {
        self.line_no += 1;
        if let Some(header) = line.strip_prefix(b">") {
            if let Some(done) = self.current.take() { self.records.push(done.finish()); }
            let header = String::from_utf8_lossy(header);
            let id = header.split_whitespace().next().unwrap_or("").to_string();
            self.current = Some(RecordBuilder::new(id));
        } else if let Some(rec) = self.current.as_mut() {
            rec.push_line(line, self.line_no, self.opts);
        }
    }

    fn finish(mut self) -> Vec<SequenceRecord> {
        if let Some(done) = self.current.take() { self.records.push(done.finish()); }
        self.records
    }
}

/// Parse FASTA text into filtered records. Text before the first header is ignored.
pub fn parse_fasta(text: &str, opts: &FastaOptions) -> Vec<SequenceRecord> {
    let mut parser = FastaParser::new(opts);
    for line in text.lines() {
        parser.push_line(line.as_bytes());
    }
    parser.finish()
}

/// Read a FASTA file, streaming it line by line.
///
/// A file without any record yields an empty vector and a warning; only an
/// unreadable file is an error.
pub fn read_fasta(path: &Path, opts: &FastaOptions) -> Result<Vec<SequenceRecord>, PssmScanError> {
    let io_err = |source| PssmScanError::Io { path: path.to_path_buf(), source };
    let file = File::open(path).map_err(io_err)?;
    let mut reader = BufReader::new(file);
    let mut parser = FastaParser::new(opts);
    let mut buf = Vec::with_capacity(4096);
    loop {
        buf.clear();
        let n = reader.read_until(b'\n', &mut buf).map_err(io_err)?;
        if n == 0 { break; }
        let line = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        parser.push_line(line);
    }
    let records = parser.finish();
    if records.is_empty() {
        log::warn!("no sequences in {}", path.display());
    }
    Ok(records)
}
