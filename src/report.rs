//! Final report: the plain-text ranking and an optional TSV table.

use std::io::{self, Write};

use crate::hits::{Match, TopKResults};
use crate::matrix::{ScoringMatrix, UNKNOWN_SYMBOL_SCORE};
use crate::scanner::ScanStats;

/// The hit window with soft mismatches in lower case: every position whose
/// symbol scores worse than that position's best weight.
pub fn marked_window(matrix: &ScoringMatrix, hit: &Match) -> String {
    hit.window.iter().enumerate().map(|(p, &b)| {
        let w = matrix.weight(p, b).unwrap_or(UNKNOWN_SYMBOL_SCORE);
        let c = b as char;
        if w > matrix.best_weight(p) { c.to_ascii_lowercase() } else { c.to_ascii_uppercase() }
    }).collect()
}

/// One ranked report line, like `Match`'s `Display` but with the window marked.
pub fn report_line(matrix: &ScoringMatrix, hit: &Match) -> String {
    let mut line = format!("{:.2} {} {} {}", hit.score, marked_window(matrix, hit), hit.source_id, hit.offset);
    if hit.reverse {
        line.push_str(" (rvs)");
    }
    line
}

/// Write the summary line followed by every retained match, best first.
pub fn write_report<W: Write>(mut out: W, matrix: &ScoringMatrix, hits: &TopKResults, stats: &ScanStats) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{} sequences with a total of {} basepairs searched.", stats.sequences, stats.symbols)?;
    for hit in hits {
        writeln!(out, "{}", report_line(matrix, hit))?;
    }
    writeln!(out)?;
    out.flush()
}

/// Tab-separated table of the retained matches with a header row.
pub fn write_tsv<W: Write>(out: W, hits: &TopKResults) -> csv::Result<()> {
    let mut w = csv::WriterBuilder::new().delimiter(b'\t').from_writer(out);
    w.write_record(["rank", "score", "window", "source", "offset", "strand"])?;
    for (rank, hit) in hits.iter().enumerate() {
        w.write_record([
            &(rank + 1).to_string(),
            &format!("{:.2}", hit.score),
            &String::from_utf8_lossy(&hit.window).into_owned(),
            &hit.source_id,
            &hit.offset.to_string(),
            &hit.strand_symbol().to_string(),
        ])?;
    }
    w.flush()?;
    Ok(())
}
