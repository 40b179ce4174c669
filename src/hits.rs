//! Ranked hit collection.
//!
//! [`TopKResults`] keeps at most `capacity` [`Match`]es sorted by ascending
//! score (lower is better). Ties keep insertion order: a new candidate goes
//! after every retained match with the same or a better score. When an
//! insertion overflows the capacity the worst (last) match is evicted and the
//! collection is marked full for good; from then on the scanner may prune
//! against [`TopKResults::worst_acceptable_score`].
//!
//! ### Example
//! ```rust
//! use pssmscan::{Match, TopKResults};
//! let hit = |score: f64, offset| Match { score, window: b"AT".to_vec(), source_id: "s".into(), offset, reverse: false };
//! let mut top = TopKResults::new(2);
//! top.insert(hit(3.0, 0));
//! top.insert(hit(1.0, 1));
//! top.insert(hit(2.0, 2));
//! assert!(top.is_full());
//! assert_eq!(top.matches().iter().map(|m| m.offset).collect::<Vec<_>>(), vec![1, 2]);
//! assert_eq!(top.worst_acceptable_score(), Some(2.0));
//! ```

use std::fmt;

/// A scored window of a source sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct Match {
    /// Sum of weights over the window (lower is better).
    pub score: f64,
    /// The `L` symbols matched, read in the matrix's frame: reverse-strand
    /// hits hold the reverse complement of the forward window.
    pub window: Vec<u8>,
    /// Identifier of the source sequence.
    pub source_id: String,
    /// 0-based start of the window on the forward strand.
    pub offset: usize,
    /// `true` if the hit is on the reverse-complement strand.
    pub reverse: bool,
}

impl Match {
    /// `+` or `-`.
    pub fn strand_symbol(&self) -> char {
        if self.reverse { '-' } else { '+' }
    }
}

/// Unmarked report line: `score window source offset [(rvs)]`.
impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {} {} {}", self.score, String::from_utf8_lossy(&self.window), self.source_id, self.offset)?;
        if self.reverse {
            f.write_str(" (rvs)")?;
        }
        Ok(())
    }
}

/// The best `capacity` matches seen so far, best first.
#[derive(Clone, Debug)]
pub struct TopKResults {
    capacity: usize,
    ordered: Vec<Match>,
    full: bool,
}

impl TopKResults {
    /// Empty collection retaining at most `capacity` matches. A capacity of
    /// zero evicts every insertion.
    pub fn new(capacity: usize) -> Self {
        Self { capacity, ordered: Vec::with_capacity(capacity.saturating_add(1).min(1 << 16)), full: false }
    }

    pub fn capacity(&self) -> usize { self.capacity }

    pub fn len(&self) -> usize { self.ordered.len() }

    pub fn is_empty(&self) -> bool { self.ordered.is_empty() }

    /// `true` once an insertion has overflowed the capacity.
    pub fn is_full(&self) -> bool { self.full }

    /// Score of the last-ranked retained match, `None` while empty.
    pub fn worst_acceptable_score(&self) -> Option<f64> {
        self.ordered.last().map(|m| m.score)
    }

    /// The score a candidate must beat to be kept, or `None` while every
    /// candidate is still accepted.
    ///
    /// A full collection with nothing retained (capacity zero) rejects
    /// everything, so its threshold is negative infinity.
    pub fn rejection_threshold(&self) -> Option<f64> {
        if !self.full {
            return None;
        }
        Some(self.worst_acceptable_score().unwrap_or(f64::NEG_INFINITY))
    }

    /// Insert `candidate` at its rank, then evict the worst match if the
    /// capacity was exceeded.
    pub fn insert(&mut self, candidate: Match) {
        // first entry strictly worse than the candidate
        let at = self.ordered.partition_point(|m| m.score <= candidate.score);
        self.ordered.insert(at, candidate);
        if self.ordered.len() > self.capacity {
            self.ordered.pop();
            self.full = true;
        }
    }

    /// Insert every match of `other`, in its rank order.
    ///
    /// Merging per-partition results in partition order gives the same
    /// contents as inserting every candidate into one collection.
    pub fn merge(&mut self, other: TopKResults) {
        // `other` overflowed a capacity no smaller than ours, so the union did too
        let overflowed = other.full && other.capacity >= self.capacity;
        for m in other.ordered {
            self.insert(m);
        }
        self.full |= overflowed;
    }

    /// Retained matches, best first.
    pub fn matches(&self) -> &[Match] { &self.ordered }

    pub fn iter(&self) -> std::slice::Iter<'_, Match> { self.ordered.iter() }

    pub fn into_matches(self) -> Vec<Match> { self.ordered }
}

impl<'a> IntoIterator for &'a TopKResults {
    type Item = &'a Match;
    type IntoIter = std::slice::Iter<'a, Match>;
    fn into_iter(self) -> Self::IntoIter { self.ordered.iter() }
}
