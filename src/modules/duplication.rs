//! Sequence duplication levels over a capped tally population.
//!
//! Only the first `cap` reads are tallied. Later reads are counted but do
//! not contribute, and the result is flagged as capped: on very diverse
//! libraries the duplicate fraction is an estimate from that prefix.

use super::QcModule;
use crate::config::TallyKey;
use crate::positional::ratio;
use crate::record::ScoredRecord;
use crate::report::ModuleResult;
use crate::tally::SequenceTally;

/// Duplication-level bucket boundaries, inclusive, as `(label, lo, hi)`.
const LEVELS: [(&str, u64, u64); 6] = [
    ("1", 1, 1),
    ("2", 2, 2),
    ("3-5", 3, 5),
    ("6-10", 6, 10),
    ("11-50", 11, 50),
    (">50", 51, u64::MAX),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicationBucket {
    pub label: &'static str,
    /// Distinct sequences occurring this many times.
    pub distinct_sequences: u64,
    /// Reads belonging to those sequences.
    pub reads: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DuplicationLevels {
    /// Reads in the tally population.
    pub tallied_reads: u64,
    /// Reads seen after the cap and left out of the estimate.
    pub untallied_reads: u64,
    pub distinct_sequences: u64,
    /// Fraction of tallied reads repeating an already-seen sequence:
    /// `1 - distinct / tallied`.
    pub duplicate_fraction: f64,
    /// `reads` across buckets sums to `tallied_reads`.
    pub buckets: Vec<DuplicationBucket>,
    /// The cap was reached; values describe the tallied prefix only.
    pub capped: bool,
}

pub(crate) struct DuplicationModule {
    cap: u64,
    tally: SequenceTally,
    untallied: u64,
}

impl DuplicationModule {
    pub(crate) fn new(cap: usize, key: TallyKey) -> Self {
        Self {
            cap: cap as u64,
            tally: SequenceTally::new(cap, key),
            untallied: 0,
        }
    }
}

impl QcModule for DuplicationModule {
    fn consume(&mut self, record: &ScoredRecord<'_>) {
        if self.tally.tallied() >= self.cap {
            if self.untallied == 0 {
                log::warn!(
                    "duplication tally cap of {} reads reached; estimate is approximate",
                    self.cap
                );
            }
            self.untallied += 1;
            return;
        }
        self.tally.add(record.seq);
    }

    fn is_capped(&self) -> bool {
        self.untallied > 0
    }

    fn finalize(self: Box<Self>) -> ModuleResult {
        let mut buckets: Vec<DuplicationBucket> = LEVELS
            .iter()
            .map(|&(label, _, _)| DuplicationBucket {
                label,
                distinct_sequences: 0,
                reads: 0,
            })
            .collect();
        for count in self.tally.counts() {
            if let Some(i) = LEVELS
                .iter()
                .position(|&(_, lo, hi)| (lo..=hi).contains(&count))
            {
                buckets[i].distinct_sequences += 1;
                buckets[i].reads += count;
            }
        }

        let tallied = self.tally.tallied();
        let distinct = self.tally.distinct() as u64;
        ModuleResult::DuplicationLevels(DuplicationLevels {
            tallied_reads: tallied,
            untallied_reads: self.untallied,
            distinct_sequences: distinct,
            duplicate_fraction: ratio(tallied - distinct, tallied),
            buckets,
            capped: self.untallied > 0,
        })
    }
}
