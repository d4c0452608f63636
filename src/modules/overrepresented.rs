//! Sequences making up an unexpectedly large share of the reads.

use super::QcModule;
use crate::config::TallyKey;
use crate::contaminants::find_contaminant;
use crate::positional::ratio;
use crate::record::ScoredRecord;
use crate::report::ModuleResult;
use crate::tally::{Admission, SequenceTally};

#[derive(Debug, Clone, PartialEq)]
pub struct OverrepresentedSequence {
    pub sequence: String,
    pub count: u64,
    /// Share of tallied reads.
    pub fraction: f64,
    /// Best-effort match against the built-in contaminant table.
    pub possible_source: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverrepresentedSequences {
    /// Sorted by count, highest first; ties by sequence.
    pub sequences: Vec<OverrepresentedSequence>,
    pub threshold_fraction: f64,
    pub tallied_reads: u64,
    /// Reads whose sequence arrived after the distinct-sequence cap was hit.
    pub rejected_reads: u64,
    pub capped: bool,
}

pub(crate) struct OverrepresentedModule {
    tally: SequenceTally,
    threshold: f64,
}

impl OverrepresentedModule {
    pub(crate) fn new(cap: usize, threshold: f64, key: TallyKey) -> Self {
        Self {
            tally: SequenceTally::new(cap, key),
            threshold,
        }
    }
}

impl QcModule for OverrepresentedModule {
    fn consume(&mut self, record: &ScoredRecord<'_>) {
        if self.tally.add(record.seq) == Admission::Rejected && self.tally.rejected() == 1 {
            log::warn!(
                "overrepresented-sequence tally is full ({} sequences); new sequences are no longer tracked",
                self.tally.distinct()
            );
        }
    }

    fn is_capped(&self) -> bool {
        self.tally.rejected() > 0
    }

    fn finalize(self: Box<Self>) -> ModuleResult {
        let tallied = self.tally.tallied();
        let mut sequences: Vec<OverrepresentedSequence> = self
            .tally
            .iter()
            .filter(|&(_, count)| tallied > 0 && ratio(count, tallied) >= self.threshold)
            .map(|(seq, count)| OverrepresentedSequence {
                sequence: String::from_utf8_lossy(seq).into_owned(),
                count,
                fraction: ratio(count, tallied),
                possible_source: find_contaminant(seq),
            })
            .collect();
        sequences.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.sequence.cmp(&b.sequence)));

        ModuleResult::OverrepresentedSequences(OverrepresentedSequences {
            sequences,
            threshold_fraction: self.threshold,
            tallied_reads: tallied,
            rejected_reads: self.tally.rejected(),
            capped: self.tally.rejected() > 0,
        })
    }
}
