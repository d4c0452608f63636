//! Distribution of per-read mean quality.

use super::QcModule;
use crate::record::ScoredRecord;
use crate::report::ModuleResult;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct PerSequenceQuality {
    /// Mean score, rounded half-up to an integer, mapped to read count.
    pub counts: BTreeMap<u8, u64>,
    /// Zero-length reads have no mean and are left out of `counts`.
    pub empty_reads: u64,
}

#[derive(Debug, Default)]
pub(crate) struct PerSequenceQualityModule {
    counts: BTreeMap<u8, u64>,
    empty_reads: u64,
}

impl PerSequenceQualityModule {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

/// `round(sum / len)` with halves rounded up, in integer arithmetic.
#[inline]
fn rounded_mean(sum: u64, len: u64) -> u8 {
    ((2 * sum + len) / (2 * len)) as u8
}

impl QcModule for PerSequenceQualityModule {
    fn consume(&mut self, record: &ScoredRecord<'_>) {
        if record.scores.is_empty() {
            self.empty_reads += 1;
            return;
        }
        let sum: u64 = record.scores.iter().map(|&q| q as u64).sum();
        let mean = rounded_mean(sum, record.scores.len() as u64);
        *self.counts.entry(mean).or_insert(0) += 1;
    }

    fn finalize(self: Box<Self>) -> ModuleResult {
        ModuleResult::PerSequenceQuality(PerSequenceQuality {
            counts: self.counts,
            empty_reads: self.empty_reads,
        })
    }
}
