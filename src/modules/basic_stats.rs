//! File-level summary: read count, lengths, overall GC and mean quality.

use super::QcModule;
use crate::positional::{BaseCounts, ratio};
use crate::record::ScoredRecord;
use crate::report::ModuleResult;

#[derive(Debug, Clone, PartialEq)]
pub struct BasicStatistics {
    pub total_sequences: u64,
    pub total_bases: u64,
    /// 0 for an empty file.
    pub min_length: usize,
    pub max_length: usize,
    pub mean_length: f64,
    pub gc_fraction: f64,
    /// Mean Phred score over every base.
    pub mean_quality: f64,
}

#[derive(Debug, Default)]
pub(crate) struct BasicStatsModule {
    reads: u64,
    min_len: Option<usize>,
    max_len: usize,
    bases: BaseCounts,
    quality_sum: u64,
}

impl BasicStatsModule {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl QcModule for BasicStatsModule {
    fn consume(&mut self, record: &ScoredRecord<'_>) {
        let len = record.len();
        self.reads += 1;
        self.min_len = Some(self.min_len.map_or(len, |m| m.min(len)));
        self.max_len = self.max_len.max(len);
        self.bases.add_all(record.seq);
        self.quality_sum += record.scores.iter().map(|&q| q as u64).sum::<u64>();
    }

    fn finalize(self: Box<Self>) -> ModuleResult {
        let total_bases = self.bases.total();
        ModuleResult::BasicStatistics(BasicStatistics {
            total_sequences: self.reads,
            total_bases,
            min_length: self.min_len.unwrap_or(0),
            max_length: self.max_len,
            mean_length: ratio(total_bases, self.reads),
            gc_fraction: self.bases.gc_fraction(),
            mean_quality: ratio(self.quality_sum, total_bases),
        })
    }
}
