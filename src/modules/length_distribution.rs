//! Read-length histogram.

use super::QcModule;
use crate::record::ScoredRecord;
use crate::report::ModuleResult;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct LengthDistribution {
    /// Read length mapped to read count.
    pub counts: BTreeMap<usize, u64>,
    /// All reads share one length (trivially true for an empty file).
    pub uniform: bool,
}

impl LengthDistribution {
    pub fn min(&self) -> Option<usize> {
        self.counts.keys().next().copied()
    }

    pub fn max(&self) -> Option<usize> {
        self.counts.keys().next_back().copied()
    }
}

#[derive(Debug, Default)]
pub(crate) struct LengthDistributionModule {
    counts: BTreeMap<usize, u64>,
}

impl LengthDistributionModule {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl QcModule for LengthDistributionModule {
    fn consume(&mut self, record: &ScoredRecord<'_>) {
        *self.counts.entry(record.len()).or_insert(0) += 1;
    }

    fn finalize(self: Box<Self>) -> ModuleResult {
        ModuleResult::SequenceLength(LengthDistribution {
            uniform: self.counts.len() <= 1,
            counts: self.counts,
        })
    }
}
