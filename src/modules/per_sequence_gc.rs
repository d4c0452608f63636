//! Distribution of per-read GC content.

use super::QcModule;
use crate::positional::BaseCounts;
use crate::record::ScoredRecord;
use crate::report::ModuleResult;

#[derive(Debug, Clone, PartialEq)]
pub struct PerSequenceGc {
    /// `counts[p]` reads have a GC content of `p` percent (0..=100,
    /// rounded half-up, N excluded).
    pub counts: Vec<u64>,
    /// Reads without a single A/C/G/T base.
    pub uncalled_reads: u64,
}

impl PerSequenceGc {
    /// Most common GC percent; `None` when no read had a called base.
    pub fn mode(&self) -> Option<usize> {
        let (pct, &count) = self
            .counts
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))?;
        (count > 0).then_some(pct)
    }
}

pub(crate) struct PerSequenceGcModule {
    counts: [u64; 101],
    uncalled: u64,
}

impl PerSequenceGcModule {
    pub(crate) fn new() -> Self {
        Self {
            counts: [0; 101],
            uncalled: 0,
        }
    }
}

impl QcModule for PerSequenceGcModule {
    fn consume(&mut self, record: &ScoredRecord<'_>) {
        let mut bases = BaseCounts::default();
        bases.add_all(record.seq);
        let called = bases.acgt();
        if called == 0 {
            self.uncalled += 1;
            return;
        }
        let gc = bases.g + bases.c;
        let percent = (200 * gc + called) / (2 * called);
        self.counts[percent as usize] += 1;
    }

    fn finalize(self: Box<Self>) -> ModuleResult {
        ModuleResult::PerSequenceGc(PerSequenceGc {
            counts: self.counts.to_vec(),
            uncalled_reads: self.uncalled,
        })
    }
}
