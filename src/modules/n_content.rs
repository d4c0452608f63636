//! Share of uncalled bases at each position.

use super::QcModule;
use crate::positional::{PositionalAccumulator, ratio};
use crate::record::ScoredRecord;
use crate::report::ModuleResult;

#[derive(Debug, Clone, PartialEq)]
pub struct NContent {
    /// `fractions[i]`: N bases at position `i` (0-based) over reads reaching it.
    pub fractions: Vec<f64>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Slot {
    reads: u64,
    n: u64,
}

#[derive(Debug, Default)]
pub(crate) struct NContentModule {
    positions: PositionalAccumulator<Slot>,
}

impl NContentModule {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl QcModule for NContentModule {
    fn consume(&mut self, record: &ScoredRecord<'_>) {
        let slots = self.positions.covering(record.len(), Slot::default);
        for (slot, &base) in slots.iter_mut().zip(record.seq) {
            slot.reads += 1;
            if !matches!(base, b'A' | b'C' | b'G' | b'T') {
                slot.n += 1;
            }
        }
    }

    fn finalize(self: Box<Self>) -> ModuleResult {
        ModuleResult::NContent(NContent {
            fractions: self.positions.iter().map(|s| ratio(s.n, s.reads)).collect(),
        })
    }
}
