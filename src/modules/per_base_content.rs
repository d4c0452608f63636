//! Base composition at each read position, plus overall GC.

use super::QcModule;
use crate::positional::{BaseCounts, PositionalAccumulator, ratio};
use crate::record::ScoredRecord;
use crate::report::ModuleResult;

/// Fractions of each base at one 1-based position. `a + c + g + t + n == 1`
/// whenever any read reaches the position.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseFractions {
    pub position: usize,
    pub a: f64,
    pub c: f64,
    pub g: f64,
    pub t: f64,
    pub n: f64,
    /// `(G + C) / (A + C + G + T)` at this position.
    pub gc: f64,
}

impl BaseFractions {
    fn from_counts(position: usize, c: &BaseCounts) -> Self {
        let total = c.total();
        Self {
            position,
            a: ratio(c.a, total),
            c: ratio(c.c, total),
            g: ratio(c.g, total),
            t: ratio(c.t, total),
            n: ratio(c.n, total),
            gc: c.gc_fraction(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerBaseContent {
    pub positions: Vec<BaseFractions>,
    /// Totals over all positions.
    pub totals: BaseCounts,
    /// Overall GC; N bases are excluded from the denominator.
    pub gc_fraction: f64,
}

#[derive(Debug, Default)]
pub(crate) struct PerBaseContentModule {
    positions: PositionalAccumulator<BaseCounts>,
}

impl PerBaseContentModule {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl QcModule for PerBaseContentModule {
    fn consume(&mut self, record: &ScoredRecord<'_>) {
        let slots = self.positions.covering(record.len(), BaseCounts::default);
        for (counts, &base) in slots.iter_mut().zip(record.seq) {
            counts.add(base);
        }
    }

    fn finalize(self: Box<Self>) -> ModuleResult {
        let mut totals = BaseCounts::default();
        let positions = self
            .positions
            .iter()
            .enumerate()
            .map(|(i, c)| {
                totals.merge(c);
                BaseFractions::from_counts(i + 1, c)
            })
            .collect();
        ModuleResult::PerBaseContent(PerBaseContent {
            positions,
            gc_fraction: totals.gc_fraction(),
            totals,
        })
    }
}
