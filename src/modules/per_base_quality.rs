//! Box-plot summary of quality scores at each read position.

use super::QcModule;
use crate::histogram::ScoreHistogram;
use crate::positional::PositionalAccumulator;
use crate::record::ScoredRecord;
use crate::report::ModuleResult;

/// Quality summary for one 1-based read position.
///
/// Quantiles come from a bucketed histogram and are approximate unless the
/// histogram has one bucket per score; `mean` is exact.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionQuality {
    pub position: usize,
    /// Reads long enough to reach this position.
    pub count: u64,
    pub mean: f64,
    pub median: f64,
    pub lower_quartile: f64,
    pub upper_quartile: f64,
    pub percentile_10: f64,
    pub percentile_90: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerBaseQuality {
    pub positions: Vec<PositionQuality>,
    pub bucket_count: usize,
    /// Buckets span several scores, so quantiles are interpolated within a
    /// bucket. False only with one bucket per score.
    pub approximate: bool,
}

pub(crate) struct PerBaseQualityModule {
    buckets: usize,
    positions: PositionalAccumulator<ScoreHistogram>,
}

impl PerBaseQualityModule {
    pub(crate) fn new(buckets: usize) -> Self {
        Self {
            buckets,
            positions: PositionalAccumulator::new(),
        }
    }
}

impl QcModule for PerBaseQualityModule {
    fn consume(&mut self, record: &ScoredRecord<'_>) {
        let buckets = self.buckets;
        let slots = self
            .positions
            .covering(record.scores.len(), || ScoreHistogram::new(buckets));
        for (hist, &q) in slots.iter_mut().zip(record.scores) {
            hist.add(q);
        }
    }

    fn finalize(self: Box<Self>) -> ModuleResult {
        let positions = self
            .positions
            .iter()
            .enumerate()
            .map(|(i, h)| PositionQuality {
                position: i + 1,
                count: h.total(),
                mean: h.mean(),
                median: h.quantile(0.5),
                lower_quartile: h.quantile(0.25),
                upper_quartile: h.quantile(0.75),
                percentile_10: h.quantile(0.1),
                percentile_90: h.quantile(0.9),
            })
            .collect();
        ModuleResult::PerBaseQuality(PerBaseQuality {
            approximate: self.buckets <= crate::encoding::MAX_SCORE as usize,
            bucket_count: self.buckets,
            positions,
        })
    }
}
