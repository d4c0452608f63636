//! Fixed-size score histogram with approximate quantiles.

use crate::encoding::MAX_SCORE;

const SCORE_SPAN: usize = MAX_SCORE as usize + 1;

/// Bounded-memory histogram over Phred scores `0..=MAX_SCORE`.
///
/// With fewer buckets than distinct scores, each bucket covers a contiguous
/// score interval and quantiles are interpolated inside it. With
/// `SCORE_SPAN` buckets every score has its own bucket and quantiles are exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreHistogram {
    counts: Vec<u64>,
    total: u64,
    sum: u64,
}

impl ScoreHistogram {
    /// `buckets` is clamped to `1..=94`.
    pub fn new(buckets: usize) -> Self {
        Self {
            counts: vec![0; buckets.clamp(1, SCORE_SPAN)],
            total: 0,
            sum: 0,
        }
    }

    #[inline]
    fn bucket_of(&self, score: u8) -> usize {
        score as usize * self.counts.len() / SCORE_SPAN
    }

    /// Lowest and highest score falling in bucket `i`.
    fn bucket_bounds(&self, i: usize) -> (f64, f64) {
        let n = self.counts.len();
        let lo = (i * SCORE_SPAN).div_ceil(n);
        let hi = ((i + 1) * SCORE_SPAN).div_ceil(n) - 1;
        (lo as f64, hi as f64)
    }

    #[inline]
    pub fn add(&mut self, score: u8) {
        let score = score.min(MAX_SCORE);
        let b = self.bucket_of(score);
        self.counts[b] += 1;
        self.total += 1;
        self.sum += score as u64;
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Exact mean; the running sum is kept outside the buckets.
    pub fn mean(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.sum as f64 / self.total as f64
        }
    }

    /// Nearest-rank quantile, `p` in `[0, 1]`. Returns 0 when empty.
    pub fn quantile(&self, p: f64) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let rank = ((p.clamp(0.0, 1.0) * self.total as f64).ceil() as u64).max(1);
        let mut seen = 0u64;
        for (i, &c) in self.counts.iter().enumerate() {
            if c == 0 {
                continue;
            }
            if seen + c >= rank {
                let (lo, hi) = self.bucket_bounds(i);
                let within = (rank - seen - 1) as f64 / c as f64;
                return lo + (hi - lo) * within;
            }
            seen += c;
        }
        MAX_SCORE as f64
    }
}
