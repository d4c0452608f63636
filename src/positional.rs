//! Per-position accumulators that grow with the longest read seen.

/// Per-position slots indexed `0..len`, where `len` is the longest read seen.
/// Grows on demand and never shrinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionalAccumulator<T> {
    slots: Vec<T>,
}

impl<T> Default for PositionalAccumulator<T> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<T> PositionalAccumulator<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slots for positions `0..len`, creating missing ones with `make`.
    pub fn covering(&mut self, len: usize, make: impl FnMut() -> T) -> &mut [T] {
        if self.slots.len() < len {
            self.slots.resize_with(len, make);
        }
        &mut self.slots[..len]
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.slots.iter()
    }
}

/// Base counts over the A/C/G/T/N alphabet; anything else counts as N.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseCounts {
    pub a: u64,
    pub c: u64,
    pub g: u64,
    pub t: u64,
    pub n: u64,
}

impl BaseCounts {
    #[inline]
    pub fn add(&mut self, base: u8) {
        match base {
            b'A' => self.a += 1,
            b'C' => self.c += 1,
            b'G' => self.g += 1,
            b'T' => self.t += 1,
            _ => self.n += 1,
        }
    }

    pub fn add_all(&mut self, seq: &[u8]) {
        for &b in seq {
            self.add(b);
        }
    }

    pub fn merge(&mut self, other: &BaseCounts) {
        self.a += other.a;
        self.c += other.c;
        self.g += other.g;
        self.t += other.t;
        self.n += other.n;
    }

    pub fn total(&self) -> u64 {
        self.acgt() + self.n
    }

    /// Called bases, the GC denominator.
    pub fn acgt(&self) -> u64 {
        self.a + self.c + self.g + self.t
    }

    /// `(G + C) / (A + C + G + T)`; 0 when no base was called.
    pub fn gc_fraction(&self) -> f64 {
        ratio(self.g + self.c, self.acgt())
    }
}

/// `num / den` computed once from exact counts; 0 for an empty denominator.
#[inline]
pub(crate) fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulator_grows_and_never_shrinks() {
        let mut acc: PositionalAccumulator<u64> = PositionalAccumulator::new();
        for slot in acc.covering(5, || 0) {
            *slot += 1;
        }
        for slot in acc.covering(2, || 0) {
            *slot += 1;
        }
        assert_eq!(acc.len(), 5);
        assert_eq!(acc.iter().copied().collect::<Vec<_>>(), vec![2, 2, 1, 1, 1]);
    }

    #[test]
    fn gc_excludes_n() {
        let mut c = BaseCounts::default();
        c.add_all(b"ACGTN");
        assert_eq!(c.total(), 5);
        assert_eq!(c.gc_fraction(), 0.5);
    }
}
