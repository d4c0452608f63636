use crate::config::TallyKey;
use std::collections::HashMap;

/// Outcome of offering one sequence to a [`SequenceTally`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    New,
    Existing,
    /// The tally is full and the key was not already present.
    Rejected,
}

/// Occurrence counts per canonical sequence, bounded by a distinct-key cap.
///
/// Once `max_keys` distinct keys are held, unseen keys are rejected while
/// known keys keep counting. Rejections are tracked so consumers can flag
/// results derived from a full tally as approximate.
#[derive(Debug, Clone)]
pub struct SequenceTally {
    counts: HashMap<Vec<u8>, u64>,
    max_keys: usize,
    key: TallyKey,
    tallied: u64,
    rejected: u64,
}

impl SequenceTally {
    pub fn new(max_keys: usize, key: TallyKey) -> Self {
        Self {
            counts: HashMap::with_capacity(max_keys.min(1 << 16)),
            max_keys,
            key,
            tallied: 0,
            rejected: 0,
        }
    }

    pub fn add(&mut self, seq: &[u8]) -> Admission {
        let key = self.key.canonical(seq);
        if let Some(c) = self.counts.get_mut(key) {
            *c += 1;
            self.tallied += 1;
            return Admission::Existing;
        }
        if self.counts.len() >= self.max_keys {
            self.rejected += 1;
            return Admission::Rejected;
        }
        self.counts.insert(key.to_vec(), 1);
        self.tallied += 1;
        Admission::New
    }

    /// Reads counted against some key.
    pub fn tallied(&self) -> u64 {
        self.tallied
    }

    /// Reads turned away because the tally was full.
    pub fn rejected(&self) -> u64 {
        self.rejected
    }

    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn is_full(&self) -> bool {
        self.counts.len() >= self.max_keys
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], u64)> {
        self.counts.iter().map(|(k, &c)| (k.as_slice(), c))
    }

    pub fn counts(&self) -> impl Iterator<Item = u64> + '_ {
        self.counts.values().copied()
    }
}
