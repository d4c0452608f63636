//! Cumulative adapter k-mer occurrence by read position.

use super::QcModule;
use crate::contaminants::{adapter_name, find};
use crate::positional::ratio;
use crate::record::ScoredRecord;
use crate::report::ModuleResult;

#[derive(Debug, Clone, PartialEq)]
pub struct AdapterCurve {
    pub kmer: String,
    pub name: Option<&'static str>,
    /// `fractions[i]`: share of all reads whose first hit of `kmer` starts at
    /// or before position `i` (0-based). Non-decreasing.
    pub fractions: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdapterContent {
    pub total_reads: u64,
    pub curves: Vec<AdapterCurve>,
}

struct KmerHits {
    kmer: Vec<u8>,
    /// Reads whose first hit starts at each position.
    first_hit_at: Vec<u64>,
}

pub(crate) struct AdapterContentModule {
    kmers: Vec<KmerHits>,
    reads: u64,
    max_len: usize,
}

impl AdapterContentModule {
    pub(crate) fn new(kmers: &[String]) -> Self {
        Self {
            kmers: kmers
                .iter()
                .map(|k| KmerHits {
                    kmer: k.to_ascii_uppercase().into_bytes(),
                    first_hit_at: Vec::new(),
                })
                .collect(),
            reads: 0,
            max_len: 0,
        }
    }
}

impl QcModule for AdapterContentModule {
    fn consume(&mut self, record: &ScoredRecord<'_>) {
        self.reads += 1;
        self.max_len = self.max_len.max(record.len());
        for hits in &mut self.kmers {
            if let Some(pos) = find(record.seq, &hits.kmer) {
                if hits.first_hit_at.len() <= pos {
                    hits.first_hit_at.resize(pos + 1, 0);
                }
                hits.first_hit_at[pos] += 1;
            }
        }
    }

    fn finalize(self: Box<Self>) -> ModuleResult {
        let reads = self.reads;
        let max_len = self.max_len;
        let curves = self
            .kmers
            .into_iter()
            .map(|hits| {
                let mut running = 0u64;
                let fractions = (0..max_len)
                    .map(|i| {
                        running += hits.first_hit_at.get(i).copied().unwrap_or(0);
                        ratio(running, reads)
                    })
                    .collect();
                AdapterCurve {
                    name: adapter_name(&hits.kmer),
                    kmer: String::from_utf8_lossy(&hits.kmer).into_owned(),
                    fractions,
                }
            })
            .collect();
        ModuleResult::AdapterContent(AdapterContent {
            total_reads: reads,
            curves,
        })
    }
}
