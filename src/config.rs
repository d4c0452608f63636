use crate::contaminants::DEFAULT_ADAPTER_KMERS;
use crate::encoding::MAX_SCORE;
use crate::error::FastqError;
use crate::policy::ReaderOptions;

/// How a read is reduced to the key stored in a sequence tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TallyKey {
    /// The whole sequence.
    Full,
    /// At most the first `length` bases; shorter reads are used whole.
    Prefix { length: usize },
}

impl TallyKey {
    #[inline]
    pub fn canonical<'a>(&self, seq: &'a [u8]) -> &'a [u8] {
        match *self {
            TallyKey::Full => seq,
            TallyKey::Prefix { length } => &seq[..seq.len().min(length)],
        }
    }
}

/// Options recognized by the analysis orchestrator.
///
/// Each knob trades memory for accuracy in one module only.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Records buffered to detect the quality encoding.
    pub sample_size_for_encoding_detection: usize,
    /// Reads admitted to the duplication estimate.
    pub duplication_tally_cap: usize,
    /// Minimum share of tallied reads for a sequence to be reported.
    pub overrepresented_threshold_fraction: f64,
    /// Distinct sequences tracked for overrepresentation.
    pub overrepresented_tally_cap: usize,
    pub adapter_kmer_table: Vec<String>,
    /// Buckets per position in the per-base quality histograms.
    pub quality_histogram_bucket_count: usize,
    pub tally_key: TallyKey,
    pub reader: ReaderOptions,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_size_for_encoding_detection: 10_000,
            duplication_tally_cap: 100_000,
            overrepresented_threshold_fraction: 0.001,
            overrepresented_tally_cap: 100_000,
            adapter_kmer_table: DEFAULT_ADAPTER_KMERS
                .iter()
                .map(|(_, kmer)| kmer.to_string())
                .collect(),
            quality_histogram_bucket_count: 64,
            tally_key: TallyKey::Full,
            reader: ReaderOptions::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), FastqError> {
        fn invalid(msg: impl Into<String>) -> Result<(), FastqError> {
            Err(FastqError::InvalidConfig(msg.into()))
        }

        if self.sample_size_for_encoding_detection == 0 {
            return invalid("sample_size_for_encoding_detection must be at least 1");
        }
        if self.duplication_tally_cap == 0 {
            return invalid("duplication_tally_cap must be at least 1");
        }
        if self.overrepresented_tally_cap == 0 {
            return invalid("overrepresented_tally_cap must be at least 1");
        }
        let t = self.overrepresented_threshold_fraction;
        if !(t > 0.0 && t <= 1.0) {
            return invalid(format!(
                "overrepresented_threshold_fraction must be in (0, 1], got {t}"
            ));
        }
        let max_buckets = MAX_SCORE as usize + 1;
        if !(1..=max_buckets).contains(&self.quality_histogram_bucket_count) {
            return invalid(format!(
                "quality_histogram_bucket_count must be in 1..={max_buckets}, got {}",
                self.quality_histogram_bucket_count
            ));
        }
        if let TallyKey::Prefix { length: 0 } = self.tally_key {
            return invalid("tally prefix length must be at least 1");
        }
        for kmer in &self.adapter_kmer_table {
            if kmer.is_empty() || !kmer.bytes().all(|b| b"ACGTacgt".contains(&b)) {
                return invalid(format!("adapter k-mer {kmer:?} must be non-empty ACGT"));
            }
        }
        Ok(())
    }
}
