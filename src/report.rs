//! The immutable output of one analysis run.

use crate::encoding::QualityEncoding;
use crate::modules::{
    AdapterContent, BasicStatistics, DuplicationLevels, LengthDistribution, ModuleKind, NContent,
    OverrepresentedSequences, PerBaseContent, PerBaseQuality, PerSequenceGc, PerSequenceQuality,
};

/// Finalized output of one metric module.
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleResult {
    BasicStatistics(BasicStatistics),
    PerBaseQuality(PerBaseQuality),
    PerSequenceQuality(PerSequenceQuality),
    PerBaseContent(PerBaseContent),
    PerSequenceGc(PerSequenceGc),
    SequenceLength(LengthDistribution),
    DuplicationLevels(DuplicationLevels),
    OverrepresentedSequences(OverrepresentedSequences),
    AdapterContent(AdapterContent),
    NContent(NContent),
}

impl ModuleResult {
    pub fn kind(&self) -> ModuleKind {
        match self {
            ModuleResult::BasicStatistics(_) => ModuleKind::BasicStatistics,
            ModuleResult::PerBaseQuality(_) => ModuleKind::PerBaseQuality,
            ModuleResult::PerSequenceQuality(_) => ModuleKind::PerSequenceQuality,
            ModuleResult::PerBaseContent(_) => ModuleKind::PerBaseContent,
            ModuleResult::PerSequenceGc(_) => ModuleKind::PerSequenceGc,
            ModuleResult::SequenceLength(_) => ModuleKind::SequenceLength,
            ModuleResult::DuplicationLevels(_) => ModuleKind::DuplicationLevels,
            ModuleResult::OverrepresentedSequences(_) => ModuleKind::OverrepresentedSequences,
            ModuleResult::AdapterContent(_) => ModuleKind::AdapterContent,
            ModuleResult::NContent(_) => ModuleKind::NContent,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// True when a bounded structure behind this result (a capped tally, a
    /// coarse quality histogram) makes the numbers approximate.
    pub fn is_approximate(&self) -> bool {
        match self {
            ModuleResult::PerBaseQuality(r) => r.approximate,
            ModuleResult::DuplicationLevels(r) => r.capped,
            ModuleResult::OverrepresentedSequences(r) => r.capped,
            _ => false,
        }
    }
}

/// Facts about the run itself rather than the reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunMetadata {
    /// File path, or `<stream>` for readers not opened from a path.
    pub source: String,
    pub total_records: u64,
    pub total_bases: u64,
    /// `None` only when the input held no quality characters.
    pub encoding: Option<QualityEncoding>,
    /// Quality characters outside the detected encoding's plausible range.
    pub out_of_range_qualities: u64,
    /// Records processed when the first module hit a capacity cap.
    pub cap_reached_at: Option<u64>,
}

/// Aggregate of all module results for one input.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    metadata: RunMetadata,
    results: Vec<ModuleResult>,
}

macro_rules! typed_accessor {
    ($fn:ident, $variant:ident, $ty:ty) => {
        pub fn $fn(&self) -> Option<&$ty> {
            self.results.iter().find_map(|r| match r {
                ModuleResult::$variant(v) => Some(v),
                _ => None,
            })
        }
    };
}

impl Report {
    pub(crate) fn new(metadata: RunMetadata, results: Vec<ModuleResult>) -> Self {
        Self { metadata, results }
    }

    pub fn metadata(&self) -> &RunMetadata {
        &self.metadata
    }

    /// Results in module activation order.
    pub fn results(&self) -> &[ModuleResult] {
        &self.results
    }

    /// Look a result up by module name, e.g. `"duplication_levels"`.
    pub fn get(&self, name: &str) -> Option<&ModuleResult> {
        self.results.iter().find(|r| r.name() == name)
    }

    pub fn module(&self, kind: ModuleKind) -> Option<&ModuleResult> {
        self.results.iter().find(|r| r.kind() == kind)
    }

    pub fn module_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.results.iter().map(ModuleResult::name)
    }

    typed_accessor!(basic_statistics, BasicStatistics, BasicStatistics);
    typed_accessor!(per_base_quality, PerBaseQuality, PerBaseQuality);
    typed_accessor!(per_sequence_quality, PerSequenceQuality, PerSequenceQuality);
    typed_accessor!(per_base_content, PerBaseContent, PerBaseContent);
    typed_accessor!(per_sequence_gc, PerSequenceGc, PerSequenceGc);
    typed_accessor!(sequence_length, SequenceLength, LengthDistribution);
    typed_accessor!(duplication_levels, DuplicationLevels, DuplicationLevels);
    typed_accessor!(
        overrepresented_sequences,
        OverrepresentedSequences,
        OverrepresentedSequences
    );
    typed_accessor!(adapter_content, AdapterContent, AdapterContent);
    typed_accessor!(n_content, NContent, NContent);
}
