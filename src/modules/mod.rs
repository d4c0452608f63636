//! Metric modules: independent accumulators fed one record at a time.
//!
//! Each module owns its state exclusively and never observes another module,
//! so the order in which records are fanned out to them does not matter.

use crate::config::AnalysisConfig;
use crate::record::ScoredRecord;
use crate::report::ModuleResult;

pub mod adapter_content;
pub mod basic_stats;
pub mod duplication;
pub mod length_distribution;
pub mod n_content;
pub mod overrepresented;
pub mod per_base_content;
pub mod per_base_quality;
pub mod per_sequence_gc;
pub mod per_sequence_quality;

pub use adapter_content::{AdapterContent, AdapterCurve};
pub use basic_stats::BasicStatistics;
pub use duplication::{DuplicationBucket, DuplicationLevels};
pub use length_distribution::LengthDistribution;
pub use n_content::NContent;
pub use overrepresented::{OverrepresentedSequence, OverrepresentedSequences};
pub use per_base_content::{BaseFractions, PerBaseContent};
pub use per_base_quality::{PerBaseQuality, PositionQuality};
pub use per_sequence_gc::PerSequenceGc;
pub use per_sequence_quality::PerSequenceQuality;

/// Identifies a metric module; also the key used to look results up in a
/// [`Report`](crate::Report).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModuleKind {
    BasicStatistics,
    PerBaseQuality,
    PerSequenceQuality,
    PerBaseContent,
    PerSequenceGc,
    SequenceLength,
    DuplicationLevels,
    OverrepresentedSequences,
    AdapterContent,
    NContent,
}

impl ModuleKind {
    pub const ALL: [ModuleKind; 10] = [
        ModuleKind::BasicStatistics,
        ModuleKind::PerBaseQuality,
        ModuleKind::PerSequenceQuality,
        ModuleKind::PerBaseContent,
        ModuleKind::PerSequenceGc,
        ModuleKind::SequenceLength,
        ModuleKind::DuplicationLevels,
        ModuleKind::OverrepresentedSequences,
        ModuleKind::AdapterContent,
        ModuleKind::NContent,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ModuleKind::BasicStatistics => "basic_statistics",
            ModuleKind::PerBaseQuality => "per_base_quality",
            ModuleKind::PerSequenceQuality => "per_sequence_quality",
            ModuleKind::PerBaseContent => "per_base_content",
            ModuleKind::PerSequenceGc => "per_sequence_gc",
            ModuleKind::SequenceLength => "sequence_length",
            ModuleKind::DuplicationLevels => "duplication_levels",
            ModuleKind::OverrepresentedSequences => "overrepresented_sequences",
            ModuleKind::AdapterContent => "adapter_content",
            ModuleKind::NContent => "n_content",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Fresh, empty accumulator for this module.
    pub fn build(self, config: &AnalysisConfig) -> Box<dyn QcModule> {
        match self {
            ModuleKind::BasicStatistics => Box::new(basic_stats::BasicStatsModule::new()),
            ModuleKind::PerBaseQuality => Box::new(per_base_quality::PerBaseQualityModule::new(
                config.quality_histogram_bucket_count,
            )),
            ModuleKind::PerSequenceQuality => {
                Box::new(per_sequence_quality::PerSequenceQualityModule::new())
            }
            ModuleKind::PerBaseContent => Box::new(per_base_content::PerBaseContentModule::new()),
            ModuleKind::PerSequenceGc => Box::new(per_sequence_gc::PerSequenceGcModule::new()),
            ModuleKind::SequenceLength => {
                Box::new(length_distribution::LengthDistributionModule::new())
            }
            ModuleKind::DuplicationLevels => Box::new(duplication::DuplicationModule::new(
                config.duplication_tally_cap,
                config.tally_key,
            )),
            ModuleKind::OverrepresentedSequences => {
                Box::new(overrepresented::OverrepresentedModule::new(
                    config.overrepresented_tally_cap,
                    config.overrepresented_threshold_fraction,
                    config.tally_key,
                ))
            }
            ModuleKind::AdapterContent => Box::new(adapter_content::AdapterContentModule::new(
                &config.adapter_kmer_table,
            )),
            ModuleKind::NContent => Box::new(n_content::NContentModule::new()),
        }
    }
}

/// Capability set shared by all metric modules.
pub trait QcModule: Send {
    fn consume(&mut self, record: &ScoredRecord<'_>);

    /// True once a bounded structure stopped admitting new data, making the
    /// final result approximate.
    fn is_capped(&self) -> bool {
        false
    }

    /// Final, immutable result. Consumes the accumulator.
    fn finalize(self: Box<Self>) -> ModuleResult;
}
