//! Streaming FASTQ quality-control engine.
//!
//! - Plain and gzip input (auto-detected from magic bytes, pipes included).
//! - One forward pass per file; memory bounded by read length and tally caps,
//!   never by record count.
//! - Pluggable metric modules: per-base quality, per-sequence quality, base
//!   composition and GC, length distribution, duplication, overrepresented
//!   sequences, adapter content, N content.
//! - All-or-nothing: a malformed record yields an error, never a partial report.
//! - Optional `mmap` for input files; `zlib` feature for system-zlib parity;
//!   `parallel` (default) analyzes several files at once.
//!
//! ```no_run
//! use fastq_qc::{AnalysisConfig, ModuleKind, analyze_path};
//!
//! let report = analyze_path("reads.fastq.gz", &ModuleKind::ALL, &AnalysisConfig::default())?;
//! if let Some(dup) = report.duplication_levels() {
//!     println!("duplicates: {:.1}%", dup.duplicate_fraction * 100.0);
//! }
//! # Ok::<(), fastq_qc::FastqError>(())
//! ```

pub mod analysis;
pub mod compression;
pub mod config;
pub mod contaminants;
pub mod encoding;
pub mod error;
pub mod histogram;
pub mod modules;
pub mod policy;
pub mod positional;
pub mod reader;
pub mod record;
pub mod report;
pub mod tally;

pub use crate::analysis::{analyze_bufread, analyze_path, analyze_paths, run};
pub use crate::compression::Compression;
pub use crate::config::{AnalysisConfig, TallyKey};
pub use crate::encoding::{QualityEncoding, decode};
pub use crate::error::{FastqError, FormatError, RecordContext};
pub use crate::modules::{ModuleKind, QcModule};
pub use crate::policy::{LineMode, ReaderOptions};
pub use crate::reader::{FastqReader, Source};
pub use crate::record::{FastqRecord, ScoredRecord};
pub use crate::report::{ModuleResult, Report, RunMetadata};
