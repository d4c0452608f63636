//! Analysis orchestrator: one streaming pass from record source to report.

use crate::config::AnalysisConfig;
use crate::encoding::{QualityDecoder, QualityEncoding};
use crate::error::FastqError;
use crate::modules::{ModuleKind, QcModule};
use crate::reader::FastqReader;
use crate::record::{FastqRecord, ScoredRecord};
use crate::report::{Report, RunMetadata};

use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Analyze every record of `source` with `active_modules`.
///
/// The first `sample_size_for_encoding_detection` records are buffered to fix
/// the quality encoding, then replayed ahead of the rest of the stream, so the
/// input is traversed exactly once and may be a pipe. Any malformed record
/// aborts the run: no partial report is produced.
pub fn run(
    mut source: FastqReader,
    active_modules: &[ModuleKind],
    config: &AnalysisConfig,
) -> Result<Report, FastqError> {
    config.validate()?;
    let label = source.source().label();

    let sample = buffer_sample(&mut source, config.sample_size_for_encoding_detection)?;
    let encoding = QualityEncoding::detect(&sample.records)?;
    match encoding {
        Some(enc) => log::debug!(
            "{label}: quality encoding {enc} ({} records sampled)",
            sample.records.len()
        ),
        None => log::debug!("{label}: no quality data to detect an encoding from"),
    }

    let mut modules = build_modules(active_modules, config);
    let mut decoder = QualityDecoder::new(encoding);
    let mut scores = Vec::new();
    let mut total_records = 0u64;
    let mut total_bases = 0u64;
    let mut cap_reached_at = None;

    let leading_empty = std::iter::repeat_with(|| Ok(FastqRecord::default()))
        .take(sample.leading_empty);
    for rec in leading_empty
        .chain(sample.records.into_iter().map(Ok))
        .chain(&mut source)
    {
        let rec = rec?;
        decoder.decode_into(&rec.qual, &mut scores);
        let scored = ScoredRecord {
            seq: &rec.seq,
            scores: &scores,
        };
        for module in modules.iter_mut() {
            module.consume(&scored);
        }

        total_records += 1;
        total_bases += rec.len() as u64;
        if cap_reached_at.is_none() && modules.iter().any(|m| m.is_capped()) {
            cap_reached_at = Some(total_records);
        }
    }

    if decoder.out_of_range() > 0 {
        log::warn!(
            "{label}: {} quality characters outside the expected range",
            decoder.out_of_range()
        );
    }
    log::info!("{label}: analyzed {total_records} records ({total_bases} bases)");

    let results = modules.into_iter().map(|m| m.finalize()).collect();
    Ok(Report::new(
        RunMetadata {
            source: label,
            total_records,
            total_bases,
            encoding,
            out_of_range_qualities: decoder.out_of_range(),
            cap_reached_at,
        },
        results,
    ))
}

/// Open `path` (plain or gzip) and run the given modules over it.
pub fn analyze_path<P: AsRef<Path>>(
    path: P,
    active_modules: &[ModuleKind],
    config: &AnalysisConfig,
) -> Result<Report, FastqError> {
    let source = FastqReader::from_path(path, config.reader.clone())?;
    run(source, active_modules, config)
}

/// Run the given modules over an arbitrary buffered stream.
pub fn analyze_bufread<R: BufRead + Send + 'static>(
    reader: R,
    active_modules: &[ModuleKind],
    config: &AnalysisConfig,
) -> Result<Report, FastqError> {
    let source = FastqReader::from_bufread(reader, config.reader.clone())?;
    run(source, active_modules, config)
}

/// Analyze several files, one independent pipeline each.
///
/// Results come back in input order. With the `parallel` feature the files
/// are processed concurrently on the rayon pool; nothing is shared between
/// pipelines, and one file failing does not affect the others.
pub fn analyze_paths<P>(
    paths: &[P],
    active_modules: &[ModuleKind],
    config: &AnalysisConfig,
) -> Vec<(PathBuf, Result<Report, FastqError>)>
where
    P: AsRef<Path> + Sync,
{
    let one = |p: &P| {
        let path = p.as_ref().to_path_buf();
        let result = analyze_path(&path, active_modules, config);
        if let Err(err) = &result {
            log::warn!("{}: {err}", path.display());
        }
        (path, result)
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        paths.par_iter().map(one).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        paths.iter().map(one).collect()
    }
}

/// Records held back for encoding detection, replayed ahead of the stream.
struct Sample {
    /// Zero-length reads seen before the first quality character. Only
    /// counted: they carry nothing to detect from and replay as empty records.
    leading_empty: usize,
    records: Vec<FastqRecord>,
}

/// Buffer up to `size` records, not counting the zero-length reads that
/// precede the first quality character.
fn buffer_sample(source: &mut FastqReader, size: usize) -> Result<Sample, FastqError> {
    let mut sample = Sample {
        leading_empty: 0,
        records: Vec::with_capacity(size.min(4096)),
    };
    while sample.records.len() < size {
        let Some(rec) = source.next_record() else {
            break;
        };
        let rec = rec?;
        if sample.records.is_empty() && rec.qual.is_empty() {
            sample.leading_empty += 1;
            continue;
        }
        sample.records.push(rec);
    }
    Ok(sample)
}

/// One accumulator per distinct kind, in first-mention order.
fn build_modules(kinds: &[ModuleKind], config: &AnalysisConfig) -> Vec<Box<dyn QcModule>> {
    let mut seen = Vec::with_capacity(kinds.len());
    kinds
        .iter()
        .filter(|k| {
            if seen.contains(*k) {
                false
            } else {
                seen.push(**k);
                true
            }
        })
        .map(|k| k.build(config))
        .collect()
}
