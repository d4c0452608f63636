use fastq_qc::{
    AnalysisConfig, FastqError, FormatError, ModuleKind, ModuleResult, QualityEncoding, Report,
    TallyKey, analyze_bufread,
};
use std::io::{BufReader, Cursor};

const TWO_IDENTICAL: &str = "@r1\nACGTN\n+\nIIIII\n@r2\nACGTN\n+\nIIIII\n";

fn analyze_with(data: impl Into<Vec<u8>>, config: &AnalysisConfig) -> Result<Report, FastqError> {
    analyze_bufread(
        BufReader::new(Cursor::new(data.into())),
        &ModuleKind::ALL,
        config,
    )
}

fn analyze(data: impl Into<Vec<u8>>) -> Report {
    analyze_with(data, &AnalysisConfig::default()).unwrap()
}

fn repeated(n: usize, seq: &str, qual: &str) -> String {
    (0..n).map(|i| format!("@r{i}\n{seq}\n+\n{qual}\n")).collect()
}

#[test]
fn two_identical_reads() {
    let report = analyze(TWO_IDENTICAL);
    let meta = report.metadata();
    assert_eq!(meta.encoding, Some(QualityEncoding::Phred33));
    assert_eq!(meta.total_records, 2);
    assert_eq!(meta.total_bases, 10);
    assert_eq!(meta.source, "<stream>");
    assert_eq!(meta.cap_reached_at, None);

    let lengths = report.sequence_length().unwrap();
    assert_eq!(lengths.counts.iter().collect::<Vec<_>>(), vec![(&5, &2)]);
    assert!(lengths.uniform);

    let dup = report.duplication_levels().unwrap();
    assert_eq!(dup.distinct_sequences, 1);
    assert_eq!(dup.tallied_reads, 2);
    assert_eq!(dup.duplicate_fraction, 0.5);
    assert!(!dup.capped);
    let two = dup.buckets.iter().find(|b| b.label == "2").unwrap();
    assert_eq!((two.distinct_sequences, two.reads), (1, 2));

    let content = report.per_base_content().unwrap();
    assert_eq!(content.gc_fraction, 0.5);
    assert_eq!(content.positions.len(), 5);
    assert_eq!(content.positions[4].n, 1.0);

    let gc = report.per_sequence_gc().unwrap();
    assert_eq!(gc.counts[50], 2);
    assert_eq!(gc.mode(), Some(50));

    let n = report.n_content().unwrap();
    assert_eq!(n.fractions, vec![0.0, 0.0, 0.0, 0.0, 1.0]);

    let per_seq = report.per_sequence_quality().unwrap();
    assert_eq!(per_seq.counts.get(&40), Some(&2));

    let basic = report.basic_statistics().unwrap();
    assert_eq!(basic.total_sequences, 2);
    assert_eq!((basic.min_length, basic.max_length), (5, 5));
    assert_eq!(basic.mean_length, 5.0);
    assert_eq!(basic.gc_fraction, 0.5);
    assert_eq!(basic.mean_quality, 40.0);

    let quality = report.per_base_quality().unwrap();
    assert_eq!(quality.positions.len(), 5);
    for pos in &quality.positions {
        assert_eq!(pos.count, 2);
        assert_eq!(pos.mean, 40.0);
        assert!((pos.median - 40.0).abs() <= 1.5);
    }

    let over = report.overrepresented_sequences().unwrap();
    assert_eq!(over.sequences.len(), 1);
    assert_eq!(over.sequences[0].sequence, "ACGTN");
    assert_eq!(over.sequences[0].count, 2);
    assert_eq!(over.sequences[0].fraction, 1.0);
    assert_eq!(over.sequences[0].possible_source, None);

    assert!(report.get("per_base_quality").unwrap().is_approximate());
    assert!(!report.get("sequence_length").unwrap().is_approximate());
}

#[test]
fn capped_duplication_is_flagged_not_exact() {
    let config = AnalysisConfig {
        duplication_tally_cap: 100,
        ..AnalysisConfig::default()
    };
    let report = analyze_with(repeated(10_000, "ACGTACGTAC", "IIIIIIIIII"), &config).unwrap();

    let dup = report.duplication_levels().unwrap();
    assert!(dup.capped);
    assert_eq!(dup.tallied_reads, 100);
    assert_eq!(dup.untallied_reads, 9_900);
    assert_eq!(dup.distinct_sequences, 1);
    assert!((dup.duplicate_fraction - 0.99).abs() < 1e-12);
    assert!(report.get("duplication_levels").unwrap().is_approximate());

    let over_50 = dup.buckets.iter().find(|b| b.label == ">50").unwrap();
    assert_eq!(over_50.reads, 100);

    assert_eq!(report.metadata().total_records, 10_000);
    assert_eq!(report.metadata().cap_reached_at, Some(101));
}

#[test]
fn duplication_histogram_sums_to_tallied_reads() {
    let mut data = repeated(7, "AAAACCCC", "IIIIIIII");
    data += &repeated(3, "GGGGTTTT", "IIIIIIII");
    data += &repeated(1, "ACACACAC", "IIIIIIII");
    data += &repeated(60, "TTTTTTTT", "IIIIIIII");
    let dup = analyze(data).duplication_levels().unwrap().clone();

    assert_eq!(dup.tallied_reads, 71);
    assert_eq!(dup.buckets.iter().map(|b| b.reads).sum::<u64>(), 71);
    let by_label = |l: &str| dup.buckets.iter().find(|b| b.label == l).unwrap().reads;
    assert_eq!(by_label("1"), 1);
    assert_eq!(by_label("3-5"), 3);
    assert_eq!(by_label("6-10"), 7);
    assert_eq!(by_label(">50"), 60);
    assert!((dup.duplicate_fraction - (1.0 - 4.0 / 71.0)).abs() < 1e-12);
}

#[test]
fn prefix_tally_key_groups_long_reads() {
    let config = AnalysisConfig {
        tally_key: TallyKey::Prefix { length: 4 },
        ..AnalysisConfig::default()
    };
    let data = "@a\nACGTAAAA\n+\nIIIIIIII\n@b\nACGTCCCC\n+\nIIIIIIII\n";
    let report = analyze_with(data, &config).unwrap();
    assert_eq!(report.duplication_levels().unwrap().distinct_sequences, 1);
}

#[test]
fn empty_input_reports_zero_counts() {
    let report = analyze("");
    let meta = report.metadata();
    assert_eq!(meta.total_records, 0);
    assert_eq!(meta.encoding, None);
    assert_eq!(report.results().len(), ModuleKind::ALL.len());

    let basic = report.basic_statistics().unwrap();
    assert_eq!(basic.total_sequences, 0);
    assert_eq!(basic.min_length, 0);
    assert_eq!(basic.gc_fraction, 0.0);
    assert!(report.sequence_length().unwrap().counts.is_empty());
    assert!(report.per_base_quality().unwrap().positions.is_empty());
    assert!(report.per_sequence_quality().unwrap().counts.is_empty());
    assert_eq!(report.duplication_levels().unwrap().tallied_reads, 0);
    assert_eq!(report.duplication_levels().unwrap().duplicate_fraction, 0.0);
    assert!(report.overrepresented_sequences().unwrap().sequences.is_empty());
    assert!(report.n_content().unwrap().fractions.is_empty());
    assert_eq!(report.per_sequence_gc().unwrap().counts.iter().sum::<u64>(), 0);
    assert!(
        report
            .adapter_content()
            .unwrap()
            .curves
            .iter()
            .all(|c| c.fractions.is_empty())
    );
}

#[test]
fn truncated_trailing_record_aborts_without_report() {
    let data = format!("{}@r3\nACGT\n+\n", repeated(2, "ACGT", "IIII"));
    let err = analyze_with(data, &AnalysisConfig::default()).unwrap_err();
    assert_eq!(err.record_index(), Some(3));
    assert!(matches!(
        err,
        FastqError::MalformedRecord {
            source: FormatError::UnexpectedEof,
            ..
        }
    ));
}

#[test]
fn malformed_record_after_detection_sample_aborts() {
    let config = AnalysisConfig {
        sample_size_for_encoding_detection: 2,
        ..AnalysisConfig::default()
    };
    let data = format!("{}@bad\nACGT\n+\nIII\n", repeated(5, "ACGT", "IIII"));
    let err = analyze_with(data, &config).unwrap_err();
    assert_eq!(err.record_index(), Some(6));
    assert!(err.is_malformed());
}

#[test]
fn analysis_is_idempotent() {
    let mut data = repeated(50, "ACGTTGCAAGGCTTAA", "IIIIHHHHGGGG####");
    data += &repeated(20, "AGATCGGAAGAGCACA", "5555555555555555");
    data += &repeated(3, "NNNNACGT", "!!!!IIII");
    let a = analyze(data.clone());
    let b = analyze(data);
    assert_eq!(a, b);
}

#[test]
fn sample_buffer_is_replayed_exactly_once() {
    for sample in [1, 3, 10, 1_000] {
        let config = AnalysisConfig {
            sample_size_for_encoding_detection: sample,
            ..AnalysisConfig::default()
        };
        let report = analyze_with(repeated(10, "ACGT", "IIII"), &config).unwrap();
        assert_eq!(report.metadata().total_records, 10, "sample size {sample}");
        assert_eq!(
            report.sequence_length().unwrap().counts.get(&4),
            Some(&10),
            "sample size {sample}"
        );
    }
}

#[test]
fn composition_fractions_sum_to_one() {
    let data = "@a\nACGTNA\n+\nIIIIII\n@b\nGGCA\n+\nIIII\n@c\nTTTTTTTT\n+\nIIIIIIII\n";
    let content = analyze(data).per_base_content().unwrap().clone();
    assert_eq!(content.positions.len(), 8);
    for p in &content.positions {
        let sum = p.a + p.c + p.g + p.t + p.n;
        assert!((sum - 1.0).abs() < 1e-9, "position {} sums to {sum}", p.position);
    }
    // shorter reads stop contributing past their own length
    assert_eq!(content.positions[7].t, 1.0);
}

#[test]
fn variable_lengths_are_flagged() {
    let data = "@a\nACGT\n+\nIIII\n@b\nACGTAC\n+\nIIIIII\n@c\nACGT\n+\nIIII\n";
    let lengths = analyze(data).sequence_length().unwrap().clone();
    assert!(!lengths.uniform);
    assert_eq!(lengths.min(), Some(4));
    assert_eq!(lengths.max(), Some(6));
    assert_eq!(lengths.counts.get(&4), Some(&2));
}

#[test]
fn per_base_quality_with_full_resolution_is_exact() {
    let config = AnalysisConfig {
        quality_histogram_bucket_count: 94,
        ..AnalysisConfig::default()
    };
    // scores at position 1: 10, 20, 30, 40; position 2 is always 40
    let data = "@a\nAA\n+\n+I\n@b\nAA\n+\n5I\n@c\nAA\n+\n?I\n@d\nAA\n+\nII\n";
    let report = analyze_with(data, &config).unwrap();
    let q = report.per_base_quality().unwrap();
    assert!(!q.approximate);
    assert!(!report.get("per_base_quality").unwrap().is_approximate());
    let first = &q.positions[0];
    assert_eq!(first.position, 1);
    assert_eq!(first.mean, 25.0);
    assert_eq!(first.median, 20.0);
    assert_eq!(first.lower_quartile, 10.0);
    assert_eq!(first.upper_quartile, 30.0);
    assert_eq!(first.percentile_90, 40.0);
    assert_eq!(q.positions[1].median, 40.0);
}

#[test]
fn shorter_reads_do_not_pollute_later_positions() {
    let data = "@a\nAC\n+\n!!\n@b\nACGT\n+\nIIII\n";
    let report = analyze(data);
    let q = report.per_base_quality().unwrap();
    assert_eq!(q.positions[0].count, 2);
    assert_eq!(q.positions[3].count, 1);
    assert_eq!(q.positions[3].mean, 40.0);
}

#[test]
fn phred64_input_is_decoded_with_offset_64() {
    let report = analyze("@a\nACGT\n+\nhhhB\n");
    assert_eq!(report.metadata().encoding, Some(QualityEncoding::Phred64));
    let per_seq = report.per_sequence_quality().unwrap();
    // (40 + 40 + 40 + 2) / 4 = 30.5, rounded half-up
    assert_eq!(per_seq.counts.get(&31), Some(&1));
}

#[test]
fn ambiguous_encoding_aborts() {
    let err = analyze_with("@a\nACGT\n+\n III\n", &AnalysisConfig::default()).unwrap_err();
    assert!(matches!(err, FastqError::AmbiguousEncoding { min: b' ', .. }));
}

#[test]
fn implausible_quality_after_detection_is_a_warning() {
    let config = AnalysisConfig {
        sample_size_for_encoding_detection: 1,
        ..AnalysisConfig::default()
    };
    let report = analyze_with("@a\nACGT\n+\nIIII\n@b\nACGT\n+\nII I\n", &config).unwrap();
    assert_eq!(report.metadata().encoding, Some(QualityEncoding::Phred33));
    assert_eq!(report.metadata().out_of_range_qualities, 1);
    assert_eq!(report.metadata().total_records, 2);
}

#[test]
fn adapter_curve_is_cumulative() {
    let data = "\
@a
CCAGATCGGAAGAGTT
+
IIIIIIIIIIIIIIII
@b
CCCCCCCCCCCCCCCC
+
IIIIIIIIIIIIIIII
";
    let adapters = report_adapters(data);
    let universal = adapters
        .curves
        .iter()
        .find(|c| c.name == Some("Illumina Universal Adapter"))
        .unwrap();
    assert_eq!(universal.kmer, "AGATCGGAAGAG");
    assert_eq!(universal.fractions.len(), 16);
    assert_eq!(universal.fractions[1], 0.0);
    assert_eq!(universal.fractions[2], 0.5);
    assert_eq!(universal.fractions[15], 0.5);
    assert!(universal.fractions.windows(2).all(|w| w[0] <= w[1]));
}

fn report_adapters(data: &str) -> fastq_qc::modules::AdapterContent {
    analyze(data.to_string()).adapter_content().unwrap().clone()
}

#[test]
fn overrepresented_sequences_are_sorted_and_annotated() {
    let adapter = "AGATCGGAAGAGCACACGTCTGAACTCCAGTCAC";
    let qual = "I".repeat(adapter.len());
    let mut data = repeated(30, adapter, &qual);
    data += &repeated(10, &"ACGT".repeat(8), &qual[..32]);
    for i in 0..960 {
        // distinct background reads
        let seq: String = format!("{i:032b}")
            .chars()
            .map(|c| if c == '0' { 'A' } else { 'C' })
            .collect();
        data += &format!("@bg{i}\n{seq}G\n+\n{}\n", &qual[..33]);
    }
    let config = AnalysisConfig {
        overrepresented_threshold_fraction: 0.005,
        ..AnalysisConfig::default()
    };
    let report = analyze_with(data, &config).unwrap();
    let over = report.overrepresented_sequences().unwrap();
    assert_eq!(over.tallied_reads, 1_000);
    assert_eq!(over.sequences.len(), 2);
    assert_eq!(over.sequences[0].sequence, adapter);
    assert_eq!(over.sequences[0].count, 30);
    assert_eq!(over.sequences[0].possible_source, Some("TruSeq Adapter, Read 1"));
    assert_eq!(over.sequences[1].count, 10);
    assert!((over.sequences[1].fraction - 0.01).abs() < 1e-12);
}

#[test]
fn overrepresented_tally_cap_rejects_new_sequences() {
    let config = AnalysisConfig {
        overrepresented_tally_cap: 2,
        ..AnalysisConfig::default()
    };
    let data = "@a\nAAAA\n+\nIIII\n@b\nCCCC\n+\nIIII\n@c\nGGGG\n+\nIIII\n@d\nAAAA\n+\nIIII\n";
    let report = analyze_with(data, &config).unwrap();
    let over = report.overrepresented_sequences().unwrap();
    assert!(over.capped);
    assert_eq!(over.rejected_reads, 1);
    assert_eq!(over.tallied_reads, 3);
    assert_eq!(over.sequences[0].sequence, "AAAA");
    assert_eq!(over.sequences[0].count, 2);
    assert_eq!(report.metadata().cap_reached_at, Some(3));
}

#[test]
fn selected_modules_only() {
    let report = analyze_bufread(
        BufReader::new(TWO_IDENTICAL.as_bytes()),
        &[
            ModuleKind::SequenceLength,
            ModuleKind::DuplicationLevels,
            ModuleKind::SequenceLength,
        ],
        &AnalysisConfig::default(),
    )
    .unwrap();
    assert_eq!(
        report.module_names().collect::<Vec<_>>(),
        ["sequence_length", "duplication_levels"]
    );
    assert!(report.get("per_base_quality").is_none());
    assert!(matches!(
        report.get("sequence_length"),
        Some(ModuleResult::SequenceLength(_))
    ));
    assert_eq!(
        ModuleKind::from_name("duplication_levels"),
        Some(ModuleKind::DuplicationLevels)
    );
}

#[test]
fn invalid_configuration_is_rejected() {
    let bad = [
        AnalysisConfig {
            quality_histogram_bucket_count: 0,
            ..AnalysisConfig::default()
        },
        AnalysisConfig {
            quality_histogram_bucket_count: 95,
            ..AnalysisConfig::default()
        },
        AnalysisConfig {
            overrepresented_threshold_fraction: 0.0,
            ..AnalysisConfig::default()
        },
        AnalysisConfig {
            duplication_tally_cap: 0,
            ..AnalysisConfig::default()
        },
        AnalysisConfig {
            adapter_kmer_table: vec!["ACGN".into()],
            ..AnalysisConfig::default()
        },
        AnalysisConfig {
            tally_key: TallyKey::Prefix { length: 0 },
            ..AnalysisConfig::default()
        },
    ];
    for config in bad {
        assert!(matches!(
            analyze_with(TWO_IDENTICAL, &config),
            Err(FastqError::InvalidConfig(_))
        ));
    }
    assert!(AnalysisConfig::default().validate().is_ok());
}

#[test]
fn many_files_keep_input_order_and_fail_independently() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.fastq");
    let bad = dir.path().join("bad.fastq");
    let missing = dir.path().join("missing.fastq");
    std::fs::write(&good, TWO_IDENTICAL).unwrap();
    std::fs::write(&bad, "@r1\nACGT\n+\nII\n").unwrap();

    let paths = [good.clone(), bad.clone(), missing.clone()];
    let results = fastq_qc::analyze_paths(&paths, &ModuleKind::ALL, &AnalysisConfig::default());
    assert_eq!(
        results.iter().map(|(p, _)| p.clone()).collect::<Vec<_>>(),
        paths.to_vec()
    );

    let report = results[0].1.as_ref().unwrap();
    assert_eq!(report.metadata().total_records, 2);
    assert_eq!(report.metadata().source, good.display().to_string());
    assert!(matches!(
        results[1].1,
        Err(FastqError::MalformedRecord {
            source: FormatError::LengthMismatch { seq: 4, qual: 2 },
            ..
        })
    ));
    assert!(matches!(results[2].1, Err(FastqError::Io { .. })));
}

#[test]
fn long_run_of_empty_reads_before_the_first_quality() {
    let config = AnalysisConfig {
        sample_size_for_encoding_detection: 1,
        ..AnalysisConfig::default()
    };
    let mut data = "@e\n\n+\n\n".repeat(20_000);
    data += "@r\nACGT\n+\nhhhh\n@e2\n\n+\n\n";
    let report = analyze_with(data, &config).unwrap();

    let meta = report.metadata();
    assert_eq!(meta.total_records, 20_002);
    assert_eq!(meta.encoding, Some(QualityEncoding::Phred64));
    let per_seq = report.per_sequence_quality().unwrap();
    assert_eq!(per_seq.empty_reads, 20_001);
    assert_eq!(per_seq.counts.get(&40), Some(&1));
    assert_eq!(report.sequence_length().unwrap().counts.get(&0), Some(&20_001));
}

#[test]
fn only_empty_reads_leave_the_encoding_undetermined() {
    let config = AnalysisConfig {
        sample_size_for_encoding_detection: 1,
        ..AnalysisConfig::default()
    };
    let report = analyze_with("@e\n\n+\n\n".repeat(5_000), &config).unwrap();
    assert_eq!(report.metadata().encoding, None);
    assert_eq!(report.metadata().total_records, 5_000);
    assert_eq!(report.basic_statistics().unwrap().total_bases, 0);
}
