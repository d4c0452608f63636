//! Built-in adapter and contaminant sequences.

/// Adapter k-mers searched by the adapter-content module, as `(name, kmer)`.
pub const DEFAULT_ADAPTER_KMERS: &[(&str, &str)] = &[
    ("Illumina Universal Adapter", "AGATCGGAAGAG"),
    ("Illumina Small RNA 3' Adapter", "TGGAATTCTCGG"),
    ("Illumina Small RNA 5' Adapter", "GATCGTCGGACT"),
    ("Nextera Transposase Sequence", "CTGTCTCTTATA"),
    ("SOLID Small RNA Adapter", "CGCCTTGGCCGT"),
];

/// Known contaminants used to annotate overrepresented sequences.
pub const CONTAMINANTS: &[(&str, &str)] = &[
    (
        "TruSeq Adapter, Read 1",
        "AGATCGGAAGAGCACACGTCTGAACTCCAGTCAC",
    ),
    (
        "TruSeq Adapter, Read 2",
        "AGATCGGAAGAGCGTCGTGTAGGGAAAGAGTGT",
    ),
    (
        "TruSeq Universal Adapter",
        "AATGATACGGCGACCACCGAGATCTACACTCTTTCCCTACACGACGCTCTTCCGATCT",
    ),
    (
        "Illumina Single End Adapter 1",
        "GATCGGAAGAGCTCGTATGCCGTCTTCTGCTTG",
    ),
    (
        "Illumina Multiplexing PCR Primer 2.01",
        "GTGACTGGAGTTCAGACGTGTGCTCTTCCGATCT",
    ),
    ("Illumina Small RNA 3' Adapter", "TGGAATTCTCGGGTGCCAAGG"),
    ("Nextera Transposase Sequence", "CTGTCTCTTATACACATCT"),
    (
        "Nextera Read 1 Adapter",
        "TCGTCGGCAGCGTCAGATGTGTATAAGAGACAG",
    ),
    (
        "Nextera Read 2 Adapter",
        "GTCTCGTGGGCTCGGAGATGTGTATAAGAGACAG",
    ),
    ("Poly-A", "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAA"),
    ("Poly-G", "GGGGGGGGGGGGGGGGGGGGGGGGGGGGGG"),
];

/// Shortest overlap accepted as a contaminant hit.
pub const MIN_MATCH_LEN: usize = 8;

/// Name of the adapter whose k-mer is `kmer`, if it is a built-in one.
pub fn adapter_name(kmer: &[u8]) -> Option<&'static str> {
    DEFAULT_ADAPTER_KMERS
        .iter()
        .find(|(_, k)| k.as_bytes().eq_ignore_ascii_case(kmer))
        .map(|(name, _)| *name)
}

/// First known contaminant that contains `seq` or is contained in it.
pub fn find_contaminant(seq: &[u8]) -> Option<&'static str> {
    CONTAMINANTS
        .iter()
        .find(|(_, c)| {
            let c = c.as_bytes();
            let (short, long) = if c.len() <= seq.len() { (c, seq) } else { (seq, c) };
            short.len() >= MIN_MATCH_LEN && contains(long, short)
        })
        .map(|(name, _)| *name)
}

#[inline]
pub(crate) fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    find(haystack, needle).is_some()
}

/// Start of the first occurrence of `needle` in `haystack`.
#[inline]
pub(crate) fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
