/// How sequence/quality lines are laid out in FASTQ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMode {
    /// Sequence and quality occupy exactly one line each (four-line records).
    Single,
    /// Sequence/quality may span multiple lines (wrapped FASTQ).
    Multi,
}

/// Parsing options for [`FastqReader`](crate::FastqReader).
///
/// There is no skip-and-resync policy: the first malformed record ends the
/// stream with an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Report a `>` header as FASTA input rather than a generic missing header.
    pub fastq_only: bool,
    pub line_mode: LineMode,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            fastq_only: true,
            line_mode: LineMode::Single,
        }
    }
}
