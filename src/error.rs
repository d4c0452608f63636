use std::fmt;
use std::io;
use thiserror::Error;

/// Where in the input a problem was found.
///
/// `record_index` is 1-based; `byte_offset` points at the first byte of the
/// record's header line in the (decompressed) stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordContext {
    pub record_index: u64,
    pub byte_offset: u64,
    pub line_num: u64,
}

impl fmt::Display for RecordContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "record {} (byte offset {}, line {})",
            self.record_index, self.byte_offset, self.line_num
        )
    }
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("expected header '@' at start of record")]
    MissingHeader,
    #[error("found FASTA header '>' where FASTQ '@' expected")]
    FastaHeaderDetected,
    #[error("missing '+' separator line")]
    MissingPlus,
    #[error("unexpected EOF inside record")]
    UnexpectedEof,
    #[error("quality length ({qual}) does not match sequence length ({seq})")]
    LengthMismatch { seq: usize, qual: usize },
}

#[derive(Debug, Error)]
pub enum FastqError {
    #[error("I/O error at {ctx}: {source}")]
    Io {
        #[source]
        source: io::Error,
        ctx: RecordContext,
    },
    #[error("malformed record at {ctx}: {source}")]
    MalformedRecord {
        #[source]
        source: FormatError,
        ctx: RecordContext,
    },
    #[error("unsupported input format: {format}")]
    UnsupportedFormat { format: String },
    #[error(
        "ambiguous quality encoding: raw quality range {min}..={max} fits no known encoding"
    )]
    AmbiguousEncoding { min: u8, max: u8 },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl FastqError {
    pub(crate) fn io_err(source: io::Error, ctx: RecordContext) -> Self {
        Self::Io { source, ctx }
    }
    pub(crate) fn fmt_err(source: FormatError, ctx: RecordContext) -> Self {
        Self::MalformedRecord { source, ctx }
    }
    pub(crate) fn unsupported(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// 1-based index of the record the error refers to, if any.
    pub fn record_index(&self) -> Option<u64> {
        match self {
            Self::Io { ctx, .. } | Self::MalformedRecord { ctx, .. } => Some(ctx.record_index),
            _ => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedRecord { .. })
    }
}
