/// One parsed FASTQ read, as produced by [`FastqReader`](crate::FastqReader).
///
/// `seq` is normalized to uppercase (`.` becomes `N`); `qual` holds the raw
/// quality characters, undecoded. `seq.len() == qual.len()` always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FastqRecord {
    pub id: String,
    pub desc: Option<String>,
    pub seq: Vec<u8>,
    pub qual: Vec<u8>,
}

impl FastqRecord {
    #[inline]
    pub fn len(&self) -> usize {
        self.seq.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }
}

/// A record whose qualities have been decoded to Phred scores.
///
/// Borrowed view handed to every metric module; modules must copy anything
/// they want to keep.
#[derive(Debug, Clone, Copy)]
pub struct ScoredRecord<'a> {
    pub seq: &'a [u8],
    pub scores: &'a [u8],
}

impl ScoredRecord<'_> {
    #[inline]
    pub fn len(&self) -> usize {
        self.seq.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }
}

#[inline]
pub(crate) fn normalize_base(b: u8) -> u8 {
    match b {
        b'.' => b'N',
        _ => b.to_ascii_uppercase(),
    }
}
