//! Phred quality-encoding detection and decoding.

use crate::error::FastqError;
use crate::record::FastqRecord;
use std::fmt;
use std::ops::RangeInclusive;

/// Highest Phred score representable in printable ASCII with offset 33.
pub const MAX_SCORE: u8 = 93;

const MAX_PRINTABLE: u8 = b'~';

/// Offset scheme used to turn raw quality characters into Phred scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualityEncoding {
    /// Sanger / Illumina 1.8+, offset 33.
    Phred33,
    /// Illumina 1.3 to 1.7, offset 64.
    Phred64,
    /// Legacy Solexa-era offset 64 data, which dips below `@` down to `;`.
    /// Those characters decode to 0.
    SangerPhred64,
}

/// Detection candidates, narrowest first. Phred33 appears twice: once with
/// the Q0..=Q41 range real Illumina 1.8+ data occupies, and once with its full
/// printable range as a last resort.
const CANDIDATES: [(QualityEncoding, RangeInclusive<u8>); 4] = [
    (QualityEncoding::Phred33, 33..=74),
    (QualityEncoding::Phred64, 64..=MAX_PRINTABLE),
    (QualityEncoding::SangerPhred64, 59..=MAX_PRINTABLE),
    (QualityEncoding::Phred33, 33..=MAX_PRINTABLE),
];

impl QualityEncoding {
    pub const fn offset(self) -> u8 {
        match self {
            Self::Phred33 => 33,
            Self::Phred64 | Self::SangerPhred64 => 64,
        }
    }

    /// Raw characters considered plausible once this encoding is fixed.
    pub const fn plausible_range(self) -> RangeInclusive<u8> {
        match self {
            Self::Phred33 => 33..=MAX_PRINTABLE,
            Self::Phred64 => 64..=MAX_PRINTABLE,
            Self::SangerPhred64 => 59..=MAX_PRINTABLE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Phred33 => "Phred33",
            Self::Phred64 => "Phred64",
            Self::SangerPhred64 => "SangerPhred64",
        }
    }

    #[inline]
    pub fn is_plausible(self, raw: u8) -> bool {
        self.plausible_range().contains(&raw)
    }

    /// Pick the narrowest encoding whose range covers `range`.
    pub fn from_range(range: QualityRange) -> Result<Self, FastqError> {
        CANDIDATES
            .iter()
            .find(|(_, r)| r.contains(&range.min) && r.contains(&range.max))
            .map(|(enc, _)| *enc)
            .ok_or(FastqError::AmbiguousEncoding {
                min: range.min,
                max: range.max,
            })
    }

    /// Detect the encoding from a sample of records.
    ///
    /// Returns `Ok(None)` when the sample holds no quality characters at all
    /// (empty input, or only zero-length reads).
    pub fn detect<'a, I>(sample: I) -> Result<Option<Self>, FastqError>
    where
        I: IntoIterator<Item = &'a FastqRecord>,
    {
        let mut range: Option<QualityRange> = None;
        for rec in sample {
            QualityRange::observe(&mut range, &rec.qual);
        }
        range.map(Self::from_range).transpose()
    }
}

impl fmt::Display for QualityEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Minimum and maximum raw quality characters observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityRange {
    pub min: u8,
    pub max: u8,
}

impl QualityRange {
    /// Widen `range` to cover `qual`; leaves it untouched for empty input.
    pub fn observe(range: &mut Option<QualityRange>, qual: &[u8]) {
        let (Some(&lo), Some(&hi)) = (qual.iter().min(), qual.iter().max()) else {
            return;
        };
        *range = Some(match *range {
            Some(r) => QualityRange {
                min: r.min.min(lo),
                max: r.max.max(hi),
            },
            None => QualityRange { min: lo, max: hi },
        });
    }
}

/// Decode one raw quality character. Total: values below the offset decode to
/// 0 and values past the printable range clamp to [`MAX_SCORE`].
#[inline]
pub fn decode(raw: u8, encoding: QualityEncoding) -> u8 {
    raw.saturating_sub(encoding.offset()).min(MAX_SCORE)
}

/// Decodes whole quality strings with a fixed encoding, counting characters
/// that fall outside the encoding's plausible range.
#[derive(Debug, Clone)]
pub struct QualityDecoder {
    encoding: Option<QualityEncoding>,
    out_of_range: u64,
}

impl QualityDecoder {
    pub fn new(encoding: Option<QualityEncoding>) -> Self {
        Self {
            encoding,
            out_of_range: 0,
        }
    }

    pub fn encoding(&self) -> Option<QualityEncoding> {
        self.encoding
    }

    pub fn out_of_range(&self) -> u64 {
        self.out_of_range
    }

    /// Decode `qual` into `scores`, replacing its previous contents.
    pub fn decode_into(&mut self, qual: &[u8], scores: &mut Vec<u8>) {
        scores.clear();
        // An undetermined encoding only happens when no quality character has
        // been seen, so `qual` is empty here.
        let Some(enc) = self.encoding else {
            return;
        };
        let before = self.out_of_range;
        scores.extend(qual.iter().map(|&raw| {
            if !enc.is_plausible(raw) {
                self.out_of_range += 1;
            }
            decode(raw, enc)
        }));
        if before == 0 && self.out_of_range > 0 {
            log::warn!(
                "quality characters outside the {enc} range; scores are clamped (encoding is not re-detected)"
            );
        }
    }
}
