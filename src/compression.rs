//! Magic-byte sniffing of the input container.

/// Container format recognized from the first bytes of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
    Bzip2,
    Xz,
    Zstd,
    Zip,
}

const GZIP_MAGIC: &[u8] = &[0x1F, 0x8B];
const BZIP2_MAGIC: &[u8] = b"BZh";
const XZ_MAGIC: &[u8] = &[0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00];
const ZSTD_MAGIC: &[u8] = &[0x28, 0xB5, 0x2F, 0xFD];
const ZIP_MAGIC: &[u8] = &[0x50, 0x4B, 0x03, 0x04];

/// Bytes needed to tell every recognized container apart.
pub(crate) const MAGIC_LEN: usize = 6;

/// How much of the decoded stream is checked for binary content.
pub(crate) const TEXT_PROBE_LEN: usize = 1024;

impl Compression {
    pub fn sniff(head: &[u8]) -> Self {
        if head.starts_with(GZIP_MAGIC) {
            Self::Gzip
        } else if head.starts_with(XZ_MAGIC) {
            Self::Xz
        } else if head.starts_with(ZSTD_MAGIC) {
            Self::Zstd
        } else if head.starts_with(ZIP_MAGIC) {
            Self::Zip
        } else if head.starts_with(BZIP2_MAGIC) {
            Self::Bzip2
        } else {
            Self::None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "plain",
            Self::Gzip => "gzip",
            Self::Bzip2 => "bzip2",
            Self::Xz => "xz",
            Self::Zstd => "zstd",
            Self::Zip => "zip",
        }
    }
}

/// True when the start of a decoded stream cannot be FASTQ text.
pub fn looks_binary(head: &[u8]) -> bool {
    head.iter()
        .take(TEXT_PROBE_LEN)
        .any(|&b| b == 0 || (b.is_ascii_control() && !matches!(b, b'\n' | b'\r' | b'\t')))
}
