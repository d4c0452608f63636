use crate::compression::{Compression, MAGIC_LEN, TEXT_PROBE_LEN, looks_binary};
use crate::error::{FastqError, FormatError, RecordContext};
use crate::policy::{LineMode, ReaderOptions};
use crate::record::{FastqRecord, normalize_base};

#[cfg(feature = "gzip")]
use flate2::bufread::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufRead, Cursor, Read};
#[cfg(any(feature = "gzip", not(feature = "mmap")))]
use std::io::BufReader;
use std::path::{Path, PathBuf};

const BUF_CAPACITY: usize = 256 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Reader,
}

impl Source {
    /// Human-readable name used in reports and log lines.
    pub fn label(&self) -> String {
        match self {
            Source::Path(p) => p.display().to_string(),
            Source::Reader => "<stream>".to_string(),
        }
    }
}

/// Sync FASTQ record source (plain/.gz), streaming and forward-only.
///
/// The container format is sniffed from the first bytes of the stream, so
/// pipes work the same as files. Once an error has been returned the reader
/// yields nothing more.
pub struct FastqReader {
    src: Source,
    rdr: Box<dyn BufRead + Send>,
    opts: ReaderOptions,
    compression: Compression,
    line_num: u64,
    byte_pos: u64,
    records_read: u64,
    record_start: u64,
    finished: bool,
}

impl FastqReader {
    /// Open from a file path. Compression is detected from magic bytes.
    pub fn from_path<P: AsRef<Path>>(path: P, opts: ReaderOptions) -> Result<Self, FastqError> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| FastqError::io_err(e, RecordContext::default()))?;

        #[cfg(feature = "mmap")]
        let raw: Box<dyn BufRead + Send> = {
            use memmap2::Mmap;
            // Own the Mmap inside Cursor to avoid self-ref problems
            let mmap = unsafe { Mmap::map(&f) }
                .map_err(|e| FastqError::io_err(e, RecordContext::default()))?;
            Box::new(Cursor::new(mmap))
        };
        #[cfg(not(feature = "mmap"))]
        let raw: Box<dyn BufRead + Send> = Box::new(BufReader::with_capacity(BUF_CAPACITY, f));

        let mut reader = Self::from_bufread(raw, opts)?;
        reader.src = Source::Path(path.to_path_buf());
        Ok(reader)
    }

    /// Wrap an arbitrary `BufRead` (stdin, pipes, in-memory buffers).
    ///
    /// Fails with [`FastqError::UnsupportedFormat`] before any record is read
    /// when the stream is a compressed container other than gzip, or when it
    /// does not look like text.
    pub fn from_bufread<R: BufRead + Send + 'static>(
        mut reader: R,
        opts: ReaderOptions,
    ) -> Result<Self, FastqError> {
        let magic = peek(&mut reader, MAGIC_LEN)?;
        let compression = Compression::sniff(&magic);
        log::debug!("input container: {}", compression.name());

        let reader = Cursor::new(magic).chain(reader);
        let mut decoded: Box<dyn BufRead + Send> = match compression {
            Compression::None => Box::new(reader),
            Compression::Gzip => gzip_decoder(reader)?,
            other => return Err(FastqError::unsupported(other.name())),
        };

        let head = peek(&mut decoded, TEXT_PROBE_LEN)?;
        if looks_binary(&head) {
            return Err(FastqError::unsupported("binary data"));
        }
        let rdr: Box<dyn BufRead + Send> = Box::new(Cursor::new(head).chain(decoded));

        Ok(Self {
            src: Source::Reader,
            rdr,
            opts,
            compression,
            line_num: 0,
            byte_pos: 0,
            records_read: 0,
            record_start: 0,
            finished: false,
        })
    }

    pub fn source(&self) -> &Source {
        &self.src
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Complete records returned so far.
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    /// Bytes consumed from the decoded stream so far.
    pub fn bytes_read(&self) -> u64 {
        self.byte_pos
    }

    /// Iterator-style `next` record.
    pub fn next_record(&mut self) -> Option<Result<FastqRecord, FastqError>> {
        if self.finished {
            return None;
        }
        match self.read_one() {
            Ok(Some(rec)) => {
                self.records_read += 1;
                Some(Ok(rec))
            }
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }

    /// Next line without its terminator. Bytes are kept as-is: headers may
    /// carry non-UTF-8 text, and quality validity is judged by the decoder.
    fn read_line(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        buf.clear();
        let n = self.rdr.read_until(b'\n', buf)?;
        if n > 0 {
            self.line_num += 1;
            self.byte_pos += n as u64;
            if buf.last() == Some(&b'\n') {
                buf.pop();
            }
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        Ok(n)
    }

    /// Read one line that must exist; EOF here means a truncated record.
    fn require_line(&mut self, buf: &mut Vec<u8>) -> Result<(), FastqError> {
        let n = self
            .read_line(buf)
            .map_err(|e| FastqError::io_err(e, self.ctx()))?;
        if n == 0 {
            return Err(FastqError::fmt_err(FormatError::UnexpectedEof, self.ctx()));
        }
        Ok(())
    }

    fn read_one(&mut self) -> Result<Option<FastqRecord>, FastqError> {
        // seek first non-empty line
        let mut header = Vec::with_capacity(128);
        loop {
            let start = self.byte_pos;
            let n = self
                .read_line(&mut header)
                .map_err(|e| FastqError::io_err(e, self.ctx()))?;
            if n == 0 {
                return Ok(None);
            }
            if !header.is_empty() {
                self.record_start = start;
                break;
            }
        }

        let Some(name) = header.strip_prefix(b"@") else {
            if self.opts.fastq_only && header.starts_with(b">") {
                return Err(FastqError::fmt_err(
                    FormatError::FastaHeaderDetected,
                    self.ctx(),
                ));
            }
            return Err(FastqError::fmt_err(FormatError::MissingHeader, self.ctx()));
        };

        let name = String::from_utf8_lossy(name);
        let mut parts = name.splitn(2, char::is_whitespace);
        let id = parts.next().unwrap_or("").to_string();
        let desc = parts
            .next()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let mut line = Vec::with_capacity(256);

        let (seq, qual) = match self.opts.line_mode {
            LineMode::Single => {
                self.require_line(&mut line)?;
                let seq: Vec<u8> = line.iter().copied().map(normalize_base).collect();

                self.require_line(&mut line)?;
                if !line.starts_with(b"+") {
                    return Err(FastqError::fmt_err(FormatError::MissingPlus, self.ctx()));
                }

                self.require_line(&mut line)?;
                (seq, std::mem::take(&mut line))
            }
            LineMode::Multi => {
                // sequence runs until the '+' line
                let mut seq = Vec::<u8>::with_capacity(256);
                loop {
                    self.require_line(&mut line)?;
                    if line.starts_with(b"+") {
                        break;
                    }
                    seq.extend(line.iter().copied().map(normalize_base));
                }

                // quality runs until it covers the sequence
                let mut qual = Vec::<u8>::with_capacity(seq.len());
                while qual.len() < seq.len() {
                    self.require_line(&mut line)?;
                    qual.extend_from_slice(&line);
                }
                (seq, qual)
            }
        };

        if qual.len() != seq.len() {
            return Err(FastqError::fmt_err(
                FormatError::LengthMismatch {
                    seq: seq.len(),
                    qual: qual.len(),
                },
                self.ctx(),
            ));
        }

        Ok(Some(FastqRecord {
            id,
            desc,
            seq,
            qual,
        }))
    }

    #[inline]
    fn ctx(&self) -> RecordContext {
        RecordContext {
            record_index: self.records_read + 1,
            byte_offset: self.record_start,
            line_num: self.line_num,
        }
    }
}

impl Iterator for FastqReader {
    type Item = Result<FastqRecord, FastqError>;
    fn next(&mut self) -> Option<Self::Item> {
        self.next_record()
    }
}

#[cfg(feature = "gzip")]
fn gzip_decoder<R: BufRead + Send + 'static>(
    reader: R,
) -> Result<Box<dyn BufRead + Send>, FastqError> {
    let dec = MultiGzDecoder::new(reader);
    Ok(Box::new(BufReader::with_capacity(BUF_CAPACITY, dec)))
}

#[cfg(not(feature = "gzip"))]
fn gzip_decoder<R: BufRead + Send + 'static>(
    _reader: R,
) -> Result<Box<dyn BufRead + Send>, FastqError> {
    Err(FastqError::unsupported("gzip (built without the `gzip` feature)"))
}

/// Read up to `len` bytes, fewer only at end of stream. Short reads from
/// pipes are retried, so the result does not depend on how the source chunks.
fn peek<R: Read>(reader: &mut R, len: usize) -> Result<Vec<u8>, FastqError> {
    let mut head = Vec::with_capacity(len);
    reader
        .take(len as u64)
        .read_to_end(&mut head)
        .map_err(|e| FastqError::io_err(e, RecordContext::default()))?;
    Ok(head)
}
