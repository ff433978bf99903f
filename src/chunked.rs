//! The transfer loop: bounded, newline-delimited chunks moved from a reader
//! to a writer through one reused buffer.

use crate::{CopyError, CHUNK_CAPACITY};
use std::{
    cmp,
    fmt::{self, Display, Formatter},
    io::{self, BufRead, BufReader, Read, Write},
};

/// Size of the transfer buffer. One slot is held back, so a chunk never
/// exceeds [`CHUNK_CAPACITY`] bytes.
pub const TRANSFER_BUFFER_SIZE: usize = 512;

/// Counts of what a copy has moved so far.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CopyStats {
    /// Number of chunks written.
    pub chunks: u64,
    /// Number of bytes written.
    pub bytes: u64,
}

impl Display for CopyStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} bytes in {} chunks", self.bytes, self.chunks)
    }
}

/// Reads a byte stream as a sequence of chunks. Each chunk runs up to and
/// including the next `\n`, or until [`CHUNK_CAPACITY`] bytes have been
/// gathered, or until end of input, whichever comes first.
///
/// Long lines are simply split across several chunks; concatenating the
/// chunks always reproduces the input exactly.
///
/// If a read fails after part of a chunk has been gathered, that partial
/// chunk is returned first and the error is reported by the following call.
pub struct ChunkReader<R: Read> {
    inner: BufReader<R>,
    buf: [u8; TRANSFER_BUFFER_SIZE],
    pending: Option<io::Error>,
}

impl<R: Read> ChunkReader<R> {
    /// Wrap `inner`.
    pub fn new(inner: R) -> Self {
        Self {
            inner: BufReader::new(inner),
            buf: [0; TRANSFER_BUFFER_SIZE],
            pending: None,
        }
    }

    /// Read the next chunk into the transfer buffer and return it. The
    /// returned slice is only valid until the next call. An empty slice means
    /// the input is exhausted.
    pub fn read_chunk(&mut self) -> io::Result<&[u8]> {
        if let Some(err) = self.pending.take() {
            return Err(err);
        }

        let mut len = 0;
        while len < CHUNK_CAPACITY {
            let available = match self.inner.fill_buf() {
                Ok(available) => available,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) if len == 0 => return Err(err),
                Err(err) => {
                    self.pending = Some(err);
                    break;
                }
            };
            if available.is_empty() {
                break;
            }

            let limit = cmp::min(available.len(), CHUNK_CAPACITY - len);
            let (take, line_done) = match available[..limit].iter().position(|&b| b == b'\n') {
                Some(newline) => (newline + 1, true),
                None => (limit, false),
            };
            self.buf[len..len + take].copy_from_slice(&available[..take]);
            self.inner.consume(take);
            len += take;

            if line_done {
                break;
            }
        }
        Ok(&self.buf[..len])
    }
}

/// Copy everything from `reader` to `writer`, one chunk at a time, and
/// return how much was moved.
///
/// A failing read or write stops the copy immediately; the error records
/// what had already reached `writer`. `writer` is not flushed here.
pub fn copy_chunks<R: Read + ?Sized, W: Write + ?Sized>(
    reader: &mut R,
    writer: &mut W,
) -> Result<CopyStats, CopyError> {
    let mut chunks = ChunkReader::new(reader);
    let mut stats = CopyStats::default();

    loop {
        let chunk = match chunks.read_chunk() {
            Ok(chunk) => chunk,
            Err(source) => {
                return Err(CopyError::Read {
                    copied: stats,
                    source,
                })
            }
        };
        if chunk.is_empty() {
            return Ok(stats);
        }

        log::trace!("chunk {}: {} bytes", stats.chunks, chunk.len());
        if let Err(source) = writer.write_all(chunk) {
            return Err(CopyError::Write {
                copied: stats,
                source,
            });
        }
        stats.chunks += 1;
        stats.bytes += chunk.len() as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunks_of(input: &[u8]) -> Vec<Vec<u8>> {
        let mut reader = ChunkReader::new(input);
        let mut result = Vec::new();
        loop {
            let chunk = reader.read_chunk().unwrap();
            if chunk.is_empty() {
                return result;
            }
            result.push(chunk.to_vec());
        }
    }

    /// Accepts `limit` bytes, then fails every write.
    struct FullDisk {
        written: Vec<u8>,
        limit: usize,
    }

    impl Write for FullDisk {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let room = self.limit - self.written.len();
            if room == 0 {
                return Err(io::Error::new(io::ErrorKind::Other, "no space left"));
            }
            let n = cmp::min(room, buf.len());
            self.written.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Yields `data`, then fails.
    struct Flaky<'a> {
        data: &'a [u8],
    }

    impl Read for Flaky<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.data.is_empty() {
                return Err(io::Error::new(io::ErrorKind::Other, "device gone"));
            }
            let n = self.data.read(buf)?;
            Ok(n)
        }
    }

    #[test]
    fn splits_on_newlines() {
        assert_eq!(
            chunks_of(b"hello\nworld\n"),
            vec![b"hello\n".to_vec(), b"world\n".to_vec()]
        );
    }

    #[test]
    fn empty_input_has_no_chunks() {
        assert!(chunks_of(b"").is_empty());
    }

    #[test]
    fn keeps_unterminated_last_line() {
        assert_eq!(
            chunks_of(b"one\ntwo"),
            vec![b"one\n".to_vec(), b"two".to_vec()]
        );
    }

    #[test]
    fn blank_lines_are_their_own_chunks() {
        assert_eq!(
            chunks_of(b"\n\r\n\n"),
            vec![b"\n".to_vec(), b"\r\n".to_vec(), b"\n".to_vec()]
        );
    }

    #[test]
    fn long_line_spans_several_chunks() {
        let mut line = vec![b'x'; 1000];
        line.push(b'\n');
        let chunks = chunks_of(&line);
        let sizes: Vec<usize> = chunks.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![CHUNK_CAPACITY, 1001 - CHUNK_CAPACITY]);
        assert_eq!(chunks.concat(), line);
    }

    #[test]
    fn line_of_exactly_capacity() {
        let mut input = vec![b'a'; CHUNK_CAPACITY];
        input.push(b'\n');
        let chunks = chunks_of(&input);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), CHUNK_CAPACITY);
        assert_eq!(chunks[1], b"\n");
    }

    #[test]
    fn copies_verbatim_and_counts() {
        let input = b"hello\nworld\n";
        let mut output = Vec::new();
        let stats = copy_chunks(&mut &input[..], &mut output).unwrap();
        assert_eq!(output, input);
        assert_eq!(
            stats,
            CopyStats {
                chunks: 2,
                bytes: 12
            }
        );
    }

    #[test]
    fn copies_non_utf8_bytes() {
        let input: Vec<u8> = (0..=255).cycle().take(3000).collect();
        let mut output = Vec::new();
        let stats = copy_chunks(&mut input.as_slice(), &mut output).unwrap();
        assert_eq!(output, input);
        assert_eq!(stats.bytes, 3000);
    }

    #[test]
    fn write_failure_reports_what_was_copied() {
        let mut output = FullDisk {
            written: Vec::new(),
            limit: 8,
        };
        let err = copy_chunks(&mut &b"hello\nworld\n"[..], &mut output).unwrap_err();
        match err {
            CopyError::Write { copied, .. } => assert_eq!(
                copied,
                CopyStats {
                    chunks: 1,
                    bytes: 6
                }
            ),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(output.written, b"hello\nwo");
    }

    #[test]
    fn partial_chunk_is_written_before_read_failure() {
        let mut input = Flaky { data: b"no newline" };
        let mut output = Vec::new();
        let err = copy_chunks(&mut input, &mut output).unwrap_err();
        assert!(matches!(err, CopyError::Read { .. }));
        assert_eq!(
            err.copied(),
            CopyStats {
                chunks: 1,
                bytes: 10
            }
        );
        assert_eq!(output, b"no newline");
    }

    #[test]
    fn read_failure_reports_what_was_copied() {
        let mut input = Flaky { data: b"abc\n" };
        let mut output = Vec::new();
        let err = copy_chunks(&mut input, &mut output).unwrap_err();
        assert!(matches!(err, CopyError::Read { .. }));
        assert_eq!(err.copied().bytes, 4);
        assert_eq!(output, b"abc\n");
    }
}
