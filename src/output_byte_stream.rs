use crate::{
    open_output::{open_output, Target},
    CopyError, Pseudonym,
};
use std::{
    fmt::{self, Arguments, Debug, Formatter},
    io::{self, IoSlice, Write},
};

/// An output stream for binary output.
///
/// An `OutputByteStream` implements `Write` so it supports `write`,
/// `write_all`, etc. and can be used anywhere a `Write`-implementing
/// object is needed.
///
/// Opening a file path creates the file if it doesn't exist and truncates
/// it if it does. Currently supported syntaxes include:
///  - "-" is interpreted as standard output; `./-` names a file called `-`.
///  - A name under which a file exists is always that file.
///  - Otherwise, names starting with `file:` are interpreted as local
///    filesystem URLs, and `data:` URLs are rejected.
///  - Everything else is a plain local filesystem path.
///
/// Dropping the stream releases the handle but can't report errors, so call
/// [`OutputByteStream::close`] to find out whether everything was written.
pub struct OutputByteStream {
    name: String,
    writer: Box<dyn Write>,
}

impl OutputByteStream {
    /// Return a `Pseudonym` which encapsulates this stream's name.
    #[inline]
    pub fn pseudonym(&self) -> Pseudonym {
        Pseudonym::new(self.name.clone())
    }

    /// Flush any buffered data and release the handle, reporting any error
    /// that occurs while doing so.
    pub fn close(mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Create or truncate the resolved destination. Resolution is kept
    /// separate so callers can inspect where output would go first.
    pub(crate) fn open(target: Target) -> Result<Self, CopyError> {
        let output = open_output(target)?;
        Ok(Self {
            name: output.name,
            writer: output.writer,
        })
    }
}

impl Write for OutputByteStream {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    #[inline]
    fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> io::Result<usize> {
        self.writer.write_vectored(bufs)
    }

    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.writer.write_all(buf)
    }

    #[inline]
    fn write_fmt(&mut self, fmt: Arguments<'_>) -> io::Result<()> {
        self.writer.write_fmt(fmt)
    }
}

impl Debug for OutputByteStream {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // Don't print the name here, as that's an implementation detail.
        f.debug_struct("OutputByteStream").finish_non_exhaustive()
    }
}

#[test]
fn truncates_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    std::fs::write(&path, b"old contents that are long").unwrap();

    let mut output = OutputByteStream::open(Target::Path(path.clone())).unwrap();
    output.write_all(b"new").unwrap();
    output.close().unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), b"new");
}
