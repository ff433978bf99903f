use crate::{
    open_input::{open_input, Input},
    os_arg::TryFromOsArg,
    CopyError, Pseudonym,
};
use std::{
    ffi::OsStr,
    fmt::{self, Debug, Formatter},
    io::{self, IoSliceMut, Read},
    path::{Path, PathBuf},
};

/// An input stream for binary input.
///
/// An `InputByteStream` implements `Read` so it supports `read`,
/// `read_to_end`, `read_to_string`, etc. and can be used anywhere a
/// `Read`-implementing object is needed.
///
/// `InputByteStream` is unbuffered (even when it is stdin); the copy loop
/// adds its own buffering.
///
/// Currently supported syntaxes for the name it is opened from include:
///  - "-" is interpreted as standard input; `./-` names a file called `-`.
///  - A name under which a file exists is always that file.
///  - Otherwise, names starting with `data:` are interpreted as data URLs
///    providing the data in their payload, and names starting with `file:`
///    as local filesystem URLs providing paths to files to open.
///  - Everything else, including names like `notes:v2.txt`, is a plain
///    local filesystem path.
///
/// The underlying handle is released when the stream is dropped.
pub struct InputByteStream {
    name: String,
    reader: Box<dyn Read>,
    path: Option<PathBuf>,
    initial_size: Option<u64>,
}

impl InputByteStream {
    /// Return the initial size of the stream, in bytes. This is strictly based
    /// on available metadata, and not on examining any of the contents of the
    /// stream, and the stream could end up being shorter or longer if the
    /// source is concurrently modified.
    #[inline]
    pub fn initial_size(&self) -> Option<u64> {
        self.initial_size
    }

    /// The filesystem path this stream reads from, if it reads from a file.
    #[inline]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Return a `Pseudonym` which encapsulates this stream's name (typically
    /// its filesystem path or its URL).
    #[inline]
    pub fn pseudonym(&self) -> Pseudonym {
        Pseudonym::new(self.name.clone())
    }

    fn from_input(input: Input) -> Self {
        Self {
            name: input.name,
            reader: input.reader,
            path: input.path,
            initial_size: input.initial_size,
        }
    }
}

impl TryFromOsArg for InputByteStream {
    type Error = CopyError;

    #[inline]
    fn try_from_os_str_arg(os: &OsStr) -> Result<Self, CopyError> {
        open_input(os).map(Self::from_input)
    }
}

impl Read for InputByteStream {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }

    #[inline]
    fn read_vectored(&mut self, bufs: &mut [IoSliceMut<'_>]) -> io::Result<usize> {
        self.reader.read_vectored(bufs)
    }

    #[inline]
    fn read_to_end(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        self.reader.read_to_end(buf)
    }
}

impl Debug for InputByteStream {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // Don't print the name here, as that's an implementation detail.
        let mut b = f.debug_struct("InputByteStream");
        b.field("initial_size", &self.initial_size);
        b.finish()
    }
}

#[test]
fn data_url_stream() {
    let mut s = String::new();
    let mut input =
        InputByteStream::try_from_os_str_arg("data:text/plain;base64,SGVsbG8sIFdvcmxkIQ==".as_ref())
            .unwrap();
    assert_eq!(input.initial_size(), Some(13));
    assert!(input.path().is_none());
    input.read_to_string(&mut s).unwrap();
    assert_eq!(s, "Hello, World!");
}

#[test]
fn file_stream() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("in.txt");
    std::fs::write(&path, b"abc\n").unwrap();

    let input = InputByteStream::try_from_os_str_arg(path.as_os_str()).unwrap();
    assert_eq!(input.initial_size(), Some(4));
    assert_eq!(input.path(), Some(path.as_path()));
}
