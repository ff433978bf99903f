//! Copy one file to another, a bounded line chunk at a time.
//!
//! The source is read as a sequence of chunks: each runs up to and including
//! the next newline, or to [`CHUNK_CAPACITY`] bytes, or to end of input,
//! whichever comes first. Every chunk is written to the destination exactly
//! as read, so the destination ends up byte-for-byte identical to the
//! source. Long lines just take several chunks.
//!
//! ```rust,no_run
//! let stats = linecp::copy("notes.txt".as_ref(), "notes.bak".as_ref())?;
//! println!("{}", stats);
//! # Ok::<(), linecp::CopyError>(())
//! ```
//!
//! # Names
//!
//! Sources and destinations are usually plain filesystem paths, but a few
//! other names are understood as well:
//!
//!  - `-` means standard input or standard output; `./-` is a file.
//!  - A name under which a file already exists always means that file.
//!  - Otherwise `file:` URLs name local paths, and `data:` URLs, as a
//!    source, provide their payload as the input. For example, copying from
//!    `data:,Hello%2C%20World!` produces a file containing "Hello, World!".
//!  - Any other name, such as `notes:v2.txt`, is a path.
//!
//! Handles are opened with [`TryFromOsArg`] and released when dropped, so
//! nothing stays open after [`copy`] returns, on success or failure.

#![deny(missing_docs)]

mod chunked;
mod copier;
mod error;
mod input_byte_stream;
mod open_input;
mod open_output;
mod os_arg;
mod output_byte_stream;
mod path_url;
mod pseudonym;

pub use chunked::{copy_chunks, ChunkReader, CopyStats, TRANSFER_BUFFER_SIZE};
pub use copier::copy;
pub use error::{CopyError, Role};
pub use input_byte_stream::InputByteStream;
pub use os_arg::TryFromOsArg;
pub use output_byte_stream::OutputByteStream;
pub use pseudonym::Pseudonym;

/// The most bytes a single chunk can hold: the transfer buffer less one
/// reserved slot.
pub const CHUNK_CAPACITY: usize = TRANSFER_BUFFER_SIZE - 1;
