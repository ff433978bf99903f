use crate::{
    chunked::copy_chunks,
    open_output::{resolve_output, Target},
    os_arg::TryFromOsArg,
    CopyError, CopyStats, InputByteStream, OutputByteStream,
};
use std::{ffi::OsStr, fs, path::Path};

/// Copy `source` to `dest`, chunk by chunk, and report how much was copied.
///
/// The source is opened first, so if it can't be opened the destination is
/// never created. The destination is created if missing and truncated if
/// present. Both handles are released before this returns, whether or not
/// the copy succeeded.
pub fn copy(source: &OsStr, dest: &OsStr) -> Result<CopyStats, CopyError> {
    let mut input = InputByteStream::try_from_os_str_arg(source)?;
    let target = resolve_output(dest)?;

    if let (Some(from), Target::Path(to)) = (input.path(), &target) {
        if same_file(from, to) {
            return Err(CopyError::SameFile {
                name: input.pseudonym().to_string(),
            });
        }
    }

    let mut output = OutputByteStream::open(target)?;
    let (from, to) = (input.pseudonym(), output.pseudonym());
    match input.initial_size() {
        Some(size) => log::debug!("copying {} ({} bytes) to {}", from, size, to),
        None => log::debug!("copying {} to {}", from, to),
    }

    let stats = copy_chunks(&mut input, &mut output)?;
    output
        .close()
        .map_err(|source| CopyError::Write {
            copied: stats,
            source,
        })?;

    log::info!("copied {} from {} to {}", stats, from, to);
    Ok(stats)
}

/// Whether `a` and `b` name the same existing file, including through hard
/// links. A destination that doesn't exist yet can't be the source.
#[cfg(unix)]
fn same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(a), Ok(b)) => (a.dev(), a.ino()) == (b.dev(), b.ino()),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
