use crate::CopyStats;
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    io,
};

/// Which end of a copy a name or handle belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    /// The input being read.
    Source,
    /// The output being written.
    Destination,
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Destination => f.write_str("destination"),
        }
    }
}

/// Everything that can stop a copy. All of these are fatal; nothing is
/// retried or recovered in place.
#[derive(Debug)]
pub enum CopyError {
    /// The command line didn't name exactly one source and one destination.
    Usage(String),

    /// A name resolved to a file or stream which could not be opened.
    Open {
        /// Which end failed.
        role: Role,
        /// Display name of what was being opened.
        name: String,
        /// The underlying failure.
        source: io::Error,
    },

    /// A name that doesn't resolve to anything we know how to open.
    Unsupported {
        /// Which end it was given for.
        role: Role,
        /// Display name of the rejected argument.
        name: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The source and destination are the same file, so truncating the
    /// destination would destroy the source before it is read.
    SameFile {
        /// Display name of the file.
        name: String,
    },

    /// Reading the source failed partway through.
    Read {
        /// What had been written to the destination before the failure.
        copied: CopyStats,
        /// The underlying failure.
        source: io::Error,
    },

    /// Writing or flushing the destination failed partway through.
    Write {
        /// What had been written to the destination before the failure.
        copied: CopyStats,
        /// The underlying failure.
        source: io::Error,
    },
}

impl CopyError {
    pub(crate) fn open(role: Role, name: impl Into<String>, source: io::Error) -> Self {
        Self::Open {
            role,
            name: name.into(),
            source,
        }
    }

    pub(crate) fn unsupported(
        role: Role,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Unsupported {
            role,
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// The `io::ErrorKind` behind this error, if it came from the OS. This
    /// distinguishes, for example, `NotFound` from `PermissionDenied` when
    /// opening.
    pub fn kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Open { source, .. } | Self::Read { source, .. } | Self::Write { source, .. } => {
                Some(source.kind())
            }
            Self::Usage(_) | Self::Unsupported { .. } | Self::SameFile { .. } => None,
        }
    }

    /// How much was copied before the failure. Errors which happen before
    /// the copy loop starts report nothing copied.
    pub fn copied(&self) -> CopyStats {
        match self {
            Self::Read { copied, .. } | Self::Write { copied, .. } => *copied,
            _ => CopyStats::default(),
        }
    }
}

impl Display for CopyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage(msg) => write!(f, "Invalid usage: {}", msg),
            Self::Open { role, name, .. } => write!(f, "cannot open {} {}", role, name),
            Self::Unsupported { role, name, reason } => {
                write!(f, "unsupported {} \"{}\": {}", role, name, reason)
            }
            Self::SameFile { name } => {
                write!(f, "{} is both the source and the destination", name)
            }
            Self::Read { copied, .. } => write!(f, "read failed after {}", copied),
            Self::Write { copied, .. } => write!(f, "write failed after {}", copied),
        }
    }
}

impl Error for CopyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } | Self::Read { source, .. } | Self::Write { source, .. } => {
                Some(source)
            }
            Self::Usage(_) | Self::Unsupported { .. } | Self::SameFile { .. } => None,
        }
    }
}

#[test]
fn open_error_exposes_kind() {
    let err = CopyError::open(
        Role::Source,
        "missing.txt",
        io::Error::from(io::ErrorKind::NotFound),
    );
    assert_eq!(err.kind(), Some(io::ErrorKind::NotFound));
    assert_eq!(err.to_string(), "cannot open source missing.txt");
    assert!(err.source().is_some());
}

#[test]
fn write_error_reports_partial_progress() {
    let copied = CopyStats {
        chunks: 2,
        bytes: 600,
    };
    let err = CopyError::Write {
        copied,
        source: io::Error::new(io::ErrorKind::Other, "disk full"),
    };
    assert_eq!(err.copied(), copied);
    assert_eq!(
        err.to_string(),
        "write failed after 600 bytes in 2 chunks"
    );
}
