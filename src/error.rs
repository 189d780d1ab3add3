use std::error::Error as StdError;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Failures raised by the writer facade and document mutators.
#[derive(Debug)]
pub enum Error {
    /// The key handed to `set` does not match `[A-Za-z_][A-Za-z0-9_]*`.
    InvalidKey { key: String },
    /// An explicitly supplied source path could not be read at construction.
    SourceUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    /// `write` was invoked with neither a destination path nor a bound source.
    NoDestination,
    /// The storage backend rejected the write.
    NotWritable {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidKey { key } => write!(f, "invalid key `{key}`"),
            Self::SourceUnreadable { path, source } => {
                write!(f, "cannot read source file {}: {source}", path.display())
            }
            Self::NoDestination => write!(f, "no destination path to write to"),
            Self::NotWritable { path, source } => {
                write!(f, "cannot write to {}: {source}", path.display())
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::SourceUnreadable { source, .. } | Self::NotWritable { source, .. } => {
                Some(source)
            }
            Self::InvalidKey { .. } | Self::NoDestination => None,
        }
    }
}
