//! Error types for pack format operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for pack format operations.
pub type FormatResult<T> = Result<T, FormatError>;

/// Errors raised while enumerating or reading pack entries.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Failed to read a file or directory.
    #[error("failed to read {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The archive could not be opened or one of its entries is corrupt.
    #[error("archive error in {}: {source}", path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// The archive handle was released and could not be re-opened.
    #[error("archive {} is closed", .0.display())]
    Closed(PathBuf),

    /// An entry was read as text but is not valid UTF-8.
    #[error("entry '{0}' is not valid UTF-8 text")]
    NotText(String),

    /// An entry produced by one format was handed to another.
    #[error("entry '{0}' does not belong to this pack format")]
    ForeignEntry(String),
}
