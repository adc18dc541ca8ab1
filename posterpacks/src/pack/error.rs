//! Error types for loading a single pack.

use std::path::PathBuf;

use thiserror::Error;

use crate::format::FormatError;

/// Result type for pack operations.
pub type PackResult<T> = Result<T, PackError>;

/// Errors that leave a pack disposed.
#[derive(Debug, Error)]
pub enum PackError {
    /// No format probe accepted the pack's path.
    #[error("no pack format matches {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// A discovered pack has no `pack.json`.
    #[error("pack '{0}' has no pack.json")]
    MissingMetadata(String),

    /// `pack.json` is present but not valid.
    #[error("pack.json of '{name}' is invalid: {source}")]
    InvalidMetadata {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// The pack was already disposed.
    #[error("pack '{0}' is disposed")]
    Disposed(String),

    /// The pack's storage could not be read.
    #[error(transparent)]
    Format(#[from] FormatError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            PackError::MissingMetadata("Retro".to_string()).to_string(),
            "pack 'Retro' has no pack.json"
        );
        assert_eq!(
            PackError::UnsupportedFormat(PathBuf::from("/packs/a.rar")).to_string(),
            "no pack format matches /packs/a.rar"
        );
    }
}
