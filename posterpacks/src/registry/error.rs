//! Error types for pack registration.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors returned to code submitting packs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Packs were submitted after the registry loaded.
    #[error("pack '{name}' at {} was submitted after packs were loaded", path.display())]
    TooLate { name: String, path: PathBuf },

    /// A built-in pack was submitted without an owning mod id.
    #[error("built-in pack at {} has no owning mod id", path.display())]
    MissingOwner { path: PathBuf },
}
