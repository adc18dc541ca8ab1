//! Error types for building a single poster asset.

use thiserror::Error;

use crate::format::FormatError;

/// Errors that skip one poster without affecting its pack.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The image bytes could not be decoded.
    #[error("image '{name}' could not be decoded: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },

    /// The image cannot be cut into square tiles.
    #[error("poster '{name}' is {width}x{height}; width must be a whole multiple of height")]
    AspectRatio {
        name: String,
        width: u32,
        height: u32,
    },

    /// The sidecar properties file is not valid.
    #[error("properties of poster '{name}' are invalid: {source}")]
    Properties {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// Reading the entry failed.
    #[error(transparent)]
    Format(#[from] FormatError),
}
