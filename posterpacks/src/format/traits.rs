//! The pack format abstraction.

use std::fmt;
use std::path::Path;

use super::entry::PackFileEntry;
use super::error::{FormatError, FormatResult};

/// Kind of storage backing a pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    /// A directory tree on disk.
    Directory,

    /// A `.zip` archive.
    Zip,

    /// A format contributed by an integrator probe.
    Custom(&'static str),
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatKind::Directory => write!(f, "directory"),
            FormatKind::Zip => write!(f, "zip"),
            FormatKind::Custom(name) => write!(f, "{}", name),
        }
    }
}

/// A uniform store of named byte entries.
///
/// Implementations cache their entry list after the first call to
/// [`entries`](Self::entries) and drop it on [`reload`](Self::reload).
/// Methods take `&mut self` because archive backends need exclusive access
/// to their handle while reading.
pub trait PackFormat: fmt::Debug {
    /// Storage kind, for logging.
    fn kind(&self) -> FormatKind;

    /// Path the format was opened from.
    fn root(&self) -> &Path;

    /// All entries of the pack in a stable order.
    fn entries(&mut self) -> FormatResult<Vec<PackFileEntry>>;

    /// Look up one entry by its full in-pack name.
    fn get(&mut self, full_name: &str) -> Option<PackFileEntry>;

    /// Read the whole entry.
    fn read_bytes(&mut self, entry: &PackFileEntry) -> FormatResult<Vec<u8>>;

    /// Read the whole entry as UTF-8 text, dropping a leading byte-order mark.
    fn read_text(&mut self, entry: &PackFileEntry) -> FormatResult<String> {
        let bytes = self.read_bytes(entry)?;
        let text = String::from_utf8(bytes)
            .map_err(|_| FormatError::NotText(entry.full_name().to_string()))?;
        match text.strip_prefix('\u{feff}') {
            Some(stripped) => Ok(stripped.to_string()),
            None => Ok(text),
        }
    }

    /// Invalidate cached state so the next read sees the current source.
    fn reload(&mut self) -> FormatResult<()>;
}
