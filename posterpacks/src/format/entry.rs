//! Addressable pack entries.

use std::path::{Path, PathBuf};

/// Where the bytes of a [`PackFileEntry`] live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryLocation {
    /// A file on disk.
    File(PathBuf),

    /// An entry of the owning archive, by index.
    Archive(usize),
}

/// One named item inside a pack.
///
/// Entries are immutable views. Their contents are read through the format
/// that produced them ([`PackFormat::read_bytes`](super::PackFormat::read_bytes)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackFileEntry {
    name: String,
    full_name: String,
    location: EntryLocation,
}

impl PackFileEntry {
    /// Create an entry backed by a file on disk.
    pub fn local(path: impl Into<PathBuf>, full_name: impl Into<String>) -> Self {
        Self::with_location(full_name.into(), EntryLocation::File(path.into()))
    }

    /// Create an entry backed by an archive index.
    pub fn archived(index: usize, full_name: impl Into<String>) -> Self {
        Self::with_location(full_name.into(), EntryLocation::Archive(index))
    }

    fn with_location(full_name: String, location: EntryLocation) -> Self {
        let name = leaf_name(&full_name).to_string();
        Self {
            name,
            full_name,
            location,
        }
    }

    /// File name with extension (the last path segment).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path within the pack, `/`-separated.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Backing location.
    pub fn location(&self) -> &EntryLocation {
        &self.location
    }

    /// Lowercased extension of the file name, without the dot.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.trim().to_ascii_lowercase())
    }

    /// Full name with the extension stripped.
    ///
    /// `posters/cat.png` becomes `posters/cat`. Names whose only dot is the
    /// leading one (`.hidden`) are returned unchanged.
    pub fn stem_path(&self) -> &str {
        let leaf_start = self.full_name.rfind('/').map_or(0, |slash| slash + 1);
        match self.full_name.rfind('.') {
            Some(dot) if dot > leaf_start => &self.full_name[..dot],
            _ => &self.full_name,
        }
    }
}

/// Last `/`-separated segment of an in-pack path.
pub(crate) fn leaf_name(full_name: &str) -> &str {
    full_name.rsplit('/').next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_leaf_of_full_name() {
        let entry = PackFileEntry::archived(3, "school/hall/sign.png");
        assert_eq!(entry.name(), "sign.png");
        assert_eq!(entry.full_name(), "school/hall/sign.png");
        assert_eq!(entry.location(), &EntryLocation::Archive(3));
    }

    #[test]
    fn test_directory_marker_has_empty_name() {
        let entry = PackFileEntry::archived(0, "school/");
        assert_eq!(entry.name(), "");
    }

    #[test]
    fn test_extension_is_lowercased() {
        let entry = PackFileEntry::local("/tmp/a.PNG", "a.PNG");
        assert_eq!(entry.extension().as_deref(), Some("png"));

        let entry = PackFileEntry::local("/tmp/README", "README");
        assert_eq!(entry.extension(), None);
    }

    #[test]
    fn test_stem_path() {
        assert_eq!(PackFileEntry::archived(0, "a/b.png").stem_path(), "a/b");
        assert_eq!(PackFileEntry::archived(0, "a.b/c").stem_path(), "a.b/c");
        assert_eq!(PackFileEntry::archived(0, "x.tar.png").stem_path(), "x.tar");
        assert_eq!(PackFileEntry::archived(0, ".hidden").stem_path(), ".hidden");
    }
}
