//! Directory-backed packs.

use std::fs;
use std::path::{Path, PathBuf};

use super::entry::{EntryLocation, PackFileEntry};
use super::error::{FormatError, FormatResult};
use super::traits::{FormatKind, PackFormat};

/// A pack stored as a plain directory tree.
///
/// Entry full names are paths relative to the root with `/` separators.
/// Subdirectories are walked before files, each in name order.
#[derive(Debug)]
pub struct LocalPackFormat {
    root: PathBuf,
    entries: Option<Vec<PackFileEntry>>,
}

impl LocalPackFormat {
    /// Create a format for the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: None,
        }
    }
}

impl PackFormat for LocalPackFormat {
    fn kind(&self) -> FormatKind {
        FormatKind::Directory
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn entries(&mut self) -> FormatResult<Vec<PackFileEntry>> {
        if let Some(entries) = &self.entries {
            return Ok(entries.clone());
        }

        let mut entries = Vec::new();
        collect_entries(&self.root, "", &mut entries)?;
        self.entries = Some(entries.clone());
        Ok(entries)
    }

    fn get(&mut self, full_name: &str) -> Option<PackFileEntry> {
        let path = self.root.join(full_name);
        path.is_file()
            .then(|| PackFileEntry::local(path, full_name.to_string()))
    }

    fn read_bytes(&mut self, entry: &PackFileEntry) -> FormatResult<Vec<u8>> {
        match entry.location() {
            EntryLocation::File(path) => fs::read(path).map_err(|e| FormatError::ReadFailed {
                path: path.clone(),
                source: e,
            }),
            EntryLocation::Archive(_) => {
                Err(FormatError::ForeignEntry(entry.full_name().to_string()))
            }
        }
    }

    fn reload(&mut self) -> FormatResult<()> {
        self.entries = None;
        Ok(())
    }
}

/// Walk `dir` recursively, prefixing entry names with `prefix`.
fn collect_entries(dir: &Path, prefix: &str, out: &mut Vec<PackFileEntry>) -> FormatResult<()> {
    let read_dir = fs::read_dir(dir).map_err(|e| FormatError::ReadFailed {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for entry in read_dir.flatten() {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();

        if path.is_dir() {
            dirs.push((name, path));
        } else if path.is_file() {
            files.push((name, path));
        }
    }

    dirs.sort();
    files.sort();

    for (name, path) in dirs {
        collect_entries(&path, &format!("{}{}/", prefix, name), out)?;
    }

    for (name, path) in files {
        out.push(PackFileEntry::local(path, format!("{}{}", prefix, name)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn names(entries: &[PackFileEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.full_name()).collect()
    }

    #[test]
    fn test_entries_walk_subdirectories_first() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.png"), b"b").unwrap();
        fs::write(temp.path().join("a.png"), b"a").unwrap();
        fs::create_dir_all(temp.path().join("hall/deep")).unwrap();
        fs::write(temp.path().join("hall/sign.png"), b"s").unwrap();
        fs::write(temp.path().join("hall/deep/x.png"), b"x").unwrap();

        let mut format = LocalPackFormat::new(temp.path());
        let entries = format.entries().unwrap();

        assert_eq!(
            names(&entries),
            vec!["hall/deep/x.png", "hall/sign.png", "a.png", "b.png"]
        );
        assert_eq!(entries[1].name(), "sign.png");
    }

    #[test]
    fn test_entries_are_cached_until_reload() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.png"), b"a").unwrap();

        let mut format = LocalPackFormat::new(temp.path());
        assert_eq!(format.entries().unwrap().len(), 1);

        fs::write(temp.path().join("b.png"), b"b").unwrap();
        assert_eq!(format.entries().unwrap().len(), 1);

        format.reload().unwrap();
        assert_eq!(format.entries().unwrap().len(), 2);
    }

    #[test]
    fn test_get_and_read() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("sub/a.png.json"), "\u{feff}{\"posterWeight\": 3}").unwrap();

        let mut format = LocalPackFormat::new(temp.path());
        let entry = format.get("sub/a.png.json").unwrap();
        assert_eq!(entry.full_name(), "sub/a.png.json");
        assert_eq!(format.read_text(&entry).unwrap(), "{\"posterWeight\": 3}");

        assert!(format.get("sub/missing.json").is_none());
        assert!(format.get("sub").is_none());
    }

    #[test]
    fn test_missing_root_is_read_error() {
        let mut format = LocalPackFormat::new("/nonexistent/poster/pack");
        assert!(matches!(
            format.entries(),
            Err(FormatError::ReadFailed { .. })
        ));
    }

    #[test]
    fn test_archive_entry_is_rejected() {
        let temp = TempDir::new().unwrap();
        let mut format = LocalPackFormat::new(temp.path());
        let entry = PackFileEntry::archived(0, "a.png");
        assert!(matches!(
            format.read_bytes(&entry),
            Err(FormatError::ForeignEntry(_))
        ));
    }
}
