//! Zip-backed packs.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use super::entry::{leaf_name, EntryLocation, PackFileEntry};
use super::error::{FormatError, FormatResult};
use super::traits::{FormatKind, PackFormat};

/// Upper bound on the buffer pre-allocated from an entry's declared size.
const MAX_READ_HINT: u64 = 16 * 1024 * 1024;

/// A pack stored as a `.zip` archive.
///
/// The archive handle stays open for the lifetime of the format. Entries are
/// named by their raw in-archive path; directory markers (entries whose leaf
/// name is empty) are skipped.
pub struct ZipPackFormat {
    path: PathBuf,
    archive: Option<ZipArchive<File>>,
    entries: Option<Vec<PackFileEntry>>,
}

impl ZipPackFormat {
    /// Open the archive at `path`.
    pub fn open(path: impl Into<PathBuf>) -> FormatResult<Self> {
        let path = path.into();
        let archive = open_archive(&path)?;
        Ok(Self {
            path,
            archive: Some(archive),
            entries: None,
        })
    }

    fn archive_mut(&mut self) -> FormatResult<&mut ZipArchive<File>> {
        self.archive
            .as_mut()
            .ok_or_else(|| FormatError::Closed(self.path.clone()))
    }
}

impl fmt::Debug for ZipPackFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZipPackFormat")
            .field("path", &self.path)
            .field("open", &self.archive.is_some())
            .field("cached_entries", &self.entries.as_ref().map(Vec::len))
            .finish()
    }
}

impl PackFormat for ZipPackFormat {
    fn kind(&self) -> FormatKind {
        FormatKind::Zip
    }

    fn root(&self) -> &Path {
        &self.path
    }

    fn entries(&mut self) -> FormatResult<Vec<PackFileEntry>> {
        if let Some(entries) = &self.entries {
            return Ok(entries.clone());
        }

        let path = self.path.clone();
        let archive = self.archive_mut()?;
        let mut entries = Vec::with_capacity(archive.len());

        for index in 0..archive.len() {
            let full_name = archive
                .by_index_raw(index)
                .map_err(|source| FormatError::Archive {
                    path: path.clone(),
                    source,
                })?
                .name()
                .to_string();

            if leaf_name(&full_name).is_empty() {
                continue;
            }

            entries.push(PackFileEntry::archived(index, full_name));
        }

        self.entries = Some(entries.clone());
        Ok(entries)
    }

    fn get(&mut self, full_name: &str) -> Option<PackFileEntry> {
        let index = self.archive.as_ref()?.index_for_name(full_name)?;
        Some(PackFileEntry::archived(index, full_name.to_string()))
    }

    fn read_bytes(&mut self, entry: &PackFileEntry) -> FormatResult<Vec<u8>> {
        let index = match entry.location() {
            EntryLocation::Archive(index) => *index,
            EntryLocation::File(_) => {
                return Err(FormatError::ForeignEntry(entry.full_name().to_string()))
            }
        };

        let path = self.path.clone();
        let mut file = self
            .archive_mut()?
            .by_index(index)
            .map_err(|source| FormatError::Archive {
                path: path.clone(),
                source,
            })?;

        let mut buffer = Vec::with_capacity(read_hint(file.size()));
        file.read_to_end(&mut buffer)
            .map_err(|e| FormatError::ReadFailed {
                path: path.join(entry.full_name()),
                source: e,
            })?;

        Ok(buffer)
    }

    fn reload(&mut self) -> FormatResult<()> {
        // Release the old handle before re-opening the file.
        self.archive = None;
        self.entries = None;
        self.archive = Some(open_archive(&self.path)?);
        Ok(())
    }
}

/// Capacity for reading an entry. The declared size comes from the archive
/// header and is not trusted.
fn read_hint(declared: u64) -> usize {
    usize::try_from(declared.min(MAX_READ_HINT)).unwrap_or(0)
}

fn open_archive(path: &Path) -> FormatResult<ZipArchive<File>> {
    let file = File::open(path).map_err(|e| FormatError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    ZipArchive::new(file).map_err(|source| FormatError::Archive {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn write_zip(path: &Path, files: &[(&str, &[u8])]) {
        let file = File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = SimpleFileOptions::default();
        for (name, data) in files {
            if name.ends_with('/') {
                zip.add_directory(*name, options).unwrap();
            } else {
                zip.start_file(*name, options).unwrap();
                zip.write_all(data).unwrap();
            }
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_entries_skip_directory_markers() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pack.zip");
        write_zip(
            &path,
            &[
                ("hall/", b""),
                ("hall/sign.png", b"sign"),
                ("pack.json", b"{}"),
            ],
        );

        let mut format = ZipPackFormat::open(&path).unwrap();
        let entries = format.entries().unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.full_name()).collect();

        assert_eq!(names, vec!["hall/sign.png", "pack.json"]);
        assert_eq!(entries[0].name(), "sign.png");
    }

    #[test]
    fn test_get_and_read_bytes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pack.zip");
        write_zip(&path, &[("a.png.json", b"{\"spawnMode\":\"Room\"}")]);

        let mut format = ZipPackFormat::open(&path).unwrap();
        let entry = format.get("a.png.json").unwrap();
        assert_eq!(
            format.read_text(&entry).unwrap(),
            "{\"spawnMode\":\"Room\"}"
        );
        assert!(format.get("missing.json").is_none());
    }

    #[test]
    fn test_reload_reopens_archive() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pack.zip");
        write_zip(&path, &[("a.png", b"a")]);

        let mut format = ZipPackFormat::open(&path).unwrap();
        assert_eq!(format.entries().unwrap().len(), 1);

        write_zip(&path, &[("a.png", b"a"), ("b.png", b"b")]);
        format.reload().unwrap();
        assert_eq!(format.entries().unwrap().len(), 2);
    }

    #[test]
    fn test_reload_of_deleted_archive_closes_format() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pack.zip");
        write_zip(&path, &[("a.png", b"a")]);

        let mut format = ZipPackFormat::open(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert!(format.reload().is_err());
        assert!(matches!(format.entries(), Err(FormatError::Closed(_))));
        assert!(format.get("a.png").is_none());
    }

    #[test]
    fn test_read_hint_ignores_oversized_header() {
        assert_eq!(read_hint(4), 4);
        assert_eq!(read_hint(1 << 62), MAX_READ_HINT as usize);
        assert_eq!(read_hint(u64::MAX), MAX_READ_HINT as usize);
    }

    #[test]
    fn test_open_rejects_non_archive() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("fake.zip");
        fs::write(&path, b"definitely not a zip").unwrap();

        assert!(matches!(
            ZipPackFormat::open(&path),
            Err(FormatError::Archive { .. })
        ));
    }
}
