//! Finds packs in the packs folder.

use std::io;
use std::path::{Path, PathBuf};

/// Lists candidate pack sources in a directory.
#[derive(Debug, Clone)]
pub struct PackDiscovery {
    packs_dir: PathBuf,
}

impl PackDiscovery {
    pub fn new(packs_dir: impl Into<PathBuf>) -> Self {
        Self {
            packs_dir: packs_dir.into(),
        }
    }

    pub fn packs_dir(&self) -> &Path {
        &self.packs_dir
    }

    pub fn exists(&self) -> bool {
        self.packs_dir.is_dir()
    }

    /// Every directory and file directly inside the packs folder, sorted by
    /// path. Whether a path is actually a pack is up to the format resolver.
    pub fn find_sources(&self) -> io::Result<Vec<PathBuf>> {
        if !self.exists() {
            return Ok(Vec::new());
        }

        let mut sources = Vec::new();
        for entry in std::fs::read_dir(&self.packs_dir)? {
            let entry = entry?;
            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }
            sources.push(entry.path());
        }

        sources.sort();
        Ok(sources)
    }
}
