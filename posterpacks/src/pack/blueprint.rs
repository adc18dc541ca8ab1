//! Declarative pack load requests.

use std::path::{Path, PathBuf};

use super::types::{ModInfo, PackMetadata, PackType};

/// Everything needed to load one pack.
#[derive(Debug, Clone, PartialEq)]
pub struct PackBlueprint {
    pub owner: Option<ModInfo>,
    pub pack_type: PackType,
    pub name: String,
    pub path: PathBuf,

    /// Create the directory at `path` before loading if it is missing.
    pub auto_create_dir: bool,

    /// Metadata to use when the pack carries no `pack.json`.
    pub metadata: Option<PackMetadata>,
}

impl PackBlueprint {
    pub fn new(
        owner: Option<ModInfo>,
        pack_type: PackType,
        name: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            owner,
            pack_type,
            name: name.into(),
            path: path.into(),
            auto_create_dir: false,
            metadata: None,
        }
    }

    /// The user's personal folder. Created on demand.
    pub fn personal(path: impl Into<PathBuf>) -> Self {
        Self::new(None, PackType::Personal, "Personal", path)
            .with_auto_create_dir(true)
            .with_metadata(PackMetadata::personal())
    }

    /// A pack shipped inside another mod.
    pub fn built_in(owner: ModInfo, path: impl Into<PathBuf>, default_weight: i32) -> Self {
        let name = format!("{} (Built-in)", owner.name);
        Self::new(Some(owner), PackType::Mod, name, path)
            .with_metadata(PackMetadata::built_in(default_weight))
    }

    /// A pack found in the packs folder, named after its file stem.
    pub fn discovered(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = pack_name_from_path(&path);
        Self::new(None, PackType::Pack, name, path)
    }

    pub fn with_auto_create_dir(mut self, enabled: bool) -> Self {
        self.auto_create_dir = enabled;
        self
    }

    pub fn with_metadata(mut self, metadata: PackMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

fn pack_name_from_path(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
