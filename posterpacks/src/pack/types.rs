//! Pack identity and metadata.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the metadata file at the root of `Pack`-type packs.
pub const PACK_METADATA_FILE: &str = "pack.json";

/// Where a pack came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackType {
    /// The user's own folder, always loaded.
    Personal,
    /// A pack discovered in the packs folder.
    Pack,
    /// A pack shipped by another mod.
    Mod,
}

impl PackType {
    /// Whether posters of this pack bypass the foreign blacklist.
    pub fn is_blacklist_exempt(self) -> bool {
        !matches!(self, PackType::Mod)
    }
}

impl fmt::Display for PackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackType::Personal => write!(f, "Personal"),
            PackType::Pack => write!(f, "Pack"),
            PackType::Mod => write!(f, "Mod"),
        }
    }
}

/// Contents of `pack.json`.
///
/// ```json
/// { "packVersion": 1, "credits": "Me", "description": "Retro posters", "defaultWeight": 40 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackMetadata {
    /// Format version of the pack. Required.
    pub pack_version: u8,

    #[serde(default = "default_credits")]
    pub credits: String,

    #[serde(default = "default_description")]
    pub description: String,

    /// Weight for posters that do not set one; zero or less means the
    /// configured default.
    #[serde(default)]
    pub default_weight: i32,
}

fn default_credits() -> String {
    "None".to_string()
}

fn default_description() -> String {
    "No description set.".to_string()
}

impl Default for PackMetadata {
    fn default() -> Self {
        Self {
            pack_version: 0,
            credits: default_credits(),
            description: default_description(),
            default_weight: 0,
        }
    }
}

impl PackMetadata {
    /// Metadata of the personal pack.
    pub fn personal() -> Self {
        Self {
            credits: "Player".to_string(),
            description: "Personal poster pack, ideal for quick prototyping".to_string(),
            ..Self::default()
        }
    }

    /// Metadata of a mod's built-in pack.
    pub fn built_in(default_weight: i32) -> Self {
        Self {
            description: "Built-in mod poster pack".to_string(),
            default_weight,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Identity of the mod that owns a pack.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModInfo {
    pub guid: String,
    pub name: String,
}

impl ModInfo {
    pub fn new(guid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_defaults() {
        let meta = PackMetadata::from_json(r#"{"packVersion": 3}"#).unwrap();
        assert_eq!(meta.pack_version, 3);
        assert_eq!(meta.credits, "None");
        assert_eq!(meta.description, "No description set.");
        assert_eq!(meta.default_weight, 0);
    }

    #[test]
    fn test_metadata_requires_version() {
        assert!(PackMetadata::from_json(r#"{"credits": "x"}"#).is_err());
        assert!(PackMetadata::from_json(r#"{"packVersion": 300}"#).is_err());
    }

    #[test]
    fn test_metadata_full() {
        let meta = PackMetadata::from_json(
            r#"{"packVersion": 1, "credits": "Me", "description": "Retro", "defaultWeight": 40}"#,
        )
        .unwrap();
        assert_eq!(meta.credits, "Me");
        assert_eq!(meta.default_weight, 40);
    }

    #[test]
    fn test_blacklist_exemption() {
        assert!(PackType::Personal.is_blacklist_exempt());
        assert!(PackType::Pack.is_blacklist_exempt());
        assert!(!PackType::Mod.is_blacklist_exempt());
    }

    #[test]
    fn test_preset_metadata() {
        assert_eq!(PackMetadata::personal().credits, "Player");
        let built_in = PackMetadata::built_in(25);
        assert_eq!(built_in.default_weight, 25);
        assert_eq!(built_in.description, "Built-in mod poster pack");
    }
}
