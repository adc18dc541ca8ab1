//! Room categories and spawn modes.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

/// Room categories the host game defines before any extension.
///
/// The first entry is the reserved "any room" category.
pub const BUILTIN_ROOM_CATEGORIES: &[&str] = &[
    "Null", "Class", "Hall", "Office", "Closet", "Faculty", "Buffer", "Special", "Store",
    "Mystery", "FieldTrip", "Test",
];

/// A room category handle issued by [`RoomCategories`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomCategory(u16);

impl RoomCategory {
    /// The reserved category. As a chalkboard bucket key it means
    /// "applies regardless of room".
    pub const NULL: RoomCategory = RoomCategory(0);

    /// Numeric id of the category.
    pub fn id(self) -> u16 {
        self.0
    }

    /// Whether this is [`RoomCategory::NULL`].
    pub fn is_null(self) -> bool {
        self == Self::NULL
    }
}

/// Lookup table of room category names, including runtime extensions.
///
/// Names resolve case-insensitively.
#[derive(Debug, Clone)]
pub struct RoomCategories {
    names: Vec<String>,
    by_name: HashMap<String, RoomCategory>,
}

impl RoomCategories {
    /// Table with only the built-in categories.
    pub fn builtin() -> Self {
        let mut table = Self {
            names: Vec::new(),
            by_name: HashMap::new(),
        };
        for name in BUILTIN_ROOM_CATEGORIES {
            table.extend(name);
        }
        table
    }

    /// Register an extended category, returning its handle.
    ///
    /// Registering an existing name returns the existing handle. Returns
    /// `None` once every `u16` id is taken.
    pub fn extend(&mut self, name: &str) -> Option<RoomCategory> {
        let key = name.trim().to_ascii_lowercase();
        if let Some(category) = self.by_name.get(&key) {
            return Some(*category);
        }

        let Ok(id) = u16::try_from(self.names.len()) else {
            warn!(room = %name, known = self.names.len(), "Room category table is full, ignoring");
            return None;
        };
        let category = RoomCategory(id);
        self.names.push(name.trim().to_string());
        self.by_name.insert(key, category);
        Some(category)
    }

    /// Resolve a category name.
    pub fn resolve(&self, name: &str) -> Option<RoomCategory> {
        self.by_name.get(&name.trim().to_ascii_lowercase()).copied()
    }

    /// Display name of a category.
    pub fn name(&self, category: RoomCategory) -> Option<&str> {
        self.names.get(category.0 as usize).map(String::as_str)
    }

    /// Number of known categories.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Resolve a declared list of names for one poster.
    ///
    /// Unknown names are dropped with a warning and duplicates are elided,
    /// keeping the first occurrence.
    pub fn resolve_all(&self, names: &[String], poster: &str) -> Vec<RoomCategory> {
        let mut resolved = Vec::with_capacity(names.len());
        for name in names {
            match self.resolve(name) {
                Some(category) if !resolved.contains(&category) => resolved.push(category),
                Some(_) => {}
                None => warn!(poster = %poster, room = %name, "Unknown room category, ignoring"),
            }
        }
        resolved
    }
}

impl Default for RoomCategories {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Which selection pool a poster is routed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpawnMode {
    /// Eligible anywhere in a level.
    #[default]
    Global,

    /// Offered to rooms of the poster's target categories.
    Room,

    /// Offered to chalkboards, optionally limited to target categories.
    Chalkboard,
}

/// Error returned when a spawn mode string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown spawn mode '{0}'")]
pub struct ParseSpawnModeError(pub String);

impl FromStr for SpawnMode {
    type Err = ParseSpawnModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(SpawnMode::Global),
            "room" => Ok(SpawnMode::Room),
            "chalkboard" => Ok(SpawnMode::Chalkboard),
            _ => Err(ParseSpawnModeError(s.to_string())),
        }
    }
}

impl fmt::Display for SpawnMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpawnMode::Global => write!(f, "Global"),
            SpawnMode::Room => write!(f, "Room"),
            SpawnMode::Chalkboard => write!(f, "Chalkboard"),
        }
    }
}
