//! Per-poster sidecar properties (`<image>.json`).
//!
//! Every field is optional in the file; missing fields keep their defaults.
//!
//! ```json
//! {
//!   "posterWeight": 80,
//!   "levelWhitelist": ["F1", "F2"],
//!   "reverseWhitelist": false,
//!   "targetRooms": ["Class"],
//!   "spawnMode": "Room",
//!   "textData": [
//!     { "textKey": "PST_Hello", "position": {"x": 16, "y": 200}, "segmentId": 0 }
//!   ]
//! }
//! ```

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::text::FALLBACK_FONT;

/// Integer 2D vector as written in sidecar files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IntVector2 {
    pub x: i32,
    pub y: i32,
}

impl IntVector2 {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Sidecar properties of one poster image.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PosterProperties {
    /// Selection weight; zero or less inherits the pack default.
    pub poster_weight: i32,

    /// Levels the poster may appear in. Empty means every level.
    pub level_whitelist: Vec<String>,

    /// Turns the whitelist into a blacklist.
    pub reverse_whitelist: bool,

    /// Room category names for room and chalkboard posters.
    pub target_rooms: Vec<String>,

    /// `Global`, `Room` or `Chalkboard`. Absent means `Global`.
    pub spawn_mode: Option<String>,

    pub text_data: Vec<TextDescriptor>,
}

impl PosterProperties {
    /// Parse sidecar JSON over the defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Shared properties for posters without a sidecar file.
pub fn default_properties() -> &'static PosterProperties {
    static DEFAULT: OnceLock<PosterProperties> = OnceLock::new();
    DEFAULT.get_or_init(PosterProperties::default)
}

/// Unresolved text overlay as written in a sidecar file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextDescriptor {
    pub text_key: String,
    pub position: IntVector2,
    pub size: IntVector2,
    pub font: String,
    pub font_size: i32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub color: String,
    pub alignment: String,
    pub segment_id: u32,
}

impl Default for TextDescriptor {
    fn default() -> Self {
        Self {
            text_key: String::new(),
            position: IntVector2::default(),
            size: IntVector2::new(256, 64),
            font: FALLBACK_FONT.to_string(),
            font_size: 24,
            bold: false,
            italic: false,
            underline: false,
            color: "#000000".to_string(),
            alignment: "Center".to_string(),
            segment_id: 0,
        }
    }
}
