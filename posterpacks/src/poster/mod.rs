//! Poster assets.
//!
//! Each image entry of a pack becomes a [`CustomPoster`]. Images wider than
//! they are tall are cut into square tiles that share one set of placement
//! properties.
//!
//! # Pipeline
//!
//! ```text
//! PackFileEntry (*.png|*.jpg|*.jpeg)
//!        │ read_bytes + decode
//!        ▼
//!   PosterImage ──── <entry>.json ──► PosterProperties
//!        │                                  │
//!        └──────────────┬───────────────────┘
//!                       ▼ AssetEntryParser::build
//!         ┌─────────────────────────────┐
//!         │ spawn mode, rooms, overlays │
//!         │ split into square tiles     │
//!         └─────────────┬───────────────┘
//!                       ▼
//!          CustomPoster + sibling tiles
//! ```

mod asset;
mod color;
mod error;
mod parser;
mod properties;
mod room;
mod text;
mod texture;

pub use asset::CustomPoster;
pub use color::{parse_html_color, BLACK};
pub use error::AssetError;
pub use parser::{AssetEntryParser, ParsedPoster, IMAGE_EXTENSIONS, SIDECAR_SUFFIX};
pub use properties::{default_properties, IntVector2, PosterProperties, TextDescriptor};
pub use room::{
    ParseSpawnModeError, RoomCategories, RoomCategory, SpawnMode, BUILTIN_ROOM_CATEGORIES,
};
pub use text::{FontHandle, FontStyle, FontTable, TextAlignment, TextOverlay, FALLBACK_FONT};
pub use texture::PosterImage;
