//! Resolved poster assets.

use crate::pack::{PackId, PosterRef};

use super::room::{RoomCategory, SpawnMode};
use super::text::TextOverlay;
use super::texture::PosterImage;

/// A fully resolved poster owned by its pack.
///
/// A multi-poster is stored as a parent plus sibling posters; the parent's
/// [`multi_poster`](Self::multi_poster) lists every tile, itself first.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomPoster {
    pub(crate) name: String,
    pub(crate) image: PosterImage,
    pub(crate) pack: PackId,
    pub(crate) weight: i32,
    pub(crate) spawn_mode: SpawnMode,
    pub(crate) target_rooms: Vec<RoomCategory>,
    pub(crate) level_whitelist: Vec<String>,
    pub(crate) reverse_whitelist: bool,
    pub(crate) text: Vec<TextOverlay>,
    pub(crate) multi_poster: Vec<PosterRef>,
}

impl CustomPoster {
    /// Poster name: the in-pack path without extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &PosterImage {
        &self.image
    }

    /// Owning pack.
    pub fn pack(&self) -> PackId {
        self.pack
    }

    /// Declared weight; zero or less means "use the pack default".
    pub fn declared_weight(&self) -> i32 {
        self.weight
    }

    pub fn spawn_mode(&self) -> SpawnMode {
        self.spawn_mode
    }

    /// Resolved room categories. Always empty for global posters.
    pub fn target_rooms(&self) -> &[RoomCategory] {
        &self.target_rooms
    }

    pub fn level_whitelist(&self) -> &[String] {
        &self.level_whitelist
    }

    pub fn reverse_whitelist(&self) -> bool {
        self.reverse_whitelist
    }

    /// Overlays drawn on this tile.
    pub fn text(&self) -> &[TextOverlay] {
        &self.text
    }

    /// All tiles of a multi-poster, this poster first. Empty for single posters
    /// and for siblings.
    pub fn multi_poster(&self) -> &[PosterRef] {
        &self.multi_poster
    }

    /// Whether this poster spans several tiles.
    pub fn is_multi_poster(&self) -> bool {
        self.multi_poster.len() > 1
    }

    /// Tile `segment` of this poster, sharing its placement metadata.
    pub(crate) fn sibling(&self, segment: u32, image: PosterImage, text: Vec<TextOverlay>) -> Self {
        Self {
            name: format!("{}_{}", self.name, segment),
            image,
            pack: self.pack,
            weight: self.weight,
            spawn_mode: self.spawn_mode,
            target_rooms: self.target_rooms.clone(),
            level_whitelist: self.level_whitelist.clone(),
            reverse_whitelist: self.reverse_whitelist,
            text,
            multi_poster: Vec::new(),
        }
    }
}
