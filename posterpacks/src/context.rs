//! Shared inputs for building posters.

use crate::config::PostersConfig;
use crate::poster::{FontTable, RoomCategories};

/// Borrowed host state consulted while packs load.
///
/// Room categories and fonts come from the host game; they must be fully
/// registered before the first pack loads.
#[derive(Debug, Clone, Copy)]
pub struct LoadContext<'a> {
    pub config: &'a PostersConfig,
    pub rooms: &'a RoomCategories,
    pub fonts: &'a FontTable,
}

impl<'a> LoadContext<'a> {
    pub fn new(config: &'a PostersConfig, rooms: &'a RoomCategories, fonts: &'a FontTable) -> Self {
        Self {
            config,
            rooms,
            fonts,
        }
    }
}
