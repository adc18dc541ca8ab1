//! Poster packs.
//!
//! A [`PosterPack`] owns the posters of one source (directory or archive) and
//! sorts them into three pools the level generator draws from:
//!
//! ```text
//!                   ┌──────────────────────────┐
//! PackBlueprint ──► │        PosterPack        │
//!                   │  format ─► parser        │
//!                   │     │                    │
//!                   │     ├─► global_posters   │
//!                   │     ├─► room_posters     │  RoomCategory → [..]
//!                   │     └─► chalkboard       │  RoomCategory::NULL = any
//!                   └──────────────────────────┘
//! ```
//!
//! Posters are addressed by [`PosterRef`] handles, which stop resolving when
//! the pack reloads or is disposed.

mod blueprint;
mod error;
mod handle;
mod poster_pack;
mod types;

pub use blueprint::PackBlueprint;
pub use error::{PackError, PackResult};
pub use handle::{PackId, PosterRef};
pub use poster_pack::PosterPack;
pub use types::{ModInfo, PackMetadata, PackType, PACK_METADATA_FILE};
