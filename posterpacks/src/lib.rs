//! Custom poster packs for a school-themed level generator.
//!
//! Packs are folders or `.zip` archives of images, each with an optional
//! `<image>.json` sidecar. This crate loads them, turns the images into
//! posters, and plugs those posters into level generation.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌────────────┐   ┌──────────────┐
//! │ PackRegistry │──►│ PosterPack │──►│  PackFormat  │  directory | zip
//! └──────┬───────┘   └─────┬──────┘   └──────────────┘
//!        │                 │ AssetEntryParser
//!        │                 ▼
//!        │          global / room / chalkboard pools
//!        ▼
//! ┌─────────────────────────────┐
//! │ GenerationSession + hooks   │  addend, finalizer, placement
//! └─────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use posterpacks::{
//!     FontTable, LoadContext, PackBlueprint, PackRegistry, PostersConfig, RoomCategories,
//! };
//!
//! let config = PostersConfig::load_or_create(Path::new("config/posters.ini"))?;
//! let rooms = RoomCategories::builtin();
//! let fonts = FontTable::build(host_fonts);
//!
//! let mut registry = PackRegistry::default().with_packs_dir("Posters/Packs");
//! registry.submit(PackBlueprint::personal("Posters/Personal"))?;
//! registry.load_all(&LoadContext::new(&config, &rooms, &fonts));
//! ```

pub mod config;
pub mod context;
pub mod format;
pub mod logging;
pub mod pack;
pub mod poster;
pub mod registry;
pub mod selection;

pub use config::{ConfigError, ConfigResult, PostersConfig};
pub use context::LoadContext;
pub use format::{FormatResolver, PackFormat};
pub use pack::{ModInfo, PackBlueprint, PackId, PackMetadata, PackType, PosterPack, PosterRef};
pub use poster::{CustomPoster, FontHandle, FontTable, RoomCategories, RoomCategory, SpawnMode};
pub use registry::{LoadProgress, LoadSummary, PackRegistry, RegistryError};
pub use selection::{GenerationSession, LevelCandidate, LevelData, LevelKey};
