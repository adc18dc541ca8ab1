//! Pack registration and lifecycle.
//!
//! Mods submit [`PackBlueprint`](crate::pack::PackBlueprint)s while the game
//! starts. The first [`PackRegistry::load_all`] closes submissions, loads
//! every blueprint plus every source in the packs folder, and keeps the packs
//! that loaded. [`PackRegistry::reload_all`] refreshes them from disk.
//!
//! ```text
//! submit / submit_built_in ──► blueprints ─┐
//!                                          ├─► PosterPack::load ──► slots
//! packs folder ──► PackDiscovery ──────────┘                        │
//!                                                                    ▼
//!                                                            active snapshot
//! ```

mod discovery;
mod error;
mod pack_registry;
mod progress;

pub use discovery::PackDiscovery;
pub use error::{RegistryError, RegistryResult};
pub use pack_registry::{PackRegistry, UNKNOWN_SOURCE};
pub use progress::{LoadProgress, LoadSummary};
