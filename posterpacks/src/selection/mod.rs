//! Level poster selection.
//!
//! The host builds each level's poster list in two callbacks and asks again
//! when it places room and chalkboard posters:
//!
//! ```text
//!  host list ──► on_addend (repeatable)      merge global posters by whitelist
//!                    │
//!                    ▼
//!               on_finalizer (once)          strip blacklisted, rebalance chance
//!                    │
//!                    ▼
//!  placement ──► room_posters / chalkboard_posters   per-room pools
//! ```
//!
//! Custom entries hold [`PosterRef`](crate::pack::PosterRef) handles, so a
//! pack reload between callbacks leaves stale entries that the placement
//! hooks drop.

mod blacklist;
mod candidate;
mod chance;
mod hooks;
mod level;
mod session;

pub use blacklist::Blacklist;
pub use candidate::{LevelCandidate, LevelData, WeightedCandidate};
pub use chance::{lerp, rebalanced_chance};
pub use hooks::{chalkboard_posters, room_posters};
pub use level::{level_included, LevelKey, ENDLESS_LEVEL_NAME};
pub use session::{GenerationSession, HookOutcome, LevelPhase};
