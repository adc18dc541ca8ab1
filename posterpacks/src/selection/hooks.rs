//! Placement-time hooks for room and chalkboard posters.

use crate::config::PostersConfig;
use crate::poster::RoomCategory;
use crate::registry::PackRegistry;

use super::candidate::{LevelCandidate, WeightedCandidate};
use super::level::LevelKey;

/// Add room posters for `category` to a room's candidate list.
///
/// Stale entries (from packs reloaded since the list was built) and
/// blacklisted entries are removed afterwards.
pub fn room_posters(
    registry: &PackRegistry,
    config: &PostersConfig,
    level: &LevelKey,
    category: RoomCategory,
    candidates: &mut Vec<LevelCandidate>,
) {
    for pack in registry.active_packs() {
        append_included(pack.room_posters(category), level, candidates);
    }
    strip_unusable(registry, config, candidates);
}

/// Build the candidate list for a chalkboard in a room of `category`.
///
/// Chalkboard posters without target rooms apply to every category. Returns
/// `None` when nothing is left, which tells the host to skip the chalkboard.
pub fn chalkboard_posters(
    registry: &PackRegistry,
    config: &PostersConfig,
    level: &LevelKey,
    category: RoomCategory,
    mut candidates: Vec<LevelCandidate>,
) -> Option<Vec<LevelCandidate>> {
    for pack in registry.active_packs() {
        append_included(pack.chalkboard_posters(category), level, &mut candidates);
        if !category.is_null() {
            append_included(pack.chalkboard_posters(RoomCategory::NULL), level, &mut candidates);
        }
    }
    strip_unusable(registry, config, &mut candidates);

    (!candidates.is_empty()).then_some(candidates)
}

fn append_included(
    pool: &[WeightedCandidate],
    level: &LevelKey,
    candidates: &mut Vec<LevelCandidate>,
) {
    for candidate in pool {
        if !candidate.include_in_level(level) {
            continue;
        }
        if candidates.iter().any(|entry| entry.is_custom(candidate)) {
            continue;
        }
        candidates.push(candidate.clone().into());
    }
}

fn strip_unusable(
    registry: &PackRegistry,
    config: &PostersConfig,
    candidates: &mut Vec<LevelCandidate>,
) {
    candidates.retain(|entry| {
        let live = entry
            .as_custom()
            .map_or(true, |custom| registry.poster(&custom.poster).is_some());
        live && !entry.is_blacklisted(&config.foreign_blacklist)
    });
}
