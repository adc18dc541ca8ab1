//! Load progress reporting.

use std::path::PathBuf;

/// Reported after each pack source is processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadProgress {
    /// Sources processed so far, including this one.
    pub completed: usize,
    pub total: usize,
    pub path: PathBuf,
}

impl LoadProgress {
    /// Fraction done in `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f32 / self.total as f32
        }
    }
}

/// Outcome of [`load_all`](super::PackRegistry::load_all) or
/// [`reload_all`](super::PackRegistry::reload_all).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// New packs registered.
    pub loaded: usize,
    /// Existing packs reloaded in place.
    pub reloaded: usize,
    /// Existing packs removed because their source vanished or failed to reload.
    pub dropped: usize,
    /// New sources that did not produce a pack.
    pub failed: usize,
}
