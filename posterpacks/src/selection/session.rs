//! Per-level state across the two generation callbacks.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::config::PostersConfig;
use crate::registry::PackRegistry;

use super::candidate::LevelData;
use super::chance::rebalanced_chance;
use super::level::LevelKey;

/// Where a level is in the addend/finalizer sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelPhase {
    Pending,
    AddendApplied { original_count: usize },
    Finalized,
}

/// Whether a callback changed the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    Applied,
    Ignored,
}

/// Tracks levels between the addend and finalizer callbacks.
///
/// The host runs one level build at a time. The addend may fire several
/// times per level; the finalizer acts once. Both are ignored for the most
/// recently finalized level until [`reset`](Self::reset) is called.
#[derive(Debug, Default)]
pub struct GenerationSession {
    original_counts: HashMap<LevelKey, usize>,
    last_finalized: Option<LevelKey>,
}

impl GenerationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self, key: &LevelKey) -> LevelPhase {
        if self.last_finalized.as_ref() == Some(key) {
            return LevelPhase::Finalized;
        }
        match self.original_counts.get(key) {
            Some(&original_count) => LevelPhase::AddendApplied { original_count },
            None => LevelPhase::Pending,
        }
    }

    /// Forget all level state, e.g. when a new run starts.
    pub fn reset(&mut self) {
        self.original_counts.clear();
        self.last_finalized = None;
    }

    /// Merge every active pack's global posters into the level.
    ///
    /// Idempotent: posters already present are not added twice, and posters
    /// whose whitelist now excludes the level are removed. A level that had
    /// no posters to begin with is left alone.
    pub fn on_addend(
        &mut self,
        registry: &PackRegistry,
        key: &LevelKey,
        level: &mut LevelData,
    ) -> HookOutcome {
        if self.last_finalized.as_ref() == Some(key) {
            debug!(level = %key, "Level already finalized, ignoring addend");
            return HookOutcome::Ignored;
        }

        let original_count = *self
            .original_counts
            .entry(key.clone())
            .or_insert(level.posters.len());

        if level.posters.is_empty() {
            debug!(level = %key, "Level has no posters, leaving it untouched");
            return HookOutcome::Applied;
        }

        let (mut added, mut removed) = (0usize, 0usize);
        for pack in registry.active_packs() {
            for candidate in pack.global_posters() {
                let present = level.contains(candidate);
                let included = candidate.include_in_level(key);
                if included && !present {
                    level.posters.push(candidate.clone().into());
                    added += 1;
                } else if !included && present {
                    level.posters.retain(|entry| !entry.is_custom(candidate));
                    removed += 1;
                }
            }
        }

        debug!(level = %key, original_count, added, removed, "Merged custom posters");
        HookOutcome::Applied
    }

    /// Strip blacklisted posters and rebalance the level's poster chance.
    ///
    /// Only the most recently finalized level is remembered. If another level
    /// is finalized in between, a repeat call filters the list again but
    /// leaves the chance alone, since the recorded original count is consumed
    /// by the first call.
    pub fn on_finalizer(
        &mut self,
        registry: &PackRegistry,
        config: &PostersConfig,
        key: &LevelKey,
        level: &mut LevelData,
    ) -> HookOutcome {
        if self.last_finalized.as_ref() == Some(key) {
            debug!(level = %key, "Level already finalized, ignoring finalizer");
            return HookOutcome::Ignored;
        }

        let before = level.posters.len();
        level
            .posters
            .retain(|entry| !entry.is_blacklisted(&config.foreign_blacklist));
        let stripped = before - level.posters.len();

        let original_count = self.original_counts.remove(key);
        if config.adjust_poster_chances {
            let rebalanced = original_count.and_then(|original| {
                rebalanced_chance(
                    level.poster_chance,
                    original,
                    level.posters.len(),
                    config.poster_chance_multiplier,
                )
            });
            if let Some(chance) = rebalanced {
                debug!(level = %key, from = level.poster_chance, to = chance, "Adjusted poster chance");
                level.poster_chance = chance;
            }
        }

        self.last_finalized = Some(key.clone());
        debug!(level = %key, posters = level.posters.len(), stripped, "Finalized level posters");

        if config.log_all_posters {
            log_level_posters(registry, key, level);
        }
        HookOutcome::Applied
    }
}

fn log_level_posters(registry: &PackRegistry, key: &LevelKey, level: &LevelData) {
    info!(level = %key, count = level.posters.len(), chance = level.poster_chance, "Level posters");
    for entry in &level.posters {
        info!(
            level = %key,
            poster = %entry.name(),
            weight = entry.weight(),
            source = %registry.source_name(entry),
            "Level poster"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{Blacklist, LevelCandidate};

    fn foreign(name: &str) -> LevelCandidate {
        LevelCandidate::Foreign {
            name: name.to_string(),
            weight: 100,
        }
    }

    #[test]
    fn test_phases() {
        let registry = PackRegistry::default();
        let config = PostersConfig::default();
        let key = LevelKey::new("F1", 0);
        let mut level = LevelData::new(vec![foreign("a")], 0.5);
        let mut session = GenerationSession::new();

        assert_eq!(session.phase(&key), LevelPhase::Pending);
        session.on_addend(&registry, &key, &mut level);
        assert_eq!(session.phase(&key), LevelPhase::AddendApplied { original_count: 1 });
        session.on_finalizer(&registry, &config, &key, &mut level);
        assert_eq!(session.phase(&key), LevelPhase::Finalized);

        session.reset();
        assert_eq!(session.phase(&key), LevelPhase::Pending);
    }

    #[test]
    fn test_finalizer_runs_once() {
        let registry = PackRegistry::default();
        let config = PostersConfig::default()
            .with_blacklist(Blacklist::parse("bad", false))
            .with_chance_adjustment(true, 1.0);
        let key = LevelKey::new("F1", 0);
        let mut level = LevelData::new(vec![foreign("good"), foreign("bad")], 0.4);
        let mut session = GenerationSession::new();

        session.on_addend(&registry, &key, &mut level);
        let outcome = session.on_finalizer(&registry, &config, &key, &mut level);

        assert_eq!(outcome, HookOutcome::Applied);
        assert_eq!(level.posters, vec![foreign("good")]);
        assert!((level.poster_chance - 0.2).abs() < 1e-6);

        let outcome = session.on_finalizer(&registry, &config, &key, &mut level);
        assert_eq!(outcome, HookOutcome::Ignored);
        assert!((level.poster_chance - 0.2).abs() < 1e-6);

        assert_eq!(session.on_addend(&registry, &key, &mut level), HookOutcome::Ignored);
    }

    #[test]
    fn test_refinalize_after_other_level_keeps_chance() {
        let registry = PackRegistry::default();
        let config = PostersConfig::default()
            .with_blacklist(Blacklist::parse("bad", false))
            .with_chance_adjustment(true, 1.0);
        let first = LevelKey::new("F1", 0);
        let second = LevelKey::new("F2", 1);
        let mut level = LevelData::new(vec![foreign("good"), foreign("bad")], 0.4);
        let mut other = LevelData::new(vec![foreign("good")], 0.5);
        let mut session = GenerationSession::new();

        session.on_addend(&registry, &first, &mut level);
        session.on_finalizer(&registry, &config, &first, &mut level);
        session.on_finalizer(&registry, &config, &second, &mut other);

        let outcome = session.on_finalizer(&registry, &config, &first, &mut level);
        assert_eq!(outcome, HookOutcome::Applied);
        assert_eq!(level.posters, vec![foreign("good")]);
        assert!((level.poster_chance - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_finalizer_without_addend_filters_only() {
        let registry = PackRegistry::default();
        let config = PostersConfig::default().with_blacklist(Blacklist::parse("bad", false));
        let key = LevelKey::new("F2", 1);
        let mut level = LevelData::new(vec![foreign("bad"), foreign("ok")], 0.5);

        GenerationSession::new().on_finalizer(&registry, &config, &key, &mut level);

        assert_eq!(level.posters, vec![foreign("ok")]);
        assert_eq!(level.poster_chance, 0.5);
    }

    #[test]
    fn test_adjustment_disabled() {
        let registry = PackRegistry::default();
        let config = PostersConfig::default()
            .with_blacklist(Blacklist::parse("bad", false))
            .with_chance_adjustment(false, 1.0);
        let key = LevelKey::new("F1", 0);
        let mut level = LevelData::new(vec![foreign("bad"), foreign("ok")], 0.5);
        let mut session = GenerationSession::new();

        session.on_addend(&registry, &key, &mut level);
        session.on_finalizer(&registry, &config, &key, &mut level);

        assert_eq!(level.poster_chance, 0.5);
    }
}
