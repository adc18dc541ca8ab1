//! Owner of every loaded pack.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::context::LoadContext;
use crate::format::FormatResolver;
use crate::pack::{ModInfo, PackBlueprint, PackId, PosterPack, PosterRef};
use crate::poster::CustomPoster;
use crate::selection::LevelCandidate;

use super::discovery::PackDiscovery;
use super::error::{RegistryError, RegistryResult};
use super::progress::{LoadProgress, LoadSummary};

/// Source name reported for posters that do not come from a pack.
pub const UNKNOWN_SOURCE: &str = "Vanilla/Unknown";

/// Collects pack submissions, loads them, and owns the resulting packs.
///
/// Submissions are accepted until the first [`load_all`](Self::load_all).
/// Pack ids index an append-only slot list and are never reused.
#[derive(Debug, Default)]
pub struct PackRegistry {
    resolver: FormatResolver,
    discovery: Option<PackDiscovery>,
    blueprints: Vec<PackBlueprint>,
    frozen: bool,
    slots: Vec<Option<PosterPack>>,
    by_path: HashMap<PathBuf, PackId>,
    active: Vec<PackId>,
}

impl PackRegistry {
    pub fn new(resolver: FormatResolver) -> Self {
        Self {
            resolver,
            ..Self::default()
        }
    }

    /// Also load every directory and file inside `dir` as a `Pack`.
    pub fn with_packs_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.discovery = Some(PackDiscovery::new(dir));
        self
    }

    pub fn resolver(&self) -> &FormatResolver {
        &self.resolver
    }

    /// Whether submissions are closed.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn blueprints(&self) -> &[PackBlueprint] {
        &self.blueprints
    }

    /// Queue a pack for loading.
    pub fn submit(&mut self, blueprint: PackBlueprint) -> RegistryResult<()> {
        if self.frozen {
            let err = RegistryError::TooLate {
                name: blueprint.name,
                path: blueprint.path,
            };
            warn!(error = %err, "Rejected pack submission");
            return Err(err);
        }

        debug!(pack = %blueprint.name, path = %blueprint.path.display(), "Pack submitted");
        self.blueprints.push(blueprint);
        Ok(())
    }

    /// Queue a pack shipped inside another mod.
    pub fn submit_built_in(
        &mut self,
        owner: &ModInfo,
        path: impl Into<PathBuf>,
        default_weight: i32,
    ) -> RegistryResult<()> {
        let path = path.into();
        if owner.guid.trim().is_empty() {
            let err = RegistryError::MissingOwner { path };
            warn!(error = %err, "Rejected built-in pack");
            return Err(err);
        }
        self.submit(PackBlueprint::built_in(owner.clone(), path, default_weight))
    }

    /// Close submissions and load every pack not loaded yet.
    pub fn load_all(&mut self, ctx: &LoadContext<'_>) -> LoadSummary {
        self.load_all_with_progress(ctx, &mut |_| {})
    }

    /// [`load_all`](Self::load_all), reporting after each source.
    pub fn load_all_with_progress(
        &mut self,
        ctx: &LoadContext<'_>,
        progress: &mut dyn FnMut(&LoadProgress),
    ) -> LoadSummary {
        self.frozen = true;
        let mut summary = LoadSummary::default();
        self.load_new_sources(ctx, progress, &mut summary);
        self.rebuild_active();

        info!(
            loaded = summary.loaded,
            failed = summary.failed,
            active = self.active.len(),
            "Poster packs loaded"
        );
        summary
    }

    /// Reload every pack from disk, dropping vanished ones and picking up new
    /// sources.
    pub fn reload_all(&mut self, ctx: &LoadContext<'_>) -> LoadSummary {
        self.reload_all_with_progress(ctx, &mut |_| {})
    }

    /// [`reload_all`](Self::reload_all), reporting after each new source.
    pub fn reload_all_with_progress(
        &mut self,
        ctx: &LoadContext<'_>,
        progress: &mut dyn FnMut(&LoadProgress),
    ) -> LoadSummary {
        self.frozen = true;
        let mut summary = LoadSummary::default();

        for index in 0..self.slots.len() {
            let Some(pack) = self.slots[index].as_mut() else {
                continue;
            };

            let keep = if !pack.path().exists() {
                info!(pack = %pack.name(), path = %pack.path().display(), "Pack source removed");
                false
            } else {
                pack.reload(ctx).is_ok() && !pack.is_disposed()
            };

            if keep {
                summary.reloaded += 1;
            } else {
                pack.dispose();
                let path = pack.path().to_path_buf();
                self.by_path.remove(&path);
                self.slots[index] = None;
                summary.dropped += 1;
            }
        }

        self.load_new_sources(ctx, progress, &mut summary);
        self.rebuild_active();

        info!(
            reloaded = summary.reloaded,
            dropped = summary.dropped,
            loaded = summary.loaded,
            failed = summary.failed,
            "Poster packs reloaded"
        );
        summary
    }

    fn load_new_sources(
        &mut self,
        ctx: &LoadContext<'_>,
        progress: &mut dyn FnMut(&LoadProgress),
        summary: &mut LoadSummary,
    ) {
        let sources = self.pending_sources();
        let total = sources.len();

        for (done, blueprint) in sources.into_iter().enumerate() {
            let id = PackId(self.slots.len() as u32);
            let pack = PosterPack::load(id, &blueprint, &self.resolver, ctx);

            if pack.is_disposed() {
                summary.failed += 1;
            } else {
                self.by_path.insert(blueprint.path.clone(), id);
                self.slots.push(Some(pack));
                summary.loaded += 1;
            }

            progress(&LoadProgress {
                completed: done + 1,
                total,
                path: blueprint.path,
            });
        }
    }

    /// Submitted blueprints, then discovered sources, that have no pack yet.
    ///
    /// Each path is queued at most once; the first blueprint for a path wins.
    fn pending_sources(&self) -> Vec<PackBlueprint> {
        let mut queued: HashSet<&Path> = HashSet::new();
        let mut sources = Vec::new();

        for blueprint in &self.blueprints {
            if !queued.insert(blueprint.path.as_path()) {
                if !self.by_path.contains_key(&blueprint.path) {
                    warn!(
                        pack = %blueprint.name,
                        path = %blueprint.path.display(),
                        "Ignoring duplicate pack source"
                    );
                }
                continue;
            }
            if !self.by_path.contains_key(&blueprint.path) {
                sources.push(blueprint.clone());
            }
        }

        let Some(discovery) = &self.discovery else {
            return sources;
        };

        match discovery.find_sources() {
            Ok(paths) => sources.extend(
                paths
                    .into_iter()
                    .filter(|path| !queued.contains(path.as_path()))
                    .filter(|path| !self.by_path.contains_key(path))
                    .map(PackBlueprint::discovered),
            ),
            Err(e) => warn!(
                dir = %discovery.packs_dir().display(),
                error = %e,
                "Failed to list packs folder"
            ),
        }
        sources
    }

    fn rebuild_active(&mut self) {
        self.active = self
            .slots
            .iter()
            .flatten()
            .filter(|pack| !pack.is_disposed())
            .map(PosterPack::id)
            .collect();
    }

    pub fn pack(&self, id: PackId) -> Option<&PosterPack> {
        self.slots.get(id.0 as usize)?.as_ref()
    }

    pub fn pack_by_path(&self, path: &Path) -> Option<&PosterPack> {
        self.by_path.get(path).and_then(|id| self.pack(*id))
    }

    /// Live packs in load order.
    pub fn active_packs(&self) -> impl Iterator<Item = &PosterPack> {
        self.active.iter().filter_map(|id| self.pack(*id))
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Resolve a poster handle. Stale handles yield `None`.
    pub fn poster(&self, handle: &PosterRef) -> Option<&CustomPoster> {
        self.pack(handle.pack())?.poster(handle)
    }

    /// Name of the pack a level entry came from.
    pub fn source_name(&self, candidate: &LevelCandidate) -> &str {
        candidate
            .as_custom()
            .and_then(|custom| self.pack(custom.poster.pack()))
            .map(PosterPack::name)
            .unwrap_or(UNKNOWN_SOURCE)
    }
}
