//! A loaded poster pack and its selection pools.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::config::PostersConfig;
use crate::context::LoadContext;
use crate::format::{FormatKind, FormatResolver, PackFormat};
use crate::poster::{AssetEntryParser, CustomPoster, ParsedPoster, RoomCategory, SpawnMode};
use crate::selection::WeightedCandidate;

use super::blueprint::PackBlueprint;
use super::error::{PackError, PackResult};
use super::handle::{PackId, PosterRef};
use super::types::{ModInfo, PackMetadata, PackType, PACK_METADATA_FILE};

/// A pack's posters, bucketed by where they may spawn.
///
/// A pack that fails to load is disposed and holds no posters. Disposal is
/// permanent; every [`PosterRef`] handed out before it stops resolving.
#[derive(Debug)]
pub struct PosterPack {
    id: PackId,
    name: String,
    pack_type: PackType,
    path: PathBuf,
    owner: Option<ModInfo>,
    metadata: PackMetadata,
    seeded_metadata: Option<PackMetadata>,
    format: Option<Box<dyn PackFormat>>,
    generation: u32,
    posters: Vec<CustomPoster>,
    global_posters: Vec<WeightedCandidate>,
    room_posters: HashMap<RoomCategory, Vec<WeightedCandidate>>,
    chalkboard_posters: HashMap<RoomCategory, Vec<WeightedCandidate>>,
    disposed: bool,
}

impl PosterPack {
    /// Load a pack from its blueprint.
    ///
    /// Never fails; check [`is_disposed`](Self::is_disposed) to see whether
    /// the pack contributes anything.
    pub fn load(
        id: PackId,
        blueprint: &PackBlueprint,
        resolver: &FormatResolver,
        ctx: &LoadContext<'_>,
    ) -> Self {
        let mut pack = Self {
            id,
            name: blueprint.name.clone(),
            pack_type: blueprint.pack_type,
            path: blueprint.path.clone(),
            owner: blueprint.owner.clone(),
            metadata: blueprint.metadata.clone().unwrap_or_default(),
            seeded_metadata: blueprint.metadata.clone(),
            format: None,
            generation: 0,
            posters: Vec::new(),
            global_posters: Vec::new(),
            room_posters: HashMap::new(),
            chalkboard_posters: HashMap::new(),
            disposed: false,
        };

        if blueprint.auto_create_dir && !pack.path.exists() {
            match fs::create_dir_all(&pack.path) {
                Ok(()) => info!(pack = %pack.name, path = %pack.path.display(), "Created pack directory"),
                Err(e) => warn!(pack = %pack.name, path = %pack.path.display(), error = %e, "Failed to create pack directory"),
            }
        }

        pack.format = resolver.resolve(&pack.path);
        if pack.format.is_none() {
            let e = PackError::UnsupportedFormat(pack.path.clone());
            warn!(pack = %pack.name, error = %e, "Skipping pack");
            pack.dispose();
            return pack;
        }

        if let Err(e) = pack.add_posters(ctx) {
            warn!(pack = %pack.name, error = %e, "Failed to load pack");
            pack.dispose();
        }
        pack
    }

    /// Read metadata and every poster from the pack's format.
    fn add_posters(&mut self, ctx: &LoadContext<'_>) -> PackResult<usize> {
        let mut format = self
            .format
            .take()
            .ok_or_else(|| PackError::Disposed(self.name.clone()))?;
        let result = self.add_posters_from(format.as_mut(), ctx);
        self.format = Some(format);
        result
    }

    fn add_posters_from(
        &mut self,
        format: &mut dyn PackFormat,
        ctx: &LoadContext<'_>,
    ) -> PackResult<usize> {
        self.metadata = self.read_metadata(format)?;

        let parser = AssetEntryParser::new(ctx, self.id);
        let mut added = 0;
        for entry in format.entries()? {
            if !AssetEntryParser::is_image_entry(&entry) {
                continue;
            }
            match parser.parse(format, &entry) {
                Ok(parsed) => {
                    self.insert(parsed, ctx.config);
                    added += 1;
                }
                Err(e) => {
                    error!(pack = %self.name, entry = %entry.full_name(), error = %e, "Skipping poster");
                }
            }
        }

        info!(
            pack = %self.name,
            kind = %format.kind(),
            posters = added,
            generation = self.generation,
            "Loaded poster pack"
        );
        Ok(added)
    }

    fn read_metadata(&self, format: &mut dyn PackFormat) -> PackResult<PackMetadata> {
        if self.pack_type != PackType::Pack {
            return Ok(self.seeded_metadata.clone().unwrap_or_else(|| {
                match self.pack_type {
                    PackType::Personal => PackMetadata::personal(),
                    _ => PackMetadata::default(),
                }
            }));
        }

        let Some(entry) = format.get(PACK_METADATA_FILE) else {
            return self
                .seeded_metadata
                .clone()
                .ok_or_else(|| PackError::MissingMetadata(self.name.clone()));
        };

        let json = format.read_text(&entry)?;
        PackMetadata::from_json(&json).map_err(|source| PackError::InvalidMetadata {
            name: self.name.clone(),
            source,
        })
    }

    /// Store a parsed poster and route its base tile into the pools.
    fn insert(&mut self, parsed: ParsedPoster, config: &PostersConfig) {
        let ParsedPoster {
            mut poster,
            siblings,
        } = parsed;

        let base = self.posters.len() as u32;
        if !siblings.is_empty() {
            poster.multi_poster = (0..=siblings.len() as u32)
                .map(|offset| PosterRef::new(self.id, self.generation, base + offset))
                .collect();
        }

        let weight = if poster.weight > 0 {
            poster.weight
        } else {
            self.default_weight(config)
        };
        let candidate = WeightedCandidate {
            poster: PosterRef::new(self.id, self.generation, base),
            name: poster.name.clone(),
            weight: u32::try_from(weight).unwrap_or(0),
            pack_type: self.pack_type,
            level_whitelist: poster.level_whitelist.clone(),
            reverse_whitelist: poster.reverse_whitelist,
        };
        self.route(&poster, candidate);

        self.posters.push(poster);
        self.posters.extend(siblings);
    }

    fn route(&mut self, poster: &CustomPoster, candidate: WeightedCandidate) {
        match poster.spawn_mode {
            SpawnMode::Global => self.global_posters.push(candidate),
            SpawnMode::Room if poster.target_rooms.is_empty() => {
                debug!(pack = %self.name, poster = %poster.name, "Room poster has no target rooms and will never spawn");
            }
            SpawnMode::Room => {
                for room in &poster.target_rooms {
                    self.room_posters
                        .entry(*room)
                        .or_default()
                        .push(candidate.clone());
                }
            }
            SpawnMode::Chalkboard if poster.target_rooms.is_empty() => {
                self.chalkboard_posters
                    .entry(RoomCategory::NULL)
                    .or_default()
                    .push(candidate);
            }
            SpawnMode::Chalkboard => {
                for room in &poster.target_rooms {
                    self.chalkboard_posters
                        .entry(*room)
                        .or_default()
                        .push(candidate.clone());
                }
            }
        }
    }

    /// Drop every poster and pool entry. Outstanding handles stop resolving.
    pub fn dispose_all_posters(&mut self) {
        self.posters.clear();
        self.global_posters.clear();
        self.room_posters.clear();
        self.chalkboard_posters.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Re-read the pack from its source.
    ///
    /// On failure the pack is disposed.
    pub fn reload(&mut self, ctx: &LoadContext<'_>) -> PackResult<usize> {
        if self.disposed {
            return Err(PackError::Disposed(self.name.clone()));
        }

        self.dispose_all_posters();
        let result = match self.format.as_mut() {
            Some(format) => format.reload().map_err(PackError::from),
            None => Err(PackError::Disposed(self.name.clone())),
        }
        .and_then(|()| self.add_posters(ctx));

        if let Err(e) = &result {
            warn!(pack = %self.name, error = %e, "Failed to reload pack");
            self.dispose();
        }
        result
    }

    /// Release the pack's posters and storage. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.dispose_all_posters();
        self.format = None;
        self.disposed = true;
        debug!(pack = %self.name, "Disposed pack");
    }

    pub fn id(&self) -> PackId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pack_type(&self) -> PackType {
        self.pack_type
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn owner(&self) -> Option<&ModInfo> {
        self.owner.as_ref()
    }

    pub fn metadata(&self) -> &PackMetadata {
        &self.metadata
    }

    /// Storage kind, or `None` once disposed.
    pub fn format_kind(&self) -> Option<FormatKind> {
        self.format.as_ref().map(|format| format.kind())
    }

    /// Bumped every time the pack drops its posters.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Every poster of the pack, sibling tiles included.
    pub fn posters(&self) -> &[CustomPoster] {
        &self.posters
    }

    /// Resolve a handle issued by this pack's current generation.
    pub fn poster(&self, handle: &PosterRef) -> Option<&CustomPoster> {
        if self.disposed || handle.pack() != self.id || handle.generation() != self.generation {
            return None;
        }
        self.posters.get(handle.index() as usize)
    }

    pub fn global_posters(&self) -> &[WeightedCandidate] {
        &self.global_posters
    }

    pub fn room_posters(&self, category: RoomCategory) -> &[WeightedCandidate] {
        self.room_posters
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Chalkboard candidates for `category`. Posters without target rooms
    /// live under [`RoomCategory::NULL`].
    pub fn chalkboard_posters(&self, category: RoomCategory) -> &[WeightedCandidate] {
        self.chalkboard_posters
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Weight for posters that do not set their own.
    pub fn default_weight(&self, config: &PostersConfig) -> i32 {
        if self.metadata.default_weight > 0 {
            self.metadata.default_weight
        } else {
            config.default_weight
        }
    }
}
