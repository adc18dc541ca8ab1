//! Entries of a level's poster list.

use crate::pack::{PackType, PosterRef};

use super::blacklist::Blacklist;
use super::level::{level_included, LevelKey};

/// One of a pack's posters, ready to be offered to levels.
#[derive(Debug, Clone)]
pub struct WeightedCandidate {
    pub poster: PosterRef,
    pub name: String,
    pub weight: u32,
    pub pack_type: PackType,
    pub level_whitelist: Vec<String>,
    pub reverse_whitelist: bool,
}

impl PartialEq for WeightedCandidate {
    fn eq(&self, other: &Self) -> bool {
        self.poster == other.poster
    }
}

impl Eq for WeightedCandidate {}

impl WeightedCandidate {
    pub fn include_in_level(&self, level: &LevelKey) -> bool {
        level_included(&self.level_whitelist, self.reverse_whitelist, level)
    }

    /// Personal and discovered packs are never blacklisted.
    pub fn is_blacklisted(&self, blacklist: &Blacklist) -> bool {
        !self.pack_type.is_blacklist_exempt() && blacklist.matches(&self.name)
    }
}

/// An entry of the host's per-level poster list.
#[derive(Debug, Clone, PartialEq)]
pub enum LevelCandidate {
    /// A poster from the host game or a mod that does not use packs.
    Foreign { name: String, weight: u32 },
    Custom(WeightedCandidate),
}

impl LevelCandidate {
    pub fn name(&self) -> &str {
        match self {
            LevelCandidate::Foreign { name, .. } => name,
            LevelCandidate::Custom(candidate) => &candidate.name,
        }
    }

    pub fn weight(&self) -> u32 {
        match self {
            LevelCandidate::Foreign { weight, .. } => *weight,
            LevelCandidate::Custom(candidate) => candidate.weight,
        }
    }

    pub fn as_custom(&self) -> Option<&WeightedCandidate> {
        match self {
            LevelCandidate::Custom(candidate) => Some(candidate),
            LevelCandidate::Foreign { .. } => None,
        }
    }

    pub fn is_blacklisted(&self, blacklist: &Blacklist) -> bool {
        match self {
            LevelCandidate::Foreign { name, .. } => blacklist.matches(name),
            LevelCandidate::Custom(candidate) => candidate.is_blacklisted(blacklist),
        }
    }

    /// Whether this entry refers to `candidate`'s poster.
    pub fn is_custom(&self, candidate: &WeightedCandidate) -> bool {
        self.as_custom() == Some(candidate)
    }
}

impl From<WeightedCandidate> for LevelCandidate {
    fn from(candidate: WeightedCandidate) -> Self {
        LevelCandidate::Custom(candidate)
    }
}

/// A level's poster list and spawn chance, as handed over by the host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelData {
    pub posters: Vec<LevelCandidate>,
    pub poster_chance: f32,
}

impl LevelData {
    pub fn new(posters: Vec<LevelCandidate>, poster_chance: f32) -> Self {
        Self {
            posters,
            poster_chance,
        }
    }

    pub fn contains(&self, candidate: &WeightedCandidate) -> bool {
        self.posters.iter().any(|entry| entry.is_custom(candidate))
    }
}
