//! Non-owning handles into the pack registry.

use std::fmt;

/// Registry slot of a pack. Ids are never reused within one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackId(pub u32);

impl fmt::Display for PackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pack#{}", self.0)
    }
}

/// Handle to one poster of one pack.
///
/// The handle carries the pack's load generation, so it stops resolving once
/// the pack reloads or is disposed, even if a new poster takes its index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PosterRef {
    pack: PackId,
    generation: u32,
    index: u32,
}

impl PosterRef {
    pub fn new(pack: PackId, generation: u32, index: u32) -> Self {
        Self {
            pack,
            generation,
            index,
        }
    }

    pub fn pack(&self) -> PackId {
        self.pack
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn index(&self) -> u32 {
        self.index
    }
}

impl fmt::Display for PosterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/gen{}/{}", self.pack, self.generation, self.index)
    }
}
