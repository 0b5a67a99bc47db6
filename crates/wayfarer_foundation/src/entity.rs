//! Generational entity identifiers.

use std::fmt;

/// Identifier for anything that exists in the world: rooms, actors, items.
///
/// The generation distinguishes a live entity from an earlier occupant of the
/// same slot, so a handle kept past destruction never aliases a newcomer.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct EntityId {
    /// Slot index in entity storage.
    pub index: u32,
    /// Generation of the slot when this id was issued.
    pub generation: u32,
}

impl EntityId {
    /// Creates an id from its parts.
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}
