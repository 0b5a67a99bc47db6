//! Entity lifecycle management with generational indices.
//!
//! The `EntityStore` hands out [`EntityId`]s and tracks slot generations so
//! that an id kept past destruction is recognised as dead.

use wayfarer_foundation::{EntityId, Error, Result};

/// Allocates entity ids and tracks which are alive.
///
/// Odd generations are alive, even generations are free. Destroying an entity
/// bumps its slot to the next even generation; reusing the slot bumps it to
/// the next odd one.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    generations: Vec<u32>,
    free_list: Vec<u32>,
    live_count: usize,
}

impl EntityStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a new id, reusing a freed slot when one is available.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` slots are allocated.
    pub fn spawn(&mut self) -> EntityId {
        self.live_count += 1;

        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.generations[index as usize];
            *slot += 1;
            return EntityId::new(index, *slot);
        }

        let index = u32::try_from(self.generations.len()).expect("entity slots exhausted");
        self.generations.push(1);
        EntityId::new(index, 1)
    }

    /// Frees an id.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is not alive.
    pub fn destroy(&mut self, id: EntityId) -> Result<()> {
        self.validate(id)?;
        self.generations[id.index as usize] += 1;
        self.free_list.push(id.index);
        self.live_count -= 1;
        Ok(())
    }

    /// Returns true if the id refers to a live entity.
    #[must_use]
    pub fn exists(&self, id: EntityId) -> bool {
        self.generations
            .get(id.index as usize)
            .is_some_and(|&g| g == id.generation && g % 2 == 1)
    }

    /// Validates that an id is alive.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is stale or was never issued.
    pub fn validate(&self, id: EntityId) -> Result<()> {
        if self.exists(id) {
            Ok(())
        } else {
            Err(Error::entity_not_found(id))
        }
    }

    /// Number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live_count
    }

    /// Returns true if no entity is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }
}
