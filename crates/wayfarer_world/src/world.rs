//! World state: things, where they are, and a deterministic random source.
//!
//! Things live in a persistent ordered map, so cloning a `World` is cheap and
//! iteration order is deterministic. A contents index keeps each location's
//! occupants in arrival order; possession order is the order in which an
//! actor acquired things.

use im::{OrdMap, Vector};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wayfarer_foundation::{EntityId, Error, Result};

use crate::store::EntityStore;
use crate::thing::{Thing, ThingKind};

/// The shared mutable world.
#[derive(Clone, Debug)]
pub struct World {
    entities: EntityStore,
    things: OrdMap<EntityId, Thing>,
    contents: OrdMap<EntityId, Vector<EntityId>>,
    rng: ChaCha8Rng,
    seed: u64,
}

impl World {
    /// Creates an empty world with a seeded random source.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            entities: EntityStore::new(),
            things: OrdMap::new(),
            contents: OrdMap::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed the random source was created with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// The world's random source.
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Number of live things.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if the world is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterates over every live thing in id order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Thing)> + '_ {
        self.things.iter().map(|(id, thing)| (*id, thing))
    }

    /// Adds a thing to the world.
    ///
    /// # Errors
    ///
    /// Returns an error if the thing's location does not exist.
    pub fn spawn(&mut self, thing: Thing) -> Result<EntityId> {
        if let Some(location) = thing.location {
            self.entities.validate(location)?;
        }
        let id = self.entities.spawn();
        if let Some(location) = thing.location {
            self.contents.entry(location).or_insert_with(Vector::new).push_back(id);
        }
        self.things.insert(id, thing);
        Ok(id)
    }

    /// Removes a thing from the world.
    ///
    /// Anything it held is left in its location. Returns the released things.
    ///
    /// # Errors
    ///
    /// Returns an error if the thing does not exist.
    pub fn destroy(&mut self, id: EntityId) -> Result<Vec<EntityId>> {
        let location = self.get(id)?.location;
        let released = self.contents(id);
        for &inner in &released {
            self.relocate(inner, location)?;
        }
        self.detach(id, location);
        self.contents.remove(&id);
        self.things.remove(&id);
        self.entities.destroy(id)?;
        Ok(released)
    }

    /// Returns true if the id refers to a live thing.
    #[must_use]
    pub fn exists(&self, id: EntityId) -> bool {
        self.entities.exists(id)
    }

    /// Looks up a thing.
    ///
    /// # Errors
    ///
    /// Returns an error if the thing does not exist.
    pub fn get(&self, id: EntityId) -> Result<&Thing> {
        self.things.get(&id).ok_or_else(|| Error::entity_not_found(id))
    }

    /// Looks up a thing for mutation.
    ///
    /// # Errors
    ///
    /// Returns an error if the thing does not exist.
    pub fn get_mut(&mut self, id: EntityId) -> Result<&mut Thing> {
        self.things
            .get_mut(&id)
            .ok_or_else(|| Error::entity_not_found(id))
    }

    /// Finds the first thing with the given name key.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<EntityId> {
        self.iter().find(|(_, t)| t.name == name).map(|(id, _)| id)
    }

    /// Things directly inside `location`, in arrival order.
    #[must_use]
    pub fn contents(&self, location: EntityId) -> Vec<EntityId> {
        self.contents
            .get(&location)
            .map(|v| v.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Where a thing is.
    #[must_use]
    pub fn location_of(&self, id: EntityId) -> Option<EntityId> {
        self.things.get(&id).and_then(|t| t.location)
    }

    /// The actor holding a thing, if it is held.
    #[must_use]
    pub fn owner_of(&self, id: EntityId) -> Option<EntityId> {
        let location = self.location_of(id)?;
        let holder = self.things.get(&location)?;
        (holder.kind == ThingKind::Actor).then_some(location)
    }

    /// The room a thing is ultimately in.
    #[must_use]
    pub fn room_of(&self, id: EntityId) -> Option<EntityId> {
        let mut current = id;
        // Bounded walk; containment chains are shallow.
        for _ in 0..16 {
            let thing = self.things.get(&current)?;
            if thing.kind == ThingKind::Room {
                return Some(current);
            }
            current = thing.location?;
        }
        None
    }

    /// Moves a thing to a new location.
    ///
    /// # Errors
    ///
    /// Returns an error if either side does not exist or the move would put
    /// a thing inside itself.
    pub fn move_to(&mut self, id: EntityId, destination: EntityId) -> Result<()> {
        if id == destination {
            return Err(Error::internal(format!("cannot move {id} into itself")));
        }
        self.entities.validate(destination)?;
        self.relocate(id, Some(destination))
    }

    fn relocate(&mut self, id: EntityId, destination: Option<EntityId>) -> Result<()> {
        let previous = self.get(id)?.location;
        self.detach(id, previous);
        if let Some(to) = destination {
            self.contents.entry(to).or_insert_with(Vector::new).push_back(id);
        }
        self.get_mut(id)?.location = destination;
        Ok(())
    }

    fn detach(&mut self, id: EntityId, location: Option<EntityId>) {
        let Some(from) = location else { return };
        if let Some(list) = self.contents.get_mut(&from) {
            if let Some(pos) = list.index_of(&id) {
                list.remove(pos);
            }
        }
    }

    /// An actor's possessions, optionally filtered by category, in
    /// acquisition order.
    #[must_use]
    pub fn possessions(&self, actor: EntityId, category: Option<&str>) -> Vec<EntityId> {
        self.contents(actor)
            .into_iter()
            .filter(|id| {
                self.things
                    .get(id)
                    .is_some_and(|t| category.is_none_or(|c| t.is(c)))
            })
            .collect()
    }

    /// Everything an actor can perceive: the visible contents of their room
    /// (excluding themselves), then their own possessions.
    #[must_use]
    pub fn perceivable_by(&self, actor: EntityId) -> Vec<EntityId> {
        let mut seen = Vec::new();
        if let Some(room) = self.room_of(actor) {
            seen.extend(self.contents(room).into_iter().filter(|&id| {
                id != actor && self.things.get(&id).is_some_and(|t| !t.hidden)
            }));
        }
        seen.extend(self.contents(actor));
        seen
    }

    /// Goods held by merchants in the actor's room.
    #[must_use]
    pub fn stock_near(&self, actor: EntityId) -> Vec<EntityId> {
        self.merchants_near(actor)
            .into_iter()
            .flat_map(|merchant| self.contents(merchant))
            .collect()
    }

    /// Merchants in the actor's room.
    #[must_use]
    pub fn merchants_near(&self, actor: EntityId) -> Vec<EntityId> {
        let Some(room) = self.room_of(actor) else {
            return Vec::new();
        };
        self.contents(room)
            .into_iter()
            .filter(|&id| id != actor && self.things.get(&id).is_some_and(|t| t.is("merchant")))
            .collect()
    }

    /// Actors in a room.
    #[must_use]
    pub fn occupants(&self, room: EntityId) -> Vec<EntityId> {
        self.contents(room)
            .into_iter()
            .filter(|id| {
                self.things
                    .get(id)
                    .is_some_and(|t| t.kind == ThingKind::Actor)
            })
            .collect()
    }

    /// Returns whether a room has light: it is lit itself, or something in
    /// it, or carried by someone in it, gives off light.
    #[must_use]
    pub fn has_light(&self, room: EntityId) -> bool {
        let Some(thing) = self.things.get(&room) else {
            return false;
        };
        if thing.lit {
            return true;
        }
        self.contents(room).into_iter().any(|id| {
            self.things.get(&id).is_some_and(|t| t.lit)
                || self
                    .contents(id)
                    .into_iter()
                    .any(|inner| self.things.get(&inner).is_some_and(|t| t.lit))
        })
    }

    /// Returns whether an item has worn out. Unknown ids count as broken.
    #[must_use]
    pub fn is_broken(&self, id: EntityId) -> bool {
        self.things.get(&id).is_none_or(Thing::is_broken)
    }

    /// Applies one use worth of wear. Returns whether the item is now broken.
    ///
    /// # Errors
    ///
    /// Returns an error if the item does not exist.
    pub fn wear(&mut self, id: EntityId) -> Result<bool> {
        let thing = self.get_mut(id)?;
        if thing.durability.is_some() {
            thing.wear = thing.wear.saturating_add(1);
        }
        Ok(thing.is_broken())
    }
}
