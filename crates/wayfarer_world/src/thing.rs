//! Things: rooms, actors, and items.

use wayfarer_foundation::EntityId;

/// Broad kind of a thing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThingKind {
    /// A location other things can be in.
    Room,
    /// Something that acts: a player or a creature.
    Actor,
    /// An object that can be carried or lie somewhere.
    Item,
}

/// How an actor is positioned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Stance {
    /// Upright and in plain view.
    #[default]
    Standing,
    /// Hiding; grants a concealment bonus until revealed.
    Hiding,
}

/// A bounded quantity such as power or health.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Meter {
    /// Current value.
    pub current: i64,
    /// Upper bound.
    pub max: i64,
}

impl Meter {
    /// Creates a full meter.
    #[must_use]
    pub const fn full(max: i64) -> Self {
        Self { current: max, max }
    }

    /// Returns whether `amount` can be taken.
    #[must_use]
    pub const fn covers(&self, amount: i64) -> bool {
        self.current >= amount
    }

    /// Takes `amount`, saturating at zero.
    pub fn spend(&mut self, amount: i64) {
        self.current = (self.current - amount).max(0);
    }

    /// Restores `amount`, saturating at the maximum.
    pub fn restore(&mut self, amount: i64) {
        self.current = (self.current + amount).min(self.max);
    }
}

/// Everything the world knows about one entity.
#[derive(Clone, Debug)]
pub struct Thing {
    /// Canonical name key, looked up in the name store.
    pub name: String,
    /// Broad kind.
    pub kind: ThingKind,
    /// Category tags used to filter possessions ("weapon", "shovel").
    pub categories: Vec<String>,
    /// The room, container, or actor this thing is in.
    pub location: Option<EntityId>,
    /// A room that is lit, or an item that gives off light.
    pub lit: bool,
    /// Not perceivable until discovered.
    pub hidden: bool,
    /// Can be picked up.
    pub portable: bool,
    /// Power available for actions (actors).
    pub power: Option<Meter>,
    /// Health (actors).
    pub health: Option<Meter>,
    /// Uses before the item breaks, if it wears at all.
    pub durability: Option<u32>,
    /// Uses so far.
    pub wear: u32,
    /// Stance (actors).
    pub stance: Stance,
    /// Concealment bonus granted by the current stance.
    pub concealment: i32,
    /// Coins carried (actors).
    pub gold: i64,
    /// Trade value (items).
    pub price: i64,
    /// Exits from a room, keyed by direction key.
    pub exits: Vec<(String, EntityId)>,
}

impl Thing {
    fn new(name: &str, kind: ThingKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            categories: Vec::new(),
            location: None,
            lit: false,
            hidden: false,
            portable: false,
            power: None,
            health: None,
            durability: None,
            wear: 0,
            stance: Stance::Standing,
            concealment: 0,
            gold: 0,
            price: 0,
            exits: Vec::new(),
        }
    }

    /// A room.
    #[must_use]
    pub fn room(name: &str) -> Self {
        Self::new(name, ThingKind::Room)
    }

    /// An actor with full health.
    #[must_use]
    pub fn actor(name: &str) -> Self {
        Self {
            health: Some(Meter::full(20)),
            ..Self::new(name, ThingKind::Actor)
        }
    }

    /// A portable item.
    #[must_use]
    pub fn item(name: &str) -> Self {
        Self {
            portable: true,
            ..Self::new(name, ThingKind::Item)
        }
    }

    /// Places the thing.
    #[must_use]
    pub const fn at(mut self, location: EntityId) -> Self {
        self.location = Some(location);
        self
    }

    /// Adds a category tag.
    #[must_use]
    pub fn with_category(mut self, category: &str) -> Self {
        self.categories.push(category.to_string());
        self
    }

    /// Makes the room lit or the item a light source.
    #[must_use]
    pub const fn lit(mut self) -> Self {
        self.lit = true;
        self
    }

    /// Hides the thing until discovered.
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Fixes the thing in place.
    #[must_use]
    pub const fn fixed(mut self) -> Self {
        self.portable = false;
        self
    }

    /// Gives the actor a power meter.
    #[must_use]
    pub const fn with_power(mut self, max: i64) -> Self {
        self.power = Some(Meter::full(max));
        self
    }

    /// Gives the actor a health meter.
    #[must_use]
    pub const fn with_health(mut self, current: i64, max: i64) -> Self {
        self.health = Some(Meter { current, max });
        self
    }

    /// Makes the item wear out after `uses`.
    #[must_use]
    pub const fn with_durability(mut self, uses: u32) -> Self {
        self.durability = Some(uses);
        self
    }

    /// Sets carried coins.
    #[must_use]
    pub const fn with_gold(mut self, gold: i64) -> Self {
        self.gold = gold;
        self
    }

    /// Sets trade value.
    #[must_use]
    pub const fn with_price(mut self, price: i64) -> Self {
        self.price = price;
        self
    }

    /// Adds an exit.
    #[must_use]
    pub fn with_exit(mut self, direction: &str, destination: EntityId) -> Self {
        self.exits.push((direction.to_string(), destination));
        self
    }

    /// Returns whether the thing has a category tag.
    #[must_use]
    pub fn is(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Returns whether the item has worn out.
    #[must_use]
    pub fn is_broken(&self) -> bool {
        self.durability.is_some_and(|d| self.wear >= d)
    }

    /// Returns whether the actor is dead.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health.is_some_and(|h| h.current <= 0)
    }

    /// Looks up an exit by direction key.
    #[must_use]
    pub fn exit(&self, direction: &str) -> Option<EntityId> {
        self.exits
            .iter()
            .find(|(d, _)| d == direction)
            .map(|(_, to)| *to)
    }
}
