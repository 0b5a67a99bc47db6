//! A small starter world.

use wayfarer_foundation::{EntityId, NameStore, Result};
use wayfarer_world::{Thing, World};

use crate::names::standard_names;

/// A populated world with its vocabulary.
#[derive(Debug)]
pub struct Demo {
    /// The world.
    pub world: World,
    /// Standard vocabulary plus every thing's name.
    pub names: NameStore,
    /// Where new players appear.
    pub start: EntityId,
}

struct Builder {
    world: World,
    names: NameStore,
}

impl Builder {
    fn add(&mut self, thing: Thing, forms: &[&str]) -> Result<EntityId> {
        self.names.insert(&thing.name, forms);
        self.world.spawn(thing)
    }

    fn link(&mut self, from: EntityId, direction: &str, to: EntityId, back: &str) -> Result<()> {
        self.world
            .get_mut(from)?
            .exits
            .push((direction.to_string(), to));
        self.world.get_mut(to)?.exits.push((back.to_string(), from));
        Ok(())
    }
}

/// Builds the starter world.
///
/// # Errors
///
/// Returns an error only if the world rejects a placement, which indicates a
/// bug in this builder.
pub fn build(seed: u64) -> Result<Demo> {
    let mut b = Builder {
        world: World::new(seed),
        names: standard_names(),
    };

    let square = b.add(Thing::room("room.square").lit(), &["village square", "square"])?;
    let garden = b.add(Thing::room("room.garden").lit(), &["walled garden", "garden"])?;
    let cellar = b.add(
        Thing::room("room.cellar").with_category("rocky"),
        &["damp cellar", "cellar"],
    )?;
    let road = b.add(Thing::room("room.road").lit(), &["north road", "road"])?;
    b.link(square, "dir.north", road, "dir.south")?;
    b.link(square, "dir.east", garden, "dir.west")?;
    b.link(square, "dir.down", cellar, "dir.up")?;

    let smith = b.add(
        Thing::actor("npc.smith")
            .with_category("merchant")
            .with_gold(100)
            .at(square),
        &["smith", "blacksmith"],
    )?;
    b.add(
        Thing::item("item.shovel")
            .with_category("shovel")
            .with_durability(5)
            .with_price(6)
            .at(smith),
        &["shovel", "spade"],
    )?;
    b.add(
        Thing::item("item.lantern").lit().with_price(8).at(smith),
        &["brass lantern", "lantern", "lamp"],
    )?;
    b.add(
        Thing::item("item.bandage")
            .with_category("bandage")
            .with_durability(1)
            .with_price(2)
            .at(smith),
        &["bandage"],
    )?;
    b.add(
        Thing::item("item.dagger")
            .with_category("weapon")
            .with_durability(20)
            .with_price(5)
            .at(smith),
        &["dagger", "knife"],
    )?;
    b.add(Thing::item("item.fountain").fixed().at(square), &["stone fountain", "fountain"])?;
    b.add(
        Thing::item("item.sword")
            .with_category("weapon")
            .with_durability(40)
            .with_price(20)
            .at(road),
        &["iron sword", "sword"],
    )?;
    b.add(
        Thing::item("item.chest")
            .with_category("buried")
            .hidden()
            .fixed()
            .with_price(30)
            .at(garden),
        &["old chest", "chest"],
    )?;
    b.add(
        Thing::item("item.ring").hidden().with_price(25).at(garden),
        &["silver ring", "ring"],
    )?;
    b.add(Thing::actor("npc.rat").with_health(6, 6).at(cellar), &["giant rat", "rat"])?;

    Ok(Demo {
        world: b.world,
        names: b.names,
        start: square,
    })
}
