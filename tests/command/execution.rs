//! Execution integration tests
//!
//! Runs standard actions through the parser and executor and checks the
//! transaction rules: costs, wear, light, and reveal.

use wayfarer_command::{
    ActionRegistry, ArgumentParserGroup, CommandExecutor, CommandParser, ParseContext, Response,
};
use wayfarer_foundation::{EntityId, ExecutionError, NameStore};
use wayfarer_stdlib::actions::register_standard;
use wayfarer_stdlib::names::standard_names;
use wayfarer_world::{Stance, Thing, World};

struct Bench {
    world: World,
    names: NameStore,
    parser: CommandParser,
    field: EntityId,
    hero: EntityId,
}

impl Bench {
    fn new(power: i64) -> Self {
        let mut names = standard_names();
        names.insert("room.field", &["field"]);
        names.insert("item.shovel", &["shovel"]);
        names.insert("item.bandage", &["bandage"]);
        names.insert("pc.hero", &["hero"]);

        let mut world = World::new(21);
        let field = world.spawn(Thing::room("room.field").lit()).unwrap();
        let hero = world
            .spawn(Thing::actor("pc.hero").with_power(power).at(field))
            .unwrap();

        let mut registry = ActionRegistry::new();
        register_standard(&mut registry).unwrap();
        let parser = CommandParser::new(registry, ArgumentParserGroup::standard()).unwrap();
        Self {
            world,
            names,
            parser,
            field,
            hero,
        }
    }

    fn run(&mut self, line: &str) -> Result<Response, ExecutionError> {
        let ctx = ParseContext {
            actor: self.hero,
            world: &self.world,
            names: &self.names,
        };
        let command = self
            .parser
            .parse(line, &ctx)
            .unwrap()
            .command()
            .unwrap_or_else(|| panic!("`{line}` did not parse"));
        CommandExecutor::new().execute(&command, &mut self.world)
    }

    fn power(&self) -> i64 {
        self.world.get(self.hero).unwrap().power.unwrap().current
    }

    fn wear(&self, id: EntityId) -> u32 {
        self.world.get(id).unwrap().wear
    }
}

fn failure_key(result: Result<Response, ExecutionError>) -> String {
    match result {
        Err(ExecutionError::Action(err)) => err.description.key,
        Err(ExecutionError::Internal(err)) => panic!("internal error: {err}"),
        Ok(response) => panic!("unexpected success: {}", response.description),
    }
}

// =============================================================================
// Power
// =============================================================================

#[test]
fn too_little_power_changes_nothing() {
    let mut bench = Bench::new(2);
    let shovel = bench
        .world
        .spawn(Thing::item("item.shovel").with_category("shovel").with_durability(5).at(bench.hero))
        .unwrap();
    assert_eq!(failure_key(bench.run("dig")), "action.no_power");
    assert_eq!(bench.power(), 2);
    assert_eq!(bench.wear(shovel), 0);
}

#[test]
fn success_spends_the_cost_once() {
    let mut bench = Bench::new(10);
    bench
        .world
        .spawn(Thing::item("item.shovel").with_category("shovel").at(bench.hero))
        .unwrap();
    let response = bench.run("dig quickly").unwrap();
    assert_eq!(response.description.key, "dig.start");
    let pending = response.induction.expect("dig runs over time");
    assert_eq!(pending.duration, 15);
    assert_eq!(bench.power(), 7);
}

// =============================================================================
// Wear
// =============================================================================

#[test]
fn injected_tool_wears_once_per_use() {
    let mut bench = Bench::new(100);
    let shovel = bench
        .world
        .spawn(Thing::item("item.shovel").with_category("shovel").with_durability(2).at(bench.hero))
        .unwrap();

    bench.run("dig").unwrap();
    assert_eq!(bench.wear(shovel), 1);
    bench.run("dig").unwrap();
    assert_eq!(bench.wear(shovel), 2);
    assert_eq!(failure_key(bench.run("dig")), "action.broken");
    assert_eq!(bench.wear(shovel), 2);
}

#[test]
fn non_injected_requirement_wears_and_breaks() {
    let mut bench = Bench::new(100);
    let bandage = bench
        .world
        .spawn(Thing::item("item.bandage").with_category("bandage").with_durability(1).at(bench.hero))
        .unwrap();
    bench.world.get_mut(bench.hero).unwrap().health.as_mut().unwrap().spend(8);

    assert_eq!(bench.run("bandage").unwrap().description.key, "bandage.done");
    assert_eq!(bench.wear(bandage), 1);
    assert!(bench.world.is_broken(bandage));
    assert_eq!(failure_key(bench.run("bandage")), "action.broken");
}

#[test]
fn missing_tool_is_reported() {
    let mut bench = Bench::new(100);
    assert_eq!(failure_key(bench.run("dig")), "action.missing");
}

// =============================================================================
// Light and Stealth
// =============================================================================

#[test]
fn darkness_blocks_before_any_cost() {
    let mut bench = Bench::new(100);
    bench.world.get_mut(bench.field).unwrap().lit = false;
    bench
        .world
        .spawn(Thing::item("item.shovel").with_category("shovel").at(bench.hero))
        .unwrap();
    assert_eq!(failure_key(bench.run("dig")), "action.dark");
    assert_eq!(bench.power(), 100);
}

#[test]
fn speaking_reveals_a_hidden_actor() {
    let mut bench = Bench::new(100);
    bench.run("hide").unwrap();
    assert_eq!(bench.world.get(bench.hero).unwrap().stance, Stance::Hiding);
    bench.run("say boo").unwrap();
    let hero = bench.world.get(bench.hero).unwrap();
    assert_eq!(hero.stance, Stance::Standing);
    assert_eq!(hero.concealment, 0);
}
