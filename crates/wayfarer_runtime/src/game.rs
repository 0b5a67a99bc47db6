//! The game: parse, execute, and schedule for every command line.
//!
//! A [`Game`] owns everything the world worker mutates. Only one thread ever
//! touches it, so no entity-level locking exists anywhere.

use std::fmt::Write as _;

use tracing::{debug, error, info};
use wayfarer_command::{
    CommandExecutor, CommandParser, ParseContext, ParserResult, Response,
};
use wayfarer_engine::{Advance, Realm};
use wayfarer_foundation::{Description, EntityId, ExecutionError, NameStore, Result};
use wayfarer_stdlib::{demo, standard_parser};
use wayfarer_world::{Thing, World};

/// Power a new player starts with.
const PLAYER_POWER: i64 = 30;
/// Gold a new player starts with.
const PLAYER_GOLD: i64 = 20;

/// World state, vocabulary, and the command pipeline.
#[derive(Debug)]
pub struct Game {
    realm: Realm,
    names: NameStore,
    parser: CommandParser,
    executor: CommandExecutor,
    start: EntityId,
    joined: u64,
}

impl Game {
    /// Creates a game over an existing world.
    #[must_use]
    pub fn new(world: World, names: NameStore, parser: CommandParser, start: EntityId) -> Self {
        Self {
            realm: Realm::new(world),
            names,
            parser,
            executor: CommandExecutor::new(),
            start,
            joined: 0,
        }
    }

    /// Creates the starter world with the standard actions.
    ///
    /// # Errors
    ///
    /// Returns an error if the standard actions fail to register.
    pub fn demo(seed: u64) -> Result<Self> {
        let demo = demo::build(seed)?;
        let parser = standard_parser()?;
        info!(seed, things = demo.world.len(), actions = parser.registry().len(), "game ready");
        Ok(Self::new(demo.world, demo.names, parser, demo.start))
    }

    /// The realm.
    #[must_use]
    pub const fn realm(&self) -> &Realm {
        &self.realm
    }

    /// The realm, mutably.
    pub fn realm_mut(&mut self) -> &mut Realm {
        &mut self.realm
    }

    /// The vocabulary.
    #[must_use]
    pub const fn names(&self) -> &NameStore {
        &self.names
    }

    /// Where new players appear.
    #[must_use]
    pub const fn start(&self) -> EntityId {
        self.start
    }

    /// Every surface form of every registered verb.
    #[must_use]
    pub fn vocabulary(&self) -> Vec<String> {
        let mut verbs: Vec<String> = self
            .parser
            .registry()
            .iter()
            .flat_map(|action| self.names.forms(&action.verb).iter().cloned())
            .collect();
        verbs.sort();
        verbs.dedup();
        verbs
    }

    /// Spawns a player at the start location.
    ///
    /// # Errors
    ///
    /// Returns an error if the start location no longer exists.
    pub fn spawn_player(&mut self, name: &str) -> Result<EntityId> {
        self.joined += 1;
        let key = format!("pc.{}", self.joined);
        let shown = proper_name(name);
        self.names.insert_proper(&key, &[&shown]);

        let actor = self.realm.world_mut().spawn(
            Thing::actor(&key)
                .with_power(PLAYER_POWER)
                .with_gold(PLAYER_GOLD)
                .at(self.start),
        )?;
        info!(actor = %actor, name = %shown, "player joined");
        Ok(actor)
    }

    /// Removes a player; their belongings stay where they stood.
    ///
    /// # Errors
    ///
    /// Returns an error if the player no longer exists.
    pub fn remove_player(&mut self, actor: EntityId) -> Result<()> {
        let dropped = self.realm.destroy_entity(actor)?;
        info!(actor = %actor, dropped = dropped.len(), "player left");
        Ok(())
    }

    /// Handles one command line from `actor`.
    ///
    /// Every outcome, success or failure, becomes an alert for the actor;
    /// nothing is returned.
    pub fn handle(&mut self, actor: EntityId, line: &str) {
        let parsed = {
            let ctx = ParseContext {
                actor,
                world: self.realm.world(),
                names: &self.names,
            };
            self.parser.parse(line, &ctx)
        };
        let command = match parsed {
            Ok(ParserResult::Success(command)) => command,
            Ok(ParserResult::Failure(failure)) => {
                debug!(actor = %actor, reason = %failure.reason, detail = %failure.detail, "parse failed");
                self.realm.alert(actor, failure.detail);
                return;
            }
            Err(err) => {
                error!(actor = %actor, error = %err, "parser misconfigured");
                self.realm.alert(actor, Description::new("error.internal"));
                return;
            }
        };

        if !command.action.passive && self.realm.is_inducting(actor) {
            if let Err(err) = self.realm.interrupt(actor) {
                error!(actor = %actor, error = %err, "interrupt failed");
            }
        }

        match self.executor.execute(&command, self.realm.world_mut()) {
            Ok(response) => self.deliver(actor, &command.action.name, response),
            Err(ExecutionError::Action(err)) => {
                debug!(actor = %actor, action = %command.action.name, reason = %err.description, "action failed");
                self.realm.alert(actor, err.description);
            }
            Err(ExecutionError::Internal(err)) => {
                error!(actor = %actor, action = %command.action.name, error = %err, "action failed");
                self.realm.alert(actor, Description::new("error.internal"));
            }
        }
    }

    fn deliver(&mut self, actor: EntityId, action: &str, response: Response) {
        debug!(actor = %actor, action, outcome = %response.description, "action succeeded");
        self.realm.alert(actor, response.description);
        for alert in response.notifications {
            self.realm.alert(alert.target, alert.description);
        }
        if let Some(pending) = response.induction {
            if let Err(err) = self.realm.start_induction(
                actor,
                pending.induction,
                pending.duration,
                pending.repeat,
            ) {
                error!(actor = %actor, action, error = %err, "induction rejected");
                self.realm.alert(actor, Description::new("error.internal"));
            }
        }
    }

    /// Renders a description through the vocabulary.
    #[must_use]
    pub fn render(&self, description: &Description) -> String {
        self.names.render(description)
    }

    /// Takes every pending alert, rendered, in the order raised.
    pub fn drain_output(&mut self) -> Vec<(EntityId, String)> {
        self.realm
            .drain_alerts()
            .into_iter()
            .map(|alert| (alert.target, self.names.render(&alert.description)))
            .collect()
    }

    /// A plain-text summary of the world.
    #[must_use]
    pub fn summary(&self) -> String {
        let world = self.realm.world();
        let mut out = String::new();
        let _ = writeln!(out, "Time: {}", self.realm.now());
        let _ = writeln!(out, "Things: {}", world.len());
        for (id, thing) in world.iter() {
            let place = thing
                .location
                .map_or_else(|| "-".to_string(), |loc| self.display_of(loc));
            let _ = writeln!(
                out,
                "  {id} {} ({:?}) in {place}",
                self.names.display(&thing.name),
                thing.kind
            );
        }
        out
    }

    fn display_of(&self, id: EntityId) -> String {
        self.realm
            .world()
            .get(id)
            .map_or_else(|_| id.to_string(), |thing| self.names.display(&thing.name).to_string())
    }
}

/// Capitalizes the first letter of a player's name and lowercases the rest.
fn proper_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let mut chars = lowered.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Stranger".to_string(),
    }
}

impl Advance for Game {
    fn advance(&mut self, increment: u64) -> usize {
        self.realm.tick(increment)
    }
}
