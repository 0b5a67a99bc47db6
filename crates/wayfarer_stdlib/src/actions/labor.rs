//! Actions that take game time: waiting, digging, searching, and tending
//! wounds.

use wayfarer_command::{ActionContext, ActionSpec, Arguments, Response};
use wayfarer_engine::{Context, Entry, Induction, task};
use wayfarer_foundation::{Description, EntityId, ExecutionError, ParamType};

use super::{Outcome, current_room};

/// Longest wait, in game-seconds.
const MAX_WAIT: i64 = 600;
/// Base digging time before effort scaling.
const DIG_TIME: u64 = 30;
/// Length of one search round.
const SEARCH_ROUND: u64 = 10;
/// Delay between a search round and its discovery check.
const DISCOVERY_DELAY: u64 = 5;
/// Health restored by a bandage.
const BANDAGE_HEAL: i64 = 5;

pub(super) fn specs() -> Vec<ActionSpec> {
    vec![
        ActionSpec::new("wait")
            .actor()
            .param("duration", ParamType::Number)
            .handler(wait),
        ActionSpec::new("dig")
            .actor()
            .injected("shovel")
            .effort()
            .cost(3)
            .requires_light()
            .handler(dig),
        ActionSpec::new("bandage")
            .actor()
            .requires("bandage")
            .handler(bandage),
        ActionSpec::new("search")
            .actor()
            .requires_light()
            .handler(search),
    ]
}

// =============================================================================
// Wait
// =============================================================================

/// Does nothing for a while.
#[derive(Debug)]
pub struct WaitInduction {
    duration: i64,
}

impl Induction for WaitInduction {
    fn name(&self) -> &str {
        "wait"
    }

    fn complete(&mut self, _: EntityId, _: &mut Context<'_>) -> Result<Description, ExecutionError> {
        Ok(Description::new("wait.done").with_number(self.duration))
    }
}

fn wait(_: &mut ActionContext<'_>, args: &Arguments) -> Outcome {
    let duration = args.number(1)?;
    if !(1..=MAX_WAIT).contains(&duration) {
        return Err(Description::new("wait.range").with_number(MAX_WAIT).into());
    }
    let units = duration.unsigned_abs();
    Ok(Response::new(Description::new("wait.start"))
        .with_induction(Box::new(WaitInduction { duration }), units))
}

// =============================================================================
// Dig
// =============================================================================

/// Digs a hole; unearths the first buried thing in the room, if any.
#[derive(Debug)]
pub struct DigInduction {
    room: EntityId,
}

impl Induction for DigInduction {
    fn name(&self) -> &str {
        "dig"
    }

    fn complete(&mut self, _: EntityId, ctx: &mut Context<'_>) -> Result<Description, ExecutionError> {
        let buried = ctx.world.contents(self.room).into_iter().find(|&id| {
            ctx.world
                .get(id)
                .is_ok_and(|thing| thing.hidden && thing.is("buried"))
        });
        let Some(found) = buried else {
            return Ok(Description::new("dig.nothing"));
        };
        let thing = ctx.world.get_mut(found)?;
        thing.hidden = false;
        Ok(Description::new("dig.found").with_name(thing.name.clone()))
    }
}

fn dig(ctx: &mut ActionContext<'_>, args: &Arguments) -> Outcome {
    let effort = args.effort(2)?;
    let room = current_room(ctx)?;
    if ctx.world.get(room)?.is("rocky") {
        return Err(Description::new("dig.rock").into());
    }
    Ok(Response::new(Description::new("dig.start"))
        .with_induction(Box::new(DigInduction { room }), effort.scale(DIG_TIME)))
}

// =============================================================================
// Search
// =============================================================================

/// Searches round after round until interrupted. Each round schedules a
/// discovery check a little later; interrupting cancels checks not yet run.
#[derive(Debug, Default)]
pub struct SearchInduction {
    pending: Vec<Entry>,
}

impl Induction for SearchInduction {
    fn name(&self) -> &str {
        "search"
    }

    fn complete(&mut self, actor: EntityId, ctx: &mut Context<'_>) -> Result<Description, ExecutionError> {
        self.pending.retain(Entry::is_pending);
        let entry = ctx.schedule(
            actor,
            DISCOVERY_DELAY,
            task("search.discover", move |ctx| discover(actor, ctx)),
        );
        self.pending.push(entry);
        Ok(Description::new("search.round"))
    }

    fn interrupt(&mut self, actor: EntityId, ctx: &mut Context<'_>) {
        for entry in self.pending.drain(..) {
            entry.cancel();
        }
        ctx.alert(actor, Description::new("search.stopped"));
    }
}

/// Reveals the first hidden, unburied thing in the actor's room.
fn discover(actor: EntityId, ctx: &mut Context<'_>) -> Result<(), ExecutionError> {
    let Some(room) = ctx.world.room_of(actor) else {
        return Ok(());
    };
    let hidden = ctx.world.contents(room).into_iter().find(|&id| {
        ctx.world
            .get(id)
            .is_ok_and(|thing| thing.hidden && !thing.is("buried"))
    });
    if let Some(found) = hidden {
        let thing = ctx.world.get_mut(found)?;
        thing.hidden = false;
        let name = thing.name.clone();
        ctx.alert(actor, Description::new("search.found").with_name(name));
    }
    Ok(())
}

fn search(_: &mut ActionContext<'_>, _: &Arguments) -> Outcome {
    Ok(Response::new(Description::new("search.start"))
        .repeating(Box::new(SearchInduction::default()), SEARCH_ROUND))
}

// =============================================================================
// Bandage
// =============================================================================

fn bandage(ctx: &mut ActionContext<'_>, _: &Arguments) -> Outcome {
    let thing = ctx.world.get_mut(ctx.actor)?;
    let Some(health) = thing.health.as_mut() else {
        return Err(Description::new("bandage.unhurt").into());
    };
    if health.current >= health.max {
        return Err(Description::new("bandage.unhurt").into());
    }
    health.restore(BANDAGE_HEAL);
    Ok(Response::new(Description::new("bandage.done")))
}
