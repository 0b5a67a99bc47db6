//! Looking around and moving things between hands and rooms.

use wayfarer_command::{ActionContext, ActionSpec, Arguments, Response};
use wayfarer_foundation::{Description, ParamType};
use wayfarer_world::ThingKind;

use super::{Outcome, current_room, name_of, onlookers};

pub(super) fn specs() -> Vec<ActionSpec> {
    vec![
        ActionSpec::new("look").actor().passive().handler(look),
        ActionSpec::new("inventory").actor().passive().handler(inventory),
        ActionSpec::new("take")
            .actor()
            .param("item", ParamType::thing())
            .handler(take),
        ActionSpec::new("drop")
            .actor()
            .carried("item", ParamType::thing())
            .handler(drop),
        ActionSpec::new("give")
            .actor()
            .carried("item", ParamType::thing())
            .param("to", ParamType::literal("word.to"))
            .param("recipient", ParamType::thing())
            .handler(give),
    ]
}

fn look(ctx: &mut ActionContext<'_>, _: &Arguments) -> Outcome {
    let room = current_room(ctx)?;
    if !ctx.world.has_light(room) {
        return Ok(Response::new(Description::new("look.dark")));
    }
    let visible: Vec<_> = ctx
        .world
        .perceivable_by(ctx.actor)
        .into_iter()
        .filter(|&id| ctx.world.location_of(id) == Some(room))
        .collect();

    let key = if visible.is_empty() {
        "look.room_empty"
    } else {
        "look.room"
    };
    let mut description = Description::new(key).with_name(name_of(ctx.world, room)?);
    for id in visible {
        description = description.with_name(name_of(ctx.world, id)?);
    }
    Ok(Response::new(description))
}

fn inventory(ctx: &mut ActionContext<'_>, _: &Arguments) -> Outcome {
    let held = ctx.world.possessions(ctx.actor, None);
    if held.is_empty() {
        return Ok(Response::new(Description::new("inventory.empty")));
    }
    let mut description = Description::new("inventory.list");
    for id in held {
        description = description.with_name(name_of(ctx.world, id)?);
    }
    Ok(Response::new(description))
}

fn take(ctx: &mut ActionContext<'_>, args: &Arguments) -> Outcome {
    let actor = ctx.actor;
    let item = args.entity(1)?;
    let thing = ctx.world.get(item)?;
    let item_name = thing.name.clone();
    if ctx.world.owner_of(item) == Some(actor) {
        return Err(Description::new("take.already").with_name(item_name).into());
    }
    if !thing.portable || thing.kind != ThingKind::Item {
        return Err(Description::new("take.fixed").with_name(item_name).into());
    }

    let room = current_room(ctx)?;
    ctx.world.move_to(item, actor)?;
    let seen = Description::new("take.seen")
        .with_name(name_of(ctx.world, actor)?)
        .with_name(item_name.clone());
    Ok(Response::new(Description::new("take.done").with_name(item_name))
        .notify_all(onlookers(ctx.world, room, actor), &seen))
}

fn drop(ctx: &mut ActionContext<'_>, args: &Arguments) -> Outcome {
    let actor = ctx.actor;
    let item = args.entity(1)?;
    let room = current_room(ctx)?;
    ctx.world.move_to(item, room)?;
    let item_name = name_of(ctx.world, item)?;
    let seen = Description::new("drop.seen")
        .with_name(name_of(ctx.world, actor)?)
        .with_name(item_name.clone());
    Ok(Response::new(Description::new("drop.done").with_name(item_name))
        .notify_all(onlookers(ctx.world, room, actor), &seen))
}

fn give(ctx: &mut ActionContext<'_>, args: &Arguments) -> Outcome {
    let actor = ctx.actor;
    let item = args.entity(1)?;
    let recipient = args.entity(3)?;
    let recipient_name = name_of(ctx.world, recipient)?;
    if recipient == actor {
        return Err(Description::new("give.self").into());
    }
    if ctx.world.get(recipient)?.kind != ThingKind::Actor {
        return Err(Description::new("give.refused").with_name(recipient_name).into());
    }

    ctx.world.move_to(item, recipient)?;
    let item_name = name_of(ctx.world, item)?;
    Ok(
        Response::new(
            Description::new("give.done")
                .with_name(item_name.clone())
                .with_name(recipient_name),
        )
        .notify(
            recipient,
            Description::new("give.received")
                .with_name(name_of(ctx.world, actor)?)
                .with_name(item_name),
        ),
    )
}
