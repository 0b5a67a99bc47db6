//! Moving between rooms, hiding, and talking.

use wayfarer_command::{ActionContext, ActionSpec, Arguments, Response};
use wayfarer_foundation::{Description, ParamType};
use wayfarer_world::Stance;

use super::{Outcome, current_room, name_of, onlookers};

/// Concealment granted by hiding.
const HIDING_CONCEALMENT: i32 = 5;

pub(super) fn specs() -> Vec<ActionSpec> {
    vec![
        ActionSpec::new("go")
            .actor()
            .param("direction", ParamType::token("direction"))
            .cost(1)
            .handler(go),
        ActionSpec::new("hide").actor().requires_light().handler(hide),
        ActionSpec::new("say")
            .actor()
            .param("message", ParamType::Text { greedy: true })
            .reveals()
            .handler(say),
    ]
}

fn go(ctx: &mut ActionContext<'_>, args: &Arguments) -> Outcome {
    let actor = ctx.actor;
    let direction = args.token(1)?.to_string();
    let from = current_room(ctx)?;
    let Some(to) = ctx.world.get(from)?.exit(&direction) else {
        return Err(Description::new("go.no_exit").with_name(direction).into());
    };

    let who = name_of(ctx.world, actor)?;
    let left_behind = onlookers(ctx.world, from, actor);
    ctx.world.move_to(actor, to)?;
    let greeted = onlookers(ctx.world, to, actor);

    let mut description = Description::new("look.room_empty").with_name(name_of(ctx.world, to)?);
    if ctx.world.has_light(to) {
        let visible: Vec<_> = ctx
            .world
            .perceivable_by(actor)
            .into_iter()
            .filter(|&id| ctx.world.location_of(id) == Some(to))
            .collect();
        if !visible.is_empty() {
            description.key = "look.room".to_string();
            for id in visible {
                description = description.with_name(name_of(ctx.world, id)?);
            }
        }
    } else {
        description = Description::new("look.dark");
    }

    Ok(Response::new(description)
        .notify_all(
            left_behind,
            &Description::new("go.departs")
                .with_name(who.clone())
                .with_name(direction),
        )
        .notify_all(greeted, &Description::new("go.arrives").with_name(who)))
}

fn hide(ctx: &mut ActionContext<'_>, _: &Arguments) -> Outcome {
    let thing = ctx.world.get_mut(ctx.actor)?;
    if thing.stance == Stance::Hiding {
        return Err(Description::new("hide.already").into());
    }
    thing.stance = Stance::Hiding;
    thing.concealment = HIDING_CONCEALMENT;
    Ok(Response::new(Description::new("hide.done")))
}

fn say(ctx: &mut ActionContext<'_>, args: &Arguments) -> Outcome {
    let message = args.text(1)?.to_string();
    let room = current_room(ctx)?;
    let heard = Description::new("say.heard")
        .with_name(name_of(ctx.world, ctx.actor)?)
        .with_text(message.clone());
    Ok(Response::new(Description::new("say.done").with_text(message))
        .notify_all(onlookers(ctx.world, room, ctx.actor), &heard))
}
