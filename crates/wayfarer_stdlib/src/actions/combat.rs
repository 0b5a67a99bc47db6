//! Fighting.

use rand::Rng;
use tracing::debug;
use wayfarer_command::{ActionContext, ActionSpec, Arguments, Response};
use wayfarer_foundation::{Description, Effort, ParamType};
use wayfarer_world::ThingKind;

use super::{Outcome, name_of};

pub(super) fn specs() -> Vec<ActionSpec> {
    vec![
        ActionSpec::new("attack")
            .actor()
            .injected("weapon")
            .param("target", ParamType::thing())
            .effort()
            .cost(2)
            .reveals()
            .handler(attack),
    ]
}

fn attack(ctx: &mut ActionContext<'_>, args: &Arguments) -> Outcome {
    let actor = ctx.actor;
    let target = args.entity(2)?;
    let effort = args.effort(3)?;
    let target_name = name_of(ctx.world, target)?;

    if target == actor {
        return Err(Description::new("attack.self").into());
    }
    let victim = ctx.world.get(target)?;
    if victim.kind != ThingKind::Actor || victim.health.is_none() {
        return Err(Description::new("attack.not_alive").with_name(target_name).into());
    }
    if victim.is_dead() {
        return Err(Description::new("attack.already_dead").with_name(target_name).into());
    }

    let base: i64 = ctx.world.rng().gen_range(2..=5);
    let damage = match effort {
        Effort::Slow => base - 1,
        Effort::Normal => base,
        Effort::Fast => base + 1,
    };
    let killed = {
        let victim = ctx.world.get_mut(target)?;
        if let Some(health) = victim.health.as_mut() {
            health.spend(damage);
        }
        victim.is_dead()
    };
    debug!(actor = %actor, target = %target, damage, killed, "attack landed");

    let attacker = name_of(ctx.world, actor)?;
    let (told, felt) = if killed {
        (
            Description::new("attack.kills").with_name(target_name),
            Description::new("attack.killed_by").with_name(attacker),
        )
    } else {
        (
            Description::new("attack.hits")
                .with_name(target_name)
                .with_number(damage),
            Description::new("attack.hit_by")
                .with_name(attacker)
                .with_number(damage),
        )
    };
    Ok(Response::new(told).notify(target, felt))
}
