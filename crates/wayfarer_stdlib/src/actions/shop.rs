//! Trading with merchants.
//!
//! `shop` is one handler serving several verbs over a merchant's stock
//! (buy, value). Listing wares and selling take different arguments and are
//! declared separately.

use wayfarer_command::{ActionContext, ActionSpec, Arguments, Response};
use wayfarer_foundation::{ActionError, Description, EntityId, Error, ParamType};

use super::{Outcome, name_of};

pub(super) fn specs() -> Vec<ActionSpec> {
    vec![
        ActionSpec::enumerated("shop", &["shop.buy", "shop.value"])
            .actor()
            .variant()
            .param("item", ParamType::stock())
            .handler(shop),
        ActionSpec::new("list").actor().passive().handler(list),
        ActionSpec::new("sell")
            .actor()
            .carried("item", ParamType::thing())
            .handler(sell),
    ]
}

fn shop(ctx: &mut ActionContext<'_>, args: &Arguments) -> Outcome {
    let item = args.entity(2)?;
    match args.variant(1)? {
        "shop.buy" => buy(ctx, item),
        "shop.value" => {
            let thing = ctx.world.get(item)?;
            Ok(Response::new(
                Description::new("shop.price")
                    .with_name(thing.name.clone())
                    .with_number(thing.price),
            ))
        }
        other => Err(Error::internal(format!("shop has no variant `{other}`")).into()),
    }
}

fn buy(ctx: &mut ActionContext<'_>, item: EntityId) -> Outcome {
    let actor = ctx.actor;
    let Some(merchant) = ctx.world.owner_of(item) else {
        return Err(ActionError::new("shop.none").into());
    };
    let price = ctx.world.get(item)?.price;
    if ctx.world.get(actor)?.gold < price {
        return Err(Description::new("shop.poor").with_number(price).into());
    }

    ctx.world.get_mut(actor)?.gold -= price;
    ctx.world.get_mut(merchant)?.gold += price;
    ctx.world.move_to(item, actor)?;
    Ok(Response::new(
        Description::new("shop.bought")
            .with_name(name_of(ctx.world, item)?)
            .with_number(price),
    ))
}

fn list(ctx: &mut ActionContext<'_>, _: &Arguments) -> Outcome {
    let Some(&merchant) = ctx.world.merchants_near(ctx.actor).first() else {
        return Err(ActionError::new("shop.none").into());
    };
    let stock = ctx.world.contents(merchant);
    let key = if stock.is_empty() {
        "shop.empty"
    } else {
        "shop.wares"
    };
    let mut description = Description::new(key).with_name(name_of(ctx.world, merchant)?);
    for id in stock {
        description = description.with_name(name_of(ctx.world, id)?);
    }
    Ok(Response::new(description))
}

fn sell(ctx: &mut ActionContext<'_>, args: &Arguments) -> Outcome {
    let actor = ctx.actor;
    let item = args.entity(1)?;
    let Some(&merchant) = ctx.world.merchants_near(actor).first() else {
        return Err(ActionError::new("shop.none").into());
    };
    let thing = ctx.world.get(item)?;
    let item_name = thing.name.clone();
    let offer = thing.price / 2;
    if offer <= 0 {
        return Err(Description::new("shop.worthless").with_name(item_name).into());
    }

    let merchant_gold = ctx.world.get(merchant)?.gold;
    if merchant_gold < offer {
        return Err(Description::new("shop.broke")
            .with_name(name_of(ctx.world, merchant)?)
            .into());
    }
    ctx.world.get_mut(merchant)?.gold -= offer;
    ctx.world.get_mut(actor)?.gold += offer;
    ctx.world.move_to(item, merchant)?;
    Ok(Response::new(
        Description::new("shop.sold")
            .with_name(item_name)
            .with_number(offer),
    ))
}
