//! Standard actions.
//!
//! Each submodule declares its actions as [`ActionSpec`]s and implements the
//! handlers. [`register_standard`] installs all of them.

mod combat;
mod items;
mod labor;
mod movement;
mod shop;

use tracing::info;
use wayfarer_command::{ActionContext, ActionRegistry, ActionSpec, Response};
use wayfarer_foundation::{ActionError, EntityId, ExecutionError, Result};
use wayfarer_world::World;

pub use labor::{DigInduction, SearchInduction, WaitInduction};

/// What a handler returns.
pub(crate) type Outcome = std::result::Result<Response, ExecutionError>;

/// Every standard action declaration.
#[must_use]
pub fn standard_actions() -> Vec<ActionSpec> {
    let mut specs = Vec::new();
    specs.extend(items::specs());
    specs.extend(movement::specs());
    specs.extend(labor::specs());
    specs.extend(combat::specs());
    specs.extend(shop::specs());
    specs
}

/// Registers every standard action. Returns the number of descriptors added.
///
/// # Errors
///
/// Returns an error if any declaration is invalid or clashes with an action
/// already registered.
pub fn register_standard(registry: &mut ActionRegistry) -> Result<usize> {
    let mut count = 0;
    for spec in standard_actions() {
        count += registry.register(spec)?.len();
    }
    info!(actions = count, "standard actions registered");
    Ok(count)
}

// =============================================================================
// Shared helpers
// =============================================================================

/// The room the acting entity is in.
pub(crate) fn current_room(ctx: &ActionContext<'_>) -> std::result::Result<EntityId, ExecutionError> {
    ctx.world
        .room_of(ctx.actor)
        .ok_or_else(|| ActionError::new("action.nowhere").into())
}

/// Actors in a room other than `actor`.
pub(crate) fn onlookers(world: &World, room: EntityId, actor: EntityId) -> Vec<EntityId> {
    world
        .occupants(room)
        .into_iter()
        .filter(|&id| id != actor)
        .collect()
}

/// A thing's name key.
pub(crate) fn name_of(world: &World, id: EntityId) -> std::result::Result<String, ExecutionError> {
    Ok(world.get(id)?.name.clone())
}
