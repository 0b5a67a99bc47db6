//! Command execution.
//!
//! [`CommandExecutor::execute`] runs a parsed [`Command`] through a fixed
//! sequence. Any failure stops the sequence before the next step; nothing is
//! spent or worn unless the handler succeeds.
//!
//! 1. Verify the command against the world
//! 2. Refuse light-requiring actions in the dark
//! 3. Check the power transaction
//! 4. Resolve required objects and build the handler's arguments
//! 5. Dispatch to the handler
//! 6. Commit the transaction, wear every required object, and reveal the actor
//! 7. Return the handler's response

use std::fmt;

use tracing::debug;
use wayfarer_foundation::{ActionError, Description, EntityId, ExecutionError, Result};
use wayfarer_engine::{Alert, Induction};
use wayfarer_world::{Stance, World};

use crate::command::Command;
use crate::registry::{ActionContext, Argument, Arguments, RequiredDescriptor, Slot};

// =============================================================================
// Response
// =============================================================================

/// An induction a handler wants started for the actor.
pub struct PendingInduction {
    /// The work in progress.
    pub induction: Box<dyn Induction>,
    /// Game time until completion.
    pub duration: u64,
    /// Whether it reschedules itself after each completion.
    pub repeat: bool,
}

impl fmt::Debug for PendingInduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingInduction")
            .field("induction", &self.induction.name())
            .field("duration", &self.duration)
            .field("repeat", &self.repeat)
            .finish()
    }
}

/// The result of a successful action.
#[derive(Debug)]
pub struct Response {
    /// What to tell the actor.
    pub description: Description,
    /// Deferred completion, if the action takes time.
    pub induction: Option<PendingInduction>,
    /// What to tell other entities.
    pub notifications: Vec<Alert>,
}

impl Response {
    /// A response that only describes the outcome.
    #[must_use]
    pub const fn new(description: Description) -> Self {
        Self {
            description,
            induction: None,
            notifications: Vec::new(),
        }
    }

    /// Attaches an induction that completes once.
    #[must_use]
    pub fn with_induction(mut self, induction: Box<dyn Induction>, duration: u64) -> Self {
        self.induction = Some(PendingInduction {
            induction,
            duration,
            repeat: false,
        });
        self
    }

    /// Attaches an induction that repeats until interrupted.
    #[must_use]
    pub fn repeating(mut self, induction: Box<dyn Induction>, duration: u64) -> Self {
        self.induction = Some(PendingInduction {
            induction,
            duration,
            repeat: true,
        });
        self
    }

    /// Tells another entity something.
    #[must_use]
    pub fn notify(mut self, target: EntityId, description: Description) -> Self {
        self.notifications.push(Alert::new(target, description));
        self
    }

    /// Tells several entities the same thing.
    #[must_use]
    pub fn notify_all(
        mut self,
        targets: impl IntoIterator<Item = EntityId>,
        description: &Description,
    ) -> Self {
        self.notifications.extend(
            targets
                .into_iter()
                .map(|target| Alert::new(target, description.clone())),
        );
        self
    }
}

// =============================================================================
// Transactions
// =============================================================================

/// A two-phase resource debit.
pub trait Transaction {
    /// Verifies the debit is possible without changing anything.
    ///
    /// # Errors
    ///
    /// Returns a domain failure if the resource is insufficient.
    fn check(&self, world: &World) -> std::result::Result<(), ActionError>;

    /// Commits the debit.
    ///
    /// # Errors
    ///
    /// Returns an error if the debited entity has disappeared.
    fn complete(&self, world: &mut World) -> Result<()>;
}

/// Spends an actor's power.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PowerTransaction {
    actor: EntityId,
    amount: i64,
}

impl PowerTransaction {
    /// Creates a transaction for `amount` power.
    #[must_use]
    pub const fn new(actor: EntityId, amount: i64) -> Self {
        Self { actor, amount }
    }
}

impl Transaction for PowerTransaction {
    fn check(&self, world: &World) -> std::result::Result<(), ActionError> {
        let power = world.get(self.actor).ok().and_then(|t| t.power);
        if power.is_some_and(|p| p.covers(self.amount)) {
            Ok(())
        } else {
            Err(Description::new("action.no_power")
                .with_number(self.amount)
                .into())
        }
    }

    fn complete(&self, world: &mut World) -> Result<()> {
        if let Some(power) = world.get_mut(self.actor)?.power.as_mut() {
            power.spend(self.amount);
        }
        Ok(())
    }
}

// =============================================================================
// Executor
// =============================================================================

/// Runs commands against the world.
#[derive(Clone, Copy, Debug, Default)]
pub struct CommandExecutor;

impl CommandExecutor {
    /// Creates an executor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Executes a command.
    ///
    /// # Errors
    ///
    /// Returns a domain failure for unmet preconditions or a handler's
    /// refusal, and an internal error for anything unexpected.
    pub fn execute(
        &self,
        command: &Command,
        world: &mut World,
    ) -> std::result::Result<Response, ExecutionError> {
        let action = &command.action;
        let actor = command.actor;

        command.verify(world)?;

        if action.requires_light {
            let lit = world.room_of(actor).is_some_and(|room| world.has_light(room));
            if !lit {
                return Err(ActionError::new("action.dark").into());
            }
        }

        let transaction = (action.cost > 0).then(|| PowerTransaction::new(actor, action.cost));
        if let Some(tx) = &transaction {
            tx.check(world)?;
        }

        let resolved = resolve_required(world, actor, &action.required)?;
        let args = build_arguments(command, &resolved);

        let response = {
            let mut ctx = ActionContext {
                world: &mut *world,
                actor,
            };
            action.invoke(&mut ctx, &args)?
        };

        if let Some(tx) = &transaction {
            tx.complete(world)?;
        }
        for (_, id) in &resolved {
            if world.exists(*id) && world.wear(*id)? {
                debug!(actor = %actor, item = %id, "required object broke");
            }
        }
        if action.reveals {
            let thing = world.get_mut(actor)?;
            if thing.stance == Stance::Hiding {
                thing.stance = Stance::Standing;
                thing.concealment = 0;
                debug!(actor = %actor, action = %action.name, "actor revealed");
            }
        }

        debug!(actor = %actor, action = %action.name, "command executed");
        Ok(response)
    }
}

/// Picks a distinct, unbroken possession for each required object.
fn resolve_required(
    world: &World,
    actor: EntityId,
    required: &[RequiredDescriptor],
) -> std::result::Result<Vec<(RequiredDescriptor, EntityId)>, ExecutionError> {
    let mut resolved: Vec<(RequiredDescriptor, EntityId)> = Vec::with_capacity(required.len());
    for descriptor in required {
        let unused: Vec<EntityId> = world
            .possessions(actor, Some(descriptor.category.as_str()))
            .into_iter()
            .filter(|id| !resolved.iter().any(|(_, used)| used == id))
            .collect();
        match unused.iter().find(|&&id| !world.is_broken(id)) {
            Some(&id) => resolved.push((descriptor.clone(), id)),
            None => {
                let failure = match unused.first() {
                    Some(&broken) => {
                        Description::new("action.broken").with_name(world.get(broken)?.name.clone())
                    }
                    None => Description::new("action.missing").with_name(descriptor.category.clone()),
                };
                return Err(failure.into());
            }
        }
    }
    Ok(resolved)
}

/// Lays out arguments in calling-convention order.
fn build_arguments(command: &Command, resolved: &[(RequiredDescriptor, EntityId)]) -> Arguments {
    let action = &command.action;
    let mut injected = resolved
        .iter()
        .filter(|(descriptor, _)| descriptor.injected)
        .map(|(_, id)| *id);
    let mut free = command.arguments.iter();

    let values = action
        .slots
        .iter()
        .filter_map(|slot| match slot {
            Slot::Actor => Some(Argument::Entity(command.actor)),
            Slot::Variant => action.variant.clone().map(Argument::Variant),
            Slot::Required(_) => injected.next().map(Argument::Entity),
            Slot::Free(_) => free.next().cloned().map(Argument::Value),
            Slot::Effort => Some(Argument::Effort(command.effort)),
        })
        .collect();
    Arguments::new(values)
}
