//! Resolved commands.

use std::sync::Arc;

use wayfarer_foundation::{
    ActionError, Description, Effort, EntityId, Error, ErrorKind, ExecutionError, ParamType, Value,
};
use wayfarer_world::World;

use crate::registry::ActionDescriptor;

/// A parsed invocation: who does what, with which arguments.
#[derive(Clone, Debug)]
pub struct Command {
    /// Who issued the command.
    pub actor: EntityId,
    /// The action to run.
    pub action: Arc<ActionDescriptor>,
    /// Free-parameter values, one per declared parameter.
    pub arguments: Vec<Value>,
    /// Effort modifier.
    pub effort: Effort,
}

impl Command {
    /// Creates a command.
    #[must_use]
    pub const fn new(
        actor: EntityId,
        action: Arc<ActionDescriptor>,
        arguments: Vec<Value>,
        effort: Effort,
    ) -> Self {
        Self {
            actor,
            action,
            arguments,
            effort,
        }
    }

    fn malformed(&self, message: String) -> ExecutionError {
        Error::new(ErrorKind::MalformedCommand {
            action: self.action.name.clone(),
            message,
        })
        .into()
    }

    /// Checks the command against its action and the current world.
    ///
    /// Shape problems (argument count, value class) are internal errors.
    /// World problems (a thing that is gone, the wrong kind, or not carried
    /// when it must be) are domain failures.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn verify(&self, world: &World) -> Result<(), ExecutionError> {
        let parameters = &self.action.parameters;
        if self.arguments.len() != parameters.len() {
            return Err(self.malformed(format!(
                "{} arguments for {} parameters",
                self.arguments.len(),
                parameters.len()
            )));
        }

        for (index, (parameter, value)) in parameters.iter().zip(&self.arguments).enumerate() {
            if !parameter.ty.accepts(value) {
                return Err(self.malformed(format!(
                    "argument {index} is {}, declared {}",
                    value.class(),
                    parameter.ty
                )));
            }
            let Value::Entity(id) = value else {
                continue;
            };
            let Ok(thing) = world.get(*id) else {
                return Err(ActionError::new("command.gone").into());
            };
            let wrong_kind = match &parameter.ty {
                ParamType::Thing {
                    category: Some(category),
                    ..
                } => !thing.is(category),
                _ => false,
            };
            if wrong_kind {
                return Err(Description::new("command.wrong_kind")
                    .with_name(thing.name.clone())
                    .into());
            }
            if parameter.carried && world.owner_of(*id) != Some(self.actor) {
                return Err(Description::new("command.not_carried")
                    .with_name(thing.name.clone())
                    .into());
            }
        }
        Ok(())
    }
}
