//! Action registry.
//!
//! Every action is declared with an [`ActionSpec`]: its calling convention
//! (the ordered slots its handler receives), required objects, cost, flags,
//! and a typed handler closure. Registration validates the convention once
//! and produces immutable [`ActionDescriptor`]s; an enumerated action yields
//! one descriptor per variant, all sharing the same handler.
//!
//! The slot order is fixed:
//!
//! ```text
//! [actor?] [variant?] [injected required objects...] [free parameters...] [effort?]
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;
use wayfarer_foundation::{
    Effort, EntityId, Error, ErrorKind, ExecutionError, ParamType, Result, Value,
};
use wayfarer_world::World;

use crate::executor::Response;

// =============================================================================
// Slots
// =============================================================================

/// A declared free parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
    /// Name used in diagnostics.
    pub name: String,
    /// Declared type.
    pub ty: ParamType,
    /// The bound thing must be held by the actor.
    pub carried: bool,
}

/// An object the actor must possess for the action to run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequiredDescriptor {
    /// Category tag used to filter the actor's possessions.
    pub category: String,
    /// Whether the resolved object is passed to the handler.
    pub injected: bool,
}

/// One position in a handler's calling convention.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Slot {
    /// The acting entity.
    Actor,
    /// The variant of an enumerated action.
    Variant,
    /// An injected required object.
    Required(RequiredDescriptor),
    /// A free parameter bound from the command line.
    Free(Parameter),
    /// The effort modifier.
    Effort,
}

impl Slot {
    const fn phase(&self) -> u8 {
        match self {
            Self::Actor => 0,
            Self::Variant => 1,
            Self::Required(_) => 2,
            Self::Free(_) => 3,
            Self::Effort => 4,
        }
    }

    const fn repeatable(&self) -> bool {
        matches!(self, Self::Required(_) | Self::Free(_))
    }

    fn kind(&self) -> String {
        match self {
            Self::Actor => "actor".to_string(),
            Self::Variant => "variant".to_string(),
            Self::Required(r) if r.injected => format!("required object<{}>", r.category),
            Self::Required(r) => format!("non-injected required object<{}>", r.category),
            Self::Free(p) => format!("parameter {}", p.ty),
            Self::Effort => "effort".to_string(),
        }
    }
}

const PHASE_NAMES: [&str; 5] = ["actor", "variant", "required object", "parameter", "effort"];

/// What may follow a slot of phase `last`.
fn allowed_after(last: Option<u8>) -> String {
    let from = match last {
        None => 0,
        Some(p) if p == 2 || p == 3 => p,
        Some(p) => p + 1,
    };
    if from as usize >= PHASE_NAMES.len() {
        return "no further slots".to_string();
    }
    PHASE_NAMES[from as usize..].join(" or ")
}

// =============================================================================
// Handler arguments
// =============================================================================

/// A value passed to a handler, in calling-convention order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Argument {
    /// The actor or an injected required object.
    Entity(EntityId),
    /// The variant key.
    Variant(String),
    /// A free parameter value.
    Value(Value),
    /// The effort modifier.
    Effort(Effort),
}

/// Arguments for one handler call, in slot order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Arguments {
    values: Vec<Argument>,
}

impl Arguments {
    /// Wraps an argument list.
    #[must_use]
    pub const fn new(values: Vec<Argument>) -> Self {
        Self { values }
    }

    /// Number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All arguments.
    #[must_use]
    pub fn as_slice(&self) -> &[Argument] {
        &self.values
    }

    fn slot(&self, index: usize, expected: &str) -> std::result::Result<&Argument, ExecutionError> {
        self.values.get(index).ok_or_else(|| {
            Error::internal(format!("argument {index} ({expected}) is missing")).into()
        })
    }

    fn mismatch(index: usize, expected: &str, found: &Argument) -> ExecutionError {
        Error::internal(format!("argument {index}: expected {expected}, found {found:?}")).into()
    }

    /// The entity in slot `index`: the actor, an injected object, or a thing
    /// parameter.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the slot holds something else.
    pub fn entity(&self, index: usize) -> std::result::Result<EntityId, ExecutionError> {
        match self.slot(index, "entity")? {
            Argument::Entity(id) | Argument::Value(Value::Entity(id)) => Ok(*id),
            other => Err(Self::mismatch(index, "entity", other)),
        }
    }

    /// The variant key in slot `index`.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the slot holds something else.
    pub fn variant(&self, index: usize) -> std::result::Result<&str, ExecutionError> {
        match self.slot(index, "variant")? {
            Argument::Variant(key) => Ok(key),
            other => Err(Self::mismatch(index, "variant", other)),
        }
    }

    /// The text in slot `index`.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the slot holds something else.
    pub fn text(&self, index: usize) -> std::result::Result<&str, ExecutionError> {
        match self.slot(index, "text")? {
            Argument::Value(Value::Text(text)) => Ok(text),
            other => Err(Self::mismatch(index, "text", other)),
        }
    }

    /// The number in slot `index`.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the slot holds something else.
    pub fn number(&self, index: usize) -> std::result::Result<i64, ExecutionError> {
        match self.slot(index, "number")? {
            Argument::Value(Value::Number(n)) => Ok(*n),
            other => Err(Self::mismatch(index, "number", other)),
        }
    }

    /// The token key in slot `index`.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the slot holds something else.
    pub fn token(&self, index: usize) -> std::result::Result<&str, ExecutionError> {
        match self.slot(index, "token")? {
            Argument::Value(Value::Token(key)) => Ok(key),
            other => Err(Self::mismatch(index, "token", other)),
        }
    }

    /// The effort in slot `index`.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the slot holds something else.
    pub fn effort(&self, index: usize) -> std::result::Result<Effort, ExecutionError> {
        match self.slot(index, "effort")? {
            Argument::Effort(effort) => Ok(*effort),
            other => Err(Self::mismatch(index, "effort", other)),
        }
    }
}

/// What a handler may touch while it runs.
pub struct ActionContext<'a> {
    /// The world.
    pub world: &'a mut World,
    /// Who is acting.
    pub actor: EntityId,
}

impl fmt::Debug for ActionContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionContext")
            .field("actor", &self.actor)
            .finish_non_exhaustive()
    }
}

/// A handler closure.
pub type Handler =
    dyn Fn(&mut ActionContext<'_>, &Arguments) -> std::result::Result<Response, ExecutionError>
        + Send
        + Sync;

// =============================================================================
// ActionSpec
// =============================================================================

/// Declaration of an action, validated on registration.
#[derive(Clone)]
pub struct ActionSpec {
    handler_name: String,
    verb: Option<String>,
    variants: Option<Vec<String>>,
    slots: Vec<Slot>,
    required: Vec<RequiredDescriptor>,
    priority: u32,
    cost: i64,
    requires_light: bool,
    reveals: bool,
    passive: bool,
    handler: Option<Arc<Handler>>,
}

impl fmt::Debug for ActionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionSpec")
            .field("handler", &self.handler_name)
            .field("slots", &self.slots)
            .finish_non_exhaustive()
    }
}

impl ActionSpec {
    /// Declares a plain action. Its verb defaults to the handler name.
    #[must_use]
    pub fn new(handler: &str) -> Self {
        Self {
            handler_name: handler.to_string(),
            verb: None,
            variants: None,
            slots: Vec::new(),
            required: Vec::new(),
            priority: 1,
            cost: 0,
            requires_light: false,
            reveals: false,
            passive: false,
            handler: None,
        }
    }

    /// Declares an enumerated action: one descriptor per variant, each
    /// answering to the variant key as its verb.
    #[must_use]
    pub fn enumerated(handler: &str, variants: &[&str]) -> Self {
        Self {
            variants: Some(variants.iter().map(|v| (*v).to_string()).collect()),
            ..Self::new(handler)
        }
    }

    /// Answers to a different verb key than the handler name.
    #[must_use]
    pub fn verb(mut self, key: &str) -> Self {
        self.verb = Some(key.to_string());
        self
    }

    /// Adds the actor slot.
    #[must_use]
    pub fn actor(mut self) -> Self {
        self.slots.push(Slot::Actor);
        self
    }

    /// Adds the variant slot.
    #[must_use]
    pub fn variant(mut self) -> Self {
        self.slots.push(Slot::Variant);
        self
    }

    /// Requires an object of `category`, passed to the handler.
    #[must_use]
    pub fn injected(mut self, category: &str) -> Self {
        let required = RequiredDescriptor {
            category: category.to_string(),
            injected: true,
        };
        self.required.push(required.clone());
        self.slots.push(Slot::Required(required));
        self
    }

    /// Requires an object of `category` without passing it to the handler.
    #[must_use]
    pub fn requires(mut self, category: &str) -> Self {
        self.required.push(RequiredDescriptor {
            category: category.to_string(),
            injected: false,
        });
        self
    }

    /// Adds a free parameter.
    #[must_use]
    pub fn param(mut self, name: &str, ty: ParamType) -> Self {
        self.slots.push(Slot::Free(Parameter {
            name: name.to_string(),
            ty,
            carried: false,
        }));
        self
    }

    /// Adds a free thing parameter that must be held by the actor.
    #[must_use]
    pub fn carried(mut self, name: &str, ty: ParamType) -> Self {
        self.slots.push(Slot::Free(Parameter {
            name: name.to_string(),
            ty,
            carried: true,
        }));
        self
    }

    /// Adds the effort slot.
    #[must_use]
    pub fn effort(mut self) -> Self {
        self.slots.push(Slot::Effort);
        self
    }

    /// Adds a raw slot, for conventions built programmatically.
    #[must_use]
    pub fn slot(mut self, slot: Slot) -> Self {
        if let Slot::Required(required) = &slot {
            self.required.push(required.clone());
        }
        self.slots.push(slot);
        self
    }

    /// Sets the tie-break priority among actions sharing a verb. Lower runs
    /// first; must be at least one.
    #[must_use]
    pub const fn priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the power cost.
    #[must_use]
    pub const fn cost(mut self, cost: i64) -> Self {
        self.cost = cost;
        self
    }

    /// Refuses to run in the dark.
    #[must_use]
    pub const fn requires_light(mut self) -> Self {
        self.requires_light = true;
        self
    }

    /// Clears the actor's concealment on success.
    #[must_use]
    pub const fn reveals(mut self) -> Self {
        self.reveals = true;
        self
    }

    /// Does not interrupt an induction in progress.
    #[must_use]
    pub const fn passive(mut self) -> Self {
        self.passive = true;
        self
    }

    /// Sets the handler.
    #[must_use]
    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut ActionContext<'_>, &Arguments) -> std::result::Result<Response, ExecutionError>
            + Send
            + Sync
            + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    fn validate(&self) -> Result<()> {
        let name = &self.handler_name;
        let mut last: Option<u8> = None;
        for (index, slot) in self.slots.iter().enumerate() {
            let phase = slot.phase();
            let in_order = match last {
                None => true,
                Some(prev) => phase > prev || (phase == prev && slot.repeatable()),
            };
            if !in_order {
                return Err(Error::calling_convention(
                    name.as_str(),
                    index,
                    allowed_after(last),
                    slot.kind(),
                ));
            }
            if matches!(slot, Slot::Required(required) if !required.injected) {
                return Err(Error::calling_convention(
                    name.as_str(),
                    index,
                    "injected required object",
                    slot.kind(),
                ));
            }
            last = Some(phase);
        }

        let variant_index = self.slots.iter().position(|s| *s == Slot::Variant);
        match (&self.variants, variant_index) {
            (Some(_), None) => {
                let index = usize::from(self.slots.first() == Some(&Slot::Actor));
                let actual = self
                    .slots
                    .get(index)
                    .map_or_else(|| "nothing".to_string(), Slot::kind);
                return Err(Error::calling_convention(name.as_str(), index, "variant", actual));
            }
            (None, Some(index)) => {
                return Err(Error::calling_convention(
                    name.as_str(),
                    index,
                    "no variant on a plain action",
                    "variant",
                ));
            }
            (Some(variants), Some(_)) if variants.is_empty() => {
                return Err(Error::config(format!(
                    "enumerated action `{name}` declares no variants"
                )));
            }
            _ => {}
        }

        if self.priority == 0 {
            return Err(Error::config(format!(
                "action `{name}` has priority 0; priorities start at 1"
            )));
        }
        if self.cost < 0 {
            return Err(Error::config(format!("action `{name}` has a negative cost")));
        }
        Ok(())
    }

    fn build(self) -> Result<Vec<ActionDescriptor>> {
        self.validate()?;
        let invoke = self.handler.clone().ok_or_else(|| {
            Error::config(format!("action `{}` has no handler", self.handler_name))
        })?;

        let parameters: Vec<Parameter> = self
            .slots
            .iter()
            .filter_map(|slot| match slot {
                Slot::Free(p) => Some(p.clone()),
                _ => None,
            })
            .collect();

        let base = ActionDescriptor {
            name: self.handler_name.clone(),
            handler: self.handler_name.clone(),
            verb: self.verb.clone().unwrap_or_else(|| self.handler_name.clone()),
            parameters,
            required: self.required.clone(),
            actor_required: self.slots.contains(&Slot::Actor),
            effort_required: self.slots.contains(&Slot::Effort),
            variant: None,
            priority: self.priority,
            cost: self.cost,
            requires_light: self.requires_light,
            reveals: self.reveals,
            passive: self.passive,
            slots: self.slots.clone(),
            invoke,
        };

        match self.variants {
            None => Ok(vec![base]),
            Some(variants) => Ok(variants
                .into_iter()
                .map(|variant| ActionDescriptor {
                    name: format!("{}:{variant}", base.handler),
                    verb: variant.clone(),
                    variant: Some(variant),
                    ..base.clone()
                })
                .collect()),
        }
    }
}

// =============================================================================
// ActionDescriptor
// =============================================================================

/// A registered, validated action.
#[derive(Clone)]
pub struct ActionDescriptor {
    /// Unique name: the handler name, plus `:variant` for enumerated actions.
    pub name: String,
    /// Name of the underlying handler.
    pub handler: String,
    /// Verb key the action answers to.
    pub verb: String,
    /// Free parameters, in order.
    pub parameters: Vec<Parameter>,
    /// Required objects, injected or not, in declaration order.
    pub required: Vec<RequiredDescriptor>,
    /// Whether the handler receives the actor.
    pub actor_required: bool,
    /// Whether the handler receives an effort.
    pub effort_required: bool,
    /// Variant key of an enumerated action.
    pub variant: Option<String>,
    /// Tie-break among actions sharing a verb; lower runs first.
    pub priority: u32,
    /// Power cost.
    pub cost: i64,
    /// Refuses to run in the dark.
    pub requires_light: bool,
    /// Clears concealment on success.
    pub reveals: bool,
    /// Does not interrupt an induction in progress.
    pub passive: bool,
    /// The full calling convention.
    pub slots: Vec<Slot>,
    invoke: Arc<Handler>,
}

impl fmt::Debug for ActionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDescriptor")
            .field("name", &self.name)
            .field("verb", &self.verb)
            .field("slots", &self.slots)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

impl ActionDescriptor {
    /// Calls the handler.
    ///
    /// # Errors
    ///
    /// Returns whatever the handler returns.
    pub fn invoke(
        &self,
        ctx: &mut ActionContext<'_>,
        args: &Arguments,
    ) -> std::result::Result<Response, ExecutionError> {
        (self.invoke)(ctx, args)
    }
}

// =============================================================================
// ActionRegistry
// =============================================================================

/// All registered actions, indexed by verb.
#[derive(Debug, Default)]
pub struct ActionRegistry {
    actions: Vec<Arc<ActionDescriptor>>,
    by_name: HashMap<String, usize>,
    by_verb: HashMap<String, Vec<usize>>,
}

impl ActionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and registers an action, returning its descriptors.
    ///
    /// # Errors
    ///
    /// Returns a fatal error if the calling convention is invalid, the
    /// handler is missing, or a descriptor name is already taken.
    pub fn register(&mut self, spec: ActionSpec) -> Result<Vec<Arc<ActionDescriptor>>> {
        let descriptors = spec.build()?;
        if let Some(dup) = descriptors
            .iter()
            .find(|d| self.by_name.contains_key(&d.name))
        {
            return Err(Error::new(ErrorKind::DuplicateAction(dup.name.clone())));
        }

        let mut registered = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            let index = self.actions.len();
            debug!(action = %descriptor.name, verb = %descriptor.verb, "action registered");
            self.by_name.insert(descriptor.name.clone(), index);
            self.by_verb
                .entry(descriptor.verb.clone())
                .or_default()
                .push(index);
            let descriptor = Arc::new(descriptor);
            registered.push(Arc::clone(&descriptor));
            self.actions.push(descriptor);
        }
        Ok(registered)
    }

    /// Actions answering to a verb key, lowest priority first, then in
    /// registration order.
    #[must_use]
    pub fn candidates(&self, verb: &str) -> Vec<Arc<ActionDescriptor>> {
        let mut found: Vec<_> = self
            .by_verb
            .get(verb)
            .map(|indices| indices.iter().map(|&i| Arc::clone(&self.actions[i])).collect())
            .unwrap_or_default();
        found.sort_by_key(|d| d.priority);
        found
    }

    /// Returns whether any action answers to a verb key.
    #[must_use]
    pub fn has_verb(&self, verb: &str) -> bool {
        self.by_verb.contains_key(verb)
    }

    /// Looks up an action by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<ActionDescriptor>> {
        self.by_name.get(name).map(|&i| &self.actions[i])
    }

    /// Every registered action, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ActionDescriptor>> {
        self.actions.iter()
    }

    /// Number of registered descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
