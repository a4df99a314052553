//! Builder for the state registry.

use crate::core::{Action, Outcome, OutcomeSet, StateId, StateRecord, StateRole, Successors};
use crate::registry::error::ConfigError;
use crate::registry::StateRegistry;
use std::collections::HashMap;

struct PendingState {
    name: String,
    action: Box<dyn Action>,
    role: StateRole,
    outcomes: OutcomeSet,
}

struct PendingLink {
    state: String,
    on_success: String,
    on_failure: String,
}

fn placeholder_action() -> Outcome {
    Outcome::Repeat
}

/// Fluent builder for a [`StateRegistry`].
///
/// State names are checked for uniqueness as they are added. Successor links
/// may name states that are defined later; they are resolved in
/// [`build`](RegistryBuilder::build).
///
/// # Example
///
/// ```rust
/// use switchyard::{Outcome, RegistryBuilder};
///
/// let registry = RegistryBuilder::new()
///     .state("entry", || Outcome::Ok)?
///     .state("foo", || Outcome::Fail)?
///     .placeholder("null")?
///     .link("entry", "foo", "null")
///     .link("foo", "entry", "null")
///     .build()?;
///
/// assert_eq!(registry.len(), 3);
/// # Ok::<(), switchyard::ConfigError>(())
/// ```
#[derive(Default)]
pub struct RegistryBuilder {
    states: Vec<PendingState>,
    index: HashMap<String, StateId>,
    links: Vec<PendingLink>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a regular state whose action may return any outcome.
    pub fn state<A>(self, name: impl Into<String>, action: A) -> Result<Self, ConfigError>
    where
        A: Action + 'static,
    {
        self.define(name.into(), Box::new(action), StateRole::Regular, OutcomeSet::ALL)
    }

    /// Define a regular state that only produces `outcomes`.
    ///
    /// Transition tables only need rows for the declared outcomes.
    pub fn state_emitting<A>(
        self,
        name: impl Into<String>,
        outcomes: OutcomeSet,
        action: A,
    ) -> Result<Self, ConfigError>
    where
        A: Action + 'static,
    {
        self.define(name.into(), Box::new(action), StateRole::Regular, outcomes)
    }

    /// Define a terminal state. Its action runs once as an exit hook.
    pub fn terminal<A>(self, name: impl Into<String>, action: A) -> Result<Self, ConfigError>
    where
        A: Action + 'static,
    {
        self.define(name.into(), Box::new(action), StateRole::Terminal, OutcomeSet::EMPTY)
    }

    /// Define a placeholder state.
    ///
    /// Its action returns `Repeat` and both successors point back to itself.
    pub fn placeholder(self, name: impl Into<String>) -> Result<Self, ConfigError> {
        self.define(
            name.into(),
            Box::new(placeholder_action),
            StateRole::Placeholder,
            OutcomeSet::of(&[Outcome::Repeat]),
        )
    }

    /// Bind embedded successors by name. Names are resolved in `build()`.
    pub fn link(
        mut self,
        state: impl Into<String>,
        on_success: impl Into<String>,
        on_failure: impl Into<String>,
    ) -> Self {
        self.links.push(PendingLink {
            state: state.into(),
            on_success: on_success.into(),
            on_failure: on_failure.into(),
        });
        self
    }

    fn define(
        mut self,
        name: String,
        action: Box<dyn Action>,
        role: StateRole,
        outcomes: OutcomeSet,
    ) -> Result<Self, ConfigError> {
        if self.index.contains_key(&name) {
            return Err(ConfigError::DuplicateState { name });
        }

        let id = StateId(self.states.len());
        self.index.insert(name.clone(), id);
        self.states.push(PendingState {
            name,
            action,
            role,
            outcomes,
        });
        Ok(self)
    }

    fn resolve(&self, name: &str) -> Result<StateId, ConfigError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| ConfigError::UnknownState {
                name: name.to_string(),
            })
    }

    /// Resolve all links and freeze the registry.
    pub fn build(self) -> Result<StateRegistry, ConfigError> {
        if self.states.is_empty() {
            return Err(ConfigError::EmptyRegistry);
        }

        let mut successors: Vec<Option<Successors>> = self
            .states
            .iter()
            .enumerate()
            .map(|(i, pending)| {
                (pending.role == StateRole::Placeholder).then_some(Successors {
                    on_success: StateId(i),
                    on_failure: StateId(i),
                })
            })
            .collect();

        for link in &self.links {
            let id = self.resolve(&link.state)?;
            if self.states[id.0].role == StateRole::Placeholder {
                return Err(ConfigError::PlaceholderLink {
                    name: link.state.clone(),
                });
            }
            if successors[id.0].is_some() {
                return Err(ConfigError::DuplicateLink {
                    name: link.state.clone(),
                });
            }
            successors[id.0] = Some(Successors {
                on_success: self.resolve(&link.on_success)?,
                on_failure: self.resolve(&link.on_failure)?,
            });
        }

        let states = self
            .states
            .into_iter()
            .zip(successors)
            .enumerate()
            .map(|(i, (pending, successors))| StateRecord {
                id: StateId(i),
                name: pending.name,
                action: pending.action,
                role: pending.role,
                outcomes: pending.outcomes,
                successors,
            })
            .collect();

        Ok(StateRegistry {
            states,
            index: self.index,
        })
    }
}
