//! The state registry: an arena of every state a machine can be in.
//!
//! Registries are populated once through [`RegistryBuilder`] and are
//! read-only afterwards. Machines only ever hold [`StateId`]s into them.

mod builder;
pub mod error;

pub use builder::RegistryBuilder;
pub use error::ConfigError;

use crate::core::{StateId, StateRecord, StateRole};
use std::collections::HashMap;

/// Immutable set of defined states.
#[derive(Debug)]
pub struct StateRegistry {
    pub(crate) states: Vec<StateRecord>,
    pub(crate) index: HashMap<String, StateId>,
}

impl StateRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Find a state by name.
    pub fn lookup(&self, name: &str) -> Result<StateId, ConfigError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| ConfigError::UnknownState {
                name: name.to_string(),
            })
    }

    /// Get the record for an id issued by this registry.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different registry and is out of range.
    pub fn record(&self, id: StateId) -> &StateRecord {
        &self.states[id.0]
    }

    /// Like [`record`](Self::record) but returns `None` for foreign ids.
    pub fn get(&self, id: StateId) -> Option<&StateRecord> {
        self.states.get(id.0)
    }

    pub fn name(&self, id: StateId) -> &str {
        self.record(id).name()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Iterate records in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &StateRecord> {
        self.states.iter()
    }

    pub fn terminals(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states
            .iter()
            .filter(|s| s.role == StateRole::Terminal)
            .map(|s| s.id)
    }

    pub fn is_terminal(&self, id: StateId) -> bool {
        self.get(id).is_some_and(StateRecord::is_terminal)
    }

    pub fn is_placeholder(&self, id: StateId) -> bool {
        self.get(id).is_some_and(StateRecord::is_placeholder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Outcome;

    fn sample() -> StateRegistry {
        RegistryBuilder::new()
            .state("entry", || Outcome::Ok)
            .unwrap()
            .state("foo", || Outcome::Ok)
            .unwrap()
            .terminal("end", || Outcome::Ok)
            .unwrap()
            .placeholder("null")
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn lookup_finds_defined_states() {
        let registry = sample();
        let foo = registry.lookup("foo").unwrap();

        assert_eq!(registry.name(foo), "foo");
        assert_eq!(registry.record(foo).id(), foo);
    }

    #[test]
    fn lookup_unknown_state_fails() {
        let registry = sample();
        assert_eq!(
            registry.lookup("bar"),
            Err(ConfigError::UnknownState {
                name: "bar".to_string()
            })
        );
    }

    #[test]
    fn ids_follow_definition_order() {
        let registry = sample();
        let names: Vec<_> = registry.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["entry", "foo", "end", "null"]);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn roles_are_queryable() {
        let registry = sample();
        let end = registry.lookup("end").unwrap();
        let null = registry.lookup("null").unwrap();

        assert_eq!(registry.terminals().collect::<Vec<_>>(), vec![end]);
        assert!(registry.is_terminal(end));
        assert!(registry.is_placeholder(null));
        assert!(!registry.is_placeholder(end));
    }

    #[test]
    fn foreign_ids_are_not_found() {
        let registry = sample();
        assert!(registry.get(StateId(99)).is_none());
        assert!(!registry.is_terminal(StateId(99)));
    }
}
