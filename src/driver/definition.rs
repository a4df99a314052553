//! Validated machine definitions.

use crate::core::{Outcome, StateId};
use crate::driver::error::EngineError;
use crate::registry::{ConfigError, StateRegistry};
use crate::transition::Resolver;
use stillwater::validation::Validation;

/// A registry paired with the resolver that moves between its states.
///
/// Definitions are immutable. Share one behind an `Arc` across every machine
/// that runs it.
#[derive(Debug)]
pub struct Definition<R: Resolver> {
    registry: StateRegistry,
    resolver: R,
}

impl<R: Resolver> Definition<R> {
    /// Validate `resolver` against `registry` and bundle them.
    ///
    /// Returns every defect found, not just the first.
    pub fn new(registry: StateRegistry, resolver: R) -> Result<Self, EngineError> {
        match resolver.validate(&registry) {
            Validation::Success(_) => Ok(Self { registry, resolver }),
            Validation::Failure(errors) => Err(EngineError::InvalidDefinition(
                errors.iter().cloned().collect(),
            )),
        }
    }

    /// Bundle without validating. Defects surface when a machine first hits
    /// them.
    pub fn unchecked(registry: StateRegistry, resolver: R) -> Self {
        Self { registry, resolver }
    }

    pub fn registry(&self) -> &StateRegistry {
        &self.registry
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn resolve(&self, current: StateId, outcome: Outcome) -> Result<StateId, ConfigError> {
        self.resolver.resolve(&self.registry, current, outcome)
    }
}
