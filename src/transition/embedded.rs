//! Successor-per-state resolution.

use crate::core::{Outcome, StateId};
use crate::registry::{ConfigError, StateRegistry};
use crate::transition::Resolver;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Resolves through the successors embedded in each state record.
///
/// `Ok` follows `on_success`, `Fail` follows `on_failure` and `Repeat` stays
/// in the current state. Branching is limited to those two successors plus
/// the implicit self-loop. States with no real failure path point
/// `on_failure` at a placeholder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Embedded;

impl Resolver for Embedded {
    fn resolve(
        &self,
        registry: &StateRegistry,
        current: StateId,
        outcome: Outcome,
    ) -> Result<StateId, ConfigError> {
        if outcome == Outcome::Repeat {
            return Ok(current);
        }

        let record = registry.record(current);
        let successors = record
            .successors()
            .ok_or_else(|| ConfigError::MissingSuccessors {
                state: record.name().to_string(),
            })?;

        Ok(match outcome {
            Outcome::Ok => successors.on_success,
            Outcome::Fail => successors.on_failure,
            Outcome::Repeat => current,
        })
    }

    fn validate(&self, registry: &StateRegistry) -> Validation<(), NonEmptyVec<ConfigError>> {
        let checks: Vec<Validation<(), NonEmptyVec<ConfigError>>> = registry
            .iter()
            .filter(|record| !record.is_terminal())
            .map(|record| {
                if record.successors().is_some() {
                    Validation::success(())
                } else {
                    Validation::fail(ConfigError::MissingSuccessors {
                        state: record.name().to_string(),
                    })
                }
            })
            .collect();

        Validation::all_vec(checks).map(|_| ())
    }
}
