//! Table-driven resolution.

use crate::core::{Outcome, StateId, StateRole};
use crate::registry::{ConfigError, StateRegistry};
use crate::transition::Resolver;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// One `(source, outcome) -> destination` rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransitionRow {
    pub source: StateId,
    pub outcome: Outcome,
    pub destination: StateId,
}

/// Ordered list of transition rows.
///
/// Lookup is a linear scan in declaration order and the first matching row
/// wins. Duplicate rows are rejected by [`Resolver::validate`] rather than
/// silently shadowed.
///
/// Placeholder states need no rows: a placeholder with no matching row loops
/// to itself.
#[derive(Clone, Debug, Default)]
pub struct TransitionTable {
    rows: Vec<TransitionRow>,
}

impl TransitionTable {
    pub fn new(rows: Vec<TransitionRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[TransitionRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn find(&self, source: StateId, outcome: Outcome) -> Option<&TransitionRow> {
        self.rows
            .iter()
            .find(|row| row.source == source && row.outcome == outcome)
    }
}

impl Resolver for TransitionTable {
    fn resolve(
        &self,
        registry: &StateRegistry,
        current: StateId,
        outcome: Outcome,
    ) -> Result<StateId, ConfigError> {
        if let Some(row) = self.find(current, outcome) {
            return match registry.get(row.destination) {
                Some(destination) => Ok(destination.id()),
                None => Err(ConfigError::UnknownState {
                    name: row.destination.to_string(),
                }),
            };
        }
        if registry.is_placeholder(current) {
            return Ok(current);
        }
        Err(ConfigError::UnmappedTransition {
            state: registry.name(current).to_string(),
            outcome,
        })
    }

    fn validate(&self, registry: &StateRegistry) -> Validation<(), NonEmptyVec<ConfigError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigError>>> = Vec::new();

        // Foreign ids, rows from terminal states and duplicate pairs
        let mut seen = HashSet::new();
        for row in &self.rows {
            let Some(source) = registry.get(row.source) else {
                checks.push(Validation::fail(ConfigError::UnknownState {
                    name: row.source.to_string(),
                }));
                continue;
            };
            if registry.get(row.destination).is_none() {
                checks.push(Validation::fail(ConfigError::UnknownState {
                    name: row.destination.to_string(),
                }));
            }
            let state = source.name().to_string();
            if source.is_terminal() {
                checks.push(Validation::fail(ConfigError::RuleFromTerminal {
                    state: state.clone(),
                }));
            }
            if !seen.insert((row.source, row.outcome)) {
                checks.push(Validation::fail(ConfigError::DuplicateRule {
                    state,
                    outcome: row.outcome,
                }));
            }
        }

        // Completeness against each state's declared outcome domain
        for record in registry.iter().filter(|r| r.role() == StateRole::Regular) {
            for outcome in record.outcomes().iter() {
                let check = if self.find(record.id(), outcome).is_some() {
                    Validation::success(())
                } else {
                    Validation::fail(ConfigError::UnmappedTransition {
                        state: record.name().to_string(),
                        outcome,
                    })
                };
                checks.push(check);
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }
}

/// Builder for a [`TransitionTable`] using state names.
///
/// Names are resolved against a registry in [`build`](TableBuilder::build),
/// so rows can be declared before or after the states they mention.
#[derive(Clone, Debug, Default)]
pub struct TableBuilder {
    rows: Vec<(String, Outcome, String)>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row. Declaration order is lookup order.
    pub fn row(
        mut self,
        source: impl Into<String>,
        outcome: Outcome,
        destination: impl Into<String>,
    ) -> Self {
        self.rows.push((source.into(), outcome, destination.into()));
        self
    }

    /// Resolve every name against `registry`.
    pub fn build(self, registry: &StateRegistry) -> Result<TransitionTable, ConfigError> {
        let rows = self
            .rows
            .into_iter()
            .map(|(source, outcome, destination)| {
                Ok(TransitionRow {
                    source: registry.lookup(&source)?,
                    outcome,
                    destination: registry.lookup(&destination)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(TransitionTable::new(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OutcomeSet;
    use crate::registry::RegistryBuilder;

    fn registry() -> StateRegistry {
        RegistryBuilder::new()
            .state("entry", || Outcome::Ok)
            .unwrap()
            .state("foo", || Outcome::Ok)
            .unwrap()
            .state("bar", || Outcome::Repeat)
            .unwrap()
            .terminal("end", || Outcome::Ok)
            .unwrap()
            .build()
            .unwrap()
    }

    fn complete_table(registry: &StateRegistry) -> TransitionTable {
        TableBuilder::new()
            .row("entry", Outcome::Ok, "foo")
            .row("entry", Outcome::Fail, "end")
            .row("entry", Outcome::Repeat, "entry")
            .row("foo", Outcome::Ok, "bar")
            .row("foo", Outcome::Fail, "end")
            .row("foo", Outcome::Repeat, "foo")
            .row("bar", Outcome::Ok, "end")
            .row("bar", Outcome::Fail, "end")
            .row("bar", Outcome::Repeat, "foo")
            .build(registry)
            .unwrap()
    }

    #[test]
    fn resolve_follows_rows() {
        let registry = registry();
        let table = complete_table(&registry);
        let bar = registry.lookup("bar").unwrap();

        let next = table.resolve(&registry, bar, Outcome::Repeat).unwrap();
        assert_eq!(registry.name(next), "foo");
    }

    #[test]
    fn complete_table_validates() {
        let registry = registry();
        let table = complete_table(&registry);

        assert!(table.validate(&registry).is_success());
        for record in registry.iter().filter(|r| !r.is_terminal()) {
            for outcome in Outcome::ALL {
                assert!(table.resolve(&registry, record.id(), outcome).is_ok());
            }
        }
    }

    #[test]
    fn unmapped_outcome_is_a_configuration_defect() {
        let registry = registry();
        let table = TableBuilder::new()
            .row("entry", Outcome::Ok, "foo")
            .build(&registry)
            .unwrap();
        let entry = registry.lookup("entry").unwrap();

        let result = table.resolve(&registry, entry, Outcome::Fail);
        assert_eq!(
            result,
            Err(ConfigError::UnmappedTransition {
                state: "entry".to_string(),
                outcome: Outcome::Fail,
            })
        );
    }

    #[test]
    fn first_matching_row_wins() {
        let registry = registry();
        let table = TableBuilder::new()
            .row("entry", Outcome::Ok, "foo")
            .row("entry", Outcome::Ok, "bar")
            .build(&registry)
            .unwrap();
        let entry = registry.lookup("entry").unwrap();

        let next = table.resolve(&registry, entry, Outcome::Ok).unwrap();
        assert_eq!(registry.name(next), "foo");
    }

    #[test]
    fn validation_accumulates_all_defects() {
        let registry = registry();
        let table = TableBuilder::new()
            .row("entry", Outcome::Ok, "foo")
            .row("entry", Outcome::Ok, "bar")
            .row("end", Outcome::Ok, "entry")
            .build(&registry)
            .unwrap();

        match table.validate(&registry) {
            Validation::Failure(errors) => {
                let has_duplicate = errors
                    .iter()
                    .any(|e| matches!(e, ConfigError::DuplicateRule { .. }));
                let has_terminal = errors
                    .iter()
                    .any(|e| matches!(e, ConfigError::RuleFromTerminal { .. }));
                let unmapped = errors
                    .iter()
                    .filter(|e| matches!(e, ConfigError::UnmappedTransition { .. }))
                    .count();

                assert!(has_duplicate);
                assert!(has_terminal);
                // entry: fail, repeat; foo: 3; bar: 3
                assert_eq!(unmapped, 8);
                assert_eq!(errors.len(), 10);
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn validation_respects_declared_outcomes() {
        let registry = RegistryBuilder::new()
            .state_emitting("entry", OutcomeSet::of(&[Outcome::Ok]), || Outcome::Ok)
            .unwrap()
            .terminal("end", || Outcome::Ok)
            .unwrap()
            .build()
            .unwrap();
        let table = TableBuilder::new()
            .row("entry", Outcome::Ok, "end")
            .build(&registry)
            .unwrap();

        assert!(table.validate(&registry).is_success());
    }

    #[test]
    fn placeholder_without_rows_loops() {
        let registry = RegistryBuilder::new()
            .placeholder("null")
            .unwrap()
            .build()
            .unwrap();
        let table = TransitionTable::default();
        let null = registry.lookup("null").unwrap();

        assert_eq!(table.resolve(&registry, null, Outcome::Repeat), Ok(null));
        assert!(table.validate(&registry).is_success());
    }

    fn small_registry() -> StateRegistry {
        RegistryBuilder::new()
            .state_emitting("entry", OutcomeSet::of(&[Outcome::Ok]), || Outcome::Ok)
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn rows_from_another_registry_fail_validation() {
        let table = TableBuilder::new()
            .row("entry", Outcome::Ok, "end")
            .row("end", Outcome::Ok, "entry")
            .build(&registry())
            .unwrap();
        let small = small_registry();

        match table.validate(&small) {
            Validation::Failure(errors) => {
                let unknown: Vec<_> = errors
                    .iter()
                    .filter(|e| matches!(e, ConfigError::UnknownState { .. }))
                    .cloned()
                    .collect();
                // "end" is #3 in the larger registry, both as destination and as source
                assert_eq!(
                    unknown,
                    vec![
                        ConfigError::UnknownState {
                            name: "#3".to_string()
                        },
                        ConfigError::UnknownState {
                            name: "#3".to_string()
                        },
                    ]
                );
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn resolve_refuses_destinations_outside_the_registry() {
        let table = TableBuilder::new()
            .row("entry", Outcome::Ok, "end")
            .build(&registry())
            .unwrap();
        let small = small_registry();
        let entry = small.lookup("entry").unwrap();

        assert_eq!(
            table.resolve(&small, entry, Outcome::Ok),
            Err(ConfigError::UnknownState {
                name: "#3".to_string()
            })
        );
    }

    #[test]
    fn build_rejects_unknown_names() {
        let registry = registry();
        let result = TableBuilder::new()
            .row("entry", Outcome::Ok, "baz")
            .build(&registry);

        assert!(matches!(
            result,
            Err(ConfigError::UnknownState { ref name }) if name == "baz"
        ));
    }
}
