//! Configuration defects in a machine definition.

use crate::core::Outcome;
use thiserror::Error;

/// A defect in the states, successors or transition rows of a machine.
///
/// These denote an incomplete or contradictory definition, never a transient
/// runtime condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("State '{name}' is already defined")]
    DuplicateState { name: String },

    #[error("Unknown state '{name}'")]
    UnknownState { name: String },

    #[error("No states defined. Add at least one state before .build()")]
    EmptyRegistry,

    #[error("Successors of state '{name}' are linked more than once")]
    DuplicateLink { name: String },

    #[error("Placeholder state '{name}' cannot be linked, it always loops to itself")]
    PlaceholderLink { name: String },

    #[error("State '{state}' has no successors. Call .link(state, on_success, on_failure)")]
    MissingSuccessors { state: String },

    #[error("No transition from state '{state}' on outcome '{outcome}'")]
    UnmappedTransition { state: String, outcome: Outcome },

    #[error("Transition from state '{state}' on outcome '{outcome}' is declared more than once")]
    DuplicateRule { state: String, outcome: Outcome },

    #[error("Transition declared from terminal state '{state}', which is never exited")]
    RuleFromTerminal { state: String },
}
