//! State records and the action contract.
//!
//! States live in an arena owned by the registry. A record refers to other
//! records only through [`StateId`] indices, so cyclic and self-referencing
//! graphs need no shared ownership.

use super::outcome::{Outcome, OutcomeSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a state inside the registry that defined it.
///
/// Ids are only meaningful for the registry that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateId(pub(crate) usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Work bound to a state.
///
/// The driver treats actions as opaque: it calls [`Action::execute`] and
/// acts on the returned [`Outcome`] only. Failures are reported through the
/// outcome, never by panicking. Actions are shared by every machine built
/// from the same definition, so any per-action counters need interior
/// mutability.
///
/// Closures implement the trait directly:
///
/// ```rust
/// use switchyard::{Action, Outcome};
///
/// let always_ok = || Outcome::Ok;
/// assert_eq!(always_ok.execute(), Outcome::Ok);
/// ```
pub trait Action: Send + Sync {
    fn execute(&self) -> Outcome;
}

impl<F> Action for F
where
    F: Fn() -> Outcome + Send + Sync,
{
    fn execute(&self) -> Outcome {
        self()
    }
}

/// How the driver treats a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateRole {
    /// Ordinary state: execute, resolve, advance
    Regular,
    /// Exit state: its action runs once, then the machine halts
    Terminal,
    /// Sentinel for transitions that should never happen; loops to itself
    Placeholder,
}

/// Embedded successors for the successor-per-state resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Successors {
    pub on_success: StateId,
    pub on_failure: StateId,
}

/// A defined state. Built by [`RegistryBuilder`](crate::registry::RegistryBuilder).
pub struct StateRecord {
    pub(crate) id: StateId,
    pub(crate) name: String,
    pub(crate) action: Box<dyn Action>,
    pub(crate) role: StateRole,
    pub(crate) outcomes: OutcomeSet,
    pub(crate) successors: Option<Successors>,
}

impl StateRecord {
    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> StateRole {
        self.role
    }

    /// Outcomes this state declared its action can return.
    pub fn outcomes(&self) -> OutcomeSet {
        self.outcomes
    }

    pub fn successors(&self) -> Option<Successors> {
        self.successors
    }

    pub fn is_terminal(&self) -> bool {
        self.role == StateRole::Terminal
    }

    pub fn is_placeholder(&self) -> bool {
        self.role == StateRole::Placeholder
    }

    /// Run the bound action.
    pub fn execute(&self) -> Outcome {
        self.action.execute()
    }
}

impl fmt::Debug for StateRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("role", &self.role)
            .field("outcomes", &self.outcomes)
            .field("successors", &self.successors)
            .finish_non_exhaustive()
    }
}
