//! Transition resolution: mapping `(current state, outcome)` to a next state.
//!
//! Two interchangeable strategies implement [`Resolver`]:
//!
//! - [`TransitionTable`]: an explicit list of `(source, outcome) -> destination`
//!   rows, searched in declaration order. Unmapped pairs are configuration
//!   defects.
//! - [`Embedded`]: each state record carries its `on_success` and
//!   `on_failure` successors; `Repeat` stays put. Total by construction once
//!   every non-terminal state is linked.
//!
//! Both validate eagerly with stillwater's `Validation`, so every defect in
//! a definition is reported in one pass instead of one at a time.
//!
//! # Example
//!
//! ```rust
//! use switchyard::transition::{Resolver, TableBuilder};
//! use switchyard::{Outcome, RegistryBuilder};
//!
//! let registry = RegistryBuilder::new()
//!     .state("entry", || Outcome::Ok)?
//!     .terminal("end", || Outcome::Ok)?
//!     .build()?;
//!
//! let table = TableBuilder::new()
//!     .row("entry", Outcome::Ok, "end")
//!     .row("entry", Outcome::Fail, "end")
//!     .row("entry", Outcome::Repeat, "entry")
//!     .build(&registry)?;
//!
//! let entry = registry.lookup("entry")?;
//! assert_eq!(table.resolve(&registry, entry, Outcome::Ok)?, registry.lookup("end")?);
//! assert!(table.validate(&registry).is_success());
//! # Ok::<(), switchyard::ConfigError>(())
//! ```

mod embedded;
pub mod macros;
mod table;

pub use embedded::Embedded;
pub use table::{TableBuilder, TransitionRow, TransitionTable};

use crate::core::{Outcome, StateId};
use crate::registry::{ConfigError, StateRegistry};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Strategy for choosing the next state.
///
/// Resolvers are immutable once built and are shared by every machine using
/// the same definition.
pub trait Resolver: Send + Sync {
    /// Map an outcome of `current` to the next state.
    ///
    /// An `Err` is a configuration defect: the definition has no answer for
    /// this pair. Resolvers never substitute a default destination.
    fn resolve(
        &self,
        registry: &StateRegistry,
        current: StateId,
        outcome: Outcome,
    ) -> Result<StateId, ConfigError>;

    /// Check the resolver against the registry, accumulating every defect.
    fn validate(&self, registry: &StateRegistry) -> Validation<(), NonEmptyVec<ConfigError>>;
}

impl<R: Resolver + ?Sized> Resolver for Box<R> {
    fn resolve(
        &self,
        registry: &StateRegistry,
        current: StateId,
        outcome: Outcome,
    ) -> Result<StateId, ConfigError> {
        (**self).resolve(registry, current, outcome)
    }

    fn validate(&self, registry: &StateRegistry) -> Validation<(), NonEmptyVec<ConfigError>> {
        (**self).validate(registry)
    }
}
