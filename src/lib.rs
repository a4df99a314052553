//! Switchyard: a small outcome-driven state machine engine
//!
//! Each state is bound to an action that returns an [`Outcome`] (`Ok`,
//! `Fail` or `Repeat`). A [`Machine`] runs the action of its current state,
//! hands the outcome to a [`Resolver`](transition::Resolver), and moves to the
//! state it names.
//!
//! # Core Concepts
//!
//! - **Registry**: an arena of named states built once with [`RegistryBuilder`]
//! - **Resolvers**: a declarative [`TransitionTable`] or per-state
//!   [`Embedded`] successors
//! - **Definition**: registry plus resolver, validated eagerly and shared
//!   behind an `Arc`
//! - **Machine**: a cursor that steps through a definition
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use switchyard::{Definition, Embedded, Machine, Outcome, RegistryBuilder};
//!
//! let registry = RegistryBuilder::new()
//!     .state("entry", || Outcome::Ok)?
//!     .state("work", || Outcome::Fail)?
//!     .terminal("done", || Outcome::Ok)?
//!     .placeholder("null")?
//!     .link("entry", "work", "null")
//!     .link("work", "done", "done")
//!     .build()?;
//!
//! let definition = Arc::new(Definition::new(registry, Embedded)?);
//! let mut machine = Machine::new(definition, "entry")?;
//! machine.run_until_terminal()?;
//!
//! assert_eq!(machine.current_name(), "done");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod checkpoint;
pub mod core;
pub mod driver;
pub mod registry;
pub mod transition;

// Re-export commonly used types
pub use checkpoint::{CheckpointError, Snapshot};
pub use core::{Action, Outcome, OutcomeSet, StateId, StateRole};
pub use driver::{Definition, DriverConfig, EngineError, Machine, MachineStatus, RunSummary, StepReport};
pub use registry::{ConfigError, RegistryBuilder, StateRegistry};
pub use transition::{Embedded, TableBuilder, TransitionTable};
