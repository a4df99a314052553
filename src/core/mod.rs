//! Core value types of the engine.
//!
//! This module contains the leaves everything else builds on:
//! - Outcome codes reported by actions
//! - State records, ids and the `Action` contract
//! - Step history

mod history;
mod outcome;
mod state;

pub use history::{StateHistory, StepRecord};
pub use outcome::{Outcome, OutcomeSet};
pub use state::{Action, StateId, StateRecord, StateRole, Successors};
