//! The machine driver.
//!
//! A [`Machine`] owns a cursor into a shared [`Definition`] and advances it
//! one action at a time. Nothing runs unattended: callers drive it with
//! `step`, `run(n)` or `run_until_terminal`.

mod config;
mod definition;
mod error;
mod machine;

pub use config::DriverConfig;
pub use definition::Definition;
pub use error::EngineError;
pub use machine::{Machine, MachineStatus, RunSummary, StepReport};
