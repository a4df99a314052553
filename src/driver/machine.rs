//! The machine driver: a cursor over a shared definition.

use crate::checkpoint::{CheckpointError, Snapshot, SNAPSHOT_VERSION};
use crate::core::{Outcome, StateHistory, StateId, StepRecord};
use crate::driver::config::DriverConfig;
use crate::driver::definition::Definition;
use crate::driver::error::EngineError;
use crate::transition::Resolver;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Lifecycle of a machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MachineStatus {
    /// Stepping normally
    Running,
    /// Reached a terminal state; further steps are no-ops
    Halted,
    /// Hit a configuration defect; further steps are refused
    Faulted,
}

/// What a single call to [`Machine::step`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepReport {
    /// An action ran and the cursor moved to `to` (possibly the same state)
    Transitioned {
        from: StateId,
        outcome: Outcome,
        to: StateId,
    },
    /// The machine is halted at a terminal state
    Halted { state: StateId },
}

/// Result of a bounded run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// States whose action executed, in order
    pub visited: Vec<StateId>,
    /// Number of actions executed
    pub steps: usize,
    /// Whether the machine ended halted at a terminal state
    pub halted: bool,
}

/// Drives one run through a shared [`Definition`].
///
/// The only mutable state is the cursor and its bookkeeping; the definition
/// itself is never touched, so any number of machines can share it.
///
/// Termination: when the cursor sits on a terminal state, the next step runs
/// that state's action once as an exit hook, ignores its outcome and halts.
/// Placeholder states never halt; they loop to themselves and each visit is
/// logged as a reachability defect.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use switchyard::transitions;
/// use switchyard::{Definition, Machine, Outcome, RegistryBuilder};
///
/// let registry = RegistryBuilder::new()
///     .state("entry", || Outcome::Ok)?
///     .state("foo", || Outcome::Ok)?
///     .terminal("end", || Outcome::Ok)?
///     .build()?;
/// let table = transitions! {
///     entry => { Ok => foo, Fail => end, Repeat => entry },
///     foo => { Ok => end, Fail => end, Repeat => foo },
/// }
/// .build(&registry)?;
///
/// let definition = Arc::new(Definition::new(registry, table)?);
/// let mut machine = Machine::new(Arc::clone(&definition), "entry")?;
/// let summary = machine.run_until_terminal()?;
///
/// assert!(summary.halted);
/// assert_eq!(machine.current_name(), "end");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Machine<R: Resolver> {
    definition: Arc<Definition<R>>,
    current: StateId,
    status: MachineStatus,
    steps: usize,
    placeholder_hits: usize,
    history: StateHistory,
    config: DriverConfig,
}

impl<R: Resolver> Machine<R> {
    /// Bind a machine to `entry` with the default configuration.
    pub fn new(definition: Arc<Definition<R>>, entry: &str) -> Result<Self, EngineError> {
        Self::with_config(definition, entry, DriverConfig::default())
    }

    pub fn with_config(
        definition: Arc<Definition<R>>,
        entry: &str,
        config: DriverConfig,
    ) -> Result<Self, EngineError> {
        let current = definition
            .registry()
            .lookup(entry)
            .map_err(|_| EngineError::UnknownEntry {
                name: entry.to_string(),
            })?;

        Ok(Self {
            definition,
            current,
            status: MachineStatus::Running,
            steps: 0,
            placeholder_hits: 0,
            history: StateHistory::with_limit(config.history_limit),
            config,
        })
    }

    pub fn current_state(&self) -> StateId {
        self.current
    }

    pub fn current_name(&self) -> &str {
        self.definition.registry().name(self.current)
    }

    pub fn status(&self) -> MachineStatus {
        self.status
    }

    pub fn is_halted(&self) -> bool {
        self.status == MachineStatus::Halted
    }

    /// Number of actions executed so far.
    pub fn steps_taken(&self) -> usize {
        self.steps
    }

    /// Number of times a placeholder state's action executed.
    pub fn placeholder_hits(&self) -> usize {
        self.placeholder_hits
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    pub fn definition(&self) -> &Arc<Definition<R>> {
        &self.definition
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Execute the current state's action and advance the cursor.
    ///
    /// A resolution failure faults the machine. The cursor stays on the state
    /// whose outcome could not be resolved, and every later step is refused.
    pub fn step(&mut self) -> Result<StepReport, EngineError> {
        match self.status {
            MachineStatus::Halted => return Ok(StepReport::Halted { state: self.current }),
            MachineStatus::Faulted => {
                return Err(EngineError::Faulted {
                    state: self.current_name().to_string(),
                })
            }
            MachineStatus::Running => {}
        }

        let definition = Arc::clone(&self.definition);
        let registry = definition.registry();
        let record = registry.record(self.current);

        if record.is_terminal() {
            // Exit hook; the outcome has nowhere to go
            let _ = record.execute();
            self.steps += 1;
            self.status = MachineStatus::Halted;
            tracing::info!(
                state = record.name(),
                steps = self.steps,
                "Machine reached terminal state"
            );
            return Ok(StepReport::Halted { state: self.current });
        }

        let outcome = record.execute();
        self.steps += 1;

        if record.is_placeholder() {
            self.placeholder_hits += 1;
            tracing::warn!(
                state = record.name(),
                hits = self.placeholder_hits,
                "Placeholder state executed; some transition leads where it never should"
            );
        }

        let to = match definition.resolve(self.current, outcome) {
            Ok(to) => to,
            Err(err) => {
                self.status = MachineStatus::Faulted;
                tracing::error!(
                    state = record.name(),
                    %outcome,
                    error = %err,
                    "Unresolvable transition, machine faulted"
                );
                return Err(err.into());
            }
        };

        tracing::debug!(
            from = record.name(),
            %outcome,
            to = registry.name(to),
            step = self.steps,
            "Step executed"
        );

        if self.config.record_history {
            self.history.record(StepRecord {
                from: self.current,
                outcome,
                to,
                step: self.steps,
                timestamp: Utc::now(),
            });
        }

        let from = self.current;
        self.current = to;
        Ok(StepReport::Transitioned { from, outcome, to })
    }

    /// Step at most `max` times, stopping early once the machine halts.
    pub fn run(&mut self, max: usize) -> Result<RunSummary, EngineError> {
        let mut summary = RunSummary::default();

        for _ in 0..max {
            if self.is_halted() {
                break;
            }
            let state = self.current;
            let report = self.step()?;
            summary.visited.push(state);
            summary.steps += 1;
            if matches!(report, StepReport::Halted { .. }) {
                break;
            }
        }

        summary.halted = self.is_halted();
        Ok(summary)
    }

    /// Step until a terminal state halts the machine.
    ///
    /// Bounded by [`DriverConfig::max_steps`] so a graph that never reaches a
    /// terminal state (for example one stuck in a placeholder) reports an
    /// error instead of spinning forever.
    pub fn run_until_terminal(&mut self) -> Result<RunSummary, EngineError> {
        let limit = self.config.max_steps;
        let summary = self.run(limit)?;

        if summary.halted {
            Ok(summary)
        } else {
            Err(EngineError::StepLimitExceeded {
                limit,
                state: self.current_name().to_string(),
            })
        }
    }

    /// Capture the cursor so the run can resume elsewhere.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4(),
            taken_at: Utc::now(),
            current_state: self.current_name().to_string(),
            status: self.status,
            steps: self.steps,
            placeholder_hits: self.placeholder_hits,
        }
    }

    /// Rebuild a machine from a snapshot taken against an equivalent
    /// definition. History is not restored.
    pub fn resume(
        definition: Arc<Definition<R>>,
        snapshot: &Snapshot,
    ) -> Result<Self, CheckpointError> {
        Self::resume_with_config(definition, snapshot, DriverConfig::default())
    }

    pub fn resume_with_config(
        definition: Arc<Definition<R>>,
        snapshot: &Snapshot,
        config: DriverConfig,
    ) -> Result<Self, CheckpointError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: snapshot.version,
                supported: SNAPSHOT_VERSION,
            });
        }

        let current = definition
            .registry()
            .lookup(&snapshot.current_state)
            .map_err(|_| CheckpointError::UnknownState {
                name: snapshot.current_state.clone(),
            })?;

        tracing::debug!(
            snapshot = %snapshot.id,
            state = %snapshot.current_state,
            steps = snapshot.steps,
            "Resuming machine from snapshot"
        );

        Ok(Self {
            definition,
            current,
            status: snapshot.status,
            steps: snapshot.steps,
            placeholder_hits: snapshot.placeholder_hits,
            history: StateHistory::with_limit(config.history_limit),
            config,
        })
    }
}
