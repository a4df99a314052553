//! Step history tracking.
//!
//! Every resolved step a machine takes can be recorded here, giving a
//! replayable trace of the path through the state graph.

use super::outcome::Outcome;
use super::state::StateId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single resolved step.
///
/// # Example
///
/// ```rust
/// use switchyard::core::StepRecord;
/// use switchyard::{Outcome, StateId};
/// use chrono::Utc;
///
/// # fn demo(entry: StateId, foo: StateId) {
/// let record = StepRecord {
///     from: entry,
///     outcome: Outcome::Ok,
///     to: foo,
///     step: 1,
///     timestamp: Utc::now(),
/// };
/// assert!(!record.is_self_loop());
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// The state whose action ran
    pub from: StateId,
    /// What the action reported
    pub outcome: Outcome,
    /// Where the resolver sent the machine
    pub to: StateId,
    /// 1-based step number within the machine's run
    pub step: usize,
    /// When the step completed
    pub timestamp: DateTime<Utc>,
}

impl StepRecord {
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Ordered history of resolved steps.
///
/// An unbounded history grows by one record per step, which never stops for
/// a machine parked in a placeholder. [`with_limit`](StateHistory::with_limit)
/// keeps only the most recent steps.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StateHistory {
    steps: Vec<StepRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    limit: Option<usize>,
}

impl StateHistory {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            limit: None,
        }
    }

    /// History that retains at most `limit` steps, dropping the oldest first.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            steps: Vec::new(),
            limit: Some(limit),
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Append a step, evicting the oldest ones past the limit.
    pub fn record(&mut self, step: StepRecord) {
        self.steps.push(step);
        if let Some(limit) = self.limit {
            if self.steps.len() > limit {
                let excess = self.steps.len() - limit;
                self.steps.drain(..excess);
            }
        }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the source of the first step followed by the destination of
    /// every step. Self-loops show up as repeated entries.
    pub fn get_path(&self) -> Vec<StateId> {
        let mut path = Vec::with_capacity(self.steps.len() + 1);
        if let Some(first) = self.steps.first() {
            path.push(first.from);
        }
        path.extend(self.steps.iter().map(|s| s.to));
        path
    }

    /// Time between the first and last recorded step.
    ///
    /// Returns `None` if there are no steps.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.steps.first(), self.steps.last()) {
            last.timestamp
                .signed_duration_since(first.timestamp)
                .to_std()
                .ok()
        } else {
            None
        }
    }

    pub fn transitions(&self) -> &[StepRecord] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(from: usize, outcome: Outcome, to: usize, n: usize) -> StepRecord {
        StepRecord {
            from: StateId(from),
            outcome,
            to: StateId(to),
            step: n,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let mut history = StateHistory::new();
        history.record(step(0, Outcome::Ok, 1, 1));
        history.record(step(1, Outcome::Repeat, 1, 2));
        history.record(step(1, Outcome::Ok, 2, 3));

        assert_eq!(history.len(), 3);
        assert_eq!(
            history.get_path(),
            vec![StateId(0), StateId(1), StateId(1), StateId(2)]
        );
    }

    #[test]
    fn limited_history_keeps_the_latest_steps() {
        let mut history = StateHistory::with_limit(2);
        history.record(step(0, Outcome::Ok, 1, 1));
        history.record(step(1, Outcome::Ok, 2, 2));
        history.record(step(2, Outcome::Repeat, 2, 3));

        assert_eq!(history.len(), 2);
        assert_eq!(history.transitions()[0].step, 2);
        assert_eq!(
            history.get_path(),
            vec![StateId(1), StateId(2), StateId(2)]
        );
    }

    #[test]
    fn zero_limit_retains_nothing() {
        let mut history = StateHistory::with_limit(0);
        history.record(step(0, Outcome::Ok, 1, 1));

        assert!(history.is_empty());
    }

    #[test]
    fn self_loop_is_detected() {
        assert!(step(3, Outcome::Repeat, 3, 1).is_self_loop());
        assert!(!step(3, Outcome::Ok, 4, 1).is_self_loop());
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let mut history = StateHistory::new();
        history.record(step(0, Outcome::Ok, 1, 1));

        std::thread::sleep(Duration::from_millis(10));

        history.record(step(1, Outcome::Ok, 2, 2));

        let duration = history.duration().unwrap();
        assert!(duration >= Duration::from_millis(10));
    }

    #[test]
    fn single_step_has_zero_duration() {
        let mut history = StateHistory::new();
        history.record(step(0, Outcome::Fail, 1, 1));

        assert_eq!(history.duration(), Some(Duration::ZERO));
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = StateHistory::new();
        history.record(step(0, Outcome::Ok, 1, 1));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(history.transitions(), deserialized.transitions());
    }
}
