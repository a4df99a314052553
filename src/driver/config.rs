//! Driver configuration.

use crate::driver::error::EngineError;
use serde::{Deserialize, Serialize};

/// Tunables for a [`Machine`](crate::driver::Machine).
///
/// Missing fields take their defaults, so a partial document is valid:
///
/// ```rust
/// use switchyard::DriverConfig;
///
/// let config = DriverConfig::from_json(r#"{ "max_steps": 50 }"#)?;
/// assert_eq!(config.max_steps, 50);
/// assert!(config.record_history);
/// # Ok::<(), switchyard::EngineError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    /// Upper bound on steps taken by `run_until_terminal`
    pub max_steps: usize,

    /// Whether each resolved step is appended to the machine's history
    pub record_history: bool,

    /// Most recent steps kept in the history; older ones are evicted
    pub history_limit: usize,
}

impl DriverConfig {
    pub const DEFAULT_MAX_STEPS: usize = 10_000;
    pub const DEFAULT_HISTORY_LIMIT: usize = 1_000;

    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(|e| EngineError::InvalidConfig(e.to_string()))
    }

    pub fn max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn record_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }

    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            max_steps: Self::DEFAULT_MAX_STEPS,
            record_history: true,
            history_limit: Self::DEFAULT_HISTORY_LIMIT,
        }
    }
}
