//! Snapshot and resume for machine cursors.
//!
//! A snapshot captures where a machine is, not what it is: states, actions
//! and transitions stay in code. Resuming binds the snapshot to a definition
//! and checks that the recorded state still exists.

use crate::driver::MachineStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for the snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable capture of a machine's cursor.
///
/// Created by [`Machine::snapshot`](crate::driver::Machine::snapshot) and
/// consumed by [`Machine::resume`](crate::driver::Machine::resume).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: Uuid,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    /// Name of the state the cursor points at
    pub current_state: String,

    /// Machine status at capture time
    pub status: MachineStatus,

    /// Actions executed before capture
    pub steps: usize,

    /// Placeholder executions before capture
    pub placeholder_hits: usize,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json).map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }
}
