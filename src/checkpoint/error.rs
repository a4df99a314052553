//! Snapshot error types.

use thiserror::Error;

/// Errors that can occur while saving or restoring a machine snapshot
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Snapshot version is not supported by this version
    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Snapshot names a state the definition does not have
    #[error("Snapshot refers to unknown state '{name}'")]
    UnknownState { name: String },
}
