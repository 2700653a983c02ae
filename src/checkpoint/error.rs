//! Checkpoint error types.

use crate::engine::StateMachineError;
use thiserror::Error;

/// Errors raised while saving, loading or restoring an engine checkpoint.
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// The engine snapshot could not be encoded
    #[error("Failed to encode engine checkpoint: {0}")]
    SerializationFailed(String),

    /// The bytes or JSON do not hold a valid engine snapshot
    #[error("Failed to decode engine checkpoint: {0}")]
    DeserializationFailed(String),

    /// Snapshot written by an incompatible checkpoint format
    #[error("Checkpoint format version {found} cannot be restored (this build reads version {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Checkpoint does not fit the template it is restored against
    #[error("Checkpoint does not match template: {0}")]
    Mismatch(#[from] StateMachineError),
}
