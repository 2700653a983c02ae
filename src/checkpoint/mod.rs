//! Checkpoint and restore for engines.
//!
//! A checkpoint captures everything about an engine except its template and
//! its delegate: where it is, where it is heading, how far along the blend
//! is, and its settle history. Restoring against a reloaded template lets a
//! host swap the description under a running element without a visual jump.

use crate::core::{AttributeSet, StateHistory};
use crate::engine::{ActiveTransition, MachineTemplate, StateMachine, StateMachineError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of an engine.
/// Does NOT include the template or the delegate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Last settled state
    pub current: String,

    /// State being approached
    pub target: String,

    /// Seconds into the active transition
    pub elapsed: f64,

    /// Transition in flight, if any
    pub active: Option<ActiveTransition>,

    /// Blend origin of the transition in flight
    pub from: AttributeSet,

    pub pending_settle: bool,
    pub redirected: bool,
    pub rebounding: bool,

    /// Baseline of the trigger rebound in progress
    pub rebound_origin: Option<String>,

    /// Settle history at checkpoint time
    pub history: StateHistory,
}

impl Checkpoint {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    fn check_version(&self) -> Result<(), CheckpointError> {
        if self.version == CHECKPOINT_VERSION {
            Ok(())
        } else {
            Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            })
        }
    }
}

impl StateMachine {
    /// Capture the engine's progress.
    ///
    /// Fails with [`StateMachineError::NotInitialized`] on an unbound engine.
    pub fn checkpoint(&self) -> Result<Checkpoint, StateMachineError> {
        if !self.is_initialized() {
            return Err(StateMachineError::NotInitialized);
        }

        Ok(Checkpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            current: self.current.clone(),
            target: self.target.clone(),
            elapsed: self.elapsed,
            active: self.active,
            from: self.from.clone(),
            pending_settle: self.pending_settle,
            redirected: self.redirected,
            rebounding: self.rebounding,
            rebound_origin: self.rebound_origin.clone(),
            history: self.history.clone(),
        })
    }

    /// Rebuild an engine from `checkpoint` on top of `template`.
    ///
    /// The delegate is not part of a checkpoint; register it again afterwards.
    /// Fails if the checkpoint's states no longer exist in `template`.
    pub fn restore(
        template: Arc<MachineTemplate>,
        checkpoint: Checkpoint,
    ) -> Result<Self, CheckpointError> {
        checkpoint.check_version()?;
        for id in [&checkpoint.current, &checkpoint.target] {
            if !template.has_state(id) {
                return Err(StateMachineError::InvalidState { id: id.clone() }.into());
            }
        }

        let active = checkpoint
            .active
            .filter(|active| active.duration.is_finite() && active.duration > 0.0);
        let elapsed = match active {
            Some(active) => checkpoint.elapsed.clamp(0.0, active.duration),
            None => 0.0,
        };

        debug!(
            checkpoint = %checkpoint.id,
            current = %checkpoint.current,
            target = %checkpoint.target,
            "restoring state machine from checkpoint"
        );

        let rebound_origin = checkpoint
            .rebound_origin
            .filter(|id| template.has_state(id));

        let mut machine = StateMachine::new(template, &checkpoint.current)?;
        machine.target = checkpoint.target;
        machine.elapsed = elapsed;
        machine.active = active;
        machine.from = checkpoint.from;
        machine.pending_settle =
            checkpoint.pending_settle || (active.is_none() && machine.target != machine.current);
        machine.redirected = checkpoint.redirected;
        machine.rebounding = checkpoint.rebounding;
        machine.rebound_origin = rebound_origin;
        machine.history = checkpoint.history;
        Ok(machine)
    }
}
