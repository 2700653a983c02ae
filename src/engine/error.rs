//! Errors raised by state machine construction and operation.

use thiserror::Error;

/// Errors that can occur when building or driving a state machine.
///
/// All failures are local and synchronous; an operation that fails leaves the
/// machine exactly as it was.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StateMachineError {
    #[error("State '{id}' is not defined")]
    InvalidState { id: String },

    #[error("Cannot switch to unknown state '{id}'")]
    UnknownState { id: String },

    #[error("Unknown interpolation curve '{name}'")]
    UnknownCurve { name: String },

    #[error("Transition '{from}' -> '{to}' has invalid duration {duration}")]
    InvalidDuration {
        from: String,
        to: String,
        duration: f64,
    },

    #[error("Invalid value '{value}' for '{attribute}'")]
    InvalidValue { attribute: String, value: String },

    #[error("State machine is not bound to a template")]
    NotInitialized,

    #[error("State machine is already in use (re-entrant call from a delegate?)")]
    Reentrant,
}
