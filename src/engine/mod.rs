//! The state machine engine and its delegate boundary.
//!
//! # Key Concepts
//!
//! - **Template**: states, transitions and trigger configuration, shared
//!   read-only between engines
//! - **Engine**: per-element clock and blend state, advanced by `drive`
//! - **Delegate**: receives the resolved attributes once per frame
//!
//! The engine never schedules anything itself. Hosts call
//! [`StateMachine::drive`] from their frame loop and keep calling it for as
//! long as it returns `true`.

mod delegate;
mod error;
mod machine;
mod template;

pub use delegate::StateMachineDelegate;
pub use error::StateMachineError;
pub use machine::{ActiveTransition, StateMachine};
pub use template::{MachineTemplate, Rebound};
