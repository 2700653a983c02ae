//! Builder API for ergonomic template and machine construction.
//!
//! Definitions are checked with Stillwater's `Validation`, so a broken
//! definition reports every problem in one pass instead of one per build
//! attempt.

pub mod machine;
pub mod macros;
pub mod template;

pub use machine::StateMachineBuilder;
pub use template::{DefinitionCheck, MachineTemplateBuilder};

use crate::core::{AttributeSet, Curve, Transition};

/// Create a transition with a resolved curve.
///
/// # Example
///
/// ```
/// use blendstate::builder::eased;
/// use blendstate::core::Curve;
///
/// let transition = eased("standby", "present", 0.2, Curve::QuadraticEaseOut);
/// assert_eq!(transition.duration, 0.2);
/// ```
pub fn eased(from: &str, to: &str, seconds: f64, curve: Curve) -> Transition {
    Transition::new(from, to, seconds, curve)
}

/// Create a state attribute set holding a single scalar.
///
/// # Example
///
/// ```
/// use blendstate::builder::scalar_state;
///
/// let state = scalar_state("opacity", 0.5);
/// assert_eq!(state.get("opacity").and_then(|v| v.scalar()), Some(0.5));
/// ```
pub fn scalar_state(name: &str, value: f64) -> AttributeSet {
    AttributeSet::new().with(name, value)
}
