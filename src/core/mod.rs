//! Core types and the blending algebra.
//!
//! This module contains the pure part of the crate:
//! - Interpolation values built from weighted components
//! - Attribute sets with `scale` / `merge`
//! - Named states, transitions and easing curves
//! - Bounded settle history
//!
//! Nothing here performs I/O or holds mutable shared state.

mod attributes;
mod curve;
mod history;
mod state;
mod transition;
mod value;

pub use attributes::{merge, scale, AttributeSet};
pub use curve::Curve;
pub use history::{StateHistory, StateTransition, DEFAULT_HISTORY_LIMIT};
pub use state::NamedState;
pub use transition::{Transition, TransitionTable};
pub use value::{AttributeValue, Basis, Component};
