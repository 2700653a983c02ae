//! Blendstate: attribute state machines for UI elements
//!
//! An element declares a small set of named states, each a bag of numeric
//! attributes (opacity, color, offset, scale). Switching state blends the
//! element's attributes from where they are toward the target along an
//! easing curve, driven by the host's frame clock.
//!
//! The blending core is pure: attribute values are sequences of weighted
//! components, and `scale` / `merge` are plain functions over them. Side
//! effects happen only at the delegate boundary, where resolved attributes
//! are written to the element.
//!
//! # Core Concepts
//!
//! - **Attribute set**: name to interpolation value, closed under `scale` and `merge`
//! - **Template**: named states and eased transitions, shared between engines
//! - **Engine**: per-element clock; `drive(dt)` advances it and applies the blend
//! - **Trigger machine**: settling on any state immediately rebounds to a baseline
//!
//! # Example
//!
//! ```rust
//! use blendstate::{attributes, AttributeSet, StateMachineBuilder, StateMachineDelegate};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! #[derive(Default)]
//! struct Opacity(Vec<f64>);
//!
//! impl StateMachineDelegate for Opacity {
//!     fn apply(&mut self, attributes: &AttributeSet) {
//!         if let Some(value) = attributes.get("opacity").and_then(|v| v.scalar()) {
//!             self.0.push(value);
//!         }
//!     }
//! }
//!
//! let mut machine = StateMachineBuilder::new("standby")
//!     .state("standby", attributes! { "opacity" => 0.5 })
//!     .state("present", attributes! { "opacity" => 1.0 })
//!     .transition("standby", "present", 0.2, "linear")
//!     .build()?;
//!
//! let sink = Rc::new(RefCell::new(Opacity::default()));
//! machine.set_delegate(&sink);
//!
//! machine.set_state("present")?;
//! while machine.drive(0.1)? {}
//!
//! assert_eq!(sink.borrow().0, vec![0.75, 1.0]);
//! assert_eq!(machine.state(), "present");
//! # Ok::<(), blendstate::StateMachineError>(())
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod engine;
pub mod host;

// Re-export commonly used types
pub use builder::{MachineTemplateBuilder, StateMachineBuilder};
pub use checkpoint::{Checkpoint, CheckpointError};
pub use crate::core::{merge, scale, AttributeSet, AttributeValue, Basis, Curve};
pub use engine::{MachineTemplate, Rebound, StateMachine, StateMachineDelegate, StateMachineError};
