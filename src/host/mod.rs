//! Host-side glue: elements, shared engines and declarative definitions.
//!
//! The engine itself knows nothing about the UI it animates. This module is
//! the thin imperative shell a host toolkit plugs into:
//!
//! - [`Element`]: anything whose properties can be set by attribute name
//! - [`ElementDelegate`]: delegate that writes resolved attributes to an element
//! - [`SharedStateMachine`]: cloneable engine handle that rejects re-entrant calls
//! - [`BoundElement`]: an element wired to its own engine
//! - [`MachineDefinition`]: serde description of a machine, loadable from JSON

mod bound;
pub mod definition;
mod element;
mod shared;

pub use bound::BoundElement;
pub use definition::{parse_duration, parse_value, MachineDefinition};
pub use element::{Element, ElementDelegate};
pub use shared::SharedStateMachine;
