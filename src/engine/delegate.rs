//! The apply boundary between an engine and the element it animates.

use crate::core::AttributeSet;
use std::cell::RefCell;
use std::rc::Weak;

/// Sink for resolved attribute values.
///
/// `apply` is called synchronously from inside
/// [`StateMachine::drive`](crate::StateMachine::drive), on the thread that
/// drives the engine, once per frame (twice when a trigger state rebounds).
/// Implementations write each attribute onto the element's real properties and
/// ignore names they do not recognise.
///
/// A delegate must not call back into the engine that is applying to it.
pub trait StateMachineDelegate {
    fn apply(&mut self, attributes: &AttributeSet);
}

/// Non-owning handle the engine keeps to its delegate.
pub(crate) type DelegateHandle = Weak<RefCell<dyn StateMachineDelegate>>;
