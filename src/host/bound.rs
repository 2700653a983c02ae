//! An element wired to its own engine.

use crate::engine::{StateMachine, StateMachineError};
use crate::host::definition::MachineDefinition;
use crate::host::element::{Element, ElementDelegate};
use crate::host::shared::SharedStateMachine;
use std::cell::RefCell;
use std::rc::Rc;

/// An element together with the engine animating it.
///
/// The element lives inside an [`ElementDelegate`] owned by this value; the
/// engine only holds a weak reference to it.
///
/// # Example
///
/// ```rust
/// use blendstate::core::AttributeValue;
/// use blendstate::host::{BoundElement, Element, MachineDefinition};
///
/// #[derive(Default)]
/// struct Button {
///     opacity: f64,
/// }
///
/// impl Element for Button {
///     fn set_attribute(&mut self, name: &str, value: &AttributeValue) -> bool {
///         match (name, value.scalar()) {
///             ("opacity", Some(v)) => {
///                 self.opacity = v;
///                 true
///             }
///             _ => false,
///         }
///     }
/// }
///
/// let definition = MachineDefinition::from_json(r#"{
///     "initial": "standby",
///     "states": { "standby": { "opacity": 0.5 }, "present": { "opacity": 1 } },
///     "transitions": [{ "from": "standby", "to": "present", "duration": 0.2 }]
/// }"#)?;
///
/// let button = BoundElement::from_definition(&definition, Button::default())?;
/// button.set_state("present")?;
/// button.update(0.1)?;
/// assert_eq!(button.with_element(|b| b.opacity)?, 0.75);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct BoundElement<E> {
    machine: SharedStateMachine,
    delegate: Rc<RefCell<ElementDelegate<E>>>,
}

impl<E: Element + 'static> BoundElement<E> {
    /// Wire `element` up as the delegate of `machine`.
    pub fn new(mut machine: StateMachine, element: E) -> Self {
        let delegate = Rc::new(RefCell::new(ElementDelegate::new(element)));
        machine.set_delegate(&delegate);
        Self {
            machine: SharedStateMachine::new(machine),
            delegate,
        }
    }

    pub fn from_definition(
        definition: &MachineDefinition,
        element: E,
    ) -> Result<Self, StateMachineError> {
        Ok(Self::new(definition.build()?, element))
    }

    /// Advance the engine by `dt` seconds. Returns `true` while animating.
    pub fn update(&self, dt: f64) -> Result<bool, StateMachineError> {
        self.machine.drive(dt)
    }

    pub fn set_state(&self, id: &str) -> Result<(), StateMachineError> {
        self.machine.set_state(id)
    }

    pub fn reset(&self, id: &str) -> Result<(), StateMachineError> {
        self.machine.reset(id)
    }

    pub fn state(&self) -> Result<String, StateMachineError> {
        self.machine.state()
    }

    /// Handle to the engine, for callbacks that need to switch states.
    pub fn machine(&self) -> &SharedStateMachine {
        &self.machine
    }

    pub fn with_element<T>(&self, f: impl FnOnce(&E) -> T) -> Result<T, StateMachineError> {
        let delegate = self
            .delegate
            .try_borrow()
            .map_err(|_| StateMachineError::Reentrant)?;
        Ok(f(delegate.element()))
    }

    pub fn with_element_mut<T>(
        &self,
        f: impl FnOnce(&mut E) -> T,
    ) -> Result<T, StateMachineError> {
        let mut delegate = self
            .delegate
            .try_borrow_mut()
            .map_err(|_| StateMachineError::Reentrant)?;
        Ok(f(delegate.element_mut()))
    }

    /// Attribute names the element has rejected so far.
    pub fn ignored_attributes(&self) -> Result<Vec<String>, StateMachineError> {
        let delegate = self
            .delegate
            .try_borrow()
            .map_err(|_| StateMachineError::Reentrant)?;
        Ok(delegate.ignored().map(str::to_string).collect())
    }
}
