//! Shared engine handle with re-entrancy detection.

use crate::engine::{StateMachine, StateMachineDelegate, StateMachineError};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::warn;

/// Cloneable handle to one engine, for hosts where several callbacks need to
/// reach the same element's machine.
///
/// Every call borrows the engine for its duration. A call that arrives while
/// the engine is already borrowed (typically a delegate calling back into the
/// machine that is applying to it) fails with
/// [`StateMachineError::Reentrant`] and changes nothing.
#[derive(Clone, Debug)]
pub struct SharedStateMachine {
    inner: Rc<RefCell<StateMachine>>,
}

impl SharedStateMachine {
    pub fn new(machine: StateMachine) -> Self {
        Self {
            inner: Rc::new(RefCell::new(machine)),
        }
    }

    pub fn drive(&self, dt: f64) -> Result<bool, StateMachineError> {
        self.with_mut(|machine| machine.drive(dt))
    }

    pub fn set_state(&self, id: &str) -> Result<(), StateMachineError> {
        self.with_mut(|machine| machine.set_state(id))
    }

    pub fn reset(&self, id: &str) -> Result<(), StateMachineError> {
        self.with_mut(|machine| machine.reset(id))
    }

    pub fn set_delegate<D>(&self, delegate: &Rc<RefCell<D>>) -> Result<(), StateMachineError>
    where
        D: StateMachineDelegate + 'static,
    {
        self.with_mut(|machine| {
            machine.set_delegate(delegate);
            Ok(())
        })
    }

    /// The settled state, or the state being transitioned toward.
    pub fn state(&self) -> Result<String, StateMachineError> {
        self.inspect(|machine| machine.state().to_string())
    }

    /// Run `f` against the engine without mutating it.
    pub fn inspect<T>(&self, f: impl FnOnce(&StateMachine) -> T) -> Result<T, StateMachineError> {
        let machine = self.inner.try_borrow().map_err(|_| {
            warn!("state machine inspected while being driven");
            StateMachineError::Reentrant
        })?;
        Ok(f(&machine))
    }

    fn with_mut<T>(
        &self,
        f: impl FnOnce(&mut StateMachine) -> Result<T, StateMachineError>,
    ) -> Result<T, StateMachineError> {
        let mut machine = self.inner.try_borrow_mut().map_err(|_| {
            warn!("re-entrant call into state machine rejected");
            StateMachineError::Reentrant
        })?;
        f(&mut machine)
    }
}

impl From<StateMachine> for SharedStateMachine {
    fn from(machine: StateMachine) -> Self {
        Self::new(machine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::StateMachineBuilder;
    use crate::core::AttributeSet;

    fn machine() -> SharedStateMachine {
        StateMachineBuilder::new("off")
            .state("off", AttributeSet::new().with("glow", 0.0))
            .state("on", AttributeSet::new().with("glow", 1.0))
            .transition("off", "on", 0.1, "linear")
            .build()
            .unwrap()
            .into()
    }

    /// Delegate that tries to switch the machine it is applied from.
    struct Meddler {
        machine: SharedStateMachine,
        outcomes: Vec<Result<(), StateMachineError>>,
    }

    impl StateMachineDelegate for Meddler {
        fn apply(&mut self, _attributes: &AttributeSet) {
            self.outcomes.push(self.machine.set_state("off"));
        }
    }

    #[test]
    fn clones_share_one_engine() {
        let first = machine();
        let second = first.clone();

        first.set_state("on").unwrap();
        assert_eq!(second.state().unwrap(), "on");
        assert!(second.drive(0.05).unwrap());
        assert_eq!(first.inspect(|m| m.elapsed()).unwrap(), 0.05);
    }

    #[test]
    fn delegate_calling_back_is_rejected() {
        let shared = machine();
        let meddler = Rc::new(RefCell::new(Meddler {
            machine: shared.clone(),
            outcomes: Vec::new(),
        }));
        shared.set_delegate(&meddler).unwrap();

        shared.set_state("on").unwrap();
        assert!(shared.drive(0.05).unwrap());

        assert_eq!(
            meddler.borrow().outcomes,
            vec![Err(StateMachineError::Reentrant)]
        );
        assert_eq!(shared.state().unwrap(), "on");
    }
}
