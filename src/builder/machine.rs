//! Builder for constructing a single engine.

use crate::builder::template::{check_state, reject_failures, DefinitionCheck, MachineTemplateBuilder};
use crate::core::{AttributeSet, NamedState, Transition};
use crate::engine::{Rebound, StateMachine, StateMachineError};
use std::collections::HashSet;
use stillwater::validation::Validation;

/// Builder for a [`StateMachine`] together with its own template.
///
/// Use [`MachineTemplateBuilder`] instead when several engines should share
/// one template.
#[derive(Clone, Debug)]
pub struct StateMachineBuilder {
    initial: String,
    template: MachineTemplateBuilder,
}

impl StateMachineBuilder {
    /// Create a builder for a machine that starts settled on `initial`.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            initial: initial.into(),
            template: MachineTemplateBuilder::new(),
        }
    }

    pub fn state(mut self, id: impl Into<String>, attributes: AttributeSet) -> Self {
        self.template = self.template.state(id, attributes);
        self
    }

    pub fn named_state(mut self, state: NamedState) -> Self {
        self.template = self.template.named_state(state);
        self
    }

    pub fn transition(
        mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        seconds: f64,
        curve: impl Into<String>,
    ) -> Self {
        self.template = self.template.transition(from, to, seconds, curve);
        self
    }

    pub fn add_transition(mut self, transition: Transition) -> Self {
        self.template = self.template.add_transition(transition);
        self
    }

    pub fn trigger(mut self, rebound: Rebound) -> Self {
        self.template = self.template.trigger(rebound);
        self
    }

    pub fn history_limit(mut self, limit: usize) -> Self {
        self.template = self.template.history_limit(limit);
        self
    }

    /// Check the definition and the initial state, accumulating ALL problems.
    pub fn validate(&self) -> DefinitionCheck {
        let template = self.template.validate();
        let initial = {
            let ids: HashSet<&str> = self.template.state_ids().collect();
            check_state(&ids, &self.initial)
        };
        Validation::all_vec(vec![template, initial]).map(|_| ())
    }

    /// Build the machine, settled on the initial state.
    pub fn build(self) -> Result<StateMachine, StateMachineError> {
        reject_failures(self.validate())?;
        let template = self.template.build()?;
        StateMachine::new(template, &self.initial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_validates_initial_state() {
        let result = StateMachineBuilder::new("missing")
            .state("standby", AttributeSet::new())
            .build();

        assert!(matches!(
            result,
            Err(StateMachineError::InvalidState { ref id }) if id == "missing"
        ));
    }

    #[test]
    fn validate_reports_initial_alongside_other_problems() {
        let builder = StateMachineBuilder::new("missing")
            .state("standby", AttributeSet::new())
            .transition("standby", "standby", 0.1, "wobble");

        match builder.validate() {
            Validation::Failure(errors) => assert_eq!(errors.len(), 2),
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn fluent_api_builds_machine() {
        let machine = StateMachineBuilder::new("standby")
            .state("standby", AttributeSet::new().with("opacity", 0.5))
            .state("present", AttributeSet::new().with("opacity", 1.0))
            .transition("standby", "present", 0.2, "linear")
            .build()
            .unwrap();

        assert_eq!(machine.state(), "standby");
        assert!(machine.has_state("present"));
        assert!(!machine.is_transitioning());
    }

    #[test]
    fn machine_without_transitions_is_valid() {
        let machine = StateMachineBuilder::new("only")
            .state("only", AttributeSet::new())
            .build();
        assert!(machine.is_ok());
    }
}
