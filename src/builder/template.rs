//! Builder for shared machine templates.

use crate::core::{AttributeSet, Curve, NamedState, Transition, DEFAULT_HISTORY_LIMIT};
use crate::engine::{MachineTemplate, Rebound, StateMachineError};
use std::collections::HashSet;
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::{debug, warn};

/// Result of checking a definition: every problem at once, not just the first.
pub type DefinitionCheck = Validation<(), NonEmptyVec<StateMachineError>>;

/// A transition as declared, before its curve name is resolved.
#[derive(Clone, Debug)]
struct PendingTransition {
    from: String,
    to: String,
    duration: f64,
    curve: String,
}

/// Builder for [`MachineTemplate`]s with a fluent API.
///
/// # Example
///
/// ```rust
/// use blendstate::attributes;
/// use blendstate::builder::MachineTemplateBuilder;
///
/// let template = MachineTemplateBuilder::new()
///     .state("standby", attributes! { "opacity" => 0.5 })
///     .state("present", attributes! { "opacity" => 1.0 })
///     .transition("standby", "present", 0.2, "quadratic-ease-out")
///     .build()?;
///
/// assert!(template.has_state("present"));
/// # Ok::<(), blendstate::StateMachineError>(())
/// ```
#[derive(Clone, Debug)]
pub struct MachineTemplateBuilder {
    states: Vec<NamedState>,
    transitions: Vec<PendingTransition>,
    trigger: Option<Rebound>,
    history_limit: usize,
}

impl MachineTemplateBuilder {
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            transitions: Vec::new(),
            trigger: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Define a state. Defining the same id twice keeps the later definition.
    pub fn state(self, id: impl Into<String>, attributes: AttributeSet) -> Self {
        self.named_state(NamedState::new(id, attributes))
    }

    pub fn named_state(mut self, state: NamedState) -> Self {
        self.states.push(state);
        self
    }

    /// Define several states at once.
    pub fn states(mut self, states: impl IntoIterator<Item = NamedState>) -> Self {
        self.states.extend(states);
        self
    }

    /// Declare a transition by curve name.
    ///
    /// The name is resolved when the template is validated; an unknown name
    /// fails the build with [`StateMachineError::UnknownCurve`].
    pub fn transition(
        mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        seconds: f64,
        curve: impl Into<String>,
    ) -> Self {
        self.transitions.push(PendingTransition {
            from: from.into(),
            to: to.into(),
            duration: seconds,
            curve: curve.into(),
        });
        self
    }

    /// Add a transition whose curve is already resolved.
    pub fn add_transition(self, transition: Transition) -> Self {
        let curve = transition.curve.name();
        self.transition(transition.from, transition.to, transition.duration, curve)
    }

    /// Make this a trigger machine that rebounds as described by `rebound`.
    pub fn trigger(mut self, rebound: Rebound) -> Self {
        self.trigger = Some(rebound);
        self
    }

    /// Number of settle records each engine keeps.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub(crate) fn state_ids(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(NamedState::id)
    }

    /// Check the definition, accumulating ALL problems.
    pub fn validate(&self) -> DefinitionCheck {
        let ids: HashSet<&str> = self.states.iter().map(NamedState::id).collect();
        let mut checks: Vec<DefinitionCheck> = Vec::new();

        for transition in &self.transitions {
            checks.push(check_state(&ids, &transition.from));
            checks.push(check_state(&ids, &transition.to));

            let curve = if Curve::from_name(&transition.curve).is_some() {
                Validation::success(())
            } else {
                Validation::fail(StateMachineError::UnknownCurve {
                    name: transition.curve.clone(),
                })
            };
            checks.push(curve);

            let duration = if transition.duration.is_finite() && transition.duration >= 0.0 {
                Validation::success(())
            } else {
                Validation::fail(StateMachineError::InvalidDuration {
                    from: transition.from.clone(),
                    to: transition.to.clone(),
                    duration: transition.duration,
                })
            };
            checks.push(duration);
        }

        if let Some(Rebound::State(baseline)) = &self.trigger {
            checks.push(check_state(&ids, baseline));
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Build the template.
    ///
    /// Every problem found is logged; the first one is returned.
    pub fn build(self) -> Result<Arc<MachineTemplate>, StateMachineError> {
        reject_failures(self.validate())?;

        let states = self
            .states
            .into_iter()
            .map(|state| (state.id().to_string(), state))
            .collect();
        let transitions = self
            .transitions
            .into_iter()
            .filter_map(|t| {
                Curve::from_name(&t.curve).map(|curve| Transition::new(t.from, t.to, t.duration, curve))
            })
            .collect();

        let template = MachineTemplate {
            states,
            transitions,
            trigger: self.trigger,
            history_limit: self.history_limit,
        };
        debug!(
            states = template.states.len(),
            transitions = template.transitions.len(),
            trigger = template.is_trigger(),
            "built state machine template"
        );
        Ok(Arc::new(template))
    }
}

impl Default for MachineTemplateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn check_state(ids: &HashSet<&str>, id: &str) -> DefinitionCheck {
    if ids.contains(id) {
        Validation::success(())
    } else {
        Validation::fail(StateMachineError::InvalidState { id: id.to_string() })
    }
}

/// Turn a failed check into its first error, logging every error found.
pub(crate) fn reject_failures(check: DefinitionCheck) -> Result<(), StateMachineError> {
    if let Validation::Failure(errors) = check {
        for error in errors.iter() {
            warn!(%error, "rejected state machine definition");
        }
        if let Some(first) = errors.iter().next() {
            return Err(first.clone());
        }
    }
    Ok(())
}
