//! The attribute state machine engine.

use crate::core::{merge, scale, AttributeSet, Curve, StateHistory, StateTransition};
use crate::engine::delegate::{DelegateHandle, StateMachineDelegate};
use crate::engine::error::StateMachineError;
use crate::engine::template::{MachineTemplate, Rebound};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// The transition an engine is currently blending along.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActiveTransition {
    /// Seconds, always > 0
    pub duration: f64,
    pub curve: Curve,
}

/// Drives one element's attributes between the states of a template.
///
/// The engine owns no timer: the host calls [`drive`](Self::drive) once per
/// frame with the elapsed time, and the engine pushes the resolved attributes
/// to its delegate.
///
/// # Example
///
/// ```rust
/// use blendstate::{attributes, StateMachineBuilder};
///
/// let mut machine = StateMachineBuilder::new("standby")
///     .state("standby", attributes! { "opacity" => 0.5 })
///     .state("present", attributes! { "opacity" => 1.0 })
///     .transition("standby", "present", 0.2, "linear")
///     .build()?;
///
/// machine.set_state("present")?;
/// assert!(machine.drive(0.1)?);
/// assert_eq!(
///     machine.resolved_attributes().get("opacity").and_then(|v| v.scalar()),
///     Some(0.75)
/// );
///
/// assert!(!machine.drive(0.1)?);
/// assert_eq!(machine.state(), "present");
/// # Ok::<(), blendstate::StateMachineError>(())
/// ```
#[derive(Default)]
pub struct StateMachine {
    pub(crate) template: Option<Arc<MachineTemplate>>,
    /// Last settled state
    pub(crate) current: String,
    /// State being approached (equal to `current` once settled)
    pub(crate) target: String,
    pub(crate) elapsed: f64,
    pub(crate) active: Option<ActiveTransition>,
    /// Blend origin for the active transition
    pub(crate) from: AttributeSet,
    /// A move toward `target` still has to be recorded as settled
    pub(crate) pending_settle: bool,
    pub(crate) redirected: bool,
    /// The move in flight is a trigger rebound
    pub(crate) rebounding: bool,
    /// Baseline of the trigger rebound in progress, kept across redirects
    pub(crate) rebound_origin: Option<String>,
    pub(crate) history: StateHistory,
    delegate: Option<DelegateHandle>,
}

impl StateMachine {
    /// Create an engine settled on `initial`.
    ///
    /// Fails with [`StateMachineError::InvalidState`] if `initial` is not a
    /// state of `template`.
    pub fn new(template: Arc<MachineTemplate>, initial: &str) -> Result<Self, StateMachineError> {
        let Some(state) = template.state(initial) else {
            return Err(StateMachineError::InvalidState {
                id: initial.to_string(),
            });
        };

        Ok(Self {
            current: initial.to_string(),
            target: initial.to_string(),
            from: state.attributes().clone(),
            history: StateHistory::with_limit(template.history_limit()),
            template: Some(template),
            ..Self::default()
        })
    }

    /// Register the delegate that receives resolved attributes.
    ///
    /// Only a weak reference is kept; the caller owns the delegate. Replacing
    /// the delegate mid-transition takes effect on the next `drive`.
    pub fn set_delegate<D>(&mut self, delegate: &Rc<RefCell<D>>)
    where
        D: StateMachineDelegate + 'static,
    {
        let handle: Weak<RefCell<D>> = Rc::downgrade(delegate);
        let handle: DelegateHandle = handle;
        self.delegate = Some(handle);
    }

    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    pub fn has_delegate(&self) -> bool {
        self.delegate
            .as_ref()
            .is_some_and(|handle| handle.strong_count() > 0)
    }

    /// Request a move to `id`.
    ///
    /// Blends along the transition from the state the engine is settled on
    /// or heading toward, if one with a positive duration exists; otherwise
    /// jumps on the next `drive`. Requesting the state already being
    /// approached is a no-op. A move requested mid-transition starts from the
    /// currently blended attributes, so the output does not jump.
    pub fn set_state(&mut self, id: &str) -> Result<(), StateMachineError> {
        let template = self.bound_template(id)?;
        if id == self.target {
            return Ok(());
        }

        self.rebounding = false;
        self.begin(&template, id);
        Ok(())
    }

    /// Force the engine onto `id`, discarding any blend in flight.
    ///
    /// Nothing is recorded in the history and no trigger fires; the next
    /// `drive` applies `id`'s attributes.
    pub fn reset(&mut self, id: &str) -> Result<(), StateMachineError> {
        let template = self.bound_template(id)?;

        debug!(state = id, "resetting state machine");
        self.current = id.to_string();
        self.target = id.to_string();
        self.elapsed = 0.0;
        self.active = None;
        self.from = template.attributes_of(id).clone();
        self.pending_settle = false;
        self.redirected = false;
        self.rebounding = false;
        self.rebound_origin = None;
        Ok(())
    }

    /// Advance time by `dt` seconds and apply the resolved attributes.
    ///
    /// Returns `true` while a transition is still in flight, `false` once
    /// settled. Fails only with [`StateMachineError::NotInitialized`] on an
    /// engine that was never bound to a template.
    pub fn drive(&mut self, dt: f64) -> Result<bool, StateMachineError> {
        let template = self
            .template
            .clone()
            .ok_or(StateMachineError::NotInitialized)?;
        let dt = if dt.is_nan() { 0.0 } else { dt };

        let mut settled_duration = 0.0;
        if let Some(active) = self.active {
            self.elapsed = (self.elapsed + dt).clamp(0.0, active.duration);
            if self.elapsed < active.duration {
                trace!(
                    target_state = %self.target,
                    elapsed = self.elapsed,
                    duration = active.duration,
                    "driving transition"
                );
                let resolved = self.resolve(&template);
                self.notify(&resolved);
                return Ok(true);
            }
            self.active = None;
            self.pending_settle = true;
            settled_duration = active.duration;
        }

        self.notify(template.attributes_of(&self.target));
        if !self.pending_settle {
            return Ok(false);
        }

        let rebounding = std::mem::take(&mut self.rebounding);
        let previous = self.settle(settled_duration);
        if rebounding {
            self.rebound_origin = None;
            return Ok(false);
        }

        // A redirect during a rebound still returns to the original baseline.
        let origin = self.rebound_origin.take().unwrap_or(previous);
        let Some(rebound) = self.rebound_target(&template, origin) else {
            return Ok(false);
        };

        debug!(trigger = %self.current, rebound = %rebound, "trigger state fired");
        self.rebounding = true;
        self.begin(&template, &rebound);
        if self.active.is_some() {
            self.rebound_origin = Some(rebound);
            let resolved = self.resolve(&template);
            self.notify(&resolved);
            return Ok(true);
        }

        self.rebounding = false;
        self.notify(template.attributes_of(&self.target));
        self.settle(0.0);
        Ok(false)
    }

    /// The settled state, or the state being transitioned toward.
    pub fn state(&self) -> &str {
        &self.target
    }

    /// The last state the engine settled on.
    pub fn current_state(&self) -> &str {
        &self.current
    }

    pub fn has_state(&self, id: &str) -> bool {
        self.template
            .as_ref()
            .is_some_and(|template| template.has_state(id))
    }

    /// True for every defined state of a trigger machine.
    pub fn has_trigger(&self, id: &str) -> bool {
        self.template
            .as_ref()
            .is_some_and(|template| template.is_trigger() && template.has_state(id))
    }

    pub fn is_initialized(&self) -> bool {
        self.template.is_some()
    }

    pub fn is_transitioning(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_transition(&self) -> Option<&ActiveTransition> {
        self.active.as_ref()
    }

    /// Seconds spent on the active transition so far.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    pub fn template(&self) -> Option<&Arc<MachineTemplate>> {
        self.template.as_ref()
    }

    /// The attributes the engine would apply right now.
    pub fn resolved_attributes(&self) -> AttributeSet {
        match &self.template {
            Some(template) => self.resolve(template),
            None => AttributeSet::new(),
        }
    }

    fn bound_template(&self, id: &str) -> Result<Arc<MachineTemplate>, StateMachineError> {
        match &self.template {
            Some(template) if template.has_state(id) => Ok(Arc::clone(template)),
            _ => {
                debug!(state = id, "rejected request for unknown state");
                Err(StateMachineError::UnknownState { id: id.to_string() })
            }
        }
    }

    fn resolve(&self, template: &MachineTemplate) -> AttributeSet {
        let target = template.attributes_of(&self.target);
        match &self.active {
            Some(active) => {
                let t = active.curve.apply(self.elapsed / active.duration);
                merge(&scale(&self.from, 1.0 - t), &scale(target, t))
            }
            None => target.clone(),
        }
    }

    /// Start moving toward `id` from whatever is resolved right now.
    fn begin(&mut self, template: &MachineTemplate, id: &str) {
        let redirected = self.active.is_some();
        let snapshot = self.resolve(template).collapse();
        let transition = template
            .find_transition(&self.target, id)
            .filter(|transition| !transition.is_instant());

        match transition {
            Some(transition) => {
                debug!(
                    from = %self.target,
                    to = id,
                    duration = transition.duration,
                    curve = transition.curve.name(),
                    redirected,
                    "starting transition"
                );
                self.active = Some(ActiveTransition {
                    duration: transition.duration,
                    curve: transition.curve,
                });
                self.pending_settle = false;
            }
            None => {
                debug!(from = %self.target, to = id, redirected, "jumping to state");
                self.active = None;
                self.pending_settle = redirected || id != self.current;
            }
        }

        self.from = snapshot;
        self.elapsed = 0.0;
        self.redirected |= redirected;
        self.target = id.to_string();
    }

    /// Mark the target as reached and record it. Returns the state settled on
    /// before.
    fn settle(&mut self, duration: f64) -> String {
        self.pending_settle = false;
        self.elapsed = 0.0;
        let previous = std::mem::replace(&mut self.current, self.target.clone());

        debug!(from = %previous, to = %self.current, "settled");
        self.history.record(StateTransition {
            from: previous.clone(),
            to: self.current.clone(),
            timestamp: Utc::now(),
            duration,
            redirected: std::mem::take(&mut self.redirected),
        });
        previous
    }

    fn rebound_target(&self, template: &MachineTemplate, origin: String) -> Option<String> {
        let target = match template.trigger()? {
            Rebound::Previous => origin,
            Rebound::State(id) => id.clone(),
        };
        (target != self.current && template.has_state(&target)).then_some(target)
    }

    fn notify(&mut self, attributes: &AttributeSet) {
        let Some(handle) = &self.delegate else {
            return;
        };
        let Some(delegate) = handle.upgrade() else {
            warn!("delegate was dropped; detaching it");
            self.delegate = None;
            return;
        };
        let borrowed = delegate.try_borrow_mut();
        match borrowed {
            Ok(mut delegate) => delegate.apply(attributes),
            Err(_) => warn!("delegate is already borrowed; skipping apply"),
        };
    }
}

impl fmt::Debug for StateMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("current", &self.current)
            .field("target", &self.target)
            .field("elapsed", &self.elapsed)
            .field("active", &self.active)
            .field("has_delegate", &self.has_delegate())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::StateMachineBuilder;
    use crate::core::AttributeValue;

    #[derive(Default)]
    struct Recorder {
        applied: Vec<AttributeSet>,
    }

    impl StateMachineDelegate for Recorder {
        fn apply(&mut self, attributes: &AttributeSet) {
            self.applied.push(attributes.clone());
        }
    }

    impl Recorder {
        fn opacity(&self, index: usize) -> Option<f64> {
            self.applied
                .get(index)?
                .get("opacity")
                .and_then(AttributeValue::scalar)
        }
    }

    fn opacity(set: &AttributeSet) -> Option<f64> {
        set.get("opacity").and_then(AttributeValue::scalar)
    }

    fn fade(curve: &str) -> StateMachine {
        StateMachineBuilder::new("standby")
            .state("standby", AttributeSet::new().with("opacity", 0.5))
            .state("present", AttributeSet::new().with("opacity", 1.0))
            .state("gone", AttributeSet::new().with("opacity", 0.0))
            .transition("standby", "present", 0.2, curve)
            .transition("present", "gone", 0.2, curve)
            .transition("present", "standby", 0.4, "linear")
            .build()
            .unwrap()
    }

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("attribute present");
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn linear_transition_blends_then_settles() {
        let mut machine = fade("linear");
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        machine.set_delegate(&recorder);

        machine.set_state("present").unwrap();
        assert!(machine.drive(0.1).unwrap());
        assert_close(recorder.borrow().opacity(0), 0.75);
        assert_eq!(machine.state(), "present");
        assert_eq!(machine.current_state(), "standby");

        assert!(!machine.drive(0.1).unwrap());
        assert_eq!(recorder.borrow().opacity(1), Some(1.0));
        assert_eq!(machine.state(), "present");
        assert_eq!(machine.current_state(), "present");
    }

    #[test]
    fn quadratic_ease_in_shapes_progress() {
        let mut machine = fade("quadratic-ease-in");
        machine.set_state("present").unwrap();
        assert!(machine.drive(0.1).unwrap());
        assert_close(opacity(&machine.resolved_attributes()), 0.625);
    }

    #[test]
    fn unknown_state_leaves_machine_untouched() {
        let mut machine = fade("linear");
        machine.set_state("present").unwrap();
        machine.drive(0.05).unwrap();

        let before = machine.resolved_attributes();
        let result = machine.set_state("nonexistent");

        assert!(matches!(
            result,
            Err(StateMachineError::UnknownState { ref id }) if id == "nonexistent"
        ));
        assert_eq!(machine.state(), "present");
        assert_eq!(machine.elapsed(), 0.05);
        assert_eq!(machine.resolved_attributes(), before);
    }

    #[test]
    fn same_state_request_is_noop() {
        let mut machine = fade("linear");
        machine.set_state("standby").unwrap();
        assert!(!machine.is_transitioning());
        assert!(!machine.drive(0.1).unwrap());
        assert!(machine.history().is_empty());
    }

    #[test]
    fn missing_transition_jumps_in_one_drive() {
        let mut machine = fade("linear");
        machine.set_state("gone").unwrap();
        assert!(!machine.is_transitioning());
        assert_eq!(machine.state(), "gone");

        assert!(!machine.drive(0.0).unwrap());
        assert_eq!(opacity(&machine.resolved_attributes()), Some(0.0));
        assert_eq!(machine.current_state(), "gone");
        assert_eq!(machine.history().last().map(|t| t.duration), Some(0.0));
    }

    #[test]
    fn zero_duration_transition_settles_immediately() {
        let mut machine = StateMachineBuilder::new("a")
            .state("a", AttributeSet::new().with("x", 0.0))
            .state("b", AttributeSet::new().with("x", 10.0))
            .transition("a", "b", 0.0, "linear")
            .build()
            .unwrap();

        machine.set_state("b").unwrap();
        assert!(!machine.drive(0.001).unwrap());
        assert_eq!(machine.current_state(), "b");
    }

    #[test]
    fn redirect_is_continuous() {
        let mut machine = fade("quadratic-ease-out");
        machine.set_state("present").unwrap();
        machine.drive(0.07).unwrap();

        let before = opacity(&machine.resolved_attributes());
        machine.set_state("standby").unwrap();
        let after = opacity(&machine.resolved_attributes());

        assert_eq!(before, after);
        assert!(machine.is_transitioning());
        assert_eq!(machine.elapsed(), 0.0);
        assert_eq!(
            machine.active_transition().map(|t| t.duration),
            Some(0.4)
        );
    }

    #[test]
    fn redirect_settles_exactly_and_is_recorded() {
        let mut machine = fade("linear");
        machine.set_state("present").unwrap();
        machine.drive(0.1).unwrap();
        machine.set_state("standby").unwrap();

        while machine.drive(0.05).unwrap() {}

        assert_eq!(opacity(&machine.resolved_attributes()), Some(0.5));
        let record = machine.history().last().cloned().unwrap();
        assert_eq!(record.from, "standby");
        assert_eq!(record.to, "standby");
        assert!(record.redirected);
    }

    #[test]
    fn reset_discards_blend() {
        let mut machine = fade("linear");
        machine.set_state("present").unwrap();
        machine.drive(0.1).unwrap();

        machine.reset("gone").unwrap();
        assert!(!machine.is_transitioning());
        assert_eq!(machine.state(), "gone");
        assert_eq!(machine.current_state(), "gone");
        assert!(!machine.drive(0.1).unwrap());
        assert_eq!(opacity(&machine.resolved_attributes()), Some(0.0));
        assert!(machine.history().is_empty());
    }

    #[test]
    fn reset_to_unknown_state_fails() {
        let mut machine = fade("linear");
        assert!(matches!(
            machine.reset("nowhere"),
            Err(StateMachineError::UnknownState { .. })
        ));
        assert_eq!(machine.state(), "standby");
    }

    #[test]
    fn unbound_machine_reports_not_initialized() {
        let mut machine = StateMachine::default();
        assert_eq!(machine.drive(0.1), Err(StateMachineError::NotInitialized));
        assert!(!machine.has_state("anything"));
        assert!(matches!(
            machine.set_state("anything"),
            Err(StateMachineError::UnknownState { .. })
        ));
    }

    #[test]
    fn drive_applies_exactly_once_per_call() {
        let mut machine = fade("linear");
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        machine.set_delegate(&recorder);

        machine.drive(0.016).unwrap();
        machine.set_state("present").unwrap();
        machine.drive(0.05).unwrap();
        machine.drive(0.05).unwrap();

        assert_eq!(recorder.borrow().applied.len(), 3);
        assert_eq!(recorder.borrow().opacity(0), Some(0.5));
    }

    #[test]
    fn replaced_delegate_receives_next_frame() {
        let mut machine = fade("linear");
        let first = Rc::new(RefCell::new(Recorder::default()));
        let second = Rc::new(RefCell::new(Recorder::default()));

        machine.set_delegate(&first);
        machine.set_state("present").unwrap();
        machine.drive(0.05).unwrap();
        machine.set_delegate(&second);
        machine.drive(0.05).unwrap();

        assert_eq!(first.borrow().applied.len(), 1);
        assert_eq!(second.borrow().applied.len(), 1);
    }

    #[test]
    fn dropped_delegate_is_skipped() {
        let mut machine = fade("linear");
        {
            let recorder = Rc::new(RefCell::new(Recorder::default()));
            machine.set_delegate(&recorder);
            assert!(machine.has_delegate());
        }
        assert!(!machine.has_delegate());
        assert!(!machine.drive(0.1).unwrap());
    }

    #[test]
    fn negative_delta_is_clamped_at_zero() {
        let mut machine = fade("linear");
        machine.set_state("present").unwrap();
        assert!(machine.drive(-1.0).unwrap());
        assert_eq!(machine.elapsed(), 0.0);
        assert_eq!(opacity(&machine.resolved_attributes()), Some(0.5));
    }

    #[test]
    fn trigger_fires_and_rebounds_to_baseline() {
        let mut machine = StateMachineBuilder::new("idle")
            .state("idle", AttributeSet::new().with("scale", 1.0))
            .state("pressed", AttributeSet::new().with("scale", 0.9))
            .trigger(Rebound::State("idle".to_string()))
            .build()
            .unwrap();
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        machine.set_delegate(&recorder);

        assert!(machine.has_trigger("pressed"));
        assert!(!machine.has_trigger("missing"));

        machine.set_state("pressed").unwrap();
        assert!(!machine.drive(0.016).unwrap());

        let applied = &recorder.borrow().applied;
        assert_eq!(applied.len(), 2);
        assert_eq!(applied[0].get("scale").and_then(|v| v.scalar()), Some(0.9));
        assert_eq!(applied[1].get("scale").and_then(|v| v.scalar()), Some(1.0));
        assert_eq!(machine.state(), "idle");
        assert_eq!(
            machine.history().get_path(),
            vec!["idle", "pressed", "idle"]
        );
    }

    #[test]
    fn trigger_rebound_can_animate() {
        let mut machine = StateMachineBuilder::new("idle")
            .state("idle", AttributeSet::new().with("glow", 0.0))
            .state("flash", AttributeSet::new().with("glow", 1.0))
            .transition("flash", "idle", 0.5, "linear")
            .trigger(Rebound::Previous)
            .build()
            .unwrap();

        machine.set_state("flash").unwrap();
        assert!(machine.drive(0.0).unwrap());
        assert_eq!(machine.state(), "idle");
        assert_eq!(machine.current_state(), "flash");

        assert!(machine.drive(0.25).unwrap());
        assert!(!machine.drive(0.25).unwrap());
        assert_eq!(machine.current_state(), "idle");
        assert_eq!(machine.history().len(), 2);
    }

    #[test]
    fn non_trigger_machine_has_no_triggers() {
        let machine = fade("linear");
        assert!(machine.has_state("present"));
        assert!(!machine.has_trigger("present"));
    }

    #[test]
    fn redirect_during_rebound_returns_to_original_baseline() {
        let mut machine = StateMachineBuilder::new("idle")
            .state("idle", AttributeSet::new().with("glow", 0.0))
            .state("a", AttributeSet::new().with("glow", 1.0))
            .state("b", AttributeSet::new().with("glow", 0.5))
            .transition("a", "idle", 0.5, "linear")
            .trigger(Rebound::Previous)
            .build()
            .unwrap();

        machine.set_state("a").unwrap();
        assert!(machine.drive(0.0).unwrap());
        machine.set_state("b").unwrap();
        assert!(!machine.drive(0.0).unwrap());

        for _ in 0..5 {
            assert!(!machine.drive(0.1).unwrap());
        }
        assert_eq!(machine.state(), "idle");
        assert_eq!(machine.current_state(), "idle");
        assert_eq!(machine.history().get_path(), vec!["idle", "a", "b", "idle"]);
    }

    fn sparse() -> StateMachine {
        StateMachineBuilder::new("bare")
            .state("bare", AttributeSet::new().with("opacity", 0.0))
            .state(
                "lit",
                AttributeSet::new().with("opacity", 1.0).with("glow", 0.8),
            )
            .state(
                "dim",
                AttributeSet::new().with("opacity", 0.5).with("shadow", 0.4),
            )
            .transition("bare", "lit", 0.2, "linear")
            .transition("lit", "bare", 0.2, "linear")
            .transition("lit", "dim", 0.2, "linear")
            .build()
            .unwrap()
    }

    fn scalar(set: &AttributeSet, name: &str) -> Option<f64> {
        set.get(name).and_then(AttributeValue::scalar)
    }

    #[test]
    fn target_only_attribute_blends_up_from_zero() {
        let mut machine = sparse();
        machine.set_state("lit").unwrap();
        machine.drive(0.1).unwrap();

        let resolved = machine.resolved_attributes();
        assert_eq!(scalar(&resolved, "glow"), Some(0.4));
        assert_eq!(scalar(&resolved, "opacity"), Some(0.5));

        machine.drive(0.1).unwrap();
        assert_eq!(scalar(&machine.resolved_attributes(), "glow"), Some(0.8));
    }

    #[test]
    fn origin_only_attribute_fades_then_disappears() {
        let mut machine = sparse();
        machine.set_state("lit").unwrap();
        while machine.drive(0.1).unwrap() {}

        machine.set_state("bare").unwrap();
        machine.drive(0.1).unwrap();
        assert_eq!(scalar(&machine.resolved_attributes(), "glow"), Some(0.4));

        assert!(!machine.drive(0.1).unwrap());
        let settled = machine.resolved_attributes();
        assert!(!settled.contains("glow"));
        assert_eq!(scalar(&settled, "opacity"), Some(0.0));
    }

    #[test]
    fn redirect_introduces_new_attribute_at_zero() {
        let mut machine = sparse();
        machine.set_state("lit").unwrap();
        machine.drive(0.1).unwrap();

        machine.set_state("dim").unwrap();
        let redirected = machine.resolved_attributes();
        assert_eq!(scalar(&redirected, "shadow"), Some(0.0));
        assert_eq!(scalar(&redirected, "glow"), Some(0.4));

        machine.drive(0.1).unwrap();
        let halfway = machine.resolved_attributes();
        assert_eq!(scalar(&halfway, "shadow"), Some(0.2));
        assert_eq!(scalar(&halfway, "glow"), Some(0.2));

        assert!(!machine.drive(0.1).unwrap());
        let settled = machine.resolved_attributes();
        assert!(!settled.contains("glow"));
        assert_eq!(scalar(&settled, "shadow"), Some(0.4));
    }

    #[test]
    fn dropped_delegate_is_detached_on_next_apply() {
        let mut machine = fade("linear");
        {
            let recorder = Rc::new(RefCell::new(Recorder::default()));
            machine.set_delegate(&recorder);
        }
        assert!(machine.delegate.is_some());

        machine.drive(0.016).unwrap();
        assert!(machine.delegate.is_none());
    }
}
