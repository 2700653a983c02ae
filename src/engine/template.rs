//! Shared, read-only machine descriptions.

use crate::core::{AttributeSet, NamedState, Transition, TransitionTable, DEFAULT_HISTORY_LIMIT};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

static EMPTY_ATTRIBUTES: AttributeSet = AttributeSet::new();

/// Where a trigger machine goes after settling on a trigger state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rebound {
    /// Back to the state the machine was settled on before the trigger fired
    Previous,
    /// To a fixed baseline state
    State(String),
}

/// States, transitions and trigger configuration shared by every engine built
/// from the same description.
///
/// Templates are immutable once built; engines hold them behind an `Arc`.
/// Build one with [`MachineTemplateBuilder`](crate::builder::MachineTemplateBuilder).
#[derive(Clone, Debug, PartialEq)]
pub struct MachineTemplate {
    pub(crate) states: HashMap<String, NamedState>,
    pub(crate) transitions: TransitionTable,
    pub(crate) trigger: Option<Rebound>,
    pub(crate) history_limit: usize,
}

impl Default for MachineTemplate {
    fn default() -> Self {
        Self {
            states: HashMap::new(),
            transitions: TransitionTable::new(),
            trigger: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl MachineTemplate {
    pub fn has_state(&self, id: &str) -> bool {
        self.states.contains_key(id)
    }

    pub fn state(&self, id: &str) -> Option<&NamedState> {
        self.states.get(id)
    }

    pub fn state_ids(&self) -> impl Iterator<Item = &str> {
        self.states.keys().map(String::as_str)
    }

    /// Attributes of `id`, or an empty set for unknown ids.
    pub fn attributes_of(&self, id: &str) -> &AttributeSet {
        self.states
            .get(id)
            .map_or(&EMPTY_ATTRIBUTES, NamedState::attributes)
    }

    pub fn find_transition(&self, from: &str, to: &str) -> Option<&Transition> {
        self.transitions.find(from, to)
    }

    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    pub fn trigger(&self) -> Option<&Rebound> {
        self.trigger.as_ref()
    }

    pub fn is_trigger(&self) -> bool {
        self.trigger.is_some()
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }
}
