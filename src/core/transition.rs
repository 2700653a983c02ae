//! Directed, timed transitions between named states.

use super::curve::Curve;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A directed edge between two states with a duration (seconds) and a curve.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub from: String,
    pub to: String,
    pub duration: f64,
    pub curve: Curve,
}

impl Transition {
    pub fn new(from: impl Into<String>, to: impl Into<String>, duration: f64, curve: Curve) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            duration,
            curve,
        }
    }

    /// A transition with no duration settles immediately.
    pub fn is_instant(&self) -> bool {
        self.duration <= 0.0
    }
}

/// Lookup table of transitions keyed by `(from, to)`.
///
/// At most one transition exists per pair; inserting a second one for the
/// same pair replaces the first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransitionTable {
    edges: HashMap<String, HashMap<String, Transition>>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a transition, returning the one it replaced.
    pub fn insert(&mut self, transition: Transition) -> Option<Transition> {
        self.edges
            .entry(transition.from.clone())
            .or_default()
            .insert(transition.to.clone(), transition)
    }

    pub fn find(&self, from: &str, to: &str) -> Option<&Transition> {
        self.edges.get(from)?.get(to)
    }

    pub fn len(&self) -> usize {
        self.edges.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.edges.values().flat_map(HashMap::values)
    }
}

impl FromIterator<Transition> for TransitionTable {
    fn from_iter<I: IntoIterator<Item = Transition>>(iter: I) -> Self {
        let mut table = Self::new();
        for transition in iter {
            table.insert(transition);
        }
        table
    }
}
