//! Settle history tracking.
//!
//! Every time an engine settles on a state it records where it came from,
//! where it landed, and when. The history is bounded so that a long-lived UI
//! element does not accumulate records forever.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Number of records kept unless configured otherwise.
pub const DEFAULT_HISTORY_LIMIT: usize = 32;

/// Record of a single settle.
///
/// # Example
///
/// ```rust
/// use blendstate::core::StateTransition;
/// use chrono::Utc;
///
/// let record = StateTransition {
///     from: "standby".to_string(),
///     to: "present".to_string(),
///     timestamp: Utc::now(),
///     duration: 0.2,
///     redirected: false,
/// };
/// assert_eq!(record.to, "present");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state the engine was settled on before
    pub from: String,
    /// The state the engine settled on
    pub to: String,
    /// When the settle happened
    pub timestamp: DateTime<Utc>,
    /// Configured duration of the final leg in seconds (0 for jumps)
    pub duration: f64,
    /// Whether the move was re-targeted while in flight
    pub redirected: bool,
}

/// Bounded, ordered history of settles.
///
/// Once `limit` records are held, recording a new one evicts the oldest.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: VecDeque<StateTransition>,
    limit: usize,
}

impl Default for StateHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl StateHistory {
    /// Create an empty history holding up to [`DEFAULT_HISTORY_LIMIT`] records.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Create an empty history holding up to `limit` records.
    ///
    /// A limit of zero disables recording.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: VecDeque::with_capacity(limit.min(DEFAULT_HISTORY_LIMIT)),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Record a settle, evicting the oldest record when full.
    pub fn record(&mut self, transition: StateTransition) {
        if self.limit == 0 {
            return;
        }
        while self.transitions.len() >= self.limit {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` of the oldest retained record followed by the `to`
    /// of every record.
    ///
    /// # Example
    ///
    /// ```rust
    /// use blendstate::core::{StateHistory, StateTransition};
    /// use chrono::Utc;
    ///
    /// let mut history = StateHistory::new();
    /// for (from, to) in [("a", "b"), ("b", "c")] {
    ///     history.record(StateTransition {
    ///         from: from.to_string(),
    ///         to: to.to_string(),
    ///         timestamp: Utc::now(),
    ///         duration: 0.0,
    ///         redirected: false,
    ///     });
    /// }
    ///
    /// assert_eq!(history.get_path(), vec!["a", "b", "c"]);
    /// ```
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(first.from.as_str());
        }
        for transition in &self.transitions {
            path.push(transition.to.as_str());
        }
        path
    }

    /// Wall-clock time between the oldest and newest retained records.
    ///
    /// Returns `None` if the history is empty.
    pub fn span(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.front()?, self.transitions.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn last(&self) -> Option<&StateTransition> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// All retained records, oldest first.
    pub fn transitions(&self) -> impl Iterator<Item = &StateTransition> {
        self.transitions.iter()
    }
}
