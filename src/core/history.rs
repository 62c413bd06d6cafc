//! History of successful transitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single successful transition.
///
/// # Example
///
/// ```rust
/// use waymark::core::StateTransition;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: "pending",
///     to: "running",
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.to, "running");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition<S> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// When the state was mutated
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of successful transitions.
///
/// The engine appends one record per `Success` outcome and clears the
/// history on `reset`.
///
/// # Example
///
/// ```rust
/// use waymark::core::{StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(StateTransition { from: "start", to: "middle", timestamp: Utc::now() })
///     .record(StateTransition { from: "middle", to: "end", timestamp: Utc::now() });
///
/// assert_eq!(history.get_path(), vec![&"start", &"middle", &"end"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateHistory<S> {
    transitions: Vec<StateTransition<S>>,
    #[serde(default)]
    limit: Option<usize>,
}

impl<S> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
            limit: None,
        }
    }

    /// Create an empty history that keeps only the latest `limit` records.
    pub fn bounded(limit: usize) -> Self {
        Self {
            transitions: Vec::new(),
            limit: Some(limit),
        }
    }

    /// Maximum number of records kept, if bounded.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Append a transition, returning the extended history.
    ///
    /// A bounded history drops its oldest records to stay within the limit.
    pub fn record(mut self, transition: StateTransition<S>) -> Self {
        self.transitions.push(transition);
        if let Some(limit) = self.limit {
            let excess = self.transitions.len().saturating_sub(limit);
            self.transitions.drain(..excess);
        }
        self
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the first transition, then the `to`
    /// state of each transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and last recorded transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
