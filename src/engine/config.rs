//! Immutable machine configuration.

use crate::core::{Event, FinalStateGuard, State, TransitionAction, TransitionGuard};
use crate::engine::transition::Transition;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Everything an engine is constructed from.
///
/// Global guards and actions run before the transition-specific ones, in
/// registration order. [`MachineConfig::new`] installs a
/// [`FinalStateGuard`] as the first global guard.
///
/// # Example
///
/// ```rust
/// use waymark::engine::{MachineConfig, StateMachine, Transition, Trigger};
///
/// let config = MachineConfig::new("S0", ["S1", "S2"])
///     .with_transition(Transition::new("S0", "S1", Trigger::Event("E1")));
///
/// let machine = StateMachine::new(config).unwrap();
/// assert_eq!(*machine.actual_state(), "S0");
/// ```
pub struct MachineConfig<S: State, E: Event> {
    pub id: Uuid,
    pub initial_state: S,
    pub final_states: Vec<S>,
    pub global_guards: Vec<Arc<dyn TransitionGuard<S, E>>>,
    pub global_actions: Vec<Arc<dyn TransitionAction<S, E>>>,
    pub transitions: Vec<Transition<S, E>>,
    /// Keep only this many history records; unbounded when `None`.
    pub history_limit: Option<usize>,
}

impl<S: State, E: Event> MachineConfig<S, E> {
    pub fn new(initial_state: S, final_states: impl IntoIterator<Item = S>) -> Self {
        let final_state_guard: Arc<dyn TransitionGuard<S, E>> = Arc::new(FinalStateGuard::new());
        Self {
            id: Uuid::new_v4(),
            initial_state,
            final_states: final_states.into_iter().collect(),
            global_guards: vec![final_state_guard],
            global_actions: Vec::new(),
            transitions: Vec::new(),
            history_limit: None,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_global_guard(mut self, guard: Arc<dyn TransitionGuard<S, E>>) -> Self {
        self.global_guards.push(guard);
        self
    }

    pub fn with_global_action(mut self, action: Arc<dyn TransitionAction<S, E>>) -> Self {
        self.global_actions.push(action);
        self
    }

    pub fn with_transition(mut self, transition: Transition<S, E>) -> Self {
        self.transitions.push(transition);
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }
}

impl<S: State, E: Event> fmt::Debug for MachineConfig<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guards: Vec<&str> = self.global_guards.iter().map(|g| g.name()).collect();
        let actions: Vec<&str> = self.global_actions.iter().map(|a| a.name()).collect();
        f.debug_struct("MachineConfig")
            .field("id", &self.id)
            .field("initial_state", &self.initial_state)
            .field("final_states", &self.final_states)
            .field("global_guards", &guards)
            .field("global_actions", &actions)
            .field("transitions", &self.transitions)
            .field("history_limit", &self.history_limit)
            .finish()
    }
}
