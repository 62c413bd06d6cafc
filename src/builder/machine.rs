//! Builder for constructing state machines.

use crate::builder::error::{collect_violations, require, BuildError, ConfigViolation};
use crate::builder::transition::TransitionBuilder;
use crate::core::{Event, State, TransitionAction, TransitionGuard};
use crate::engine::{MachineConfig, StateMachine, Transition};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use stillwater::validation::Validation;
use tracing::debug;
use uuid::Uuid;

/// When a built machine enters its initial state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Startup {
    /// Start as part of `build()`.
    #[default]
    Auto,
    /// Leave starting to the caller.
    Lazy,
}

/// Builder for constructing state machines with a fluent API.
///
/// Problems are collected rather than reported one at a time: `build()`
/// returns every missing field of the machine and of each transition.
///
/// # Example
///
/// ```rust
/// use waymark::builder::{StateMachineBuilder, TransitionBuilder};
///
/// let machine = StateMachineBuilder::<&'static str, &'static str>::new()
///     .initial("Draft")
///     .final_state("Published")
///     .transition(TransitionBuilder::new().from("Draft").to("Published").on("publish"))
///     .build()
///     .unwrap();
///
/// assert!(machine.is_started());
/// assert_eq!(*machine.actual_state(), "Draft");
/// ```
pub struct StateMachineBuilder<S: State, E: Event> {
    id: Option<Uuid>,
    initial: Option<S>,
    final_states: Vec<S>,
    global_guards: Vec<Arc<dyn TransitionGuard<S, E>>>,
    global_actions: Vec<Arc<dyn TransitionAction<S, E>>>,
    final_state_guard: bool,
    transitions: Vec<Result<Transition<S, E>, Vec<ConfigViolation>>>,
    startup: Startup,
    start_state: Option<S>,
    history_limit: Option<usize>,
}

impl<S: State, E: Event> StateMachineBuilder<S, E> {
    pub fn new() -> Self {
        Self {
            id: None,
            initial: None,
            final_states: Vec::new(),
            global_guards: Vec::new(),
            global_actions: Vec::new(),
            final_state_guard: true,
            transitions: Vec::new(),
            startup: Startup::default(),
            start_state: None,
            history_limit: None,
        }
    }

    /// Use a fixed machine id instead of a random one.
    pub fn id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Add a final state. At least one is required.
    pub fn final_state(mut self, state: S) -> Self {
        self.final_states.push(state);
        self
    }

    pub fn final_states(mut self, states: impl IntoIterator<Item = S>) -> Self {
        self.final_states.extend(states);
        self
    }

    /// Add a guard that applies to every transition.
    pub fn global_guard<G>(mut self, guard: G) -> Self
    where
        G: TransitionGuard<S, E> + 'static,
    {
        self.global_guards.push(Arc::new(guard));
        self
    }

    /// Add an action that applies to every transition.
    pub fn global_action<A>(mut self, action: A) -> Self
    where
        A: TransitionAction<S, E> + 'static,
    {
        self.global_actions.push(Arc::new(action));
        self
    }

    /// Allow leaving final states.
    pub fn without_final_state_guard(mut self) -> Self {
        self.final_state_guard = false;
        self
    }

    /// Add a transition using a builder.
    pub fn transition(mut self, builder: TransitionBuilder<S, E>) -> Self {
        self.transitions.push(builder.assemble());
        self
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition<S, E>) -> Self {
        self.transitions.push(Ok(transition));
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: Vec<Transition<S, E>>) -> Self {
        self.transitions.extend(transitions.into_iter().map(Ok));
        self
    }

    pub fn startup(mut self, startup: Startup) -> Self {
        self.startup = startup;
        self
    }

    /// State entered by an automatic start instead of the initial state.
    ///
    /// Only valid with `Startup::Auto`; combining it with `Lazy` is reported
    /// as a violation by `build()`.
    pub fn start_in(mut self, state: S) -> Self {
        self.start_state = Some(state);
        self
    }

    /// Keep only the latest `limit` history records.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Build the state machine, starting it unless startup is `Lazy`.
    pub fn build(self) -> Result<StateMachine<S, E>, BuildError> {
        let mut checks = vec![
            require(self.initial.is_some(), ConfigViolation::MissingInitialState),
            require(!self.final_states.is_empty(), ConfigViolation::NoFinalStates),
            require(
                self.startup == Startup::Auto || self.start_state.is_none(),
                ConfigViolation::StartStateWithLazyStartup,
            ),
        ];

        let mut transitions = Vec::with_capacity(self.transitions.len());
        for (index, pending) in self.transitions.into_iter().enumerate() {
            match pending {
                Ok(transition) => transitions.push(transition),
                Err(violations) => checks.extend(violations.into_iter().map(|violation| {
                    Validation::fail(ConfigViolation::InTransition {
                        index,
                        violation: Box::new(violation),
                    })
                })),
            }
        }

        let violations = collect_violations(checks);
        let initial = match self.initial {
            Some(initial) if violations.is_empty() => initial,
            _ => return Err(BuildError::Invalid { violations }),
        };

        let mut config = MachineConfig::new(initial, self.final_states);
        if let Some(id) = self.id {
            config = config.with_id(id);
        }
        if !self.final_state_guard {
            config.global_guards.clear();
        }
        config.global_guards.extend(self.global_guards);
        config.global_actions.extend(self.global_actions);
        config.transitions = transitions;
        config.history_limit = self.history_limit;

        let mut machine = StateMachine::new(config)?;
        debug!(machine = %machine.id(), startup = ?self.startup, "state machine built");

        if self.startup == Startup::Auto {
            machine.start(self.start_state)?;
        }

        Ok(machine)
    }
}

impl<S: State, E: Event> Default for StateMachineBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
