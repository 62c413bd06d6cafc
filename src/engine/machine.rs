//! The transition engine.
//!
//! One event is processed in a fixed order:
//!
//! 1. resolve the transition for the current state and event
//! 2. `before_exit` actions, then exit guards
//! 3. `after_exit` actions, then `before_entry` actions, then entry guards
//! 4. the state is set to the target state
//! 5. `after_entry` actions
//!
//! Global hooks always run before transition-specific ones. The first guard
//! that declines stops processing with a `Rejected` outcome; an error or
//! panic from any hook stops it with a `Failed` outcome. `after_exit`
//! actions have already run when an entry guard declines, and are not undone.

use crate::core::{
    Event, HookError, HookPanic, MachineView, State, StateHistory, StateTransition,
    TransitionAction, TransitionContext, TransitionGuard, TransitionParameters,
};
use crate::engine::config::MachineConfig;
use crate::engine::error::EngineError;
use crate::engine::result::TransitionResult;
use crate::engine::table::TransitionTable;
use crate::engine::transition::{Transition, TransitionRef};
use chrono::Utc;
use futures::FutureExt;
use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// How the guarded part of a transition ended, short of an error.
enum Verdict {
    Completed,
    Declined(String),
}

/// Finite-state-machine engine owning exactly one current state.
///
/// All mutating operations take `&mut self`: at most one event is processed
/// at a time per engine. Share an engine across tasks by wrapping it in a
/// mutex that is held for the whole `send_event` call.
///
/// The `send_event` future is `Send` for owned state and event types such as
/// `String` or plain enums, so it can be handed to `tokio::spawn`. With
/// borrowed types like `&'static str` the compiler currently cannot prove the
/// future `Send` (a higher-ranked lifetime limitation); await it in place or
/// use owned types when spawning.
///
/// # Example
///
/// ```rust
/// use waymark::engine::{MachineConfig, StateMachine, Transition, Trigger};
///
/// # futures::executor::block_on(async {
/// let config = MachineConfig::new("S0", ["S1", "S2"])
///     .with_transition(Transition::new("S0", "S1", Trigger::Event("E1")));
/// let mut machine = StateMachine::new(config).unwrap();
/// machine.start(None).unwrap();
///
/// let result = machine.fire("E1").await.unwrap();
/// assert!(result.is_success());
/// assert_eq!(*machine.actual_state(), "S1");
/// assert!(machine.is_finished());
/// # });
/// ```
pub struct StateMachine<S: State, E: Event> {
    id: Uuid,
    initial_state: S,
    final_states: HashSet<S::Key>,
    global_guards: Vec<Arc<dyn TransitionGuard<S, E>>>,
    global_actions: Vec<Arc<dyn TransitionAction<S, E>>>,
    table: TransitionTable<S, E>,
    state: S,
    started: bool,
    history_limit: Option<usize>,
    history: StateHistory<S>,
}

impl<S: State, E: Event> StateMachine<S, E> {
    /// Build an unstarted engine from its configuration.
    ///
    /// Fails if the configuration defines no final state.
    pub fn new(config: MachineConfig<S, E>) -> Result<Self, EngineError> {
        let MachineConfig {
            id,
            initial_state,
            final_states,
            global_guards,
            global_actions,
            transitions,
            history_limit,
        } = config;

        if final_states.is_empty() {
            return Err(EngineError::NoFinalStates { id });
        }

        Ok(Self {
            id,
            state: initial_state.clone(),
            initial_state,
            final_states: final_states.iter().map(State::key).collect(),
            global_guards,
            global_actions,
            table: TransitionTable::new(transitions),
            started: false,
            history_limit,
            history: empty_history(history_limit),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current state.
    pub fn actual_state(&self) -> &S {
        &self.state
    }

    /// Whether the current state is one of the final states.
    pub fn is_finished(&self) -> bool {
        self.final_states.contains(&self.state.key())
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Successful transitions since start or the last reset.
    ///
    /// Grows by one record per success unless the configuration sets a
    /// history limit, in which case only the latest records are kept.
    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    /// Enter `state`, or the configured initial state. Allowed once.
    pub fn start(&mut self, state: Option<S>) -> Result<(), EngineError> {
        if self.started {
            return Err(EngineError::AlreadyStarted { id: self.id });
        }
        self.state = state.unwrap_or_else(|| self.initial_state.clone());
        self.started = true;
        debug!(machine = %self.id, state = ?self.state, "state machine started");
        Ok(())
    }

    /// Move back to `state`, or the configured initial state, without
    /// running any hooks. Clears the history.
    pub fn reset(&mut self, state: Option<S>) -> Result<(), EngineError> {
        self.ensure_started()?;
        self.state = state.unwrap_or_else(|| self.initial_state.clone());
        self.history = empty_history(self.history_limit);
        debug!(machine = %self.id, state = ?self.state, "state machine reset");
        Ok(())
    }

    /// Process `event` against the current state.
    ///
    /// Returns `Err` only when the engine has not been started. Every
    /// domain outcome (including hook errors and panics) is a
    /// [`TransitionResult`]. Dropping the returned future cancels processing
    /// at the pending hook; the state is then either the source or the target
    /// state, depending on whether entry guards had already passed.
    pub async fn send_event(
        &mut self,
        event: E,
        parameters: TransitionParameters,
    ) -> Result<TransitionResult<S, E>, EngineError> {
        self.ensure_started()?;

        let Some(transition) = self.table.resolve(&self.state, &event).cloned() else {
            let reason = format!("No transition from {:?} with {:?} exists.", self.state, event);
            debug!(machine = %self.id, %reason, "event rejected");
            return Ok(TransitionResult::Rejected {
                transition: TransitionRef::Undefined {
                    source: self.state.clone(),
                    event,
                },
                reason,
            });
        };

        debug!(
            machine = %self.id,
            source = ?self.state,
            target = ?transition.target(),
            event = ?event,
            "processing event"
        );

        let outcome = AssertUnwindSafe(self.run_protocol(&transition, &event, &parameters))
            .catch_unwind()
            .await;

        let result = match outcome {
            Ok(Ok(Verdict::Completed)) => {
                info!(machine = %self.id, state = ?self.state, "transition completed");
                TransitionResult::Success { transition }
            }
            Ok(Ok(Verdict::Declined(reason))) => {
                debug!(machine = %self.id, %reason, "transition rejected");
                TransitionResult::Rejected {
                    transition: TransitionRef::Defined(transition),
                    reason,
                }
            }
            Ok(Err(error)) => {
                warn!(machine = %self.id, %error, "transition hook failed");
                TransitionResult::Failed { transition, error }
            }
            Err(payload) => {
                let panic = HookPanic::from_payload(payload);
                warn!(machine = %self.id, message = %panic.message, "transition hook panicked");
                TransitionResult::Failed {
                    transition,
                    error: Box::new(panic),
                }
            }
        };

        Ok(result)
    }

    /// [`send_event`](Self::send_event) with no parameters.
    pub async fn fire(&mut self, event: E) -> Result<TransitionResult<S, E>, EngineError> {
        self.send_event(event, TransitionParameters::new()).await
    }

    /// Run [`send_event`](Self::send_event) to completion on the current
    /// thread.
    ///
    /// The event is driven by `futures::executor::block_on`, not by an async
    /// runtime. Hooks must therefore be runtime-agnostic here: a hook that
    /// needs a Tokio reactor (timers, Tokio I/O) panics, and the event ends as
    /// `Failed` with a [`HookPanic`]. Do not call this from inside an async
    /// task; use `send_event(..).await` instead.
    pub fn send_event_blocking(
        &mut self,
        event: E,
        parameters: TransitionParameters,
    ) -> Result<TransitionResult<S, E>, EngineError> {
        futures::executor::block_on(self.send_event(event, parameters))
    }

    fn ensure_started(&self) -> Result<(), EngineError> {
        if self.started {
            Ok(())
        } else {
            Err(EngineError::NotStarted { id: self.id })
        }
    }

    fn view(&self) -> MachineView<'_, S> {
        MachineView::new(self.id, &self.state, self.is_finished())
    }

    async fn run_protocol(
        &mut self,
        transition: &Transition<S, E>,
        event: &E,
        parameters: &TransitionParameters,
    ) -> Result<Verdict, HookError> {
        let guards: Vec<Arc<dyn TransitionGuard<S, E>>> = self
            .global_guards
            .iter()
            .chain(&transition.config().guards)
            .cloned()
            .collect();
        let actions: Vec<Arc<dyn TransitionAction<S, E>>> = self
            .global_actions
            .iter()
            .chain(&transition.config().actions)
            .cloned()
            .collect();

        let source = self.state.clone();
        let target = transition.target();

        {
            let context = TransitionContext::new(&source, target, event, parameters, self.view());

            for action in &actions {
                action.before_exit(&context).await?;
            }
            for guard in &guards {
                if !guard.on_exit(&context).await? {
                    return Ok(Verdict::Declined(format!(
                        "{} has declined exit on {:?} for state {:?}.",
                        guard.name(),
                        event,
                        source
                    )));
                }
            }
            for action in &actions {
                action.after_exit(&context).await?;
            }

            for action in &actions {
                action.before_entry(&context).await?;
            }
            for guard in &guards {
                if !guard.on_entry(&context).await? {
                    return Ok(Verdict::Declined(format!(
                        "{} has declined entry on {:?} for state {:?}.",
                        guard.name(),
                        event,
                        source
                    )));
                }
            }
        }

        self.state = target.clone();
        self.history = std::mem::take(&mut self.history).record(StateTransition {
            from: source.clone(),
            to: target.clone(),
            timestamp: Utc::now(),
        });

        let context = TransitionContext::new(&source, target, event, parameters, self.view());
        for action in &actions {
            action.after_entry(&context).await?;
        }

        Ok(Verdict::Completed)
    }
}

fn empty_history<S>(limit: Option<usize>) -> StateHistory<S> {
    limit.map_or_else(StateHistory::new, StateHistory::bounded)
}

impl<S: State, E: Event> std::fmt::Debug for StateMachine<S, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("started", &self.started)
            .field("finished", &self.is_finished())
            .field("transitions", &self.table.len())
            .finish()
    }
}
