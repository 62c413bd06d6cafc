//! Builder API for ergonomic state machine construction.
//!
//! This module provides fluent builders and macros for creating state machines
//! with minimal boilerplate. Builders validate the whole definition at once and
//! report every problem they find.

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::{BuildError, ConfigViolation};
pub use machine::{StateMachineBuilder, Startup};
pub use transition::TransitionBuilder;

use crate::core::{Event, GuardFn, HookError, State, TransitionContext};
use crate::engine::{Transition, TransitionConfig, Trigger};
use std::sync::Arc;

/// Create an unguarded transition triggered by `event`'s key.
///
/// # Example
///
/// ```
/// use waymark::builder::simple_transition;
///
/// let transition = simple_transition("Start", "End", "finish");
/// assert_eq!(*transition.source(), "Start");
/// ```
pub fn simple_transition<S: State, E: Event>(from: S, to: S, event: E) -> Transition<S, E> {
    Transition::new(from, to, Trigger::Event(event))
}

/// Create a transition whose exit is guarded by `check`.
///
/// # Example
///
/// ```
/// use waymark::builder::guarded_transition;
///
/// let transition = guarded_transition("Start", "Middle", "advance", "has_ticket", |ctx| {
///     Ok(ctx.parameters().contains_key("ticket"))
/// });
/// assert_eq!(transition.config().guards.len(), 1);
/// ```
pub fn guarded_transition<S, E, F>(
    from: S,
    to: S,
    event: E,
    name: &'static str,
    check: F,
) -> Transition<S, E>
where
    S: State,
    E: Event,
    F: for<'a> Fn(&TransitionContext<'a, S, E>) -> Result<bool, HookError> + Send + Sync + 'static,
{
    let mut config = TransitionConfig::new();
    config
        .guards
        .push(Arc::new(GuardFn::<S, E>::on_exit(name, check)));
    Transition::with_config(from, to, Trigger::Event(event), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TransitionParameters;
    use crate::engine::{MachineConfig, StateMachine};

    #[test]
    fn simple_transition_builds() {
        let transition = simple_transition("Start", "Middle", "go");

        assert_eq!(*transition.source(), "Start");
        assert_eq!(*transition.target(), "Middle");
        assert!(transition.config().guards.is_empty());
    }

    #[test]
    fn guarded_transition_respects_guard() {
        let config = MachineConfig::new("Start", ["Middle"]).with_transition(guarded_transition(
            "Start",
            "Middle",
            "go",
            "has_ticket",
            |ctx| Ok(ctx.parameters().contains_key("ticket")),
        ));
        let mut machine = StateMachine::new(config).unwrap();
        machine.start(None).unwrap();

        let declined = machine
            .send_event_blocking("go", TransitionParameters::new())
            .unwrap();
        assert_eq!(
            declined.reason(),
            Some("has_ticket has declined exit on \"go\" for state \"Start\".")
        );

        let ticket = TransitionParameters::builder().with("ticket", 7_u32).build();
        let accepted = machine.send_event_blocking("go", ticket).unwrap();
        assert!(accepted.is_success());
    }
}
