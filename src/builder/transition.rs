//! Builder for constructing state transitions.

use crate::builder::error::{collect_violations, require, BuildError, ConfigViolation};
use crate::core::{
    ActionFn, Event, GuardFn, HookError, State, TransitionAction, TransitionContext,
    TransitionGuard,
};
use crate::engine::{Transition, TransitionConfig, Trigger};
use std::sync::Arc;

/// Builder for constructing transitions with a fluent API.
///
/// # Example
///
/// ```rust
/// use waymark::builder::TransitionBuilder;
///
/// let transition = TransitionBuilder::<&'static str, &'static str>::new()
///     .from("Draft")
///     .to("Review")
///     .on("submit")
///     .entry_guard("has_reviewer", |ctx| Ok(ctx.parameters().contains_key("reviewer")))
///     .build()
///     .unwrap();
///
/// assert_eq!(*transition.target(), "Review");
/// ```
pub struct TransitionBuilder<S: State, E: Event> {
    source: Option<S>,
    target: Option<S>,
    trigger: Option<Trigger<E>>,
    config: TransitionConfig<S, E>,
}

impl<S: State, E: Event> TransitionBuilder<S, E> {
    pub fn new() -> Self {
        Self {
            source: None,
            target: None,
            trigger: None,
            config: TransitionConfig::new(),
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: S) -> Self {
        self.source = Some(state);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.target = Some(state);
        self
    }

    /// Trigger on events with the same key as `event`.
    pub fn on(mut self, event: E) -> Self {
        self.trigger = Some(Trigger::Event(event));
        self
    }

    /// Trigger on events with this key.
    pub fn on_key(mut self, key: E::Key) -> Self {
        self.trigger = Some(Trigger::Key(key));
        self
    }

    /// Trigger on any event of the same variant as `sample`.
    pub fn on_variant(mut self, sample: &E) -> Self {
        self.trigger = Some(Trigger::variant_of(sample));
        self
    }

    pub fn guard<G>(self, guard: G) -> Self
    where
        G: TransitionGuard<S, E> + 'static,
    {
        self.shared_guard(Arc::new(guard))
    }

    /// Attach a guard that is also used elsewhere.
    pub fn shared_guard(mut self, guard: Arc<dyn TransitionGuard<S, E>>) -> Self {
        self.config.guards.push(guard);
        self
    }

    /// Guard checked before the source state is left.
    pub fn exit_guard<F>(self, name: &'static str, check: F) -> Self
    where
        F: for<'a> Fn(&TransitionContext<'a, S, E>) -> Result<bool, HookError>
            + Send
            + Sync
            + 'static,
    {
        self.guard(GuardFn::<S, E>::on_exit(name, check))
    }

    /// Guard checked before the target state is entered.
    pub fn entry_guard<F>(self, name: &'static str, check: F) -> Self
    where
        F: for<'a> Fn(&TransitionContext<'a, S, E>) -> Result<bool, HookError>
            + Send
            + Sync
            + 'static,
    {
        self.guard(GuardFn::<S, E>::on_entry(name, check))
    }

    pub fn action<A>(self, action: A) -> Self
    where
        A: TransitionAction<S, E> + 'static,
    {
        self.shared_action(Arc::new(action))
    }

    pub fn shared_action(mut self, action: Arc<dyn TransitionAction<S, E>>) -> Self {
        self.config.actions.push(action);
        self
    }

    pub fn before_exit<F>(self, hook: F) -> Self
    where
        F: for<'a> Fn(&TransitionContext<'a, S, E>) -> Result<(), HookError>
            + Send
            + Sync
            + 'static,
    {
        self.action(ActionFn::<S, E>::before_exit(hook))
    }

    pub fn after_exit<F>(self, hook: F) -> Self
    where
        F: for<'a> Fn(&TransitionContext<'a, S, E>) -> Result<(), HookError>
            + Send
            + Sync
            + 'static,
    {
        self.action(ActionFn::<S, E>::after_exit(hook))
    }

    pub fn before_entry<F>(self, hook: F) -> Self
    where
        F: for<'a> Fn(&TransitionContext<'a, S, E>) -> Result<(), HookError>
            + Send
            + Sync
            + 'static,
    {
        self.action(ActionFn::<S, E>::before_entry(hook))
    }

    pub fn after_entry<F>(self, hook: F) -> Self
    where
        F: for<'a> Fn(&TransitionContext<'a, S, E>) -> Result<(), HookError>
            + Send
            + Sync
            + 'static,
    {
        self.action(ActionFn::<S, E>::after_entry(hook))
    }

    /// Build the transition, reporting every missing field at once.
    pub fn build(self) -> Result<Transition<S, E>, BuildError> {
        self.assemble()
            .map_err(|violations| BuildError::Invalid { violations })
    }

    pub(crate) fn assemble(self) -> Result<Transition<S, E>, Vec<ConfigViolation>> {
        match (self.source, self.target, self.trigger) {
            (Some(source), Some(target), Some(trigger)) => {
                Ok(Transition::with_config(source, target, trigger, self.config))
            }
            (source, target, trigger) => Err(collect_violations(vec![
                require(source.is_some(), ConfigViolation::MissingSourceState),
                require(target.is_some(), ConfigViolation::MissingTargetState),
                require(trigger.is_some(), ConfigViolation::MissingTrigger),
            ])),
        }
    }
}

impl<S: State, E: Event> Default for TransitionBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
