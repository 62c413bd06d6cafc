//! Guard predicates that can veto a transition.
//!
//! A guard is checked twice per transition: on exit (before the source state
//! is left) and on entry (before the target state is entered). Either check
//! returning `false` rejects the transition.

use super::context::TransitionContext;
use super::error::HookError;
use super::state::{Event, State};
use async_trait::async_trait;
use std::marker::PhantomData;

/// Veto predicate evaluated at state exit and state entry.
///
/// Both checks default to `Ok(true)`, so an implementation only overrides
/// the side it cares about. Guards must not have side effects on the
/// machine; they only read the context.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use waymark::core::{HookError, TransitionContext, TransitionGuard};
///
/// struct RequiresApproval;
///
/// #[async_trait]
/// impl TransitionGuard<&'static str, &'static str> for RequiresApproval {
///     async fn on_entry(
///         &self,
///         context: &TransitionContext<'_, &'static str, &'static str>,
///     ) -> Result<bool, HookError> {
///         Ok(context.parameters().get::<bool>("approved") == Some(&true))
///     }
/// }
/// ```
#[async_trait]
pub trait TransitionGuard<S: State, E: Event>: Send + Sync {
    /// May the machine leave the source state?
    async fn on_exit(&self, _context: &TransitionContext<'_, S, E>) -> Result<bool, HookError> {
        Ok(true)
    }

    /// May the machine enter the target state?
    async fn on_entry(&self, _context: &TransitionContext<'_, S, E>) -> Result<bool, HookError> {
        Ok(true)
    }

    /// Name used in rejection reasons.
    fn name(&self) -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }
}

/// Refuses to leave a final state.
///
/// Installed first among the global guards by default, which makes final
/// states terminal.
pub struct FinalStateGuard<S, E> {
    _phantom: PhantomData<fn() -> (S, E)>,
}

impl<S, E> FinalStateGuard<S, E> {
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<S, E> Default for FinalStateGuard<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<S: State, E: Event> TransitionGuard<S, E> for FinalStateGuard<S, E> {
    async fn on_exit(&self, context: &TransitionContext<'_, S, E>) -> Result<bool, HookError> {
        Ok(!context.machine().is_finished())
    }

    fn name(&self) -> &'static str {
        "FinalStateGuard"
    }
}

type GuardCheck<S, E> =
    Box<dyn for<'a> Fn(&TransitionContext<'a, S, E>) -> Result<bool, HookError> + Send + Sync>;

/// Guard built from a synchronous closure, checked on one side only.
///
/// # Example
///
/// ```rust
/// use waymark::core::GuardFn;
///
/// let has_payload = GuardFn::<&'static str, &'static str>::on_exit("has_payload", |ctx| {
///     Ok(ctx.parameters().contains_key("payload"))
/// });
/// ```
pub struct GuardFn<S: State, E: Event> {
    name: &'static str,
    on_exit: Option<GuardCheck<S, E>>,
    on_entry: Option<GuardCheck<S, E>>,
}

impl<S: State, E: Event> GuardFn<S, E> {
    pub fn on_exit<F>(name: &'static str, check: F) -> Self
    where
        F: for<'a> Fn(&TransitionContext<'a, S, E>) -> Result<bool, HookError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name,
            on_exit: Some(Box::new(check)),
            on_entry: None,
        }
    }

    pub fn on_entry<F>(name: &'static str, check: F) -> Self
    where
        F: for<'a> Fn(&TransitionContext<'a, S, E>) -> Result<bool, HookError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name,
            on_exit: None,
            on_entry: Some(Box::new(check)),
        }
    }
}

#[async_trait]
impl<S: State, E: Event> TransitionGuard<S, E> for GuardFn<S, E> {
    async fn on_exit(&self, context: &TransitionContext<'_, S, E>) -> Result<bool, HookError> {
        self.on_exit.as_ref().map_or(Ok(true), |check| check(context))
    }

    async fn on_entry(&self, context: &TransitionContext<'_, S, E>) -> Result<bool, HookError> {
        self.on_entry.as_ref().map_or(Ok(true), |check| check(context))
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// Strip module paths and generic arguments from a type name.
pub(crate) fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
