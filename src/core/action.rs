//! Lifecycle actions run around a transition.

use super::context::TransitionContext;
use super::error::HookError;
use super::guard::short_type_name;
use super::state::{Event, State};
use async_trait::async_trait;

/// Side-effecting hooks invoked at four points of a transition.
///
/// For a successful transition the engine calls, across all registered
/// actions: `before_exit`, `after_exit`, `before_entry`, then (after the
/// state has changed) `after_entry`. Every hook is a no-op by default.
/// Returning an error turns the event into a `Failed` outcome.
#[async_trait]
pub trait TransitionAction<S: State, E: Event>: Send + Sync {
    async fn before_exit(&self, _context: &TransitionContext<'_, S, E>) -> Result<(), HookError> {
        Ok(())
    }

    async fn after_exit(&self, _context: &TransitionContext<'_, S, E>) -> Result<(), HookError> {
        Ok(())
    }

    async fn before_entry(&self, _context: &TransitionContext<'_, S, E>) -> Result<(), HookError> {
        Ok(())
    }

    async fn after_entry(&self, _context: &TransitionContext<'_, S, E>) -> Result<(), HookError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }
}

/// The four points at which actions run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionPhase {
    BeforeExit,
    AfterExit,
    BeforeEntry,
    AfterEntry,
}

type ActionHook<S, E> =
    Box<dyn for<'a> Fn(&TransitionContext<'a, S, E>) -> Result<(), HookError> + Send + Sync>;

/// Action built from a synchronous closure bound to a single phase.
///
/// # Example
///
/// ```rust
/// use waymark::core::ActionFn;
///
/// let audit = ActionFn::<&'static str, &'static str>::after_entry(|ctx| {
///     println!("entered {:?}", ctx.target_state());
///     Ok(())
/// });
/// ```
pub struct ActionFn<S: State, E: Event> {
    phase: ActionPhase,
    hook: ActionHook<S, E>,
}

impl<S: State, E: Event> ActionFn<S, E> {
    pub fn new<F>(phase: ActionPhase, hook: F) -> Self
    where
        F: for<'a> Fn(&TransitionContext<'a, S, E>) -> Result<(), HookError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            phase,
            hook: Box::new(hook),
        }
    }

    pub fn before_exit<F>(hook: F) -> Self
    where
        F: for<'a> Fn(&TransitionContext<'a, S, E>) -> Result<(), HookError>
            + Send
            + Sync
            + 'static,
    {
        Self::new(ActionPhase::BeforeExit, hook)
    }

    pub fn after_exit<F>(hook: F) -> Self
    where
        F: for<'a> Fn(&TransitionContext<'a, S, E>) -> Result<(), HookError>
            + Send
            + Sync
            + 'static,
    {
        Self::new(ActionPhase::AfterExit, hook)
    }

    pub fn before_entry<F>(hook: F) -> Self
    where
        F: for<'a> Fn(&TransitionContext<'a, S, E>) -> Result<(), HookError>
            + Send
            + Sync
            + 'static,
    {
        Self::new(ActionPhase::BeforeEntry, hook)
    }

    pub fn after_entry<F>(hook: F) -> Self
    where
        F: for<'a> Fn(&TransitionContext<'a, S, E>) -> Result<(), HookError>
            + Send
            + Sync
            + 'static,
    {
        Self::new(ActionPhase::AfterEntry, hook)
    }

    pub fn phase(&self) -> ActionPhase {
        self.phase
    }

    fn run(&self, phase: ActionPhase, context: &TransitionContext<'_, S, E>) -> Result<(), HookError> {
        if self.phase == phase {
            (self.hook)(context)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl<S: State, E: Event> TransitionAction<S, E> for ActionFn<S, E> {
    async fn before_exit(&self, context: &TransitionContext<'_, S, E>) -> Result<(), HookError> {
        self.run(ActionPhase::BeforeExit, context)
    }

    async fn after_exit(&self, context: &TransitionContext<'_, S, E>) -> Result<(), HookError> {
        self.run(ActionPhase::AfterExit, context)
    }

    async fn before_entry(&self, context: &TransitionContext<'_, S, E>) -> Result<(), HookError> {
        self.run(ActionPhase::BeforeEntry, context)
    }

    async fn after_entry(&self, context: &TransitionContext<'_, S, E>) -> Result<(), HookError> {
        self.run(ActionPhase::AfterEntry, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MachineView, TransitionParameters};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use uuid::Uuid;

    #[tokio::test]
    async fn closure_action_runs_only_in_its_phase() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let action = ActionFn::<&'static str, &'static str>::after_exit(move |_ctx| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        let params = TransitionParameters::new();
        let context = TransitionContext::new(
            &"S0",
            &"S1",
            &"E1",
            &params,
            MachineView::new(Uuid::nil(), &"S0", false),
        );

        action.before_exit(&context).await.unwrap();
        action.after_exit(&context).await.unwrap();
        action.before_entry(&context).await.unwrap();
        action.after_entry(&context).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(action.phase(), ActionPhase::AfterExit);
        assert_eq!(TransitionAction::name(&action), "ActionFn");
    }

    #[tokio::test]
    async fn closure_action_error_is_returned() {
        let action = ActionFn::<&'static str, &'static str>::before_entry(|_ctx| {
            Err("inventory service unavailable".into())
        });

        let params = TransitionParameters::new();
        let context = TransitionContext::new(
            &"S0",
            &"S1",
            &"E1",
            &params,
            MachineView::new(Uuid::nil(), &"S0", false),
        );

        let error = action.before_entry(&context).await.unwrap_err();
        assert_eq!(error.to_string(), "inventory service unavailable");
    }
}
