//! Transition definitions.

use crate::core::{Event, State, TransitionAction, TransitionGuard};
use std::fmt;
use std::mem::Discriminant;
use std::sync::Arc;

/// How an incoming event is matched against a transition.
pub enum Trigger<E: Event> {
    /// Matches events whose key equals this event's key.
    Event(E),
    /// Matches events with this key.
    Key(E::Key),
    /// Matches any event of this enum variant, whatever its payload.
    Variant(Discriminant<E>),
}

impl<E: Event> Trigger<E> {
    /// Trigger matching the variant of `sample`.
    pub fn variant_of(sample: &E) -> Self {
        Self::Variant(std::mem::discriminant(sample))
    }
}

impl<E: Event> fmt::Debug for Trigger<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Event(event) => f.debug_tuple("Event").field(event).finish(),
            Self::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Self::Variant(discriminant) => f.debug_tuple("Variant").field(discriminant).finish(),
        }
    }
}

/// Guards and actions attached to one transition.
///
/// At execution time they run after the machine-global ones.
pub struct TransitionConfig<S: State, E: Event> {
    pub guards: Vec<Arc<dyn TransitionGuard<S, E>>>,
    pub actions: Vec<Arc<dyn TransitionAction<S, E>>>,
}

impl<S: State, E: Event> TransitionConfig<S, E> {
    pub fn new() -> Self {
        Self {
            guards: Vec::new(),
            actions: Vec::new(),
        }
    }
}

impl<S: State, E: Event> Default for TransitionConfig<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event> Clone for TransitionConfig<S, E> {
    fn clone(&self) -> Self {
        Self {
            guards: self.guards.clone(),
            actions: self.actions.clone(),
        }
    }
}

impl<S: State, E: Event> fmt::Debug for TransitionConfig<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guards: Vec<&str> = self.guards.iter().map(|guard| guard.name()).collect();
        let actions: Vec<&str> = self.actions.iter().map(|action| action.name()).collect();
        f.debug_struct("TransitionConfig")
            .field("guards", &guards)
            .field("actions", &actions)
            .finish()
    }
}

/// An immutable `(source, trigger) -> target` mapping with its hooks.
///
/// # Example
///
/// ```rust
/// use waymark::engine::{Transition, Trigger};
///
/// let transition = Transition::new("S0", "S1", Trigger::Event("E1"));
/// assert_eq!(*transition.target(), "S1");
/// ```
pub struct Transition<S: State, E: Event> {
    source: S,
    target: S,
    trigger: Trigger<E>,
    config: TransitionConfig<S, E>,
}

impl<S: State, E: Event> Transition<S, E> {
    pub fn new(source: S, target: S, trigger: Trigger<E>) -> Self {
        Self::with_config(source, target, trigger, TransitionConfig::new())
    }

    pub fn with_config(
        source: S,
        target: S,
        trigger: Trigger<E>,
        config: TransitionConfig<S, E>,
    ) -> Self {
        Self {
            source,
            target,
            trigger,
            config,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn target(&self) -> &S {
        &self.target
    }

    pub fn trigger(&self) -> &Trigger<E> {
        &self.trigger
    }

    pub fn config(&self) -> &TransitionConfig<S, E> {
        &self.config
    }
}

impl<S: State, E: Event> fmt::Debug for Transition<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("source", &self.source)
            .field("target", &self.target)
            .field("trigger", &self.trigger)
            .field("config", &self.config)
            .finish()
    }
}

/// The transition an outcome refers to.
pub enum TransitionRef<S: State, E: Event> {
    /// A configured transition.
    Defined(Arc<Transition<S, E>>),
    /// No transition exists for this state and event.
    Undefined { source: S, event: E },
}

impl<S: State, E: Event> TransitionRef<S, E> {
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined { .. })
    }

    /// The configured transition, if one was found.
    pub fn defined(&self) -> Option<&Transition<S, E>> {
        match self {
            Self::Defined(transition) => Some(&**transition),
            Self::Undefined { .. } => None,
        }
    }

    pub fn source(&self) -> &S {
        match self {
            Self::Defined(transition) => transition.source(),
            Self::Undefined { source, .. } => source,
        }
    }

    /// Target state; undefined transitions have none.
    pub fn target(&self) -> Option<&S> {
        self.defined().map(Transition::target)
    }
}

impl<S: State, E: Event> fmt::Debug for TransitionRef<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defined(transition) => f.debug_tuple("Defined").field(transition).finish(),
            Self::Undefined { source, event } => f
                .debug_struct("Undefined")
                .field("source", source)
                .field("event", event)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActionFn, GuardFn};

    #[derive(Debug, PartialEq)]
    enum Signal {
        Ping(u32),
        Stop,
    }

    impl Event for Signal {
        type Key = &'static str;

        fn key(&self) -> &'static str {
            match self {
                Self::Ping(_) => "ping",
                Self::Stop => "stop",
            }
        }
    }

    #[test]
    fn variant_trigger_ignores_payload() {
        let Trigger::Variant(expected) = Trigger::variant_of(&Signal::Ping(0)) else {
            panic!("Expected variant trigger");
        };

        assert_eq!(expected, std::mem::discriminant(&Signal::Ping(42)));
        assert_ne!(expected, std::mem::discriminant(&Signal::Stop));
    }

    #[test]
    fn debug_lists_hook_names() {
        let mut config: TransitionConfig<&'static str, Signal> = TransitionConfig::new();
        config.guards.push(Arc::new(GuardFn::<&'static str, Signal>::on_exit(
            "quota_left",
            |_ctx| Ok(true),
        )));
        config
            .actions
            .push(Arc::new(ActionFn::<&'static str, Signal>::after_entry(|_ctx| Ok(()))));
        let transition: Transition<&'static str, Signal> =
            Transition::with_config("idle", "busy", Trigger::Key("ping"), config);

        let debug = format!("{transition:?}");
        assert!(debug.contains("quota_left"));
        assert!(debug.contains("ActionFn"));
        assert!(debug.contains("Key(\"ping\")"));
    }

    #[test]
    fn undefined_reference_has_no_target() {
        let reference: TransitionRef<&'static str, Signal> = TransitionRef::Undefined {
            source: "idle",
            event: Signal::Stop,
        };

        assert!(reference.is_undefined());
        assert_eq!(*reference.source(), "idle");
        assert!(reference.target().is_none());
    }
}
