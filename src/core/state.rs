//! State and event traits.
//!
//! States and events are opaque, application-supplied values. The engine
//! never inspects them beyond their *key*: a cheap, hashable value that
//! identifies a state or event for transition lookup. Types whose values are
//! their own identity (plain enums, strings) use themselves as the key.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// The associated `Key` plays the role of a state-key resolver: two states
/// with equal keys are the same state as far as transition lookup and
/// final-state checks are concerned.
///
/// # Example
///
/// ```rust
/// use waymark::core::State;
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Order {
///     New,
///     Paid { amount: u64 },
///     Shipped,
/// }
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum OrderKey {
///     New,
///     Paid,
///     Shipped,
/// }
///
/// impl State for Order {
///     type Key = OrderKey;
///
///     fn key(&self) -> OrderKey {
///         match self {
///             Self::New => OrderKey::New,
///             Self::Paid { .. } => OrderKey::Paid,
///             Self::Shipped => OrderKey::Shipped,
///         }
///     }
/// }
///
/// assert_eq!(Order::Paid { amount: 10 }.key(), Order::Paid { amount: 99 }.key());
/// ```
pub trait State: Clone + Debug + Send + Sync + 'static {
    /// Lookup key for this state.
    type Key: Hash + Eq + Clone + Debug + Send + Sync + 'static;

    /// Reduce the state to its lookup key.
    fn key(&self) -> Self::Key;
}

/// Trait for state machine events.
///
/// Events are matched against transitions either by their `Key` or by their
/// enum variant (see [`Trigger`](crate::engine::Trigger)).
pub trait Event: Debug + Send + Sync + 'static {
    /// Lookup key for this event.
    type Key: Hash + Eq + Clone + Debug + Send + Sync + 'static;

    /// Reduce the event to its lookup key.
    fn key(&self) -> Self::Key;
}

impl State for String {
    type Key = String;

    fn key(&self) -> String {
        self.clone()
    }
}

impl State for &'static str {
    type Key = &'static str;

    fn key(&self) -> &'static str {
        self
    }
}

impl Event for String {
    type Key = String;

    fn key(&self) -> String {
        self.clone()
    }
}

impl Event for &'static str {
    type Key = &'static str;

    fn key(&self) -> &'static str {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug)]
    enum Document {
        Draft { revision: u32 },
        Published,
    }

    impl State for Document {
        type Key = &'static str;

        fn key(&self) -> &'static str {
            match self {
                Self::Draft { .. } => "draft",
                Self::Published => "published",
            }
        }
    }

    #[derive(Debug)]
    struct Submit {
        reviewer: String,
    }

    impl Event for Submit {
        type Key = &'static str;

        fn key(&self) -> &'static str {
            "submit"
        }
    }

    #[test]
    fn key_ignores_state_payload() {
        let first = Document::Draft { revision: 1 };
        let second = Document::Draft { revision: 7 };

        assert_ne!(first, second);
        assert_eq!(first.key(), second.key());
        assert_ne!(first.key(), Document::Published.key());
    }

    #[test]
    fn strings_are_their_own_key() {
        assert_eq!(State::key(&"S0"), "S0");
        assert_eq!(Event::key(&String::from("E1")), "E1");
    }

    #[test]
    fn event_key_ignores_event_payload() {
        let submit = Submit {
            reviewer: "ana".to_string(),
        };

        assert_eq!(submit.key(), "submit");
        assert_eq!(submit.reviewer, "ana");
    }
}
