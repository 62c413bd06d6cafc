//! Precomputed transition lookup.

use crate::core::{Event, State};
use crate::engine::transition::{Transition, Trigger};
use std::collections::HashMap;
use std::mem::Discriminant;
use std::sync::Arc;

/// Immutable map from `(state key, event key | event variant)` to transition.
///
/// Lookup tries the event's key first and falls back to its variant. When
/// two transitions share a lookup key the later one wins.
pub struct TransitionTable<S: State, E: Event> {
    by_key: HashMap<(S::Key, E::Key), Arc<Transition<S, E>>>,
    by_variant: HashMap<(S::Key, Discriminant<E>), Arc<Transition<S, E>>>,
}

enum Lookup<K, D> {
    Key(K),
    Variant(D),
}

impl<S: State, E: Event> TransitionTable<S, E> {
    pub fn new(transitions: impl IntoIterator<Item = Transition<S, E>>) -> Self {
        let mut by_key = HashMap::new();
        let mut by_variant = HashMap::new();

        for transition in transitions {
            let state_key = transition.source().key();
            let lookup = match transition.trigger() {
                Trigger::Event(event) => Lookup::Key(event.key()),
                Trigger::Key(event_key) => Lookup::Key(event_key.clone()),
                Trigger::Variant(variant) => Lookup::Variant(*variant),
            };

            let transition = Arc::new(transition);
            let shadowed = match lookup {
                Lookup::Key(event_key) => by_key.insert((state_key, event_key), transition),
                Lookup::Variant(variant) => by_variant.insert((state_key, variant), transition),
            };

            if let Some(earlier) = shadowed {
                tracing::warn!(
                    source = ?earlier.source(),
                    trigger = ?earlier.trigger(),
                    "transition shadowed by a later definition with the same lookup key"
                );
            }
        }

        Self { by_key, by_variant }
    }

    /// Find the transition for `event` in `state`.
    pub fn resolve(&self, state: &S, event: &E) -> Option<&Arc<Transition<S, E>>> {
        let state_key = state.key();
        self.by_key
            .get(&(state_key.clone(), event.key()))
            .or_else(|| {
                self.by_variant
                    .get(&(state_key, std::mem::discriminant(event)))
            })
    }

    pub fn len(&self) -> usize {
        self.by_key.len() + self.by_variant.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
