//! Property-based tests for the transition engine.
//!
//! These tests use proptest to drive machines with randomly generated
//! transition tables and event sequences.

use chrono::Utc;
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use waymark::core::{GuardFn, StateHistory, StateTransition, TransitionParameters};
use waymark::engine::{MachineConfig, StateMachine, Transition, TransitionResult, Trigger};
use waymark::{Event, State};

const FINAL: u8 = 4;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
struct Node(u8);

impl State for Node {
    type Key = u8;

    fn key(&self) -> u8 {
        self.0
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Edge(u8);

impl Event for Edge {
    type Key = u8;

    fn key(&self) -> u8 {
        self.0
    }
}

prop_compose! {
    fn arbitrary_node()(id in 0..=FINAL) -> Node {
        Node(id)
    }
}

prop_compose! {
    fn arbitrary_edge()(id in 0..3u8) -> Edge {
        Edge(id)
    }
}

prop_compose! {
    fn arbitrary_table()(
        edges in prop::collection::vec((arbitrary_node(), arbitrary_node(), arbitrary_edge()), 0..12)
    ) -> Vec<(Node, Node, Edge)> {
        edges
    }
}

fn machine(table: &[(Node, Node, Edge)]) -> StateMachine<Node, Edge> {
    let config = table.iter().fold(
        MachineConfig::new(Node(0), [Node(FINAL)]),
        |config, &(from, to, event)| {
            config.with_transition(Transition::new(from, to, Trigger::Event(event)))
        },
    );
    let mut machine = StateMachine::new(config).unwrap();
    machine.start(None).unwrap();
    machine
}

/// Target of the last definition for `(state, event)`, if any.
fn expected_target(table: &[(Node, Node, Edge)], state: Node, event: Edge) -> Option<Node> {
    table
        .iter()
        .rev()
        .find(|(from, _, on)| *from == state && *on == event)
        .map(|(_, to, _)| *to)
}

proptest! {
    #[test]
    fn state_changes_only_on_success(
        table in arbitrary_table(),
        events in prop::collection::vec(arbitrary_edge(), 1..20)
    ) {
        let mut machine = machine(&table);

        for event in events {
            let before = *machine.actual_state();
            let history_len = machine.history().len();
            let result = machine
                .send_event_blocking(event, TransitionParameters::new())
                .unwrap();

            match &result {
                TransitionResult::Success { transition } => {
                    prop_assert_eq!(*machine.actual_state(), *transition.target());
                    prop_assert_eq!(machine.history().len(), history_len + 1);
                }
                TransitionResult::Rejected { .. } | TransitionResult::Failed { .. } => {
                    prop_assert_eq!(*machine.actual_state(), before);
                    prop_assert_eq!(machine.history().len(), history_len);
                }
            }
        }
    }

    #[test]
    fn resolution_matches_last_definition(
        table in arbitrary_table(),
        start in arbitrary_node(),
        event in arbitrary_edge()
    ) {
        let mut machine = machine(&table);
        machine.reset(Some(start)).unwrap();

        let result = machine
            .send_event_blocking(event, TransitionParameters::new())
            .unwrap();

        match expected_target(&table, start, event) {
            None => {
                prop_assert!(result.is_undefined());
                prop_assert_eq!(*machine.actual_state(), start);
            }
            Some(_) if start == Node(FINAL) => {
                prop_assert!(result.is_rejected());
                prop_assert!(!result.is_undefined());
            }
            Some(target) => {
                prop_assert!(result.is_success());
                prop_assert_eq!(*machine.actual_state(), target);
            }
        }
    }

    #[test]
    fn final_state_is_terminal(
        table in arbitrary_table(),
        events in prop::collection::vec(arbitrary_edge(), 1..20)
    ) {
        let mut machine = machine(&table);
        machine.reset(Some(Node(FINAL))).unwrap();

        for event in events {
            let result = machine
                .send_event_blocking(event, TransitionParameters::new())
                .unwrap();
            prop_assert!(!result.is_success());
            prop_assert!(machine.is_finished());
        }
    }

    #[test]
    fn declining_guard_short_circuits(position in 0..4usize) {
        let calls = Arc::new(AtomicUsize::new(0));
        let config = (0..4usize).fold(
            MachineConfig::new(Node(0), [Node(FINAL)])
                .with_transition(Transition::new(Node(0), Node(1), Trigger::Key(0))),
            |config, index| {
                let calls = Arc::clone(&calls);
                config.with_global_guard(Arc::new(GuardFn::<Node, Edge>::on_exit(
                    "counting",
                    move |_ctx| {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Ok(index != position)
                    },
                )))
            },
        );
        let mut machine = StateMachine::new(config).unwrap();
        machine.start(None).unwrap();

        let result = machine
            .send_event_blocking(Edge(0), TransitionParameters::new())
            .unwrap();

        prop_assert!(result.is_rejected());
        prop_assert_eq!(calls.load(Ordering::SeqCst), position + 1);
        prop_assert_eq!(*machine.actual_state(), Node(0));
    }

    #[test]
    fn history_follows_successful_targets(
        table in arbitrary_table(),
        events in prop::collection::vec(arbitrary_edge(), 1..20)
    ) {
        let mut machine = machine(&table);
        let mut expected = vec![Node(0)];

        for event in events {
            let result = machine
                .send_event_blocking(event, TransitionParameters::new())
                .unwrap();
            if result.is_success() {
                expected.push(*machine.actual_state());
            }
        }

        let path: Vec<Node> = machine.history().get_path().into_iter().copied().collect();
        if expected.len() == 1 {
            prop_assert!(path.is_empty());
        } else {
            prop_assert_eq!(path, expected);
        }
    }

    #[test]
    fn history_roundtrip_serialization(
        nodes in prop::collection::vec(arbitrary_node(), 0..5)
    ) {
        let mut history = StateHistory::new();
        let mut from = Node(0);

        for to in nodes {
            history = history.record(StateTransition {
                from,
                to,
                timestamp: Utc::now(),
            });
            from = to;
        }

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<Node> = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(history.get_path(), deserialized.get_path());
    }
}
