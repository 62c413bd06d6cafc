//! Context handed to every guard and action.

use super::parameters::TransitionParameters;
use super::state::{Event, State};
use uuid::Uuid;

/// Read-only view of the engine that owns a transition.
#[derive(Debug, Clone, Copy)]
pub struct MachineView<'a, S> {
    id: Uuid,
    actual_state: &'a S,
    finished: bool,
}

impl<'a, S> MachineView<'a, S> {
    pub fn new(id: Uuid, actual_state: &'a S, finished: bool) -> Self {
        Self {
            id,
            actual_state,
            finished,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn actual_state(&self) -> &'a S {
        self.actual_state
    }

    /// Whether the machine's current state is one of its final states.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Everything a hook can see while one event is being processed.
///
/// A context is never mutated; all fields are borrowed for the duration of
/// a single `send_event` call.
#[derive(Debug)]
pub struct TransitionContext<'a, S: State, E: Event> {
    source_state: &'a S,
    target_state: &'a S,
    event: &'a E,
    parameters: &'a TransitionParameters,
    machine: MachineView<'a, S>,
}

impl<'a, S: State, E: Event> TransitionContext<'a, S, E> {
    pub fn new(
        source_state: &'a S,
        target_state: &'a S,
        event: &'a E,
        parameters: &'a TransitionParameters,
        machine: MachineView<'a, S>,
    ) -> Self {
        Self {
            source_state,
            target_state,
            event,
            parameters,
            machine,
        }
    }

    pub fn source_state(&self) -> &'a S {
        self.source_state
    }

    pub fn target_state(&self) -> &'a S {
        self.target_state
    }

    pub fn event(&self) -> &'a E {
        self.event
    }

    pub fn parameters(&self) -> &'a TransitionParameters {
        self.parameters
    }

    pub fn machine(&self) -> &MachineView<'a, S> {
        &self.machine
    }
}
