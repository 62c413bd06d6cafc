//! Engine contract violations.

use thiserror::Error;
use uuid::Uuid;

/// Misuse of the engine by its caller.
///
/// These never describe a domain outcome; those are reported through
/// [`TransitionResult`](crate::engine::TransitionResult).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("State machine ({id}) is already started")]
    AlreadyStarted { id: Uuid },

    #[error("State machine ({id}) is not started yet")]
    NotStarted { id: Uuid },

    #[error("State machine ({id}) has no final states. Define at least one")]
    NoFinalStates { id: Uuid },
}
