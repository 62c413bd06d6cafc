//! The state machine engine.
//!
//! A [`StateMachine`] is built from a [`MachineConfig`], started once, and then
//! fed events through [`StateMachine::send_event`]. Each event produces a
//! [`TransitionResult`]; misuse of the engine itself is reported as an
//! [`EngineError`].

mod config;
mod error;
mod machine;
mod result;
mod table;
mod transition;

pub use config::MachineConfig;
pub use error::EngineError;
pub use machine::StateMachine;
pub use result::TransitionResult;
pub use table::TransitionTable;
pub use transition::{Transition, TransitionConfig, TransitionRef, Trigger};
