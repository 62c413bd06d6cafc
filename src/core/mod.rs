//! Core state machine types.
//!
//! This module contains the data and contracts the engine is built from:
//! - `State` and `Event` traits with their lookup keys
//! - Guard and action contracts, plus the built-in final-state guard
//! - The per-event context and parameter bag
//! - History of successful transitions

mod action;
mod context;
mod error;
mod guard;
mod history;
mod parameters;
mod state;

pub use action::{ActionFn, ActionPhase, TransitionAction};
pub use context::{MachineView, TransitionContext};
pub use error::{HookError, HookPanic};
pub use guard::{FinalStateGuard, GuardFn, TransitionGuard};
pub use history::{StateHistory, StateTransition};
pub use parameters::{ParameterError, ParametersBuilder, TransitionParameters};
pub use state::{Event, State};
