//! Waymark: an embeddable finite-state-machine engine
//!
//! A machine owns one current state and reacts to events. Every event is
//! matched against a table of transitions; a matching transition is run
//! through guards that may veto it and actions that observe it, and the
//! caller gets back a typed outcome instead of an error to catch.
//!
//! # Core Concepts
//!
//! - **State / Event**: application types reduced to hashable lookup keys
//! - **Guards**: async predicates checked on exit and on entry
//! - **Actions**: async hooks run before and after exit and entry
//! - **Results**: `Success`, `Rejected` or `Failed`, one per event
//! - **History**: the path of successful transitions since start
//!
//! # Example
//!
//! ```rust
//! use waymark::builder::{StateMachineBuilder, TransitionBuilder};
//! use waymark::core::TransitionParameters;
//! use waymark::{event_enum, state_enum};
//!
//! state_enum! {
//!     enum Order {
//!         New,
//!         Paid,
//!         Cancelled,
//!     }
//!     final: [Paid, Cancelled]
//! }
//!
//! event_enum! {
//!     enum Command {
//!         Pay,
//!         Cancel,
//!     }
//! }
//!
//! # futures::executor::block_on(async {
//! let mut machine = StateMachineBuilder::new()
//!     .initial(Order::New)
//!     .final_states(Order::final_states())
//!     .transition(
//!         TransitionBuilder::new()
//!             .from(Order::New)
//!             .to(Order::Paid)
//!             .on(Command::Pay)
//!             .entry_guard("amount_present", |ctx| Ok(ctx.parameters().contains_key("amount"))),
//!     )
//!     .transition(TransitionBuilder::new().from(Order::New).to(Order::Cancelled).on(Command::Cancel))
//!     .build()
//!     .unwrap();
//!
//! let rejected = machine.fire(Command::Pay).await.unwrap();
//! assert!(rejected.is_rejected());
//!
//! let params = TransitionParameters::builder().with("amount", 42_u64).build();
//! let paid = machine.send_event(Command::Pay, params).await.unwrap();
//! assert!(paid.is_success());
//! assert!(machine.is_finished());
//! # });
//! ```

pub mod builder;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder, Startup, TransitionBuilder};
pub use core::{
    Event, HookError, State, StateHistory, TransitionAction, TransitionContext, TransitionGuard,
    TransitionParameters,
};
pub use engine::{EngineError, MachineConfig, StateMachine, Transition, TransitionResult, Trigger};
