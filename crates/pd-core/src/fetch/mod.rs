//! Per-view fetch lifecycle: the consumer-visible state and the explicit
//! resolver state machine that drives it.

mod fetch_state;
pub mod resolver_state_machine;

pub use fetch_state::{FetchFailure, FetchState};
pub use resolver_state_machine::{
    Generation, ResolverAction, ResolverEvent, ResolverState, ResolverStateMachine,
};
