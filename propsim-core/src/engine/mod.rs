//! Simulation engine — round-robin scheduler over per-account trading sessions.
//!
//! The engine owns all mutable run state in a [`RunContext`] built fresh per
//! call. Outcomes come from an injected [`OutcomeSource`](crate::rng::OutcomeSource);
//! nothing is read from global random state.

pub mod loop_runner;
pub mod result;
pub mod session;
pub mod state;

pub use loop_runner::run_simulation;
pub use result::{AccountOutcome, RunStatus, SessionEnd, SessionRecord, SimulationResult};
pub use session::{run_session, SWITCH_AFTER_LOSSES};
pub use state::RunContext;
