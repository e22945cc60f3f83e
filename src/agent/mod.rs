//! Agent lifecycle management for the power dialer
//!
//! This module tracks one call-center agent's lifecycle and exposes the
//! notification entry points that external call-progress events drive. The
//! dialer orchestrator both reads and advances this state machine: an agent
//! must be `AVAILABLE` before a dial batch starts, moves to `WAITING` while
//! a batch is in flight, and `BUSY` once a dial attempt connects.
//!
//! # Agent Lifecycle
//!
//! 1. **Login**: [`Agent::login`] moves the agent from `UNAVAILABLE` to
//!    `AVAILABLE`
//! 2. **Dialing**: the orchestrator moves the agent to `WAITING` while a dial
//!    batch races to its first connected call
//! 3. **Connected**: [`Agent::call_started`] records the winning lead and
//!    marks the agent `BUSY`
//! 4. **Wrap-up**: [`Agent::call_ended`] (orderly) or [`Agent::call_failed`]
//!    (unexpected drop) returns the agent to `AVAILABLE`
//! 5. **Logout**: [`Agent::logout`] takes effect immediately when idle, or is
//!    deferred until the current call concludes

pub mod state;
pub mod types;

pub use state::Agent;
pub use types::{AgentId, AgentState, CallState, PhoneNumber};
