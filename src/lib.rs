//! # Dialer Engine
//!
//! An outbound call-center power dialer: manages one agent's availability
//! state and concurrently places multiple outbound calls per available agent
//! slot so that idle agent time is minimized despite a non-trivial
//! answer/fail rate among dialed numbers.
//!
//! ## Overview
//!
//! Two cooperating state machines compose the core:
//!
//! - **Agent** ([`agent::Agent`]): tracks one agent's lifecycle
//!   (login/logout/call lifecycle) and exposes the notification entry points
//!   that external call-progress events drive.
//! - **Dialer** ([`PowerDialer`]): orchestrates a batch of concurrent dial
//!   attempts against the lead source and dial service, feeding outcomes
//!   back into the agent state machine.
//!
//! The lead source and telephony backend are external collaborators,
//! injected behind the [`integration::LeadSource`] and
//! [`integration::DialService`] traits.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐   call-progress notifications
//! │  Host application │──────────────────────────────┐
//! └──────────────────┘                               │
//!          │ connect()                               ▼
//!          ▼                                 ┌───────────────┐
//! ┌──────────────────┐   call_started(...)   │     Agent     │
//! │   PowerDialer     │──────────────────────▶│ state machine │
//! └──────────────────┘                       └───────────────┘
//!     │           │
//!     ▼           ▼
//! ┌──────────┐ ┌─────────────┐
//! │LeadSource│ │ DialService │   (injected collaborators)
//! └──────────┘ └─────────────┘
//! ```
//!
//! ## Control Flow
//!
//! The agent must be `AVAILABLE` before a dial batch starts. Each
//! [`PowerDialer::connect`] round pulls up to
//! [`config::DialerConfig::dial_ratio`] leads, launches one concurrent dial
//! task per lead, and races the batch to the first `CONNECTED` outcome. On
//! success the agent transitions into the call; if an entire batch fails, the
//! dialer automatically pulls and dials a new batch until either a success
//! occurs or the lead source is exhausted.
//!
//! ## Quick Start
//!
//! ```
//! use dialer_engine::prelude::*;
//! use async_trait::async_trait;
//! use std::sync::Arc;
//!
//! struct Campaign(Vec<PhoneNumber>);
//!
//! impl LeadSource for Campaign {
//!     fn next_lead(&mut self) -> Option<PhoneNumber> {
//!         if self.0.is_empty() { None } else { Some(self.0.remove(0)) }
//!     }
//! }
//!
//! struct EveryoneAnswers;
//!
//! #[async_trait]
//! impl DialService for EveryoneAnswers {
//!     async fn dial(
//!         &self,
//!         _agent: &AgentId,
//!         _number: &PhoneNumber,
//!     ) -> std::result::Result<CallState, DialServiceError> {
//!         Ok(CallState::Connected)
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let mut dialer = PowerDialer::new(
//!     DialerConfig::default(),
//!     Agent::new("agent-001"),
//!     Box::new(Campaign(vec!["+12125550100".into(), "+12125550101".into()])),
//!     Arc::new(EveryoneAnswers),
//! )?;
//!
//! dialer.agent_mut().login()?;
//!
//! match dialer.connect().await? {
//!     ConnectOutcome::Connected(number) => {
//!         println!("Agent talking to {}", number);
//!     }
//!     ConnectOutcome::LeadsExhausted => {
//!         println!("Campaign exhausted, agent stays available");
//!     }
//! }
//!
//! // Later, the telephony stack reports the call ended:
//! dialer.agent_mut().call_ended()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Key Modules
//!
//! - [`orchestrator`]: batch/race dial orchestration and the retry loop
//! - [`agent`]: agent lifecycle state machine and core types
//! - [`integration`]: injected collaborator contracts
//! - [`config`]: dialer configuration and validation
//! - [`error`]: error types and the crate [`Result`] alias
//!
//! ## Known Limitations
//!
//! When several attempts in a round connect, only the winner is handed to
//! the agent; leftover connected calls are logged and dropped rather than
//! redirected to other agents in a pool. Losing attempts run to natural
//! completion and are never cancelled.

// Core modules
pub mod config;
pub mod error;

// Dialer functionality modules
pub mod agent;
pub mod orchestrator;

// External collaborator contracts
pub mod integration;

// Re-exports for convenience
pub use config::DialerConfig;
pub use error::{DialerError, Result};
pub use orchestrator::{ConnectOutcome, PowerDialer};

/// Dialer counters and performance snapshot
///
/// Running totals kept by [`PowerDialer`] across `connect()` invocations,
/// exposed through [`PowerDialer::stats`]. Counters reflect outcomes the
/// dialer observed; a losing attempt that completes after its round's winner
/// was picked is only logged, not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DialerStats {
    /// Number of dial rounds started
    pub rounds_dialed: u64,
    /// Number of dial attempts launched
    pub attempts_started: u64,
    /// Number of dial attempts observed to fail
    pub attempts_failed: u64,
    /// Number of calls handed to the agent
    pub calls_connected: u64,
    /// Number of `connect()` invocations that ran the lead source dry
    pub exhaustions: u64,
}

/// Prelude module for convenient imports
///
/// ```
/// use dialer_engine::prelude::*;
/// ```
pub mod prelude {
    //! Commonly used types and traits for power-dialer applications

    pub use crate::{ConnectOutcome, DialerConfig, DialerError, DialerStats, PowerDialer, Result};

    pub use crate::agent::{Agent, AgentId, AgentState, CallState, PhoneNumber};

    pub use crate::integration::{DialService, DialServiceError, LeadSource};
}
