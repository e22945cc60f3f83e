//! Collaborator contracts for the power dialer
//!
//! The dialer does not implement lead storage or telephony itself; both are
//! injected behind traits so deployments can plug in their campaign database
//! and dialing backend, and tests can inject scripted stubs.
//!
//! - [`LeadSource`] yields the next phone number to dial, or `None` once the
//!   campaign is exhausted.
//! - [`DialService`] asynchronously attempts to connect a number and reports
//!   a terminal [`CallState`](crate::agent::CallState), or a transport-level
//!   [`DialServiceError`].

use async_trait::async_trait;
use std::fmt;

use crate::agent::{AgentId, CallState, PhoneNumber};

/// Source of customer phone numbers to dial
///
/// The source consumes its own internal cursor: each call to
/// [`LeadSource::next_lead`] advances it. Once exhausted it must keep
/// returning `None` rather than blocking or erroring, so the dialer can probe
/// it repeatedly across retry rounds.
pub trait LeadSource: Send {
    /// Return the next lead to dial, or `None` when no more leads exist
    fn next_lead(&mut self) -> Option<PhoneNumber>;
}

/// Telephony backend that places a single outbound call
///
/// `dial` may delay arbitrarily before resolving. A resolved call reports a
/// terminal [`CallState`]; a transport or service failure is reported as
/// [`DialServiceError`] instead, distinct from any call state.
#[async_trait]
pub trait DialService: Send + Sync {
    /// Attempt to connect `number` to the given agent
    async fn dial(
        &self,
        agent: &AgentId,
        number: &PhoneNumber,
    ) -> std::result::Result<CallState, DialServiceError>;
}

/// Transport-level failure reported by a [`DialService`]
///
/// Carries the backend's message verbatim; the dialer embeds it in its
/// attempt-failure log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialServiceError {
    message: String,
}

impl DialServiceError {
    /// Create a new dial service error with the provided message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for DialServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DialServiceError {}
