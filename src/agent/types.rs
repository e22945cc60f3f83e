//! Core types for agent and call state tracking

use serde::{Deserialize, Serialize};
use std::fmt;

/// Agent lifecycle state
///
/// The agent record's state is the sole source of truth for which operations
/// are legal ([`Agent`](crate::agent::Agent) guards every transition against
/// it). The lifecycle is cyclic; there is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentState {
    /// Agent is logged in and can be handed a dial batch
    Available,

    /// Agent is waiting for one of the in-flight dial attempts to connect
    Waiting,

    /// Agent is talking to a customer
    Busy,

    /// Agent is logged out
    Unavailable,
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentState::Available => write!(f, "AVAILABLE"),
            AgentState::Waiting => write!(f, "WAITING"),
            AgentState::Busy => write!(f, "BUSY"),
            AgentState::Unavailable => write!(f, "UNAVAILABLE"),
        }
    }
}

/// Terminal state of a single dial attempt as reported by the dial service
///
/// Only [`CallState::Connected`] counts as a successful attempt; every other
/// state (and any transport-level dial error) is an attempt failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallState {
    Created,
    Alerting,
    Connected,
    Disconnected,
    Failed,
}

impl fmt::Display for CallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallState::Created => write!(f, "CREATED"),
            CallState::Alerting => write!(f, "ALERTING"),
            CallState::Connected => write!(f, "CONNECTED"),
            CallState::Disconnected => write!(f, "DISCONNECTED"),
            CallState::Failed => write!(f, "FAILED"),
        }
    }
}

/// Agent identifier type for strongly-typed agent references
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub String);

impl From<String> for AgentId {
    fn from(s: String) -> Self {
        AgentId(s)
    }
}

impl From<&str> for AgentId {
    fn from(s: &str) -> Self {
        AgentId(s.to_string())
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for AgentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Customer phone number (a "lead") for strongly-typed dial targets
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhoneNumber(pub String);

impl From<String> for PhoneNumber {
    fn from(s: String) -> Self {
        PhoneNumber(s)
    }
}

impl From<&str> for PhoneNumber {
    fn from(s: &str) -> Self {
        PhoneNumber(s.to_string())
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
