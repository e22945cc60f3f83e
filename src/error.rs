use thiserror::Error;

use crate::agent::{AgentId, AgentState, CallState, PhoneNumber};

/// Error types for power-dialer operations
///
/// Only [`DialerError::IllegalStateTransition`] and
/// [`DialerError::Configuration`] ever cross the public API boundary. The
/// per-attempt variants ([`DialerError::DialFailed`],
/// [`DialerError::NotConnected`]) are logged and absorbed by the dial round
/// retry loop inside [`PowerDialer::connect`](crate::PowerDialer::connect);
/// they exist as typed values so their rendered form stays stable for
/// monitoring tooling that matches on log text.
///
/// # Examples
///
/// ```
/// use dialer_engine::{DialerError, Result};
/// use dialer_engine::agent::AgentState;
///
/// fn start_shift(logged_in: bool) -> Result<()> {
///     if logged_in {
///         return Err(DialerError::IllegalStateTransition {
///             agent: "agent-001".into(),
///             required: AgentState::Unavailable,
///             actual: AgentState::Available,
///         });
///     }
///     Ok(())
/// }
///
/// let err = start_shift(true).unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "Agent \"agent-001\" must be in UNAVAILABLE state. Current state is \"AVAILABLE\""
/// );
/// ```
#[derive(Error, Debug)]
pub enum DialerError {
    /// An agent or dialer operation was invoked while the agent was in a
    /// state that forbids it
    ///
    /// Always logged at error level with the required and actual states,
    /// always returned to the caller, never retried. The guarded operation is
    /// a no-op on the agent record apart from signaling this error.
    #[error("Agent \"{agent}\" must be in {required} state. Current state is \"{actual}\"")]
    IllegalStateTransition {
        agent: AgentId,
        required: AgentState,
        actual: AgentState,
    },

    /// The dial service failed at the transport level before reporting any
    /// call state
    ///
    /// Logged at error level and recovered by the round retry loop; never
    /// surfaces out of `connect()`.
    #[error("Dialing \"{number}\" for agent \"{agent}\" failed. Error: \"{message}\"")]
    DialFailed {
        number: PhoneNumber,
        agent: AgentId,
        message: String,
    },

    /// A dial attempt resolved, but in a terminal state other than
    /// [`CallState::Connected`]
    ///
    /// Logged at warn level and recovered by the round retry loop; never
    /// surfaces out of `connect()`.
    #[error("Failed dialing \"{number}\" for agent \"{agent}\" failed. Call ended in state: \"{state}\"")]
    NotConnected {
        number: PhoneNumber,
        agent: AgentId,
        state: CallState,
    },

    /// Configuration validation errors
    ///
    /// Invalid dialer configuration values, detected by
    /// [`DialerConfig::validate`](crate::config::DialerConfig::validate).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Unexpected internal errors
    ///
    /// These indicate bugs or invalid internal state and should be logged
    /// loudly by the caller.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for DialerError {
    fn from(err: anyhow::Error) -> Self {
        // Map anyhow errors to Internal by default, as they are usually
        // unexpected errors from lower-level components.
        Self::Internal(err.to_string())
    }
}

impl DialerError {
    /// Create a new Configuration error with the provided message
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a new Internal error with the provided message
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type for power-dialer operations
///
/// Type alias for `std::result::Result<T, DialerError>` used throughout the
/// crate.
pub type Result<T> = std::result::Result<T, DialerError>;
