//! Agent lifecycle state machine
//!
//! One [`Agent`] record exists per physical agent and tracks the cyclic
//! lifecycle `UNAVAILABLE -> AVAILABLE -> WAITING -> BUSY -> ...`. Every
//! public operation is guarded: invoking it from the wrong state returns
//! [`DialerError::IllegalStateTransition`] and leaves the record untouched,
//! so illegal call ordering fails loudly instead of silently corrupting the
//! current lead.
//!
//! The record's mutable fields are exclusively owned by whichever operation
//! is currently executing. Operations are expected to be invoked from a
//! single logical sequence per agent; callers in a multi-threaded host must
//! serialize access themselves (a `Mutex<Agent>` is sufficient). No guarded
//! transition suspends, so each executes atomically with respect to the
//! agent's call sequence.
//!
//! # Examples
//!
//! ```
//! use dialer_engine::agent::{Agent, AgentState};
//!
//! # fn example() -> dialer_engine::Result<()> {
//! let mut agent = Agent::new("agent-001");
//! assert_eq!(agent.state(), AgentState::Unavailable);
//!
//! agent.login()?;
//! assert_eq!(agent.state(), AgentState::Available);
//!
//! // Logout while idle takes effect immediately
//! agent.logout();
//! assert_eq!(agent.state(), AgentState::Unavailable);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use tracing::{debug, error, warn};

use crate::error::{DialerError, Result};

use super::types::{AgentId, AgentState, PhoneNumber};

/// One call-center agent's lifecycle record
///
/// Invariants maintained across every operation:
///
/// - `current_lead` is `Some` if and only if the state is
///   [`AgentState::Busy`];
/// - the deferred-logout flag is only set while the state is
///   [`AgentState::Waiting`] or [`AgentState::Busy`].
#[derive(Debug, Clone)]
pub struct Agent {
    id: AgentId,
    state: AgentState,
    current_lead: Option<PhoneNumber>,
    logging_out: bool,
}

impl Agent {
    /// Create a new agent record in the initial `UNAVAILABLE` state
    pub fn new(id: impl Into<AgentId>) -> Self {
        Self {
            id: id.into(),
            state: AgentState::Unavailable,
            current_lead: None,
            logging_out: false,
        }
    }

    /// Agent identifier
    pub fn id(&self) -> &AgentId {
        &self.id
    }

    /// Current lifecycle state
    pub fn state(&self) -> AgentState {
        self.state
    }

    /// Phone number of the currently connected customer, if any
    pub fn current_lead(&self) -> Option<&PhoneNumber> {
        self.current_lead.as_ref()
    }

    /// Whether a logout was requested mid-call and is pending
    pub fn is_logging_out(&self) -> bool {
        self.logging_out
    }

    /// Notification that the agent logged in and can be connected with
    /// customers
    ///
    /// Requires `UNAVAILABLE`, transitions to `AVAILABLE`.
    pub fn login(&mut self) -> Result<()> {
        self.require(AgentState::Unavailable)?;
        self.state = AgentState::Available;
        debug!("👤 Agent {} logged in", self.id);
        Ok(())
    }

    /// Notification that the agent wants to log out
    ///
    /// While `AVAILABLE` the logout takes effect immediately. While `WAITING`
    /// or `BUSY` the logout is deferred: the flag is recorded and applied once
    /// the pending call concludes, so an in-progress or about-to-connect
    /// customer interaction is not abandoned. Logging out while already
    /// `UNAVAILABLE` is a no-op, not an error.
    pub fn logout(&mut self) {
        match self.state {
            AgentState::Available => {
                self.state = AgentState::Unavailable;
                debug!("👤 Agent {} logged out", self.id);
            }
            AgentState::Waiting | AgentState::Busy => {
                self.logging_out = true;
                debug!("👤 Agent {} will log out after the current call", self.id);
            }
            AgentState::Unavailable => {}
        }
    }

    /// Notification that the agent was connected with a customer
    ///
    /// Requires `WAITING`, transitions to `BUSY` and records the connected
    /// number as the current lead.
    pub fn call_started(&mut self, number: PhoneNumber) -> Result<()> {
        self.require(AgentState::Waiting)?;
        self.state = AgentState::Busy;
        self.current_lead = Some(number);
        Ok(())
    }

    /// Notification that the call ended unexpectedly
    ///
    /// Requires `BUSY`. Logs a warning naming the dropped lead, then resolves
    /// exactly like [`Agent::call_ended`].
    pub fn call_failed(&mut self) -> Result<()> {
        self.require(AgentState::Busy)?;
        if let Some(lead) = &self.current_lead {
            warn!("Call failed for agent=\"{}\" lead=\"{}\"", self.id, lead);
        }
        self.conclude_call();
        Ok(())
    }

    /// Notification that the call ended in an orderly fashion
    ///
    /// Requires `BUSY`. Clears the current lead and returns the agent to
    /// `AVAILABLE`, or to `UNAVAILABLE` if a deferred logout is pending.
    pub fn call_ended(&mut self) -> Result<()> {
        self.require(AgentState::Busy)?;
        self.conclude_call();
        Ok(())
    }

    /// Shared post-call resolution for `call_ended` and `call_failed`
    fn conclude_call(&mut self) {
        self.current_lead = None;
        if self.logging_out {
            self.logging_out = false;
            self.state = AgentState::Unavailable;
        } else {
            self.state = AgentState::Available;
        }
    }

    /// Guard helper: error out (and log) unless the agent is in `required`
    pub(crate) fn require(&self, required: AgentState) -> Result<()> {
        if self.state == required {
            return Ok(());
        }
        let err = DialerError::IllegalStateTransition {
            agent: self.id.clone(),
            required,
            actual: self.state,
        };
        error!("{}", err);
        Err(err)
    }

    /// Orchestrator-internal write: the dialer has committed to a batch
    ///
    /// Not a guarded public operation; the dialer calls this once it starts
    /// dialing and on every retry round (where the state is already
    /// `WAITING`).
    pub(crate) fn enter_waiting(&mut self) {
        self.state = AgentState::Waiting;
    }

    /// Orchestrator-internal write: the lead source is exhausted and no call
    /// materialized
    pub(crate) fn resume_available(&mut self) {
        self.state = AgentState::Available;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn busy_agent() -> Agent {
        let mut agent = Agent::new("agent-001");
        agent.login().unwrap();
        agent.enter_waiting();
        agent.call_started("+12125550100".into()).unwrap();
        agent
    }

    fn assert_lead_invariant(agent: &Agent) {
        assert_eq!(
            agent.current_lead().is_some(),
            agent.state() == AgentState::Busy,
            "current lead must be present iff agent is busy"
        );
    }

    #[test]
    fn new_agent_starts_unavailable() {
        let agent = Agent::new("agent-001");
        assert_eq!(agent.state(), AgentState::Unavailable);
        assert_eq!(agent.current_lead(), None);
        assert!(!agent.is_logging_out());
    }

    #[test]
    fn login_from_unavailable_succeeds() {
        let mut agent = Agent::new("agent-001");
        agent.login().unwrap();
        assert_eq!(agent.state(), AgentState::Available);
        assert_lead_invariant(&agent);
    }

    #[test]
    fn login_twice_is_rejected() {
        let mut agent = Agent::new("agent-001");
        agent.login().unwrap();
        let err = agent.login().unwrap_err();
        assert!(matches!(
            err,
            DialerError::IllegalStateTransition {
                required: AgentState::Unavailable,
                actual: AgentState::Available,
                ..
            }
        ));
        let msg = err.to_string();
        assert!(msg.contains("must be in UNAVAILABLE"));
        assert!(msg.contains("\"AVAILABLE\""));
        // record untouched
        assert_eq!(agent.state(), AgentState::Available);
    }

    #[test]
    fn login_rejected_while_busy() {
        let mut agent = busy_agent();
        let err = agent.login().unwrap_err();
        assert!(matches!(
            err,
            DialerError::IllegalStateTransition {
                required: AgentState::Unavailable,
                actual: AgentState::Busy,
                ..
            }
        ));
        // record untouched, invariant preserved
        assert_eq!(agent.state(), AgentState::Busy);
        assert_lead_invariant(&agent);
    }

    #[test]
    fn login_after_logout_succeeds() {
        let mut agent = Agent::new("agent-001");
        agent.login().unwrap();
        agent.logout();
        agent.login().unwrap();
        assert_eq!(agent.state(), AgentState::Available);
    }

    #[test]
    fn logout_while_available_is_immediate() {
        let mut agent = Agent::new("agent-001");
        agent.login().unwrap();
        agent.logout();
        assert_eq!(agent.state(), AgentState::Unavailable);
        assert!(!agent.is_logging_out());
    }

    #[test]
    fn logout_twice_is_a_noop() {
        let mut agent = Agent::new("agent-001");
        agent.login().unwrap();
        agent.logout();
        agent.logout();
        assert_eq!(agent.state(), AgentState::Unavailable);
        assert!(!agent.is_logging_out());
    }

    #[test]
    fn logout_while_busy_is_deferred_until_call_ends() {
        let mut agent = busy_agent();
        agent.logout();
        assert!(agent.is_logging_out());
        assert_eq!(agent.state(), AgentState::Busy);
        assert_lead_invariant(&agent);

        agent.call_ended().unwrap();
        assert_eq!(agent.state(), AgentState::Unavailable);
        assert!(!agent.is_logging_out());
        assert_lead_invariant(&agent);
    }

    #[test]
    fn logout_while_busy_is_deferred_until_call_fails() {
        let mut agent = busy_agent();
        agent.logout();
        assert!(agent.is_logging_out());

        agent.call_failed().unwrap();
        assert_eq!(agent.state(), AgentState::Unavailable);
        assert!(!agent.is_logging_out());
        assert_lead_invariant(&agent);
    }

    #[test]
    fn logout_while_waiting_is_deferred() {
        let mut agent = Agent::new("agent-001");
        agent.login().unwrap();
        agent.enter_waiting();
        agent.logout();
        assert!(agent.is_logging_out());
        assert_eq!(agent.state(), AgentState::Waiting);
    }

    #[test]
    fn call_started_requires_waiting() {
        let mut agent = Agent::new("agent-001");
        agent.login().unwrap();
        let err = agent.call_started("+12125550100".into()).unwrap_err();
        assert!(matches!(
            err,
            DialerError::IllegalStateTransition {
                required: AgentState::Waiting,
                actual: AgentState::Available,
                ..
            }
        ));
        assert_lead_invariant(&agent);
    }

    #[test]
    fn call_started_records_lead() {
        let agent = busy_agent();
        assert_eq!(agent.state(), AgentState::Busy);
        assert_eq!(agent.current_lead().unwrap().as_ref(), "+12125550100");
        assert_lead_invariant(&agent);
    }

    #[test]
    fn call_ended_requires_busy() {
        let mut agent = Agent::new("agent-001");
        agent.login().unwrap();
        let err = agent.call_ended().unwrap_err();
        assert!(matches!(
            err,
            DialerError::IllegalStateTransition {
                required: AgentState::Busy,
                ..
            }
        ));
    }

    #[test]
    fn call_failed_requires_busy() {
        let mut agent = Agent::new("agent-001");
        let err = agent.call_failed().unwrap_err();
        assert!(matches!(
            err,
            DialerError::IllegalStateTransition {
                required: AgentState::Busy,
                actual: AgentState::Unavailable,
                ..
            }
        ));
    }

    #[test]
    fn call_ended_returns_agent_to_available() {
        let mut agent = busy_agent();
        agent.call_ended().unwrap();
        assert_eq!(agent.state(), AgentState::Available);
        assert_eq!(agent.current_lead(), None);
        assert_lead_invariant(&agent);
    }

    #[test]
    fn call_failed_returns_agent_to_available() {
        let mut agent = busy_agent();
        agent.call_failed().unwrap();
        assert_eq!(agent.state(), AgentState::Available);
        assert_eq!(agent.current_lead(), None);
        assert_lead_invariant(&agent);
    }
}
