//! Core power-dialer orchestration
//!
//! This module contains the main [`PowerDialer`] struct that coordinates one
//! agent's outbound dialing: pulling lead batches, fanning out concurrent
//! dial attempts, racing them to the first connected call, and feeding the
//! outcome back into the agent state machine.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::agent::{Agent, AgentState, PhoneNumber};
use crate::config::DialerConfig;
use crate::error::Result;
use crate::integration::{DialService, LeadSource};
use crate::DialerStats;

use super::dialing::{run_attempt, AttemptReport};

/// Terminal outcome of a [`PowerDialer::connect`] invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// A dial attempt connected; the agent is now `BUSY` with this number
    Connected(PhoneNumber),

    /// The lead source ran out of numbers before any attempt connected; the
    /// agent remains `AVAILABLE`. A normal completion, not an error.
    LeadsExhausted,
}

/// Outbound power dialer for a single agent
///
/// Places up to [`DialerConfig::dial_ratio`] concurrent calls per round so
/// that idle agent time is minimized despite a non-trivial answer/fail rate
/// among dialed numbers. The lead source and dialing backend are injected
/// behind the [`LeadSource`] and [`DialService`] traits.
///
/// The dialer owns its [`Agent`] record. External call-progress
/// notifications (login, logout, call ended, call dropped) are delivered
/// through [`PowerDialer::agent_mut`]; all of them expect to be invoked from
/// a single logical sequence per agent.
///
/// # Examples
///
/// ```
/// use dialer_engine::prelude::*;
/// use async_trait::async_trait;
/// use std::sync::Arc;
///
/// struct Campaign(Vec<PhoneNumber>);
///
/// impl LeadSource for Campaign {
///     fn next_lead(&mut self) -> Option<PhoneNumber> {
///         if self.0.is_empty() { None } else { Some(self.0.remove(0)) }
///     }
/// }
///
/// struct EveryoneAnswers;
///
/// #[async_trait]
/// impl DialService for EveryoneAnswers {
///     async fn dial(
///         &self,
///         _agent: &AgentId,
///         _number: &PhoneNumber,
///     ) -> std::result::Result<CallState, DialServiceError> {
///         Ok(CallState::Connected)
///     }
/// }
///
/// # async fn example() -> Result<()> {
/// let leads = Campaign(vec!["+12125550100".into()]);
/// let mut dialer = PowerDialer::new(
///     DialerConfig::default(),
///     Agent::new("agent-001"),
///     Box::new(leads),
///     Arc::new(EveryoneAnswers),
/// )?;
///
/// dialer.agent_mut().login()?;
/// let outcome = dialer.connect().await?;
/// assert_eq!(outcome, ConnectOutcome::Connected("+12125550100".into()));
/// assert_eq!(dialer.agent().state(), AgentState::Busy);
/// # Ok(())
/// # }
/// ```
pub struct PowerDialer {
    config: DialerConfig,
    agent: Agent,
    leads: Box<dyn LeadSource>,
    dial_service: Arc<dyn DialService>,
    stats: DialerStats,
}

impl PowerDialer {
    /// Create a new power dialer for one agent
    ///
    /// Validates `config` and takes ownership of the agent record and the
    /// injected collaborators.
    pub fn new(
        config: DialerConfig,
        agent: Agent,
        leads: Box<dyn LeadSource>,
        dial_service: Arc<dyn DialService>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            agent,
            leads,
            dial_service,
            stats: DialerStats::default(),
        })
    }

    /// Read access to the agent record
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Mutable access to the agent record
    ///
    /// Call-progress notifications ([`Agent::login`], [`Agent::logout`],
    /// [`Agent::call_ended`], [`Agent::call_failed`]) are delivered through
    /// this accessor.
    pub fn agent_mut(&mut self) -> &mut Agent {
        &mut self.agent
    }

    /// Snapshot of the dialer's running counters
    pub fn stats(&self) -> DialerStats {
        self.stats
    }

    /// Connect the agent with the next customer
    ///
    /// Requires the agent to be `AVAILABLE`; any other state returns
    /// [`DialerError::IllegalStateTransition`](crate::DialerError::IllegalStateTransition)
    /// with no side effects.
    ///
    /// Each round pulls up to [`DialerConfig::dial_ratio`] leads, dials them
    /// all concurrently, and waits for the first attempt to connect or for
    /// every attempt in the round to fail. A fully failed round triggers a
    /// fresh round automatically; individual dial failures are logged and
    /// absorbed, never surfaced from this method. The invocation terminates
    /// when an attempt connects (the agent becomes `BUSY` with that number)
    /// or the lead source runs out (the agent stays `AVAILABLE`).
    ///
    /// When several attempts in a round connect near-simultaneously, the one
    /// submitted earliest among the completions already observed wins. Losing
    /// attempts are detached, not cancelled; their eventual outcome is only
    /// logged. A real deployment would hand leftover connected calls to other
    /// agents in the pool, which is out of scope here.
    pub async fn connect(&mut self) -> Result<ConnectOutcome> {
        self.agent.require(AgentState::Available)?;

        loop {
            // Pull the next batch, stopping early if the source runs dry.
            let mut batch = Vec::with_capacity(self.config.dial_ratio);
            for _ in 0..self.config.dial_ratio {
                match self.leads.next_lead() {
                    Some(number) => batch.push(number),
                    None => break,
                }
            }

            if batch.is_empty() {
                self.agent.resume_available();
                self.stats.exhaustions += 1;
                info!(
                    "📭 No more leads to dial for agent {}",
                    self.agent.id()
                );
                return Ok(ConnectOutcome::LeadsExhausted);
            }

            self.agent.enter_waiting();
            self.stats.rounds_dialed += 1;
            debug!(
                "📞 Dialing round of {} lead(s) for agent {}",
                batch.len(),
                self.agent.id()
            );

            if let Some(number) = self.race_batch(batch).await {
                self.agent.call_started(number.clone())?;
                self.stats.calls_connected += 1;
                info!(
                    "✅ Agent {} connected to {}",
                    self.agent.id(),
                    number
                );
                return Ok(ConnectOutcome::Connected(number));
            }

            // Whole round failed; pull a fresh batch without agent
            // intervention.
        }
    }

    /// Dial every lead in the batch concurrently and return the winning
    /// number, or `None` if every attempt failed
    ///
    /// Attempts report completions over a channel; the receive order is the
    /// completion order. On the first connected report, completions already
    /// queued behind it are drained and the connected attempt with the lowest
    /// submission index wins, which makes simultaneous-completion ties
    /// deterministic. Still-pending attempts keep running detached; their
    /// reports go nowhere once the channel closes.
    async fn race_batch(&mut self, batch: Vec<PhoneNumber>) -> Option<PhoneNumber> {
        let total = batch.len();
        let (report_tx, mut report_rx) = mpsc::unbounded_channel();

        for (index, number) in batch.into_iter().enumerate() {
            self.stats.attempts_started += 1;
            let service = Arc::clone(&self.dial_service);
            let agent_id = self.agent.id().clone();
            let tx = report_tx.clone();
            tokio::spawn(async move {
                let report = run_attempt(service, agent_id, number, index).await;
                // The receiver is gone once a winner was picked; stragglers
                // have already logged their outcome.
                let _ = tx.send(report);
            });
        }
        drop(report_tx);

        let mut failed = 0usize;
        while let Some(report) = report_rx.recv().await {
            match report {
                AttemptReport::Connected { index, number } => {
                    let mut winner = (index, number);
                    while let Ok(queued) = report_rx.try_recv() {
                        match queued {
                            AttemptReport::Connected { index, number } if index < winner.0 => {
                                winner = (index, number);
                            }
                            AttemptReport::Connected { .. } => {}
                            AttemptReport::Failed => {
                                self.stats.attempts_failed += 1;
                            }
                        }
                    }
                    return Some(winner.1);
                }
                AttemptReport::Failed => {
                    failed += 1;
                    self.stats.attempts_failed += 1;
                    if failed == total {
                        return None;
                    }
                }
            }
        }

        None
    }
}
