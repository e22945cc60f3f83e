//! Single dial-attempt task
//!
//! One task runs per lead in a round. The task owns all per-attempt logging
//! so that attempts abandoned by the coordinator (losers of the race) still
//! report their eventual outcome in the log.

use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::agent::{AgentId, CallState, PhoneNumber};
use crate::error::DialerError;
use crate::integration::DialService;

/// Completion report of one dial attempt within a round
///
/// `index` is the attempt's submission position in the round, used as the
/// deterministic tie-break when several attempts connect at once.
#[derive(Debug)]
pub(super) enum AttemptReport {
    Connected { index: usize, number: PhoneNumber },
    Failed,
}

/// Dial one lead and classify the outcome
///
/// A service error is logged at error level; a terminal state other than
/// `CONNECTED` is logged at warn level naming the literal state. Both count
/// as attempt failures. Only a `CONNECTED` result succeeds.
pub(super) async fn run_attempt(
    service: Arc<dyn DialService>,
    agent: AgentId,
    number: PhoneNumber,
    index: usize,
) -> AttemptReport {
    match service.dial(&agent, &number).await {
        Ok(CallState::Connected) => {
            debug!("✅ Dial attempt {} connected for agent {}", number, agent);
            AttemptReport::Connected { index, number }
        }
        Ok(state) => {
            let err = DialerError::NotConnected {
                number,
                agent,
                state,
            };
            warn!("{}", err);
            AttemptReport::Failed
        }
        Err(e) => {
            let err = DialerError::DialFailed {
                number,
                agent,
                message: e.to_string(),
            };
            error!("{}", err);
            AttemptReport::Failed
        }
    }
}
