//! Shared test doubles for power-dialer scenario tests
//!
//! Mirrors the collaborators a deployment injects: a scripted lead source, a
//! dial service driven by per-number scenarios, and a tracing layer that
//! captures log output so the log-message contract can be asserted.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use dialer_engine::agent::{AgentId, CallState, PhoneNumber};
use dialer_engine::integration::{DialService, DialServiceError, LeadSource};

/// Lead source that yields a fixed list of numbers in order
pub struct ScriptedLeads {
    numbers: VecDeque<PhoneNumber>,
}

impl ScriptedLeads {
    pub fn new<I, S>(numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PhoneNumber>,
    {
        Self {
            numbers: numbers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn empty() -> Self {
        Self {
            numbers: VecDeque::new(),
        }
    }
}

impl LeadSource for ScriptedLeads {
    fn next_lead(&mut self) -> Option<PhoneNumber> {
        self.numbers.pop_front()
    }
}

enum ScenarioOutcome {
    State(CallState),
    Error(String),
}

struct Scenario {
    delay: Option<Duration>,
    outcome: ScenarioOutcome,
}

/// Dial service stub driven by per-number scenarios
///
/// Each number maps to a scenario: optionally wait, then resolve with a call
/// state or fail with a service error. Dialing a number without a scenario is
/// a service error, matching nothing a test meant to script.
#[derive(Default)]
pub struct ScenarioDialService {
    scenarios: HashMap<String, Scenario>,
}

impl ScenarioDialService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number resolves immediately with the given terminal state
    pub fn resolves(self, number: &str, state: CallState) -> Self {
        self.scripted(number, None, ScenarioOutcome::State(state))
    }

    /// Number resolves with the given terminal state after a delay
    pub fn resolves_after(self, number: &str, state: CallState, delay_ms: u64) -> Self {
        self.scripted(
            number,
            Some(Duration::from_millis(delay_ms)),
            ScenarioOutcome::State(state),
        )
    }

    /// Number fails with a transport-level service error
    pub fn errors(self, number: &str, message: &str) -> Self {
        self.scripted(number, None, ScenarioOutcome::Error(message.to_string()))
    }

    fn scripted(
        mut self,
        number: &str,
        delay: Option<Duration>,
        outcome: ScenarioOutcome,
    ) -> Self {
        self.scenarios
            .insert(number.to_string(), Scenario { delay, outcome });
        self
    }
}

#[async_trait]
impl DialService for ScenarioDialService {
    async fn dial(
        &self,
        _agent: &AgentId,
        number: &PhoneNumber,
    ) -> std::result::Result<CallState, DialServiceError> {
        let scenario = self
            .scenarios
            .get(number.as_ref())
            .ok_or_else(|| DialServiceError::new("matching scenario was not found"))?;
        if let Some(delay) = scenario.delay {
            tokio::time::sleep(delay).await;
        }
        match &scenario.outcome {
            ScenarioOutcome::State(state) => Ok(*state),
            ScenarioOutcome::Error(message) => Err(DialServiceError::new(message.clone())),
        }
    }
}

/// Tracing layer that buffers every emitted log message
#[derive(Clone, Default)]
pub struct LogCapture {
    records: Arc<Mutex<Vec<(Level, String)>>>,
}

impl LogCapture {
    /// All captured `(level, message)` pairs in emission order
    pub fn records(&self) -> Vec<(Level, String)> {
        self.records.lock().unwrap().clone()
    }

    /// Messages captured at the given level, in emission order
    pub fn messages_at(&self, level: Level) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

struct MessageVisitor(Option<String>);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = Some(format!("{:?}", value));
        }
    }
}

impl<S: Subscriber> Layer<S> for LogCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(None);
        event.record(&mut visitor);
        if let Some(message) = visitor.0 {
            self.records
                .lock()
                .unwrap()
                .push((*event.metadata().level(), message));
        }
    }
}

/// Install a capturing subscriber for the current thread
///
/// Keep the returned guard alive for the duration of the test. Tests run on
/// tokio's current-thread runtime, so spawned dial tasks emit into the same
/// thread-default subscriber.
pub fn capture_logs() -> (LogCapture, tracing::subscriber::DefaultGuard) {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    let guard = tracing::subscriber::set_default(subscriber);
    (capture, guard)
}
