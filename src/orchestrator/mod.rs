//! Power-dialer orchestration
//!
//! Coordinates one agent's outbound dial batches: pulling bounded lead
//! batches from the injected [`LeadSource`](crate::integration::LeadSource),
//! racing concurrent dial attempts against the injected
//! [`DialService`](crate::integration::DialService), retrying failed rounds,
//! and driving the [`Agent`](crate::agent::Agent) state machine with the
//! result.

pub mod core;
mod dialing;

pub use core::{ConnectOutcome, PowerDialer};
