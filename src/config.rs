use serde::{Deserialize, Serialize};

use crate::error::{DialerError, Result};

/// Power-dialer configuration
///
/// Controls how aggressively the dialer fans out per agent slot. The batch
/// width trades idle agent time against wasted connected calls: with a
/// non-trivial answer rate, dialing more than one lead per available agent
/// keeps the agent busy, at the cost of occasionally connecting more
/// customers than there are agents to talk to.
///
/// # Examples
///
/// ```
/// use dialer_engine::config::DialerConfig;
///
/// let config = DialerConfig::default();
/// assert_eq!(config.dial_ratio, 2);
/// config.validate().expect("default configuration is valid");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialerConfig {
    /// Maximum number of leads pulled and dialed concurrently per round
    ///
    /// Each `connect()` round pulls up to this many leads from the lead
    /// source and races them to the first connected call.
    pub dial_ratio: usize,
}

impl Default for DialerConfig {
    fn default() -> Self {
        Self { dial_ratio: 2 }
    }
}

impl DialerConfig {
    /// Validate the configuration
    ///
    /// Returns [`DialerError::Configuration`] describing the first invalid
    /// value found.
    pub fn validate(&self) -> Result<()> {
        if self.dial_ratio == 0 {
            return Err(DialerError::configuration(
                "dial_ratio must be at least 1",
            ));
        }
        Ok(())
    }
}
