// pn7150/src/controller/config.rs

use std::time::Duration;

use crate::utils::*;

/// Timing parameters of a [`Controller`](super::Controller)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Pause between two readiness checks of the transport
    pub poll_interval: Duration,
    /// Wait for a control response after a command
    pub response_timeout: Duration,
    /// Wait for a tag's answer to a data exchange
    pub tag_timeout: Duration,
    /// Wait for the next reader command while emulating a card
    pub emulation_timeout: Duration,
    pub presence_check_interval: Duration,
    pub reset_hold: Duration,
    /// Reset line polarity passed to `Transport::reset`
    pub reset_active_low: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_interval: ms(DEFAULT_POLL_INTERVAL_MS),
            response_timeout: ms(DEFAULT_RESPONSE_TIMEOUT_MS),
            tag_timeout: ms(DEFAULT_TAG_TIMEOUT_MS),
            emulation_timeout: ms(DEFAULT_EMULATION_TIMEOUT_MS),
            presence_check_interval: ms(DEFAULT_PRESENCE_CHECK_INTERVAL_MS),
            reset_hold: ms(DEFAULT_RESET_HOLD_MS),
            reset_active_low: true,
        }
    }
}
