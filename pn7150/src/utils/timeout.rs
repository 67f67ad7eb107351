//! Timeout helpers used across the crate.
//!
//! All waiting in the driver is bounded busy-polling against a [`Deadline`];
//! the defaults below mirror the timings the controller needs in practice.

use std::time::{Duration, Instant};

/// Interval between two readiness checks of the transport.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5;

/// Time allowed for a control response after a command is written.
pub const DEFAULT_RESPONSE_TIMEOUT_MS: u64 = 100;

/// Time allowed for a tag to answer a data exchange.
pub const DEFAULT_TAG_TIMEOUT_MS: u64 = 1000;

/// Time a card-emulation loop waits for the next reader command.
pub const DEFAULT_EMULATION_TIMEOUT_MS: u64 = 2000;

/// Pause between two presence checks while waiting for tag removal.
pub const DEFAULT_PRESENCE_CHECK_INTERVAL_MS: u64 = 100;

/// Reset line hold time.
pub const DEFAULT_RESET_HOLD_MS: u64 = 10;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// A point in time after which a polling loop gives up.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    pub fn after(timeout: Duration) -> Self {
        Self {
            at: Instant::now() + timeout,
        }
    }

    pub fn expired(&self) -> bool {
        Instant::now() >= self.at
    }

    /// Time left, saturating at zero.
    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }
}
