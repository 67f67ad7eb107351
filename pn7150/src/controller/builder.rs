// pn7150/src/controller/builder.rs

use std::time::Duration;

use super::{Config, Controller};
use crate::transport::Transport;
use crate::{Error, Result};

/// Helper to construct a Controller with optional configuration.
pub struct ControllerBuilder {
    transport: Option<Box<dyn Transport>>,
    config: Config,
}

impl Default for ControllerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ControllerBuilder {
    pub fn new() -> Self {
        Self {
            transport: None,
            config: Config::default(),
        }
    }

    /// Provide an already-created transport instance (e.g. MockTransport)
    pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval = interval;
        self
    }

    pub fn response_timeout(mut self, timeout: Duration) -> Self {
        self.config.response_timeout = timeout;
        self
    }

    pub fn tag_timeout(mut self, timeout: Duration) -> Self {
        self.config.tag_timeout = timeout;
        self
    }

    pub fn emulation_timeout(mut self, timeout: Duration) -> Self {
        self.config.emulation_timeout = timeout;
        self
    }

    pub fn presence_check_interval(mut self, interval: Duration) -> Self {
        self.config.presence_check_interval = interval;
        self
    }

    pub fn reset(mut self, active_low: bool, hold: Duration) -> Self {
        self.config.reset_active_low = active_low;
        self.config.reset_hold = hold;
        self
    }

    /// Consume the builder and return an uninitialized Controller.
    /// Requires a transport to be provided.
    pub fn build(self) -> Result<Controller> {
        match self.transport {
            Some(t) => Ok(Controller::new(t, self.config)),
            None => Err(Error::InvalidState("no transport configured".into())),
        }
    }
}
