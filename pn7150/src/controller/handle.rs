// pn7150/src/controller/handle.rs

use std::collections::VecDeque;
use std::time::Duration;

use log::{debug, trace, warn};

use super::profile::DiscoveryProfile;
use super::{Config, State};
use crate::constants::NCI_STATIC_RF_CONN_ID;
use crate::protocol::commands::RESET_CONFIG;
use crate::protocol::{
    Command, DiscoveredDevice, Frame, MessageType, Notification, Response, codec,
};
use crate::remote::RemoteDevice;
use crate::transport::Transport;
use crate::types::{DeactivationType, Interface, Mode, ModeTech};
use crate::utils::Deadline;
use crate::{Error, Result};

/// Host side of the NCI controller: owns the transport, tracks the
/// discovery state and the activated remote device.
///
/// All calls are synchronous. Every wait is a bounded poll against the
/// transport's data-ready signal.
pub struct Controller {
    transport: Box<dyn Transport>,
    config: Config,
    state: State,
    techs: Vec<ModeTech>,
    remote: Option<RemoteDevice>,
    /// Candidates from RF_DISCOVER_NTF not yet activated
    pending: VecDeque<DiscoveredDevice>,
    /// Frames that arrived while a response was awaited, in arrival order
    backlog: VecDeque<Frame>,
}

impl Controller {
    pub fn new(transport: Box<dyn Transport>, config: Config) -> Self {
        Self {
            transport,
            config,
            state: State::Uninitialized,
            techs: Vec::new(),
            remote: None,
            pending: VecDeque::new(),
            backlog: VecDeque::new(),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn mode(&self) -> Option<Mode> {
        self.state.mode()
    }

    /// The currently activated device, if any
    pub fn remote_device(&self) -> Option<&RemoteDevice> {
        self.remote.as_ref()
    }

    /// Discovery candidates waiting for `activate_next_pending`
    pub fn pending_devices(&self) -> impl Iterator<Item = &DiscoveredDevice> {
        self.pending.iter()
    }

    /// Pulse reset, then CORE_RESET (configuration reset) and CORE_INIT.
    pub fn initialize(&mut self) -> Result<()> {
        self.state = State::Uninitialized;
        self.remote = None;
        self.pending.clear();
        self.backlog.clear();

        let (active_low, hold) = (self.config.reset_active_low, self.config.reset_hold);
        self.transport
            .reset(active_low, hold)
            .map_err(|e| self.fail(e))?;

        self.execute(&Command::CoreReset {
            reset_type: RESET_CONFIG,
        })?;
        self.execute(&Command::CoreInit)?;

        self.set_state(State::Initialized);
        Ok(())
    }

    /// Program discover map, listen routing and the default discovery
    /// technologies for `mode`.
    pub fn configure(&mut self, mode: Mode) -> Result<()> {
        let profile = DiscoveryProfile::for_mode(mode);
        self.program(mode, profile)
    }

    /// Like `configure`, with an explicit list of raw mode/tech bytes to
    /// discover. Every byte is validated before anything is written.
    pub fn configure_technologies(&mut self, mode: Mode, mode_techs: &[u8]) -> Result<()> {
        let techs = mode_techs
            .iter()
            .map(|b| ModeTech::try_from(*b))
            .collect::<Result<Vec<_>>>()?;
        let mut profile = DiscoveryProfile::for_mode(mode);
        profile.techs = techs;
        self.program(mode, profile)
    }

    fn program(&mut self, mode: Mode, profile: DiscoveryProfile) -> Result<()> {
        match self.state {
            State::Initialized | State::Configured(_) => {}
            other => {
                return Err(Error::InvalidState(format!(
                    "cannot configure while {}",
                    other
                )));
            }
        }

        self.execute(&Command::RfDiscoverMap {
            entries: profile.map,
        })?;
        if !profile.routing.is_empty() {
            self.execute(&Command::RfSetListenModeRouting {
                protocols: profile.routing,
            })?;
        }
        self.techs = profile.techs;
        self.set_state(State::Configured(mode));
        Ok(())
    }

    pub fn start_discovery(&mut self) -> Result<()> {
        let State::Configured(mode) = self.state else {
            return Err(Error::InvalidState(format!(
                "cannot start discovery while {}",
                self.state
            )));
        };
        self.pending.clear();
        self.remote = None;
        self.execute(&Command::RfDiscover {
            techs: self.techs.clone(),
        })?;
        self.set_state(State::Discovering(mode));
        Ok(())
    }

    /// Return to `Configured`. Does nothing when discovery is not running.
    pub fn stop_discovery(&mut self) -> Result<()> {
        match self.state {
            State::Discovering(_) => {
                self.execute(&Command::RfDeactivate {
                    kind: DeactivationType::Idle,
                })?;
                self.after_deactivation(Some(DeactivationType::Idle));
                Ok(())
            }
            State::Activated(_) => self.deactivate(DeactivationType::Idle),
            _ => Ok(()),
        }
    }

    /// Wait for an activated device. `Ok(None)` when nothing showed up in
    /// time. When several devices answer, the first is selected and the
    /// rest are kept for `activate_next_pending`.
    pub fn await_activation(&mut self, timeout: Duration) -> Result<Option<RemoteDevice>> {
        if !matches!(self.state, State::Discovering(_)) {
            return Err(Error::InvalidState(format!(
                "cannot await activation while {}",
                self.state
            )));
        }

        let deadline = Deadline::after(timeout);
        loop {
            let frame = match self.next_frame(deadline.remaining()) {
                Ok(f) => f,
                Err(Error::Timeout) => return Ok(None),
                Err(e) => return Err(e),
            };
            match self.decode_notification(&frame)? {
                Some(Notification::InterfaceActivated(dev)) => return Ok(Some(self.activated(dev))),
                Some(Notification::Discover(dev)) => {
                    let last = dev.last;
                    debug!(
                        "discovered id {} protocol {} mode/tech {:#04x}",
                        dev.discovery_id, dev.protocol, dev.mode_tech
                    );
                    self.pending.push_back(dev);
                    if last {
                        self.select_next_pending()?;
                    }
                }
                Some(other) => trace!("ignoring {:?} while discovering", other),
                None => {}
            }
        }
    }

    /// Put the current device to sleep and activate it again.
    pub fn reactivate(&mut self) -> Result<RemoteDevice> {
        let current = self.activated_device()?.clone();
        self.deactivate(DeactivationType::Sleep)?;
        self.select(current.discovery_id, current.protocol)?;
        self.wait_activation()
    }

    /// Put the current device to sleep and activate the next candidate
    /// of the same discovery cycle.
    pub fn activate_next_pending(&mut self) -> Result<RemoteDevice> {
        self.activated_device()?;
        if self.pending.is_empty() {
            return Err(Error::InvalidState("no pending device".into()));
        }
        self.deactivate(DeactivationType::Sleep)?;
        self.select_next_pending()?;
        self.wait_activation()
    }

    /// Deactivate the current device. `Discovery` resumes polling, `Idle`
    /// stops discovery, `Sleep`/`SleepAf` keep the cycle open for a new
    /// selection.
    pub fn deactivate(&mut self, kind: DeactivationType) -> Result<()> {
        self.activated_device()?;
        self.execute(&Command::RfDeactivate { kind })?;

        let deadline = Deadline::after(self.config.response_timeout);
        loop {
            let frame = match self.next_frame(deadline.remaining()) {
                Ok(f) => f,
                Err(Error::Timeout) => {
                    warn!("no deactivation notification, assuming {}", kind);
                    self.after_deactivation(Some(kind));
                    return Ok(());
                }
                Err(e) => return Err(e),
            };
            match self.decode_notification(&frame)? {
                Some(Notification::Deactivated { kind: k, .. }) => {
                    self.after_deactivation(k.or(Some(kind)));
                    return Ok(());
                }
                Some(other) => trace!("ignoring {:?} while deactivating", other),
                None => {}
            }
        }
    }

    pub(crate) fn activated_device(&self) -> Result<&RemoteDevice> {
        match (&self.state, &self.remote) {
            (State::Activated(_), Some(dev)) => Ok(dev),
            _ => Err(Error::InvalidState(format!(
                "no activated device while {}",
                self.state
            ))),
        }
    }

    fn select_next_pending(&mut self) -> Result<()> {
        let Some(next) = self.pending.pop_front() else {
            return Err(Error::InvalidState("no pending device".into()));
        };
        self.select(next.discovery_id, next.protocol)
    }

    fn select(&mut self, discovery_id: u8, protocol: crate::types::Protocol) -> Result<()> {
        debug!("selecting discovery id {} ({})", discovery_id, protocol);
        self.execute(&Command::RfDiscoverSelect {
            discovery_id,
            protocol,
            interface: Interface::for_protocol(protocol),
        })?;
        Ok(())
    }

    fn wait_activation(&mut self) -> Result<RemoteDevice> {
        let deadline = Deadline::after(self.config.tag_timeout);
        loop {
            let frame = self.next_frame(deadline.remaining())?;
            match self.decode_notification(&frame)? {
                Some(Notification::InterfaceActivated(dev)) => return Ok(self.activated(dev)),
                Some(Notification::Deactivated { kind, .. }) => {
                    self.after_deactivation(kind);
                    return Err(Error::Deactivated);
                }
                Some(other) => trace!("ignoring {:?} while selecting", other),
                None => {}
            }
        }
    }

    fn activated(&mut self, mut dev: RemoteDevice) -> RemoteDevice {
        dev.more_tags_pending = !self.pending.is_empty();
        let mode = self.state.mode().unwrap_or_default();
        debug!(
            "activated {} over {} (mode/tech {:#04x}, more pending: {})",
            dev.protocol, dev.interface, dev.mode_tech, dev.more_tags_pending
        );
        self.remote = Some(dev.clone());
        self.set_state(State::Activated(mode));
        dev
    }

    /// Apply a deactivation, whether requested by the host or reported by
    /// the controller.
    pub(crate) fn after_deactivation(&mut self, kind: Option<DeactivationType>) {
        let Some(mode) = self.state.mode() else {
            return;
        };
        self.remote = None;
        match kind {
            Some(DeactivationType::Idle) => {
                self.pending.clear();
                self.set_state(State::Configured(mode));
            }
            _ => self.set_state(State::Discovering(mode)),
        }
    }

    fn set_state(&mut self, next: State) {
        if self.state != next {
            debug!("state {} -> {}", self.state, next);
            self.state = next;
        }
    }

    /// Record a failure. Transport errors leave the controller needing
    /// `initialize` again.
    pub(crate) fn fail(&mut self, e: Error) -> Error {
        if e.is_fatal() {
            warn!("transport failure, controller reset required: {}", e);
            self.remote = None;
            self.pending.clear();
            self.backlog.clear();
            self.state = State::Uninitialized;
        }
        e
    }

    /// Write a control command and wait for its response. Frames arriving
    /// in between are kept for later, in order.
    pub(crate) fn execute(&mut self, cmd: &Command) -> Result<Response> {
        self.write(&cmd.to_frame())?;

        let deadline = Deadline::after(self.config.response_timeout);
        loop {
            let frame = self.poll(deadline.remaining())?;
            match frame.message_type {
                MessageType::Response => {
                    return Response::decode(cmd.id(), &frame).and_then(Response::ensure_ok);
                }
                MessageType::Reserved(mt) => warn!("dropping frame with reserved type {}", mt),
                _ => self.backlog.push_back(frame),
            }
        }
    }

    pub(crate) fn write(&mut self, frame: &Frame) -> Result<()> {
        codec::write_frame(&mut *self.transport, frame).map_err(|e| self.fail(e))
    }

    /// Pause through the transport so bare-metal links can supply their own timer.
    pub(crate) fn delay(&mut self, duration: Duration) {
        self.transport.delay(duration);
    }

    fn poll(&mut self, timeout: Duration) -> Result<Frame> {
        codec::poll_frame(&mut *self.transport, timeout, self.config.poll_interval)
            .map_err(|e| self.fail(e))
    }

    /// Next frame in arrival order: backlog first, then the transport.
    pub(crate) fn next_frame(&mut self, timeout: Duration) -> Result<Frame> {
        match self.backlog.pop_front() {
            Some(frame) => Ok(frame),
            None => self.poll(timeout),
        }
    }

    /// Decode a frame expected to be a notification. Data packets and
    /// stray responses are logged and skipped (`None`).
    pub(crate) fn decode_notification(&mut self, frame: &Frame) -> Result<Option<Notification>> {
        match frame.message_type {
            MessageType::Notification => match Notification::decode(frame) {
                Ok(n) => Ok(Some(n)),
                Err(e @ Error::MalformedFrame { .. }) => {
                    warn!("discarding malformed notification {:#06x}: {}", frame.id(), e);
                    Err(e)
                }
                Err(e) => {
                    warn!("discarding notification {:#06x}: {}", frame.id(), e);
                    Ok(None)
                }
            },
            _ => {
                warn!(
                    "unexpected {:?} frame {:#06x} outside an exchange",
                    frame.message_type,
                    frame.id()
                );
                Ok(None)
            }
        }
    }

    /// Send application data on the static RF connection, segmented by
    /// the device's maximum payload.
    pub(crate) fn send_data(&mut self, data: &[u8]) -> Result<()> {
        let max = match self.activated_device()?.max_payload {
            0 => u8::MAX as usize,
            n => n as usize,
        };
        if data.is_empty() {
            return self.write(&Frame::data(NCI_STATIC_RF_CONN_ID, Vec::new()));
        }

        let mut chunks = data.chunks(max).peekable();
        while let Some(chunk) = chunks.next() {
            let mut frame = Frame::data(NCI_STATIC_RF_CONN_ID, chunk.to_vec());
            frame.segmented = chunks.peek().is_some();
            self.write(&frame)?;
        }
        Ok(())
    }

    /// Receive one complete data message, reassembling segments. A
    /// deactivation notification ends the wait with `Deactivated`.
    pub(crate) fn receive_data(&mut self, timeout: Duration) -> Result<Vec<u8>> {
        let deadline = Deadline::after(timeout);
        let mut data = Vec::new();
        loop {
            let frame = self.next_frame(deadline.remaining())?;
            match frame.message_type {
                MessageType::Data => {
                    data.extend_from_slice(&frame.payload);
                    if !frame.segmented {
                        return Ok(data);
                    }
                }
                MessageType::Notification => match Notification::decode(&frame)? {
                    Notification::Deactivated { kind, reason } => {
                        debug!("remote device deactivated ({:?}, reason {:#04x})", kind, reason);
                        self.after_deactivation(kind);
                        return Err(Error::Deactivated);
                    }
                    Notification::InterfaceError { status, .. } => {
                        return Err(Error::Tag(format!("rf interface error {:#04x}", status)));
                    }
                    Notification::GenericError { status } => {
                        warn!("controller error {:#04x} during exchange", status)
                    }
                    Notification::ConnCredits => {}
                    other => trace!("ignoring {:?} during exchange", other),
                },
                _ => warn!("unexpected frame {:#06x} during exchange", frame.id()),
            }
        }
    }
}
