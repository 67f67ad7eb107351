//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize MockTransport scripting so tests across the
//! crate and the tests/ directory drive the controller through the same
//! handshakes.
#![allow(dead_code)]

use crate::controller::{Config, Controller, DiscoveryProfile};
use crate::transport::MockTransport;
use crate::types::{Mode, Protocol};
use crate::utils::ms;
use crate::{Error, Result};

/// `[0x40|gid, oid, 1, STATUS_OK]`
#[doc(hidden)]
pub fn ok_response(gid: u8, oid: u8) -> Vec<u8> {
    vec![0x40 | gid, oid, 0x01, 0x00]
}

/// Single, unsegmented data packet on the static RF connection.
#[doc(hidden)]
pub fn data_packet(payload: &[u8]) -> Vec<u8> {
    let mut frame = vec![0x00, 0x00, payload.len() as u8];
    frame.extend_from_slice(payload);
    frame
}

/// RF_DISCOVER_NTF without technology parameters.
#[doc(hidden)]
pub fn discover_ntf(id: u8, protocol: Protocol, mode_tech: u8, last: bool) -> Vec<u8> {
    let kind = if last { 0x00 } else { 0x02 };
    vec![0x61, 0x03, 0x05, id, protocol as u8, mode_tech, 0x00, kind]
}

#[doc(hidden)]
pub fn deactivate_ntf(kind: u8) -> Vec<u8> {
    vec![0x61, 0x06, 0x02, kind, 0x00]
}

/// RF_INTF_ACTIVATED_NTF. The maximum payload (0xFF) sits at frame index 7.
#[doc(hidden)]
pub fn activation_ntf(
    id: u8,
    interface: u8,
    protocol: u8,
    mode_tech: u8,
    tech_params: &[u8],
    activation_params: &[u8],
) -> Vec<u8> {
    let mut payload = vec![id, interface, protocol, mode_tech, 0xFF, 0x01];
    payload.push(tech_params.len() as u8);
    payload.extend_from_slice(tech_params);
    payload.extend_from_slice(&[mode_tech, 0x00, 0x00]);
    payload.push(activation_params.len() as u8);
    payload.extend_from_slice(activation_params);

    let mut frame = vec![0x61, 0x05, payload.len() as u8];
    frame.extend(payload);
    frame
}

/// Poll A, Type 2 tag over the frame interface
#[doc(hidden)]
pub fn t2t_activation_ntf(id: u8) -> Vec<u8> {
    activation_ntf(
        id,
        0x01,
        0x02,
        0x00,
        &[0x44, 0x00, 0x07, 0x04, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x01, 0x00],
        &[],
    )
}

/// Poll A, ISO-DEP with an ATS
#[doc(hidden)]
pub fn iso_dep_activation_ntf(id: u8) -> Vec<u8> {
    activation_ntf(
        id,
        0x02,
        0x04,
        0x00,
        &[0x04, 0x00, 0x04, 0x08, 0x1A, 0x2B, 0x3C, 0x01, 0x20],
        &[0x05, 0x78, 0x80, 0x70, 0x02, 0x00],
    )
}

/// Poll F, Type 3 tag over the frame interface
#[doc(hidden)]
pub fn nfc_f_activation_ntf(id: u8) -> Vec<u8> {
    let mut params = vec![0x01, 0x12, 0x01, 0x01];
    params.extend_from_slice(&[0x01, 0x2E, 0x3D, 0x4C, 0x5B, 0x6A, 0x79, 0x88]);
    params.extend_from_slice(&[0x03, 0x01, 0x4B, 0x02, 0x4F, 0x49, 0x93, 0xFF]);
    activation_ntf(id, 0x01, 0x03, 0x02, &params, &[])
}

/// Listen A, a reader selected us over ISO-DEP
#[doc(hidden)]
pub fn listen_a_activation_ntf(id: u8) -> Vec<u8> {
    activation_ntf(id, 0x02, 0x04, 0x80, &[], &[])
}

/// NFC-DEP link, as target (`listen`) or initiator over passive A
#[doc(hidden)]
pub fn nfc_dep_activation_ntf(listen: bool) -> Vec<u8> {
    if listen {
        activation_ntf(1, 0x03, 0x05, 0x80, &[], &[])
    } else {
        activation_ntf(
            1,
            0x03,
            0x05,
            0x00,
            &[0x40, 0x00, 0x04, 0x08, 0x01, 0x02, 0x03, 0x01, 0x40],
            &[],
        )
    }
}

/// Short timeouts for tests that wait on silence.
#[doc(hidden)]
pub fn fast_config() -> Config {
    Config {
        tag_timeout: ms(20),
        presence_check_interval: ms(1),
        ..Config::default()
    }
}

/// Uninitialized controller on a clone of `mock`.
#[doc(hidden)]
pub fn controller_with(mock: &MockTransport) -> Controller {
    Controller::new(Box::new(mock.clone()), Config::default())
}

fn initialize(mock: &MockTransport, config: Config) -> Result<Controller> {
    let mut ctrl = Controller::new(Box::new(mock.clone()), config);
    mock.queue_reply(vec![ok_response(0x00, 0x00)]);
    mock.queue_reply(vec![ok_response(0x00, 0x01)]);
    ctrl.initialize()?;
    Ok(ctrl)
}

fn discover(mock: &MockTransport, mode: Mode, config: Config) -> Result<Controller> {
    let mut ctrl = initialize(mock, config)?;
    mock.queue_reply(vec![ok_response(0x01, 0x00)]);
    if !DiscoveryProfile::for_mode(mode).routing.is_empty() {
        mock.queue_reply(vec![ok_response(0x01, 0x01)]);
    }
    ctrl.configure(mode)?;
    mock.queue_reply(vec![ok_response(0x01, 0x03)]);
    ctrl.start_discovery()?;
    Ok(ctrl)
}

fn activate(mock: &MockTransport, mode: Mode, ntf: Vec<u8>, config: Config) -> Result<Controller> {
    let mut ctrl = discover(mock, mode, config)?;
    mock.push_frame(&ntf);
    if ctrl.await_activation(ms(100))?.is_none() {
        return Err(Error::InvalidState("activation notification not seen".into()));
    }
    mock.clear_written();
    Ok(ctrl)
}

/// Controller after CORE_RESET/CORE_INIT; written packets are cleared.
#[doc(hidden)]
pub fn initialized_controller(mock: &MockTransport) -> Result<Controller> {
    let ctrl = initialize(mock, Config::default())?;
    mock.clear_written();
    Ok(ctrl)
}

/// Controller configured for `mode` with discovery running.
#[doc(hidden)]
pub fn discovering_controller(mock: &MockTransport, mode: Mode) -> Result<Controller> {
    let ctrl = discover(mock, mode, Config::default())?;
    mock.clear_written();
    Ok(ctrl)
}

/// Reader/writer controller with the device from `ntf` activated.
#[doc(hidden)]
pub fn activated_controller(mock: &MockTransport, ntf: Vec<u8>) -> Result<Controller> {
    activate(mock, Mode::ReaderWriter, ntf, Config::default())
}

#[doc(hidden)]
pub fn activated_controller_in(
    mock: &MockTransport,
    mode: Mode,
    ntf: Vec<u8>,
) -> Result<Controller> {
    activate(mock, mode, ntf, Config::default())
}

#[doc(hidden)]
pub fn activated_controller_with_config(
    mock: &MockTransport,
    ntf: Vec<u8>,
    config: Config,
) -> Result<Controller> {
    activate(mock, Mode::ReaderWriter, ntf, config)
}
