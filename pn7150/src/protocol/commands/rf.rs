// pn7150/src/protocol/commands/rf.rs

use crate::types::{Interface, ModeTech, Protocol};

/// Which side of the link a discover map entry applies to
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapMode {
    Poll = 0x01,
    Listen = 0x02,
    Both = 0x03,
}

/// One RF_DISCOVER_MAP entry: protocol → RF interface, per side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoverMapEntry {
    pub protocol: Protocol,
    pub mode: MapMode,
    pub interface: Interface,
}

impl DiscoverMapEntry {
    pub const fn new(protocol: Protocol, mode: MapMode, interface: Interface) -> Self {
        Self {
            protocol,
            mode,
            interface,
        }
    }
}

/// Encode RF_DISCOVER_MAP_CMD payload
pub fn encode_discover_map(entries: &[DiscoverMapEntry]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(1 + entries.len() * 3);
    buf.push(entries.len() as u8);
    for e in entries {
        buf.push(e.protocol as u8);
        buf.push(e.mode as u8);
        buf.push(e.interface as u8);
    }
    buf
}

/// Encode RF_SET_LISTEN_MODE_ROUTING_CMD payload with protocol-based
/// routes to the host, switched on in every power state the routing
/// table allows.
pub fn encode_listen_mode_routing(protocols: &[Protocol]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(2 + protocols.len() * 5);
    buf.push(0x00); // last message
    buf.push(protocols.len() as u8);
    for p in protocols {
        // type = protocol-based, len = 3, route = DH, power = switched on
        buf.extend_from_slice(&[0x01, 0x03, 0x00, 0x01, *p as u8]);
    }
    buf
}

/// Encode RF_DISCOVER_CMD payload; every technology is polled/listened
/// at each discovery period.
pub fn encode_discover(techs: &[ModeTech]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(1 + techs.len() * 2);
    buf.push(techs.len() as u8);
    for t in techs {
        buf.push(t.as_byte());
        buf.push(0x01);
    }
    buf
}

/// Encode RF_DISCOVER_SELECT_CMD payload
pub fn encode_discover_select(discovery_id: u8, protocol: Protocol, interface: Interface) -> Vec<u8> {
    vec![discovery_id, protocol as u8, interface as u8]
}

/// Encode RF_DEACTIVATE_CMD payload
pub fn encode_deactivate(kind: crate::types::DeactivationType) -> Vec<u8> {
    vec![kind as u8]
}

/// Encode RF_T3T_POLLING_CMD payload (system code big-endian on the wire)
pub fn encode_t3t_polling(system_code: u16, request_code: u8, time_slot: u8) -> Vec<u8> {
    let sc = system_code.to_be_bytes();
    vec![sc[0], sc[1], request_code, time_slot]
}
