// pn7150/src/protocol/responses/mod.rs

pub mod activation;
pub mod discover;

pub use activation::decode_intf_activated;
pub use discover::{DiscoveredDevice, decode_discover};

use crate::constants::*;
use crate::protocol::parser;
use crate::protocol::{Frame, MessageType};
use crate::remote::RemoteDevice;
use crate::types::DeactivationType;
use crate::{Error, Result};

/// A control response (MT = 2). The first payload byte is the NCI status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub group: u8,
    pub opcode: u8,
    pub status: u8,
    pub payload: Vec<u8>,
}

impl Response {
    /// Decode a response frame, checking that it answers `expected`
    /// (`gid << 8 | oid`).
    pub fn decode(expected: u16, frame: &Frame) -> Result<Self> {
        if frame.message_type != MessageType::Response || frame.id() != expected {
            return Err(Error::UnexpectedResponse {
                expected,
                actual: frame.id(),
            });
        }
        let status = parser::byte_at(&frame.payload, 0)?;
        Ok(Self {
            group: frame.group,
            opcode: frame.opcode,
            status,
            payload: frame.payload[1..].to_vec(),
        })
    }

    /// Turn a non-zero status into `Error::Status`.
    pub fn ensure_ok(self) -> Result<Self> {
        if self.status != NCI_STATUS_OK {
            return Err(Error::Status {
                gid: self.group,
                oid: self.opcode,
                status: self.status,
            });
        }
        Ok(self)
    }
}

/// Controller notifications (MT = 3) the driver understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    InterfaceActivated(RemoteDevice),
    Discover(DiscoveredDevice),
    Deactivated {
        kind: Option<DeactivationType>,
        reason: u8,
    },
    ConnCredits,
    IsoDepPresence {
        present: bool,
    },
    T3tPolling {
        status: u8,
        responses: Vec<Vec<u8>>,
    },
    GenericError {
        status: u8,
    },
    InterfaceError {
        status: u8,
        conn_id: u8,
    },
    /// Anything else: kept as GID/OID and raw payload
    Other {
        group: u8,
        opcode: u8,
        payload: Vec<u8>,
    },
}

impl Notification {
    pub fn decode(frame: &Frame) -> Result<Self> {
        if frame.message_type != MessageType::Notification {
            return Err(Error::UnexpectedResponse {
                expected: 0x0300,
                actual: frame.id(),
            });
        }

        let p = &frame.payload;
        let n = match (frame.group, frame.opcode) {
            (NCI_GID_RF, NCI_OID_RF_INTF_ACTIVATED) => {
                Self::InterfaceActivated(decode_intf_activated(p)?)
            }
            (NCI_GID_RF, NCI_OID_RF_DISCOVER) => Self::Discover(decode_discover(p)?),
            (NCI_GID_RF, NCI_OID_RF_DEACTIVATE) => Self::Deactivated {
                kind: DeactivationType::from_byte(parser::byte_at(p, 0)?),
                reason: p.get(1).copied().unwrap_or(0),
            },
            (NCI_GID_RF, NCI_OID_RF_T3T_POLLING) => decode_t3t_polling(p)?,
            (NCI_GID_CORE, NCI_OID_CORE_CONN_CREDITS) => Self::ConnCredits,
            (NCI_GID_CORE, NCI_OID_CORE_GENERIC_ERROR) => Self::GenericError {
                status: parser::byte_at(p, 0)?,
            },
            (NCI_GID_CORE, NCI_OID_CORE_INTERFACE_ERROR) => Self::InterfaceError {
                status: parser::byte_at(p, 0)?,
                conn_id: p.get(1).copied().unwrap_or(NCI_STATIC_RF_CONN_ID),
            },
            (NCI_GID_PROPRIETARY, NCI_OID_PROP_ISO_DEP_PRESENCE_CHECK) => Self::IsoDepPresence {
                present: parser::byte_at(p, 0)? == 0x01,
            },
            (group, opcode) => Self::Other {
                group,
                opcode,
                payload: p.clone(),
            },
        };
        Ok(n)
    }
}

/// RF_T3T_POLLING_NTF: status(1) count(1) then count × (len(1) response(len))
fn decode_t3t_polling(data: &[u8]) -> Result<Notification> {
    let status = parser::byte_at(data, 0)?;
    let count = if status == NCI_STATUS_OK {
        parser::byte_at(data, 1)? as usize
    } else {
        0
    };

    let mut responses = Vec::with_capacity(count);
    let mut idx = 2;
    for _ in 0..count {
        let (resp, next) = parser::length_prefixed_at(data, idx)?;
        responses.push(resp.to_vec());
        idx = next;
    }
    Ok(Notification::T3tPolling { status, responses })
}
