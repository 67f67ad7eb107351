// pn7150/src/protocol/frame.rs

use crate::constants::{
    NCI_HEADER_LEN, NCI_MAX_PAYLOAD_LEN, NCI_MT_COMMAND, NCI_MT_DATA, NCI_MT_NOTIFICATION,
    NCI_MT_RESPONSE, NCI_PBF,
};
use crate::{Error, Result};

/// NCI message type (bits 7..5 of the first header byte)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Data,
    Command,
    Response,
    Notification,
    /// Values 4..=7 are reserved by NCI; such frames are logged and dropped.
    Reserved(u8),
}

impl MessageType {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            NCI_MT_DATA => Self::Data,
            NCI_MT_COMMAND => Self::Command,
            NCI_MT_RESPONSE => Self::Response,
            NCI_MT_NOTIFICATION => Self::Notification,
            other => Self::Reserved(other),
        }
    }

    pub fn bits(&self) -> u8 {
        match self {
            Self::Data => NCI_MT_DATA,
            Self::Command => NCI_MT_COMMAND,
            Self::Response => NCI_MT_RESPONSE,
            Self::Notification => NCI_MT_NOTIFICATION,
            Self::Reserved(bits) => *bits & 0x07,
        }
    }
}

/// NCI packet helper. Provides encode/decode of the wire frame
/// Format: [MT(3) PBF(1) GID/ConnID(4)] [OID(6) or RFU] [Len(1)] [Payload(n)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub message_type: MessageType,
    /// Packet boundary flag: more segments of the same message follow
    pub segmented: bool,
    /// GID for control messages, connection id for data packets
    pub group: u8,
    /// OID for control messages, zero for data packets
    pub opcode: u8,
    pub payload: Vec<u8>,
}

impl Frame {
    pub fn command(group: u8, opcode: u8, payload: Vec<u8>) -> Self {
        Self {
            message_type: MessageType::Command,
            segmented: false,
            group,
            opcode,
            payload,
        }
    }

    pub fn data(conn_id: u8, payload: Vec<u8>) -> Self {
        Self {
            message_type: MessageType::Data,
            segmented: false,
            group: conn_id,
            opcode: 0,
            payload,
        }
    }

    /// GID/OID packed as `gid << 8 | oid`, used in error reports.
    pub fn id(&self) -> u16 {
        ((self.group as u16) << 8) | self.opcode as u16
    }

    pub fn is(&self, message_type: MessageType, group: u8, opcode: u8) -> bool {
        self.message_type == message_type && self.group == group && self.opcode == opcode
    }

    pub fn is_data(&self) -> bool {
        self.message_type == MessageType::Data
    }

    /// Encode into header + payload bytes
    pub fn encode(&self) -> Result<Vec<u8>> {
        if self.payload.len() > NCI_MAX_PAYLOAD_LEN {
            return Err(Error::InvalidLength {
                expected: NCI_MAX_PAYLOAD_LEN,
                actual: self.payload.len(),
            });
        }

        let mut out = Vec::with_capacity(NCI_HEADER_LEN + self.payload.len());
        let pbf = if self.segmented { NCI_PBF } else { 0 };
        out.push((self.message_type.bits() << 5) | pbf | (self.group & 0x0F));
        out.push(self.opcode & 0x3F);
        out.push(self.payload.len() as u8);
        out.extend_from_slice(&self.payload);
        Ok(out)
    }

    /// Decode one complete frame; the declared length must match exactly.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < NCI_HEADER_LEN {
            return Err(Error::MalformedFrame {
                declared: NCI_HEADER_LEN,
                actual: bytes.len(),
            });
        }

        let declared = bytes[2] as usize;
        let actual = bytes.len() - NCI_HEADER_LEN;
        if declared != actual {
            return Err(Error::MalformedFrame { declared, actual });
        }

        let message_type = MessageType::from_bits(bytes[0] >> 5);
        let opcode = match message_type {
            MessageType::Data => 0,
            _ => bytes[1] & 0x3F,
        };

        Ok(Self {
            message_type,
            segmented: bytes[0] & NCI_PBF != 0,
            group: bytes[0] & 0x0F,
            opcode,
            payload: bytes[NCI_HEADER_LEN..].to_vec(),
        })
    }
}
