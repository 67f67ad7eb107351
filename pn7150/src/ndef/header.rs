// pn7150/src/ndef/header.rs

use bitflags::bitflags;
use derive_more::Display;

use crate::protocol::parser;
use crate::{Error, Result};

bitflags! {
    /// Flag bits of the NDEF record header byte (TNF excluded)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HeaderFlags: u8 {
        /// Message begin
        const MB = 0x80;
        /// Message end
        const ME = 0x40;
        /// Chunk flag
        const CF = 0x20;
        /// Short record: one byte payload length
        const SR = 0x10;
        /// ID length field present
        const IL = 0x08;
    }
}

/// Type Name Format (low three bits of the header byte)
#[repr(u8)]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tnf {
    #[default]
    Empty = 0x00,
    WellKnown = 0x01,
    /// RFC 2046 media type
    Media = 0x02,
    AbsoluteUri = 0x03,
    External = 0x04,
    Unknown = 0x05,
    Unchanged = 0x06,
    Reserved = 0x07,
}

impl Tnf {
    pub const MASK: u8 = 0x07;

    pub fn from_bits(value: u8) -> Self {
        match value & Self::MASK {
            0x00 => Self::Empty,
            0x01 => Self::WellKnown,
            0x02 => Self::Media,
            0x03 => Self::AbsoluteUri,
            0x04 => Self::External,
            0x05 => Self::Unknown,
            0x06 => Self::Unchanged,
            _ => Self::Reserved,
        }
    }
}

/// Where a record sits in its message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordPosition {
    Single,
    First,
    Middle,
    Last,
}

impl RecordPosition {
    pub fn for_index(index: usize, count: usize) -> Self {
        match (index, count) {
            (_, 0 | 1) => Self::Single,
            (0, _) => Self::First,
            (i, n) if i + 1 == n => Self::Last,
            _ => Self::Middle,
        }
    }

    pub fn flags(&self) -> HeaderFlags {
        match self {
            Self::Single => HeaderFlags::MB | HeaderFlags::ME,
            Self::First => HeaderFlags::MB,
            Self::Middle => HeaderFlags::empty(),
            Self::Last => HeaderFlags::ME,
        }
    }
}

/// Header byte for a short record without ID, e.g. `Single` + `WellKnown`
/// gives 0xD1 and `Last` + `Media` gives 0x52.
pub fn header_byte(position: RecordPosition, tnf: Tnf) -> u8 {
    (position.flags() | HeaderFlags::SR).bits() | tnf as u8
}

/// Rewrite the position bits of an existing header byte, keeping SR, IL
/// and TNF. Chunking is never produced, so CF is cleared.
pub fn reposition(byte: u8, position: RecordPosition) -> u8 {
    let keep = HeaderFlags::from_bits_truncate(byte) & (HeaderFlags::SR | HeaderFlags::IL);
    (position.flags() | keep).bits() | (byte & Tnf::MASK)
}

/// Decoded fixed part of a record: header byte through the ID length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub flags: HeaderFlags,
    pub tnf: Tnf,
    pub type_len: u8,
    pub payload_len: u32,
    pub id_len: u8,
}

impl RecordHeader {
    /// Parse the header at the start of `buf`. Returns the header and the
    /// number of bytes it occupies.
    pub fn decode(buf: &[u8]) -> Result<(Self, usize)> {
        let byte = parser::byte_at(buf, 0)?;
        let flags = HeaderFlags::from_bits_truncate(byte);
        let type_len = parser::byte_at(buf, 1)?;

        let (payload_len, mut idx) = if flags.contains(HeaderFlags::SR) {
            (parser::byte_at(buf, 2)? as u32, 3)
        } else {
            (parser::be_u32_at(buf, 2)?, 6)
        };

        let id_len = if flags.contains(HeaderFlags::IL) {
            let l = parser::byte_at(buf, idx)?;
            idx += 1;
            l
        } else {
            0
        };

        Ok((
            Self {
                flags,
                tnf: Tnf::from_bits(byte),
                type_len,
                payload_len,
                id_len,
            },
            idx,
        ))
    }

    pub fn byte(&self) -> u8 {
        self.flags.bits() | self.tnf as u8
    }

    pub fn is_first(&self) -> bool {
        self.flags.contains(HeaderFlags::MB)
    }

    pub fn is_last(&self) -> bool {
        self.flags.contains(HeaderFlags::ME)
    }

    /// Header + type + id + payload
    pub fn record_len(&self, header_len: usize) -> Result<usize> {
        let body = self.type_len as usize + self.id_len as usize;
        usize::try_from(self.payload_len)
            .ok()
            .and_then(|p| header_len.checked_add(body)?.checked_add(p))
            .ok_or_else(|| Error::NdefFormat(format!("payload length {} too large", self.payload_len)))
    }
}
