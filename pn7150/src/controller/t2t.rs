// pn7150/src/controller/t2t.rs

//! NFC Forum Type 2 tag memory layout

use crate::{Error, Result};

pub const CMD_READ: u8 = 0x30;
pub const CMD_WRITE: u8 = 0xA2;
pub const ACK: u8 = 0x0A;

pub const PAGE_SIZE: usize = 4;
/// READ returns four pages
pub const READ_SIZE: usize = 16;
pub const CC_PAGE: u8 = 3;
pub const DATA_PAGE: u8 = 4;
/// Data bytes reachable in sector 0 (pages 4..=255)
pub const SECTOR_DATA_SIZE: usize = (256 - DATA_PAGE as usize) * PAGE_SIZE;

const CC_MAGIC: u8 = 0xE1;

const TLV_NULL: u8 = 0x00;
const TLV_NDEF: u8 = 0x03;
const TLV_TERMINATOR: u8 = 0xFE;

/// Capability container (page 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityContainer {
    pub version: u8,
    /// Data area size in bytes
    pub data_size: usize,
    pub access: u8,
}

impl CapabilityContainer {
    pub fn parse(page: &[u8]) -> Result<Self> {
        match page {
            [CC_MAGIC, version, size, access, ..] => Ok(Self {
                version: *version,
                data_size: *size as usize * 8,
                access: *access,
            }),
            [magic, ..] => Err(Error::Tag(format!(
                "not an NDEF formatted type 2 tag (cc magic {:#04x})",
                magic
            ))),
            [] => Err(Error::Tag("empty capability container".into())),
        }
    }

    pub fn writable(&self) -> bool {
        self.access & 0x0F == 0x00
    }

    /// Data area size, capped at what sector 0 can address.
    pub fn addressable_size(&self) -> usize {
        self.data_size.min(SECTOR_DATA_SIZE)
    }
}

/// Page address in sector 0. Sector select is not supported.
pub fn page_number(page: usize) -> Result<u8> {
    u8::try_from(page).map_err(|_| {
        Error::UnsupportedOperation(format!("type 2 page {} is beyond sector 0", page))
    })
}

/// Result of scanning the data area for the NDEF TLV
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlvScan {
    /// NDEF message found at `start..start + len`
    Found { start: usize, len: usize },
    /// The TLV area continues past the bytes read so far
    NeedMore,
    /// Terminator reached without an NDEF TLV
    Absent,
}

/// Walk the TLVs at the start of the data area. Lock/memory control and
/// proprietary TLVs are skipped.
pub fn scan_tlvs(data: &[u8]) -> TlvScan {
    let mut idx = 0;
    while let Some(&t) = data.get(idx) {
        match t {
            TLV_NULL => {
                idx += 1;
                continue;
            }
            TLV_TERMINATOR => return TlvScan::Absent,
            _ => {}
        }

        let Some((len, header)) = tlv_length(&data[idx + 1..]) else {
            return TlvScan::NeedMore;
        };
        let start = idx + 1 + header;
        if t == TLV_NDEF {
            if data.len() < start + len {
                return TlvScan::NeedMore;
            }
            return TlvScan::Found { start, len };
        }
        idx = start + len;
    }
    TlvScan::NeedMore
}

/// One-byte length, or 0xFF followed by a big-endian u16
fn tlv_length(data: &[u8]) -> Option<(usize, usize)> {
    match data {
        [0xFF, hi, lo, ..] => Some((u16::from_be_bytes([*hi, *lo]) as usize, 3)),
        [0xFF, ..] | [] => None,
        [len, ..] => Some((*len as usize, 1)),
    }
}

/// NDEF TLV + terminator, padded to whole pages
pub fn wrap_ndef(message: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(message.len() + 5);
    out.push(TLV_NDEF);
    if message.len() < 0xFF {
        out.push(message.len() as u8);
    } else {
        out.push(0xFF);
        out.extend_from_slice(&(message.len() as u16).to_be_bytes());
    }
    out.extend_from_slice(message);
    out.push(TLV_TERMINATOR);
    while out.len() % PAGE_SIZE != 0 {
        out.push(TLV_NULL);
    }
    out
}
