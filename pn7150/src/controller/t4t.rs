// pn7150/src/controller/t4t.rs

//! NFC Forum Type 4 tag APDUs and capability container

use crate::constants::{SW_OK, T4T_CC_FILE_ID, T4T_NDEF_AID};
use crate::protocol::parser;
use crate::{Error, Result};

pub const INS_SELECT: u8 = 0xA4;
pub const INS_READ_BINARY: u8 = 0xB0;
pub const INS_UPDATE_BINARY: u8 = 0xD6;

const CC_LEN: u8 = 0x0F;
const NDEF_FILE_CONTROL_TLV: u8 = 0x04;

/// SELECT NDEF tag application by name
pub fn select_application() -> Vec<u8> {
    let mut apdu = vec![0x00, INS_SELECT, 0x04, 0x00, T4T_NDEF_AID.len() as u8];
    apdu.extend_from_slice(&T4T_NDEF_AID);
    apdu.push(0x00);
    apdu
}

/// SELECT elementary file by identifier, first or only occurrence
pub fn select_file(file_id: [u8; 2]) -> Vec<u8> {
    vec![0x00, INS_SELECT, 0x00, 0x0C, 0x02, file_id[0], file_id[1]]
}

pub fn select_cc() -> Vec<u8> {
    select_file(T4T_CC_FILE_ID)
}

pub fn read_binary(offset: u16, len: u8) -> Vec<u8> {
    let o = offset.to_be_bytes();
    vec![0x00, INS_READ_BINARY, o[0], o[1], len]
}

pub fn update_binary(offset: u16, data: &[u8]) -> Vec<u8> {
    let o = offset.to_be_bytes();
    let mut apdu = vec![0x00, INS_UPDATE_BINARY, o[0], o[1], data.len() as u8];
    apdu.extend_from_slice(data);
    apdu
}

/// Split a response APDU into data and check the status word.
pub fn check_sw(resp: &[u8]) -> Result<&[u8]> {
    let Some(split) = resp.len().checked_sub(2) else {
        return Err(Error::Tag(format!("short apdu response ({} bytes)", resp.len())));
    };
    let (data, sw) = resp.split_at(split);
    if sw != SW_OK {
        return Err(Error::Tag(format!("status word {:02X}{:02X}", sw[0], sw[1])));
    }
    Ok(data)
}

/// Capability container file (E103)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityContainer {
    pub version: u8,
    /// Maximum R-APDU data size
    pub max_le: u16,
    /// Maximum C-APDU data size
    pub max_lc: u16,
    pub ndef_file_id: [u8; 2],
    pub ndef_max_size: u16,
    pub read_access: u8,
    pub write_access: u8,
}

impl CapabilityContainer {
    /// Layout: CCLEN(2) version(1) MLe(2) MLc(2) then the NDEF file
    /// control TLV: 04 06 file_id(2) max_size(2) read(1) write(1)
    pub fn parse(data: &[u8]) -> Result<Self> {
        parser::ensure_len(data, CC_LEN as usize)?;
        if data[7] != NDEF_FILE_CONTROL_TLV {
            return Err(Error::Tag(format!(
                "capability container without ndef file control tlv ({:#04x})",
                data[7]
            )));
        }
        Ok(Self {
            version: data[2],
            max_le: parser::be_u16_at(data, 3)?,
            max_lc: parser::be_u16_at(data, 5)?,
            ndef_file_id: [data[9], data[10]],
            ndef_max_size: parser::be_u16_at(data, 11)?,
            read_access: data[13],
            write_access: data[14],
        })
    }

    pub fn to_bytes(&self) -> [u8; 15] {
        let le = self.max_le.to_be_bytes();
        let lc = self.max_lc.to_be_bytes();
        let max = self.ndef_max_size.to_be_bytes();
        [
            0x00,
            CC_LEN,
            self.version,
            le[0],
            le[1],
            lc[0],
            lc[1],
            NDEF_FILE_CONTROL_TLV,
            0x06,
            self.ndef_file_id[0],
            self.ndef_file_id[1],
            max[0],
            max[1],
            self.read_access,
            self.write_access,
        ]
    }

    /// Largest chunk a single READ BINARY may ask for
    pub fn read_chunk(&self) -> usize {
        (self.max_le as usize).clamp(1, 0xFF)
    }

    /// Largest chunk a single UPDATE BINARY may carry
    pub fn write_chunk(&self) -> usize {
        (self.max_lc as usize).clamp(1, 0xFF)
    }
}
