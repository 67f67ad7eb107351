// pn7150/src/remote/info.rs

use crate::protocol::parser;
use crate::types::{ModeTech, PollListenMode, Technology};
use crate::Result;

/// NFCID1 length bound (triple size UID)
pub const MAX_NFC_ID_LEN: usize = 10;
pub const MAX_SEL_RES_LEN: usize = 1;
pub const MAX_RATS_LEN: usize = 20;
pub const MAX_SENSB_RES_LEN: usize = 12;
pub const MAX_ATTRIB_RES_LEN: usize = 17;
pub const MAX_SENSF_RES_LEN: usize = 18;
pub const NFC_V_ID_LEN: usize = 8;

/// Poll A parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NfcAInfo {
    pub sens_res: [u8; 2],
    pub nfc_id: Vec<u8>,
    pub sel_res: Vec<u8>,
    /// RATS response (ATS), present when the ISO-DEP interface was opened
    pub rats: Vec<u8>,
}

/// Poll B parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NfcBInfo {
    pub sensb_res: Vec<u8>,
    pub attrib_res: Vec<u8>,
}

/// Poll F parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NfcFInfo {
    pub bit_rate: u8,
    pub sensf_res: Vec<u8>,
}

/// Poll V (ISO15693) parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NfcVInfo {
    pub afi: u8,
    pub dsfid: u8,
    /// UID, most significant byte first
    pub id: [u8; NFC_V_ID_LEN],
}

/// Technology specific activation data. Only poll-side passive
/// technologies carry parameters; everything else is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TechInfo {
    NfcA(NfcAInfo),
    NfcB(NfcBInfo),
    NfcF(NfcFInfo),
    NfcV(NfcVInfo),
    #[default]
    None,
}

impl TechInfo {
    /// Parse the tech-specific and activation parameters of an
    /// RF_INTF_ACTIVATED_NTF, dispatching on the mode/tech byte.
    pub fn parse(mode_tech: u8, tech_params: &[u8], activation_params: &[u8]) -> Result<Self> {
        let Ok(mt) = ModeTech::try_from(mode_tech) else {
            return Ok(Self::None);
        };
        if mt.mode != PollListenMode::Poll {
            return Ok(Self::None);
        }

        match mt.technology {
            Technology::PassiveNfcA => parse_nfc_a(tech_params, activation_params).map(Self::NfcA),
            Technology::PassiveNfcB => parse_nfc_b(tech_params, activation_params).map(Self::NfcB),
            Technology::PassiveNfcF => parse_nfc_f(tech_params).map(Self::NfcF),
            Technology::PassiveNfcV => parse_nfc_v(tech_params).map(Self::NfcV),
            _ => Ok(Self::None),
        }
    }
}

fn parse_nfc_a(params: &[u8], activation: &[u8]) -> Result<NfcAInfo> {
    let sens = parser::slice_at(params, 0, 2)?;
    let (nfc_id, next) = parser::length_prefixed_at(params, 2)?;
    let (sel_res, _) = parser::length_prefixed_at(params, next)?;

    let rats = if activation.is_empty() {
        Vec::new()
    } else {
        let (rats, _) = parser::length_prefixed_at(activation, 0)?;
        parser::bounded(rats, MAX_RATS_LEN)?
    };

    Ok(NfcAInfo {
        sens_res: [sens[0], sens[1]],
        nfc_id: parser::bounded(nfc_id, MAX_NFC_ID_LEN)?,
        sel_res: parser::bounded(sel_res, MAX_SEL_RES_LEN)?,
        rats,
    })
}

fn parse_nfc_b(params: &[u8], activation: &[u8]) -> Result<NfcBInfo> {
    let (sensb, _) = parser::length_prefixed_at(params, 0)?;
    let attrib_res = if activation.is_empty() {
        Vec::new()
    } else {
        let (attrib, _) = parser::length_prefixed_at(activation, 0)?;
        parser::bounded(attrib, MAX_ATTRIB_RES_LEN)?
    };

    Ok(NfcBInfo {
        sensb_res: parser::bounded(sensb, MAX_SENSB_RES_LEN)?,
        attrib_res,
    })
}

fn parse_nfc_f(params: &[u8]) -> Result<NfcFInfo> {
    let bit_rate = parser::byte_at(params, 0)?;
    let (sensf, _) = parser::length_prefixed_at(params, 1)?;
    Ok(NfcFInfo {
        bit_rate,
        sensf_res: parser::bounded(sensf, MAX_SENSF_RES_LEN)?,
    })
}

fn parse_nfc_v(params: &[u8]) -> Result<NfcVInfo> {
    let afi = parser::byte_at(params, 0)?;
    let dsfid = parser::byte_at(params, 1)?;
    let uid = parser::declared_at(params, 2, NFC_V_ID_LEN)?;

    let mut id = [0u8; NFC_V_ID_LEN];
    for (dst, src) in id.iter_mut().zip(uid.iter().rev()) {
        *dst = *src;
    }
    Ok(NfcVInfo { afi, dsfid, id })
}
