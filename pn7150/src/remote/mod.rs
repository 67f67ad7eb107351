// pn7150/src/remote/mod.rs

//! Remote device model: what the controller reported about the device
//! it activated.

mod info;

pub use info::{
    MAX_ATTRIB_RES_LEN, MAX_NFC_ID_LEN, MAX_RATS_LEN, MAX_SEL_RES_LEN, MAX_SENSB_RES_LEN,
    MAX_SENSF_RES_LEN, NFC_V_ID_LEN, NfcAInfo, NfcBInfo, NfcFInfo, NfcVInfo, TechInfo,
};

use crate::types::{Interface, PollListenMode, Protocol, Technology};

/// A device activated by the controller. Populated from one
/// RF_INTF_ACTIVATED_NTF and replaced on the next activation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RemoteDevice {
    pub discovery_id: u8,
    pub interface: Interface,
    pub protocol: Protocol,
    /// Raw mode/tech byte: high nibble poll/listen, low nibble technology
    pub mode_tech: u8,
    /// Maximum data packet payload on the static RF connection
    pub max_payload: u8,
    pub initial_credits: u8,
    /// Other devices were discovered in the same cycle and can be
    /// activated with `Controller::activate_next_pending`
    pub more_tags_pending: bool,
    pub info: TechInfo,
}

impl RemoteDevice {
    pub fn technology(&self) -> Option<Technology> {
        Technology::try_from(self.mode_tech & 0x0F).ok()
    }

    pub fn poll_listen(&self) -> PollListenMode {
        PollListenMode::from_mode_tech(self.mode_tech)
    }

    fn nfc_a(&self) -> Option<&NfcAInfo> {
        match &self.info {
            TechInfo::NfcA(a) => Some(a),
            _ => None,
        }
    }

    fn nfc_b(&self) -> Option<&NfcBInfo> {
        match &self.info {
            TechInfo::NfcB(b) => Some(b),
            _ => None,
        }
    }

    fn nfc_f(&self) -> Option<&NfcFInfo> {
        match &self.info {
            TechInfo::NfcF(f) => Some(f),
            _ => None,
        }
    }

    fn nfc_v(&self) -> Option<&NfcVInfo> {
        match &self.info {
            TechInfo::NfcV(v) => Some(v),
            _ => None,
        }
    }

    /// NFC-A SENS_RES (ATQA); empty for other technologies
    pub fn sens_res(&self) -> &[u8] {
        self.nfc_a().map(|a| &a.sens_res[..]).unwrap_or(&[])
    }

    /// NFC-A NFCID1 (UID)
    pub fn nfc_id(&self) -> &[u8] {
        self.nfc_a().map(|a| a.nfc_id.as_slice()).unwrap_or(&[])
    }

    /// NFC-A SEL_RES (SAK)
    pub fn sel_res(&self) -> &[u8] {
        self.nfc_a().map(|a| a.sel_res.as_slice()).unwrap_or(&[])
    }

    pub fn rats(&self) -> &[u8] {
        self.nfc_a().map(|a| a.rats.as_slice()).unwrap_or(&[])
    }

    /// NFC-B SENSB_RES (ATQB)
    pub fn sensb_res(&self) -> &[u8] {
        self.nfc_b().map(|b| b.sensb_res.as_slice()).unwrap_or(&[])
    }

    pub fn attrib_res(&self) -> &[u8] {
        self.nfc_b().map(|b| b.attrib_res.as_slice()).unwrap_or(&[])
    }

    /// NFC-F bit rate code; 0 for other technologies
    pub fn bit_rate(&self) -> u8 {
        self.nfc_f().map(|f| f.bit_rate).unwrap_or(0)
    }

    /// NFC-F SENSF_RES (IDm/PMm)
    pub fn sensf_res(&self) -> &[u8] {
        self.nfc_f().map(|f| f.sensf_res.as_slice()).unwrap_or(&[])
    }

    pub fn afi(&self) -> u8 {
        self.nfc_v().map(|v| v.afi).unwrap_or(0)
    }

    pub fn dsfid(&self) -> u8 {
        self.nfc_v().map(|v| v.dsfid).unwrap_or(0)
    }

    /// NFC-V UID, most significant byte first
    pub fn nfc_v_id(&self) -> &[u8] {
        self.nfc_v().map(|v| &v.id[..]).unwrap_or(&[])
    }
}
