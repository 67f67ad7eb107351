// pn7150/src/ndef/record.rs

use derive_more::Display;

use super::bluetooth::{
    BLE_OOB_MIME_TYPE, BLE_SECURE_OOB_MIME_TYPE, BLUETOOTH_EP_OOB_MIME_TYPE, BluetoothHandover,
};
use super::header::{HeaderFlags, RecordHeader, RecordPosition, Tnf};
use super::uri;
use super::wifi::{WIFI_MIME_TYPE, WifiCredential};
use crate::{Error, Result};

pub const RTD_TEXT: &[u8] = b"T";
pub const RTD_URI: &[u8] = b"U";
pub const RTD_HANDOVER_SELECT: &[u8] = b"Hs";
pub const RTD_HANDOVER_REQUEST: &[u8] = b"Hr";
pub const VCARD_MIME_TYPE: &str = "text/x-vCard";
const VCARD_MIME_TYPE_ALT: &str = "text/vcard";

/// Text record status byte: UTF-16 encoding bit
const TEXT_UTF16: u8 = 0x80;
const TEXT_LANG_LEN_MASK: u8 = 0x3F;

/// Application-level classification of a record
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Text,
    Uri,
    HandoverSelect,
    HandoverRequest,
    VCard,
    WifiHandover,
    BluetoothHandover,
    BleHandover,
    BleSecureHandover,
    Unsupported,
}

/// A single NDEF record. Position flags (MB/ME) are not part of the
/// record; they belong to the message the record is placed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NdefRecord {
    pub tnf: Tnf,
    pub record_type: Vec<u8>,
    pub id: Vec<u8>,
    pub payload: Vec<u8>,
}

impl NdefRecord {
    pub fn new(tnf: Tnf, record_type: &[u8], payload: Vec<u8>) -> Self {
        Self {
            tnf,
            record_type: record_type.to_vec(),
            id: Vec::new(),
            payload,
        }
    }

    pub fn well_known(record_type: &[u8], payload: Vec<u8>) -> Self {
        Self::new(Tnf::WellKnown, record_type, payload)
    }

    pub fn mime(mime_type: &str, payload: Vec<u8>) -> Self {
        Self::new(Tnf::Media, mime_type.as_bytes(), payload)
    }

    /// UTF-8 text record: status byte, language code, text
    pub fn text(text: &str, language: &str) -> Self {
        let lang = language.as_bytes();
        let lang = &lang[..lang.len().min(TEXT_LANG_LEN_MASK as usize)];
        let mut payload = Vec::with_capacity(1 + lang.len() + text.len());
        payload.push(lang.len() as u8);
        payload.extend_from_slice(lang);
        payload.extend_from_slice(text.as_bytes());
        Self::well_known(RTD_TEXT, payload)
    }

    /// URI record with the scheme folded into its identifier code
    pub fn uri(uri: &str) -> Self {
        let (code, rest) = uri::abbreviate(uri);
        let mut payload = Vec::with_capacity(1 + rest.len());
        payload.push(code);
        payload.extend_from_slice(rest.as_bytes());
        Self::well_known(RTD_URI, payload)
    }

    pub fn wifi(credential: &WifiCredential) -> Self {
        Self::mime(WIFI_MIME_TYPE, credential.to_payload())
    }

    pub fn bluetooth(handover: &BluetoothHandover) -> Self {
        Self::mime(BLUETOOTH_EP_OOB_MIME_TYPE, handover.to_ep_oob())
    }

    pub fn vcard(vcard: &str) -> Self {
        Self::mime(VCARD_MIME_TYPE, vcard.as_bytes().to_vec())
    }

    pub fn with_id(mut self, id: &[u8]) -> Self {
        self.id = id.to_vec();
        self
    }

    /// MIME type of a media record
    pub fn mime_type(&self) -> Option<&str> {
        match self.tnf {
            Tnf::Media => std::str::from_utf8(&self.record_type).ok(),
            _ => None,
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self.tnf {
            Tnf::WellKnown => match self.record_type.as_slice() {
                RTD_TEXT => RecordKind::Text,
                RTD_URI => RecordKind::Uri,
                RTD_HANDOVER_SELECT => RecordKind::HandoverSelect,
                RTD_HANDOVER_REQUEST => RecordKind::HandoverRequest,
                _ => RecordKind::Unsupported,
            },
            Tnf::Media => {
                let mime = self.mime_type().unwrap_or("");
                let is = |t: &str| mime.eq_ignore_ascii_case(t);
                if is(VCARD_MIME_TYPE) || is(VCARD_MIME_TYPE_ALT) {
                    RecordKind::VCard
                } else if is(WIFI_MIME_TYPE) {
                    RecordKind::WifiHandover
                } else if is(BLUETOOTH_EP_OOB_MIME_TYPE) {
                    RecordKind::BluetoothHandover
                } else if is(BLE_OOB_MIME_TYPE) {
                    RecordKind::BleHandover
                } else if is(BLE_SECURE_OOB_MIME_TYPE) {
                    RecordKind::BleSecureHandover
                } else {
                    RecordKind::Unsupported
                }
            }
            _ => RecordKind::Unsupported,
        }
    }

    /// Status byte of text (encoding + language length) and URI
    /// (identifier code) records
    pub fn status(&self) -> Option<u8> {
        match self.kind() {
            RecordKind::Text | RecordKind::Uri => self.payload.first().copied(),
            _ => None,
        }
    }

    /// Language code of a text record; empty otherwise
    pub fn language_code(&self) -> String {
        self.text_parts()
            .map(|(_, lang, _)| String::from_utf8_lossy(lang).into_owned())
            .unwrap_or_default()
    }

    pub fn as_text(&self) -> String {
        match self.text_parts() {
            Some((status, _, text)) if status & TEXT_UTF16 != 0 => decode_utf16(text),
            Some((_, _, text)) => String::from_utf8_lossy(text).into_owned(),
            None => String::new(),
        }
    }

    pub fn as_uri(&self) -> String {
        match self.kind() {
            RecordKind::Uri => uri::expand(&self.payload),
            _ => String::new(),
        }
    }

    pub fn as_wifi_handover(&self) -> WifiCredential {
        match self.kind() {
            RecordKind::WifiHandover => WifiCredential::from_payload(&self.payload),
            _ => WifiCredential::default(),
        }
    }

    pub fn as_bluetooth_handover(&self) -> BluetoothHandover {
        match self.kind() {
            RecordKind::BluetoothHandover => BluetoothHandover::from_ep_oob(&self.payload),
            RecordKind::BleHandover | RecordKind::BleSecureHandover => {
                BluetoothHandover::from_le_oob(&self.payload)
            }
            _ => BluetoothHandover::default(),
        }
    }

    pub fn as_vcard(&self) -> String {
        match self.kind() {
            RecordKind::VCard => String::from_utf8_lossy(&self.payload).into_owned(),
            _ => String::new(),
        }
    }

    fn text_parts(&self) -> Option<(u8, &[u8], &[u8])> {
        if self.kind() != RecordKind::Text {
            return None;
        }
        let (status, rest) = self.payload.split_first()?;
        let lang_len = (*status & TEXT_LANG_LEN_MASK) as usize;
        let lang = rest.get(..lang_len)?;
        Some((*status, lang, &rest[lang_len..]))
    }

    fn is_short(&self) -> bool {
        self.payload.len() <= u8::MAX as usize
    }

    /// Type and ID fields must fit their one-byte length fields.
    pub fn validate(&self) -> Result<()> {
        if self.record_type.len() > u8::MAX as usize {
            return Err(Error::NdefFormat(format!(
                "record type is {} bytes, at most 255 allowed",
                self.record_type.len()
            )));
        }
        if self.id.len() > u8::MAX as usize {
            return Err(Error::NdefFormat(format!(
                "record id is {} bytes, at most 255 allowed",
                self.id.len()
            )));
        }
        if u32::try_from(self.payload.len()).is_err() {
            return Err(Error::NdefFormat("payload too large".to_string()));
        }
        Ok(())
    }

    /// Serialized size; no padding
    pub fn encoded_len(&self) -> usize {
        let len_field = if self.is_short() { 1 } else { 4 };
        let id_len_field = usize::from(!self.id.is_empty());
        2 + len_field + id_len_field + self.record_type.len() + self.id.len() + self.payload.len()
    }

    pub fn encode(&self, position: RecordPosition) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.encode_into(position, &mut out);
        out
    }

    /// Append the serialized record. Call `validate` first; oversized
    /// type or id fields are truncated.
    pub fn encode_into(&self, position: RecordPosition, out: &mut Vec<u8>) {
        let mut flags = position.flags();
        if self.is_short() {
            flags |= HeaderFlags::SR;
        }
        if !self.id.is_empty() {
            flags |= HeaderFlags::IL;
        }
        let record_type = &self.record_type[..self.record_type.len().min(255)];
        let id = &self.id[..self.id.len().min(255)];

        out.push(flags.bits() | self.tnf as u8);
        out.push(record_type.len() as u8);
        if self.is_short() {
            out.push(self.payload.len() as u8);
        } else {
            out.extend_from_slice(&(self.payload.len() as u32).to_be_bytes());
        }
        if !id.is_empty() {
            out.push(id.len() as u8);
        }
        out.extend_from_slice(record_type);
        out.extend_from_slice(id);
        out.extend_from_slice(&self.payload);
    }

    /// Decode the record at the start of `buf`. Returns its header, the
    /// record and the number of bytes consumed.
    pub fn decode(buf: &[u8]) -> Result<(RecordHeader, Self, usize)> {
        let (header, header_len) = RecordHeader::decode(buf)?;
        let total = header.record_len(header_len)?;
        if buf.len() < total {
            return Err(Error::NdefFormat(format!(
                "record declares {} bytes, {} available",
                total,
                buf.len()
            )));
        }

        let type_end = header_len + header.type_len as usize;
        let id_end = type_end + header.id_len as usize;
        let record = Self {
            tnf: header.tnf,
            record_type: buf[header_len..type_end].to_vec(),
            id: buf[type_end..id_end].to_vec(),
            payload: buf[id_end..total].to_vec(),
        };
        Ok((header, record, total))
    }
}

fn decode_utf16(bytes: &[u8]) -> String {
    let (little_endian, body) = match bytes {
        [0xFF, 0xFE, rest @ ..] => (true, rest),
        [0xFE, 0xFF, rest @ ..] => (false, rest),
        _ => (false, bytes),
    };
    let units: Vec<u16> = body
        .chunks_exact(2)
        .map(|c| {
            if little_endian {
                u16::from_le_bytes([c[0], c[1]])
            } else {
                u16::from_be_bytes([c[0], c[1]])
            }
        })
        .collect();
    String::from_utf16_lossy(&units)
}
