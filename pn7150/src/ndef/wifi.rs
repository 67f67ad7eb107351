// pn7150/src/ndef/wifi.rs

//! Wi-Fi Simple Config credential payload (`application/vnd.wfa.wsc`)

use bitflags::bitflags;

pub const WIFI_MIME_TYPE: &str = "application/vnd.wfa.wsc";

const ATTR_CREDENTIAL: u16 = 0x100E;
const ATTR_NETWORK_INDEX: u16 = 0x1026;
const ATTR_SSID: u16 = 0x1045;
const ATTR_AUTH_TYPE: u16 = 0x1003;
const ATTR_ENCRYPTION_TYPE: u16 = 0x100F;
const ATTR_NETWORK_KEY: u16 = 0x1027;
const ATTR_MAC_ADDRESS: u16 = 0x1020;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AuthenticationType: u16 {
        const OPEN = 0x0001;
        const WPA_PERSONAL = 0x0002;
        const SHARED = 0x0004;
        const WPA_ENTERPRISE = 0x0008;
        const WPA2_ENTERPRISE = 0x0010;
        const WPA2_PERSONAL = 0x0020;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EncryptionType: u16 {
        const NONE = 0x0001;
        const WEP = 0x0002;
        const TKIP = 0x0004;
        const AES = 0x0008;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WifiCredential {
    pub ssid: String,
    pub authentication: AuthenticationType,
    pub encryption: EncryptionType,
    pub network_key: String,
}

impl WifiCredential {
    pub fn new(
        ssid: &str,
        authentication: AuthenticationType,
        encryption: EncryptionType,
        network_key: &str,
    ) -> Self {
        Self {
            ssid: ssid.to_string(),
            authentication,
            encryption,
            network_key: network_key.to_string(),
        }
    }

    /// Encode as a single credential TLV carrying network index 1 and the
    /// broadcast MAC address.
    pub fn to_payload(&self) -> Vec<u8> {
        let mut inner = Vec::new();
        push_tlv(&mut inner, ATTR_NETWORK_INDEX, &[0x01]);
        push_tlv(&mut inner, ATTR_SSID, self.ssid.as_bytes());
        push_tlv(&mut inner, ATTR_AUTH_TYPE, &self.authentication.bits().to_be_bytes());
        push_tlv(&mut inner, ATTR_ENCRYPTION_TYPE, &self.encryption.bits().to_be_bytes());
        push_tlv(&mut inner, ATTR_NETWORK_KEY, self.network_key.as_bytes());
        push_tlv(&mut inner, ATTR_MAC_ADDRESS, &[0xFF; 6]);

        let mut out = Vec::with_capacity(inner.len() + 4);
        push_tlv(&mut out, ATTR_CREDENTIAL, &inner);
        out
    }

    /// Parse a WSC payload. Attributes are read until the first TLV whose
    /// declared length overruns its container; fields not reached stay
    /// empty.
    pub fn from_payload(payload: &[u8]) -> Self {
        let mut cred = Self::default();
        for (kind, value) in Tlvs::new(payload) {
            if kind == ATTR_CREDENTIAL {
                cred.apply(value);
            } else {
                cred.apply_attribute(kind, value);
            }
        }
        cred
    }

    fn apply(&mut self, credential: &[u8]) {
        for (kind, value) in Tlvs::new(credential) {
            self.apply_attribute(kind, value);
        }
    }

    fn apply_attribute(&mut self, kind: u16, value: &[u8]) {
        match kind {
            ATTR_SSID => self.ssid = String::from_utf8_lossy(value).into_owned(),
            ATTR_NETWORK_KEY => self.network_key = String::from_utf8_lossy(value).into_owned(),
            ATTR_AUTH_TYPE => {
                if let Some(v) = be_u16(value) {
                    self.authentication = AuthenticationType::from_bits_retain(v);
                }
            }
            ATTR_ENCRYPTION_TYPE => {
                if let Some(v) = be_u16(value) {
                    self.encryption = EncryptionType::from_bits_retain(v);
                }
            }
            _ => {}
        }
    }
}

fn push_tlv(out: &mut Vec<u8>, kind: u16, value: &[u8]) {
    out.extend_from_slice(&kind.to_be_bytes());
    out.extend_from_slice(&(value.len() as u16).to_be_bytes());
    out.extend_from_slice(value);
}

fn be_u16(value: &[u8]) -> Option<u16> {
    match value {
        [hi, lo] => Some(u16::from_be_bytes([*hi, *lo])),
        _ => None,
    }
}

/// Iterator over 2-byte type / 2-byte length TLVs. Stops at the first
/// incomplete entry.
struct Tlvs<'a> {
    data: &'a [u8],
}

impl<'a> Tlvs<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data }
    }
}

impl<'a> Iterator for Tlvs<'a> {
    type Item = (u16, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.data.len() < 4 {
            return None;
        }
        let kind = u16::from_be_bytes([self.data[0], self.data[1]]);
        let len = u16::from_be_bytes([self.data[2], self.data[3]]) as usize;
        let Some(value) = self.data.get(4..4 + len) else {
            self.data = &[];
            return None;
        };
        self.data = &self.data[4 + len..];
        Some((kind, value))
    }
}
