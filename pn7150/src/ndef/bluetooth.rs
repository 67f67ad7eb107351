// pn7150/src/ndef/bluetooth.rs

//! Bluetooth out-of-band pairing payloads

use crate::utils::bytes_to_colon_hex;

pub const BLUETOOTH_EP_OOB_MIME_TYPE: &str = "application/vnd.bluetooth.ep.oob";
pub const BLE_OOB_MIME_TYPE: &str = "application/vnd.bluetooth.le.oob";
pub const BLE_SECURE_OOB_MIME_TYPE: &str = "application/vnd.bluetooth.secure.le.oob";

const EIR_SHORT_LOCAL_NAME: u8 = 0x08;
const EIR_COMPLETE_LOCAL_NAME: u8 = 0x09;
const EIR_CLASS_OF_DEVICE: u8 = 0x0D;
const AD_LE_DEVICE_ADDRESS: u8 = 0x1B;

/// Bluetooth local name limit, in UTF-8 bytes
pub const MAX_LOCAL_NAME_LEN: usize = 248;

/// Pairing data carried in a Bluetooth handover record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BluetoothHandover {
    /// Device address, most significant byte first
    pub address: [u8; 6],
    pub name: String,
    pub class_of_device: Option<[u8; 3]>,
}

impl BluetoothHandover {
    pub fn new(address: [u8; 6], name: &str) -> Self {
        Self {
            address,
            name: name.to_string(),
            class_of_device: None,
        }
    }

    /// `AA:BB:CC:DD:EE:FF`
    pub fn address_string(&self) -> String {
        bytes_to_colon_hex(&self.address)
    }

    /// Encode as BR/EDR OOB data: total length (LE), BD_ADDR (LE), EIR.
    /// Names over [`MAX_LOCAL_NAME_LEN`] bytes go out as a shortened name.
    pub fn to_ep_oob(&self) -> Vec<u8> {
        let mut out = vec![0x00, 0x00];
        out.extend(self.address.iter().rev());
        if !self.name.is_empty() {
            let (kind, name) = local_name(&self.name);
            push_eir(&mut out, kind, name);
        }
        if let Some(cod) = self.class_of_device {
            push_eir(&mut out, EIR_CLASS_OF_DEVICE, &cod);
        }
        let total = (out.len() as u16).to_le_bytes();
        out[0] = total[0];
        out[1] = total[1];
        out
    }

    /// Parse BR/EDR OOB data. Returns the default value when the fixed
    /// part is missing; EIR parsing stops at the first overrun.
    pub fn from_ep_oob(payload: &[u8]) -> Self {
        let mut handover = Self::default();
        let Some(addr) = payload.get(2..8) else {
            return handover;
        };
        for (dst, src) in handover.address.iter_mut().zip(addr.iter().rev()) {
            *dst = *src;
        }
        for (kind, value) in Structures::new(&payload[8..]) {
            handover.apply(kind, value);
        }
        handover
    }

    /// Parse LE OOB data: a plain sequence of AD structures.
    pub fn from_le_oob(payload: &[u8]) -> Self {
        let mut handover = Self::default();
        for (kind, value) in Structures::new(payload) {
            if kind == AD_LE_DEVICE_ADDRESS {
                // 6 address bytes LE, then the address type
                if let Some(addr) = value.get(..6) {
                    for (dst, src) in handover.address.iter_mut().zip(addr.iter().rev()) {
                        *dst = *src;
                    }
                }
            } else {
                handover.apply(kind, value);
            }
        }
        handover
    }

    fn apply(&mut self, kind: u8, value: &[u8]) {
        match kind {
            EIR_COMPLETE_LOCAL_NAME => self.name = String::from_utf8_lossy(value).into_owned(),
            EIR_SHORT_LOCAL_NAME if self.name.is_empty() => {
                self.name = String::from_utf8_lossy(value).into_owned()
            }
            EIR_CLASS_OF_DEVICE => {
                if let [a, b, c] = value {
                    self.class_of_device = Some([*a, *b, *c]);
                }
            }
            _ => {}
        }
    }
}

/// Complete name, or the longest prefix within the limit on a char boundary
fn local_name(name: &str) -> (u8, &[u8]) {
    if name.len() <= MAX_LOCAL_NAME_LEN {
        return (EIR_COMPLETE_LOCAL_NAME, name.as_bytes());
    }
    let mut end = MAX_LOCAL_NAME_LEN;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    (EIR_SHORT_LOCAL_NAME, &name.as_bytes()[..end])
}

/// The length byte covers the type byte, so data is capped at 254 bytes.
fn push_eir(out: &mut Vec<u8>, kind: u8, value: &[u8]) {
    let value = &value[..value.len().min(u8::MAX as usize - 1)];
    let len = u8::try_from(value.len() + 1).unwrap_or(u8::MAX);
    out.push(len);
    out.push(kind);
    out.extend_from_slice(value);
}

/// EIR / AD structures: len(1) covering type(1) + data
struct Structures<'a> {
    data: &'a [u8],
}

impl<'a> Structures<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data }
    }
}

impl<'a> Iterator for Structures<'a> {
    type Item = (u8, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        let len = *self.data.first()? as usize;
        if len == 0 {
            return None;
        }
        let Some(entry) = self.data.get(1..1 + len) else {
            self.data = &[];
            return None;
        };
        self.data = &self.data[1 + len..];
        Some((entry[0], &entry[1..]))
    }
}
