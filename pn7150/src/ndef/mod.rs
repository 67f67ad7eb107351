// pn7150/src/ndef/mod.rs

//! NDEF record and message codec

pub mod bluetooth;
pub mod header;
pub mod message;
pub mod record;
pub mod uri;
pub mod wifi;

pub use bluetooth::BluetoothHandover;
pub use header::{HeaderFlags, RecordHeader, RecordPosition, Tnf};
pub use message::{NdefMessage, Records};
pub use record::{NdefRecord, RecordKind};
pub use wifi::{AuthenticationType, EncryptionType, WifiCredential};
