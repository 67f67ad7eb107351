// pn7150/src/prelude.rs

pub use crate::controller::{Config, Controller, ControllerBuilder, State, T4tEmulator};
pub use crate::ndef::{
    AuthenticationType, BluetoothHandover, EncryptionType, NdefMessage, NdefRecord, RecordKind,
    Tnf, WifiCredential,
};
pub use crate::protocol::{Command, Frame, MessageType, Notification, Response};
pub use crate::remote::{RemoteDevice, TechInfo};
pub use crate::transport::{MockTransport, Transport};
pub use crate::{
    DeactivationType, Error, Interface, Mode, ModeTech, PollListenMode, Protocol, Result,
    Technology,
};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_colon_hex, bytes_to_hex_spaced, ms};
