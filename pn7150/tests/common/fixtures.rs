// fixtures.rs — provides commonly used test payloads/frames

use pn7150::ndef::{AuthenticationType, BluetoothHandover, EncryptionType, NdefMessage, WifiCredential};

/// RF_INTF_ACTIVATED_NTF payload of a poll A card opened over ISO-DEP
pub const TYPE_A_ISO_DEP_ACTIVATION: &str = "
    01 02 04 00 ff 01
    0c 44 03 07 04 6f 5a 32 6e 61 80 01 20
    00 00 00
    06 05 78 80 70 02 00";

/// Decode a whitespace separated hex fixture.
pub fn hex_bytes(s: &str) -> Vec<u8> {
    let compact: String = s.split_whitespace().collect();
    hex::decode(compact).expect("fixture hex")
}

/// The type A activation wrapped in its NCI header
pub fn type_a_activation_frame() -> Vec<u8> {
    let payload = hex_bytes(TYPE_A_ISO_DEP_ACTIVATION);
    let mut frame = vec![0x61, 0x05, payload.len() as u8];
    frame.extend(payload);
    frame
}

pub fn sample_wifi() -> WifiCredential {
    WifiCredential::new(
        "home-net",
        AuthenticationType::WPA2_PERSONAL,
        EncryptionType::AES,
        "correct horse",
    )
}

pub fn sample_bluetooth() -> BluetoothHandover {
    BluetoothHandover::new([0x00, 0x1A, 0x7D, 0xDA, 0x71, 0x13], "speaker")
}

pub fn text_and_uri_message() -> NdefMessage {
    let mut msg = NdefMessage::new();
    msg.add_text_record("hello", "en").expect("text");
    msg.add_uri_record("https://www.example.com").expect("uri");
    msg
}
