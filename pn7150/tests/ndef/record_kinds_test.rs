#[path = "../common/mod.rs"]
mod common;

use pn7150::ndef::{NdefMessage, NdefRecord, RecordKind, Tnf};
use pn7150::{AuthenticationType, EncryptionType};

#[test]
fn wifi_handover_survives_a_message() {
    let cred = common::fixtures::sample_wifi();
    let mut msg = NdefMessage::new();
    msg.add_wifi_record(&cred).unwrap();

    let rec = msg.get(0).unwrap();
    assert_eq!(rec.kind(), RecordKind::WifiHandover);
    let back = rec.as_wifi_handover();
    assert_eq!(back.ssid, "home-net");
    assert_eq!(back.network_key, "correct horse");
    assert_eq!(back.authentication, AuthenticationType::WPA2_PERSONAL);
    assert_eq!(back.encryption, EncryptionType::AES);
}

#[test]
fn bluetooth_handover_survives_a_message() {
    let bt = common::fixtures::sample_bluetooth();
    let mut msg = NdefMessage::new();
    msg.add_bluetooth_record(&bt).unwrap();

    let rec = msg.get(0).unwrap();
    assert_eq!(rec.kind(), RecordKind::BluetoothHandover);
    let back = rec.as_bluetooth_handover();
    assert_eq!(back.address_string(), "00:1A:7D:DA:71:13");
    assert_eq!(back.name, "speaker");
}

#[test]
fn oversized_bluetooth_name_is_shortened() {
    let mut bt = common::fixtures::sample_bluetooth();
    bt.name = "x".repeat(300);
    let mut msg = NdefMessage::with_capacity(1024);
    msg.add_bluetooth_record(&bt).unwrap();

    let back = msg.get(0).unwrap().as_bluetooth_handover();
    assert_eq!(back.address_string(), "00:1A:7D:DA:71:13");
    assert_eq!(back.name.len(), 248);
}

#[test]
fn classification_of_known_types() {
    let cases = [
        (NdefRecord::text("x", "en"), RecordKind::Text),
        (NdefRecord::uri("https://a.b"), RecordKind::Uri),
        (NdefRecord::well_known(b"Hs", vec![0x12]), RecordKind::HandoverSelect),
        (NdefRecord::well_known(b"Hr", vec![0x12]), RecordKind::HandoverRequest),
        (NdefRecord::vcard("BEGIN:VCARD"), RecordKind::VCard),
        (NdefRecord::mime("text/vcard", vec![]), RecordKind::VCard),
        (
            NdefRecord::mime("application/vnd.bluetooth.le.oob", vec![]),
            RecordKind::BleHandover,
        ),
        (
            NdefRecord::mime("application/vnd.bluetooth.secure.le.oob", vec![]),
            RecordKind::BleSecureHandover,
        ),
        (NdefRecord::new(Tnf::External, b"a.com:x", vec![]), RecordKind::Unsupported),
    ];
    for (rec, kind) in cases {
        assert_eq!(rec.kind(), kind, "{:?}", rec.record_type);
    }
}

#[test]
fn utf16_text_is_decoded() {
    // status 0x82: UTF-16, two byte language code, big endian body
    let payload = vec![0x82, b'd', b'e', 0x00, b'H', 0x00, 0xE4];
    let rec = NdefRecord::well_known(b"T", payload);
    assert_eq!(rec.language_code(), "de");
    assert_eq!(rec.as_text(), "H\u{e4}");
}

#[test]
fn vcard_accessor_returns_body() {
    let card = "BEGIN:VCARD\nVERSION:3.0\nFN:Ada Lovelace\nEND:VCARD";
    let rec = NdefRecord::vcard(card);
    assert_eq!(rec.mime_type(), Some("text/x-vCard"));
    assert_eq!(rec.as_vcard(), card);
}
