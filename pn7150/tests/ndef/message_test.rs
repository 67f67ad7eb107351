#[path = "../common/mod.rs"]
mod common;

use pn7150::Error;
use pn7150::ndef::{HeaderFlags, NdefMessage, NdefRecord, RecordKind};

fn flags(msg: &NdefMessage) -> Vec<HeaderFlags> {
    msg.iter().map(|r| r.expect("record").0.flags).collect()
}

#[test]
fn exactly_one_first_and_one_last() {
    let mut msg = NdefMessage::new();
    msg.add_text_record("one", "en").unwrap();
    let single = flags(&msg);
    assert!(single[0].contains(HeaderFlags::MB | HeaderFlags::ME));

    msg.add_uri_record("https://example.com").unwrap();
    msg.add_mime_media_record("text/plain", b"three").unwrap();
    let all: Vec<_> = msg.iter().map(|r| r.unwrap().0).collect();
    assert_eq!(all.iter().filter(|h| h.is_first()).count(), 1);
    assert_eq!(all.iter().filter(|h| h.is_last()).count(), 1);
    assert!(all[0].is_first());
    assert!(all[2].is_last());
    assert!(!all[1].is_first() && !all[1].is_last());
}

#[test]
fn uri_prefix_is_abbreviated() {
    let mut msg = NdefMessage::new();
    msg.add_uri_record("https://www.example.com").unwrap();
    let rec = msg.get(0).unwrap();
    assert_eq!(rec.status(), Some(0x02));
    assert_eq!(&rec.payload[1..], b"example.com");
    assert_eq!(rec.as_uri(), "https://www.example.com");
}

#[test]
fn unknown_scheme_is_stored_whole() {
    let mut msg = NdefMessage::new();
    msg.add_uri_record("ftp://unknown.example").unwrap();
    let rec = msg.get(0).unwrap();
    assert_eq!(rec.status(), Some(0x00));
    assert_eq!(&rec.payload[1..], b"ftp://unknown.example");
}

#[test]
fn capacity_overflow_leaves_buffer_unchanged() {
    let mut msg = NdefMessage::with_capacity(32);
    msg.add_text_record("short", "en").unwrap();
    let before = msg.as_bytes().to_vec();

    let err = msg.add_text_record(&"x".repeat(40), "en").unwrap_err();
    assert!(matches!(err, Error::CapacityExceeded { capacity: 32, .. }));
    assert_eq!(msg.as_bytes(), before.as_slice());
    assert_eq!(msg.record_count(), 1);
}

#[test]
fn default_capacity_is_249() {
    let mut msg = NdefMessage::new();
    assert_eq!(msg.capacity(), 249);
    let payload = vec![0u8; 249 - 3 - 10];
    msg.add_mime_media_record("text/plain", &payload).unwrap();
    assert_eq!(msg.len(), 249);
    assert!(msg.add_mime_media_record("a/b", b"").is_err());
}

#[test]
fn remove_rederives_flags() {
    let mut msg = common::fixtures::text_and_uri_message();
    msg.add_vcard_record("BEGIN:VCARD\nFN:Ada\nEND:VCARD").unwrap();

    let removed = msg.remove(0).unwrap();
    assert_eq!(removed.as_text(), "hello");
    let headers: Vec<_> = msg.iter().map(|r| r.unwrap().0).collect();
    assert_eq!(headers.len(), 2);
    assert!(headers[0].is_first() && !headers[0].is_last());
    assert!(headers[1].is_last() && !headers[1].is_first());

    msg.remove(1).unwrap();
    assert!(flags(&msg)[0].contains(HeaderFlags::MB | HeaderFlags::ME));
    assert!(matches!(msg.remove(5), Err(Error::NdefFormat(_))));
}

#[test]
fn from_bytes_accepts_long_records_with_id() {
    // SR clear, IL set: 4-byte payload length and a one byte ID
    let bytes = [
        0xC9, 0x01, 0x00, 0x00, 0x00, 0x03, 0x01, b'T', b'#', 0x02, b'e', b'n',
    ];
    let msg = NdefMessage::from_bytes(&bytes).unwrap();
    assert_eq!(msg.record_count(), 1);
    let rec = msg.get(0).unwrap();
    assert_eq!(rec.kind(), RecordKind::Text);
    assert_eq!(rec.id, b"#".to_vec());
    assert_eq!(rec.language_code(), "en");
    assert_eq!(rec.as_text(), "");
}

#[test]
fn truncated_buffer_is_rejected() {
    let mut msg = NdefMessage::new();
    msg.add_text_record("cut short", "en").unwrap();
    let bytes = msg.as_bytes();
    assert!(NdefMessage::from_bytes(&bytes[..bytes.len() - 2]).is_err());
}

#[test]
fn messages_are_independent() {
    let mut a = NdefMessage::new();
    let mut b = NdefMessage::new();
    a.append(&NdefRecord::text("a", "en")).unwrap();
    b.append(&NdefRecord::uri("tel:123")).unwrap();
    b.clear();
    assert_eq!(a.record_count(), 1);
    assert!(b.is_empty());
}
