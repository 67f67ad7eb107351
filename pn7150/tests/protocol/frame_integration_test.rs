use pn7150::Error;
use pn7150::protocol::{Frame, MessageType};
use proptest::prelude::*;

#[test]
fn core_init_response_decodes() {
    let frame = Frame::decode(&hex::decode("40010400010203").unwrap()).unwrap();
    assert_eq!(frame.message_type, MessageType::Response);
    assert_eq!(frame.id(), 0x0001);
    assert_eq!(frame.payload, vec![0x00, 0x01, 0x02, 0x03]);
}

#[test]
fn declared_length_must_match() {
    assert!(matches!(
        Frame::decode(&[0x61, 0x05, 0x04, 0x01]),
        Err(Error::MalformedFrame {
            declared: 4,
            actual: 1
        })
    ));
    assert!(matches!(
        Frame::decode(&[0x40, 0x00]),
        Err(Error::MalformedFrame {
            declared: 3,
            actual: 2
        })
    ));
}

#[test]
fn oversized_payload_is_refused() {
    let frame = Frame::data(0, vec![0u8; 256]);
    assert!(matches!(
        frame.encode(),
        Err(Error::InvalidLength {
            expected: 255,
            actual: 256
        })
    ));
}

proptest! {
    #[test]
    fn decode_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..300)) {
        let _ = Frame::decode(&bytes);
    }

    #[test]
    fn commands_survive_encoding(gid in 0u8..0x10, oid in 0u8..0x40,
                                 payload in proptest::collection::vec(any::<u8>(), 0..=255)) {
        let frame = Frame::command(gid, oid, payload);
        let bytes = frame.encode().unwrap();
        prop_assert_eq!(bytes.len(), 3 + frame.payload.len());
        prop_assert_eq!(Frame::decode(&bytes).unwrap(), frame);
    }
}
