use pn7150::ndef::{NdefMessage, NdefRecord, Tnf};
use proptest::prelude::*;

fn record() -> impl Strategy<Value = NdefRecord> {
    (
        prop_oneof![Just(Tnf::WellKnown), Just(Tnf::Media)],
        proptest::collection::vec(0x21u8..0x7F, 1..10),
        proptest::collection::vec(any::<u8>(), 0..40),
    )
        .prop_map(|(tnf, record_type, payload)| NdefRecord::new(tnf, &record_type, payload))
}

proptest! {
    #[test]
    fn records_roundtrip_through_a_message(records in proptest::collection::vec(record(), 1..5)) {
        let mut msg = NdefMessage::new();
        for r in &records {
            msg.append(r).unwrap();
        }
        prop_assert_eq!(msg.records().unwrap(), records.clone());

        let reread = NdefMessage::from_bytes(msg.as_bytes()).unwrap();
        prop_assert_eq!(reread.record_count(), records.len());

        let headers: Vec<_> = msg.iter().map(|r| r.unwrap().0).collect();
        prop_assert_eq!(headers.iter().filter(|h| h.is_first()).count(), 1);
        prop_assert_eq!(headers.iter().filter(|h| h.is_last()).count(), 1);
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        if let Ok(msg) = NdefMessage::from_bytes(&bytes) {
            let _ = msg.records();
        }
    }
}
