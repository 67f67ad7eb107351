#[path = "../common/mod.rs"]
mod common;

use pn7150::protocol::{Frame, Notification};
use pn7150::remote::TechInfo;
use pn7150::{DeactivationType, Interface, PollListenMode, Protocol, Technology};

#[test]
fn type_a_activation_fills_only_type_a_fields() {
    let frame = Frame::decode(&common::fixtures::type_a_activation_frame()).unwrap();
    let Notification::InterfaceActivated(dev) = Notification::decode(&frame).unwrap() else {
        panic!("expected activation");
    };

    assert_eq!(dev.interface, Interface::IsoDep);
    assert_eq!(dev.protocol, Protocol::IsoDep);
    assert_eq!(dev.technology(), Some(Technology::PassiveNfcA));
    assert_eq!(dev.poll_listen(), PollListenMode::Poll);
    assert_eq!(dev.max_payload, 0xFF);
    assert!(matches!(dev.info, TechInfo::NfcA(_)));

    assert_eq!(dev.sens_res(), &[0x44, 0x03]);
    assert_eq!(dev.nfc_id(), &[0x04, 0x6F, 0x5A, 0x32, 0x6E, 0x61, 0x80]);
    assert_eq!(dev.sel_res(), &[0x20]);
    assert_eq!(dev.rats(), &[0x78, 0x80, 0x70, 0x02, 0x00]);

    assert!(dev.sensb_res().is_empty());
    assert!(dev.attrib_res().is_empty());
    assert_eq!(dev.bit_rate(), 0);
    assert!(dev.sensf_res().is_empty());
    assert_eq!(dev.afi(), 0);
    assert_eq!(dev.dsfid(), 0);
    assert!(dev.nfc_v_id().is_empty());
}

#[test]
fn deactivation_and_presence() {
    let f = Frame::decode(&[0x61, 0x06, 0x02, 0x01, 0x02]).unwrap();
    assert_eq!(
        Notification::decode(&f).unwrap(),
        Notification::Deactivated {
            kind: Some(DeactivationType::Sleep),
            reason: 0x02
        }
    );

    let f = Frame::decode(&[0x6F, 0x11, 0x01, 0x00]).unwrap();
    assert_eq!(
        Notification::decode(&f).unwrap(),
        Notification::IsoDepPresence { present: false }
    );
}

#[test]
fn unknown_notifications_are_kept_raw() {
    let f = Frame::decode(&[0x61, 0x09, 0x01, 0xAA]).unwrap();
    assert_eq!(
        Notification::decode(&f).unwrap(),
        Notification::Other {
            group: 0x01,
            opcode: 0x09,
            payload: vec![0xAA]
        }
    );
}
