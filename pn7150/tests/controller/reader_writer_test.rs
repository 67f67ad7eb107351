#[path = "../common/mod.rs"]
mod common;

use common::helpers::*;
use pn7150::controller::t2t;
use pn7150::prelude::*;

fn with_status(bytes: &[u8]) -> Vec<u8> {
    let mut v = bytes.to_vec();
    v.push(0x00);
    v
}

#[test]
fn type_2_tag_roundtrip() -> anyhow::Result<()> {
    let mock = MockTransport::new();
    let mut ctrl = activated_controller(&mock, t2t_activation_ntf(1))?;

    let msg = common::fixtures::text_and_uri_message();
    let tlv = t2t::wrap_ndef(msg.as_bytes());

    // write: CC read, then one ACK per page
    let mut cc = vec![0xE1, 0x10, 0x12, 0x00];
    cc.resize(16, 0);
    mock.queue_reply(vec![data_packet(&with_status(&cc))]);
    for _ in 0..tlv.len() / 4 {
        mock.queue_reply(vec![data_packet(&[0x0A, 0x00])]);
    }
    ctrl.write_ndef(&msg)?;

    // read it back from the same memory image; index 0 is page 3
    let mut memory = vec![0xE1, 0x10, 0x12, 0x00];
    memory.extend(&tlv);
    memory.resize(64, 0);
    mock.queue_reply(vec![data_packet(&with_status(&memory[0..16]))]);
    for start in [4, 20, 36] {
        mock.queue_reply(vec![data_packet(&with_status(&memory[start..start + 16]))]);
    }
    let read = ctrl.read_ndef()?;
    let records = read.records()?;
    assert_eq!(records[0].as_text(), "hello");
    assert_eq!(records[1].as_uri(), "https://www.example.com");
    Ok(())
}

#[test]
fn tag_removal_is_detected() -> anyhow::Result<()> {
    let mock = MockTransport::new();
    let mut ctrl =
        activated_controller_with_config(&mock, iso_dep_activation_ntf(1), fast_config())?;
    mock.queue_reply(vec![ok_response(0x0F, 0x11), vec![0x6F, 0x11, 0x01, 0x00]]);
    mock.queue_reply(vec![ok_response(0x01, 0x06), deactivate_ntf(0x03)]);

    assert!(ctrl.wait_for_removal(ms(200))?);
    assert_eq!(ctrl.state(), State::Discovering(Mode::ReaderWriter));
    Ok(())
}

#[test]
fn raw_exchange_with_iso_dep_card() -> anyhow::Result<()> {
    let mock = MockTransport::new();
    let mut ctrl = activated_controller(&mock, iso_dep_activation_ntf(1))?;
    mock.queue_reply(vec![data_packet(&[0x6A, 0x82])]);

    let resp = ctrl.transceive(&[0x00, 0xA4, 0x04, 0x00, 0x00])?;
    assert_eq!(resp, vec![0x6A, 0x82]);
    Ok(())
}
