#[path = "../common/mod.rs"]
mod common;

use common::helpers::*;
use pn7150::constants::{SW_OK, T4T_NDEF_FILE_ID};
use pn7150::controller::t4t;
use pn7150::prelude::*;

#[test]
fn reader_collects_the_emulated_message() -> anyhow::Result<()> {
    let mock = MockTransport::new();
    let mut ctrl = activated_controller_in(&mock, Mode::Emulation, listen_a_activation_ntf(1))?;
    let msg = common::fixtures::text_and_uri_message();

    // the full reader sequence: application, CC, NDEF file
    mock.push_frame(&data_packet(&t4t::select_application()));
    mock.queue_reply(vec![data_packet(&t4t::select_cc())]);
    mock.queue_reply(vec![data_packet(&t4t::read_binary(0, 0x0F))]);
    mock.queue_reply(vec![data_packet(&t4t::select_file(T4T_NDEF_FILE_ID))]);
    mock.queue_reply(vec![data_packet(&t4t::read_binary(0, 2))]);
    mock.queue_reply(vec![data_packet(&t4t::read_binary(2, msg.len() as u8))]);
    mock.queue_reply(vec![deactivate_ntf(0x03)]);

    assert!(ctrl.emulate(&msg, ms(500))?);

    let written = mock.written();
    assert_eq!(written.len(), 6);
    let cc = t4t::CapabilityContainer::parse(&written[2][3..written[2].len() - 2])?;
    assert_eq!(cc.ndef_file_id, T4T_NDEF_FILE_ID);
    let body = &written[5][3..];
    assert_eq!(&body[body.len() - 2..], &SW_OK);
    assert_eq!(&body[..body.len() - 2], msg.as_bytes());
    Ok(())
}

#[test]
fn silent_reader_ends_without_full_read() -> anyhow::Result<()> {
    let mock = MockTransport::new();
    let mut ctrl = activated_controller_in(&mock, Mode::Emulation, listen_a_activation_ntf(1))?;
    let msg = common::fixtures::text_and_uri_message();
    assert!(!ctrl.emulate(&msg, ms(20))?);
    Ok(())
}
