#[path = "../common/mod.rs"]
mod common;

use common::helpers::*;
use pn7150::prelude::*;

#[test]
fn initiator_and_target_exchange() -> anyhow::Result<()> {
    let mock = MockTransport::new();
    let mut initiator =
        activated_controller_in(&mock, Mode::PeerToPeer, nfc_dep_activation_ntf(false))?;
    mock.queue_reply(vec![data_packet(b"ack")]);
    assert_eq!(initiator.peer_exchange(b"hello", ms(100))?, b"ack".to_vec());

    let mock = MockTransport::new();
    let mut target = activated_controller_in(&mock, Mode::PeerToPeer, nfc_dep_activation_ntf(true))?;
    mock.push_frame(&data_packet(b"hello"));
    mock.queue_reply(vec![deactivate_ntf(0x03)]);
    let served = target.serve_peer(ms(200), |p| {
        assert_eq!(p, b"hello");
        b"ack".to_vec()
    })?;
    assert_eq!(served, 1);
    assert_eq!(mock.last_written(), Some(data_packet(b"ack")));
    assert_eq!(target.state(), State::Discovering(Mode::PeerToPeer));
    Ok(())
}

#[test]
fn large_payloads_are_segmented() -> anyhow::Result<()> {
    let mock = MockTransport::new();
    let mut ntf = nfc_dep_activation_ntf(false);
    ntf[7] = 0x10;
    let mut ctrl = activated_controller_in(&mock, Mode::PeerToPeer, ntf)?;
    mock.queue_reply(vec![]);
    mock.queue_reply(vec![]);
    mock.queue_reply(vec![data_packet(b"ok")]);

    ctrl.peer_exchange(&[0x55; 40], ms(100))?;
    let written = mock.written();
    assert_eq!(written.len(), 3);
    assert_eq!(written[0][0], 0x10);
    assert_eq!(written[2][..3], [0x00, 0x00, 0x08]);
    Ok(())
}
