// Reader/writer session against a scripted controller
//
// Runs the full bring-up, discovery and NDEF read of a Type 4 card using
// MockTransport in place of the I2C link. Set RUST_LOG=trace to see every
// NCI packet.

use pn7150::prelude::*;
use pn7150::test_support::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mock = MockTransport::new();
    let mut ctrl = ControllerBuilder::new()
        .with_transport(Box::new(mock.clone()))
        .build()?;

    let mut stored = NdefMessage::new();
    stored.add_uri_record("https://www.nxp.com")?;
    stored.add_text_record("hello from a mock tag", "en")?;
    script_session(&mock, &stored);

    ctrl.initialize()?;
    ctrl.configure(Mode::ReaderWriter)?;
    ctrl.start_discovery()?;

    let Some(dev) = ctrl.await_activation(ms(500))? else {
        println!("no card in the field");
        return Ok(());
    };
    println!(
        "{} over {}: UID {}",
        dev.protocol,
        dev.interface,
        bytes_to_colon_hex(dev.nfc_id())
    );

    for record in ctrl.read_ndef()?.records()? {
        match record.kind() {
            RecordKind::Uri => println!("  uri:  {}", record.as_uri()),
            RecordKind::Text => println!(
                "  text: {} ({})",
                record.as_text(),
                record.language_code()
            ),
            other => println!("  {} record", other),
        }
    }

    ctrl.stop_discovery()?;
    println!("state: {}", ctrl.state());
    Ok(())
}

/// Controller side of the session, one reply batch per host packet.
fn script_session(mock: &MockTransport, stored: &NdefMessage) {
    let sw = |data: &[u8]| {
        let mut v = data.to_vec();
        v.extend_from_slice(&[0x90, 0x00]);
        data_packet(&v)
    };
    let cc = [
        0x00, 0x0F, 0x20, 0x00, 0xFF, 0x00, 0xFF, 0x04, 0x06, 0xE1, 0x04, 0x00, 0xFF, 0x00, 0x00,
    ];
    let len = (stored.len() as u16).to_be_bytes();

    mock.queue_reply(vec![ok_response(0x00, 0x00)]);
    mock.queue_reply(vec![ok_response(0x00, 0x01)]);
    mock.queue_reply(vec![ok_response(0x01, 0x00)]);
    mock.queue_reply(vec![ok_response(0x01, 0x03), iso_dep_activation_ntf(1)]);
    mock.queue_reply(vec![sw(&[])]);
    mock.queue_reply(vec![sw(&[])]);
    mock.queue_reply(vec![sw(&cc)]);
    mock.queue_reply(vec![sw(&[])]);
    mock.queue_reply(vec![sw(&len)]);
    mock.queue_reply(vec![sw(stored.as_bytes())]);
    mock.queue_reply(vec![ok_response(0x01, 0x06), deactivate_ntf(0x00)]);
}
