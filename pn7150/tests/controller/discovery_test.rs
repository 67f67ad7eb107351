#[path = "../common/mod.rs"]
mod common;

use common::helpers::*;
use pn7150::prelude::*;

#[test]
fn reader_writer_discovery_activates_type_a_card() -> anyhow::Result<()> {
    common::helpers::init_logger();
    let mock = MockTransport::new();
    let mut ctrl = ControllerBuilder::new()
        .with_transport(Box::new(mock.clone()))
        .response_timeout(ms(50))
        .build()?;

    mock.queue_reply(vec![ok_response(0x00, 0x00)]);
    mock.queue_reply(vec![ok_response(0x00, 0x01)]);
    ctrl.initialize()?;

    mock.queue_reply(vec![ok_response(0x01, 0x00)]);
    ctrl.configure(Mode::ReaderWriter)?;
    assert_eq!(ctrl.state(), State::Configured(Mode::ReaderWriter));

    mock.queue_reply(vec![
        ok_response(0x01, 0x03),
        common::fixtures::type_a_activation_frame(),
    ]);
    ctrl.start_discovery()?;
    assert_eq!(ctrl.state(), State::Discovering(Mode::ReaderWriter));

    let dev = ctrl
        .await_activation(ms(100))?
        .ok_or_else(|| anyhow::anyhow!("no activation"))?;
    assert_eq!(dev.protocol, Protocol::IsoDep);
    assert_eq!(dev.interface, Interface::IsoDep);
    assert_eq!(dev.nfc_id(), &[0x04, 0x6F, 0x5A, 0x32, 0x6E, 0x61, 0x80]);
    assert_eq!(ctrl.state(), State::Activated(Mode::ReaderWriter));
    assert_eq!(ctrl.remote_device(), Some(&dev));

    let written = mock.written();
    assert_eq!(written[0], vec![0x20, 0x00, 0x01, 0x01]);
    assert_eq!(written[3][..2], [0x21, 0x03]);
    Ok(())
}

#[test]
fn nothing_in_field_is_not_an_error() -> anyhow::Result<()> {
    let mock = MockTransport::new();
    let mut ctrl = discovering_controller(&mock, Mode::ReaderWriter)?;
    assert!(ctrl.await_activation(ms(15))?.is_none());
    assert_eq!(ctrl.state(), State::Discovering(Mode::ReaderWriter));
    Ok(())
}

#[test]
fn bad_technology_byte_writes_nothing() -> anyhow::Result<()> {
    let mock = MockTransport::new();
    let mut ctrl = initialized_controller(&mock)?;
    let err = ctrl
        .configure_technologies(Mode::ReaderWriter, &[0x00, 0x87])
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedTechnology(0x87)));
    assert!(mock.written().is_empty());
    Ok(())
}

#[test]
fn read_failure_forces_reinitialization() -> anyhow::Result<()> {
    let mock = MockTransport::new();
    let mut ctrl = discovering_controller(&mock, Mode::ReaderWriter)?;
    mock.push_frame(&t2t_activation_ntf(1));
    mock.fail_next_reads(1);
    assert!(matches!(ctrl.await_activation(ms(50)), Err(Error::Transport(_))));
    assert_eq!(ctrl.state(), State::Uninitialized);
    assert!(matches!(ctrl.start_discovery(), Err(Error::InvalidState(_))));
    Ok(())
}

#[test]
fn builder_requires_transport() {
    assert!(matches!(
        ControllerBuilder::new().build(),
        Err(Error::InvalidState(_))
    ));
}
