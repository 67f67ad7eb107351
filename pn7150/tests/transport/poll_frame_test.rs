use std::time::Instant;

use pn7150::protocol::{MessageType, poll_frame};
use pn7150::transport::MockTransport;
use pn7150::{Error, ms};

#[test]
fn deadline_before_readiness_times_out_without_consuming() {
    let mock = MockTransport::new();
    mock.push_frame(&[0x40, 0x01, 0x01, 0x00]);
    mock.set_ready_after(ms(200));
    let mut t = mock.clone();

    let started = Instant::now();
    assert!(matches!(poll_frame(&mut t, ms(20), ms(2)), Err(Error::Timeout)));
    assert!(started.elapsed() < ms(200));
    assert_eq!(mock.pending_frames(), 1);
}

#[test]
fn frame_is_read_once_ready() {
    let mock = MockTransport::new();
    mock.push_frame(&[0x40, 0x01, 0x01, 0x00]);
    mock.set_ready_after(ms(10));
    let mut t = mock.clone();

    let frame = poll_frame(&mut t, ms(500), ms(2)).unwrap();
    assert_eq!(frame.message_type, MessageType::Response);
    assert_eq!(frame.payload, vec![0x00]);
}

#[test]
fn short_frame_is_malformed() {
    let mock = MockTransport::new();
    mock.push_frame(&[0x61, 0x05, 0x08, 0x01, 0x02]);
    mock.push_frame(&[0x40, 0x01, 0x01, 0x00]);
    let mut t = mock.clone();

    assert!(matches!(
        poll_frame(&mut t, ms(50), ms(1)),
        Err(Error::MalformedFrame {
            declared: 8,
            actual: 2
        })
    ));
    // the next frame is intact
    let next = poll_frame(&mut t, ms(50), ms(1)).unwrap();
    assert_eq!(next.id(), 0x0001);
}
