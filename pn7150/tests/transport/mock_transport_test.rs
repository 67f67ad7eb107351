use pn7150::transport::{MockTransport, Transport};

#[test]
fn replies_are_released_one_batch_per_write() {
    let mock = MockTransport::new();
    mock.queue_reply(vec![vec![0x40, 0x00, 0x01, 0x00]]);
    mock.queue_reply(vec![vec![0x40, 0x01, 0x01, 0x00], vec![0x61, 0x06, 0x00]]);

    let mut t: Box<dyn Transport> = Box::new(mock.clone());
    assert!(!t.data_ready());
    t.write(&[0x20, 0x00, 0x01, 0x01]).unwrap();
    assert_eq!(mock.pending_frames(), 1);
    t.write(&[0x20, 0x01, 0x00]).unwrap();
    assert_eq!(mock.pending_frames(), 3);
    assert_eq!(mock.written().len(), 2);
}

#[test]
fn reads_stop_at_frame_boundaries() {
    let mock = MockTransport::new();
    mock.push_frame(&[1, 2, 3]);
    mock.push_frame(&[4, 5]);
    let mut t = mock.clone();

    let mut buf = [0u8; 8];
    assert!(t.data_ready());
    assert_eq!(t.read(&mut buf).unwrap(), 3);
    assert_eq!(t.read(&mut buf).unwrap(), 0);
    assert!(t.data_ready());
    assert_eq!(t.read(&mut buf).unwrap(), 2);
    assert_eq!(&buf[..2], &[4, 5]);
}

#[test]
fn injected_failures() {
    let mock = MockTransport::new();
    mock.fail_next_writes(1);
    mock.fail_next_reads(1);
    let mut t = mock.clone();

    assert!(t.write(&[0x00]).unwrap_err().is_fatal());
    t.write(&[0x00]).unwrap();
    let mut buf = [0u8; 1];
    assert!(t.read(&mut buf).is_err());
}
