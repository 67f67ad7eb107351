// pn7150/src/protocol/codec.rs

use std::time::Duration;

use log::trace;

use crate::constants::NCI_HEADER_LEN;
use crate::transport::Transport;
use crate::utils::{Deadline, bytes_to_hex_spaced};
use crate::{Error, Result};

use super::Frame;

/// Encode a Frame and write it to the transport as one packet.
pub fn write_frame(transport: &mut dyn Transport, frame: &Frame) -> Result<()> {
    let bytes = frame.encode()?;
    trace!("nci >> {}", bytes_to_hex_spaced(&bytes));
    transport.write(&bytes)
}

/// Read one frame that the transport reports as ready: the 3-byte header
/// first, then exactly the declared number of payload bytes.
pub fn read_frame(transport: &mut dyn Transport) -> Result<Frame> {
    let mut header = [0u8; NCI_HEADER_LEN];
    read_exact(transport, &mut header)?;

    let declared = header[2] as usize;
    let mut bytes = Vec::with_capacity(NCI_HEADER_LEN + declared);
    bytes.extend_from_slice(&header);
    bytes.resize(NCI_HEADER_LEN + declared, 0);
    read_exact(transport, &mut bytes[NCI_HEADER_LEN..])?;

    trace!("nci << {}", bytes_to_hex_spaced(&bytes));
    Frame::decode(&bytes)
}

/// Wait for the transport to signal a pending frame, checking every
/// `interval`, and read it. Fails with `Timeout` once `timeout` elapses;
/// nothing is consumed in that case.
pub fn poll_frame(
    transport: &mut dyn Transport,
    timeout: Duration,
    interval: Duration,
) -> Result<Frame> {
    let deadline = Deadline::after(timeout);
    loop {
        if transport.data_ready() {
            return read_frame(transport);
        }
        if deadline.expired() {
            return Err(Error::Timeout);
        }
        transport.delay(interval.min(deadline.remaining()));
    }
}

fn read_exact(transport: &mut dyn Transport, buf: &mut [u8]) -> Result<()> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = transport.read(&mut buf[filled..])?;
        if n == 0 {
            return Err(Error::MalformedFrame {
                declared: buf.len(),
                actual: filled,
            });
        }
        filled += n;
    }
    Ok(())
}
