// pn7150/src/transport/traits.rs

use std::time::Duration;

use crate::Result;

/// Transport trait abstracts the byte link to the controller (I2C on the
/// reference hardware) away from framing and state-machine logic.
///
/// Implementations report I/O failures as [`crate::Error::Transport`]; the
/// driver never retries them.
pub trait Transport {
    /// Write one complete NCI packet to the controller
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Read up to `buf.len()` bytes of the pending packet, returning the
    /// number of bytes read. `Ok(0)` means nothing more is available.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Interrupt-line equivalent: true when the controller has a packet ready
    fn data_ready(&mut self) -> bool;

    /// Pulse the reset (VEN) line: assert it for `hold`, then release it.
    fn reset(&mut self, active_low: bool, hold: Duration) -> Result<()>;

    /// Pause between two readiness checks. The default sleeps the calling
    /// thread; bare-metal transports can substitute a busy-wait delay.
    fn delay(&mut self, duration: Duration) {
        std::thread::sleep(duration)
    }
}
