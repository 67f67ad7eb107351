// pn7150/src/transport/mock.rs

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::Result;
use crate::transport::traits::Transport;

#[derive(Debug, Default)]
struct MockState {
    written: Vec<Vec<u8>>,
    inbound: VecDeque<Vec<u8>>,
    /// Frames released into `inbound` by the next write, one batch per write
    replies: VecDeque<Vec<Vec<u8>>>,
    current: VecDeque<u8>,
    frame_open: bool,
    ready_at: Option<Instant>,
    write_failures: usize,
    read_failures: usize,
    resets: Vec<(bool, Duration)>,
    delays: Vec<Duration>,
}

/// Mock transport for unit tests. It records written packets and serves
/// queued inbound frames.
///
/// Clones share state, so a test can keep one handle for assertions while
/// the controller owns another.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Rc<RefCell<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a frame that is readable immediately.
    pub fn push_frame(&self, frame: &[u8]) {
        self.state.borrow_mut().inbound.push_back(frame.to_vec());
    }

    /// Queue a batch of frames that becomes readable after the next write
    /// not already claimed by an earlier batch.
    pub fn queue_reply(&self, frames: Vec<Vec<u8>>) {
        self.state.borrow_mut().replies.push_back(frames);
    }

    /// Hold all inbound data back until `delay` has elapsed.
    pub fn set_ready_after(&self, delay: Duration) {
        self.state.borrow_mut().ready_at = Some(Instant::now() + delay);
    }

    /// Make the next `n` writes fail with an I/O error.
    pub fn fail_next_writes(&self, n: usize) {
        self.state.borrow_mut().write_failures = n;
    }

    /// Make the next `n` reads fail with an I/O error.
    pub fn fail_next_reads(&self, n: usize) {
        self.state.borrow_mut().read_failures = n;
    }

    pub fn written(&self) -> Vec<Vec<u8>> {
        self.state.borrow().written.clone()
    }

    pub fn last_written(&self) -> Option<Vec<u8>> {
        self.state.borrow().written.last().cloned()
    }

    pub fn clear_written(&self) {
        self.state.borrow_mut().written.clear();
    }

    pub fn resets(&self) -> Vec<(bool, Duration)> {
        self.state.borrow().resets.clone()
    }

    /// Pauses requested through `Transport::delay`.
    pub fn delays(&self) -> Vec<Duration> {
        self.state.borrow().delays.clone()
    }

    /// Number of inbound frames not yet started by a read.
    pub fn pending_frames(&self) -> usize {
        self.state.borrow().inbound.len()
    }
}

impl Transport for MockTransport {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        let mut s = self.state.borrow_mut();
        if s.write_failures > 0 {
            s.write_failures -= 1;
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "mock write failure").into());
        }
        s.written.push(data.to_vec());
        if let Some(batch) = s.replies.pop_front() {
            s.inbound.extend(batch);
        }
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut s = self.state.borrow_mut();
        if s.read_failures > 0 {
            s.read_failures -= 1;
            return Err(io::Error::new(io::ErrorKind::TimedOut, "mock read failure").into());
        }
        if s.current.is_empty() {
            // A drained frame stays open until the next readiness check so a
            // short frame reads as truncated instead of running into the next.
            if s.frame_open {
                return Ok(0);
            }
            match s.inbound.pop_front() {
                Some(frame) => {
                    s.current.extend(frame);
                    s.frame_open = true;
                }
                None => return Ok(0),
            }
        }
        let n = buf.len().min(s.current.len());
        for slot in buf.iter_mut().take(n) {
            // n is bounded by current.len()
            *slot = s.current.pop_front().unwrap_or_default();
        }
        Ok(n)
    }

    fn data_ready(&mut self) -> bool {
        let mut s = self.state.borrow_mut();
        if let Some(at) = s.ready_at {
            if Instant::now() < at {
                return false;
            }
        }
        if s.current.is_empty() {
            s.frame_open = false;
        }
        !s.current.is_empty() || !s.inbound.is_empty()
    }

    fn reset(&mut self, active_low: bool, hold: Duration) -> Result<()> {
        self.state.borrow_mut().resets.push((active_low, hold));
        Ok(())
    }

    fn delay(&mut self, duration: Duration) {
        self.state.borrow_mut().delays.push(duration);
        std::thread::sleep(duration.min(Duration::from_millis(1)));
    }
}
