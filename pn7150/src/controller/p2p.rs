// pn7150/src/controller/p2p.rs

//! Peer-to-peer exchange of opaque payloads over NFC-DEP

use std::time::Duration;

use log::debug;

use super::Controller;
use crate::types::{Interface, PollListenMode};
use crate::utils::Deadline;
use crate::{Error, Result};

impl Controller {
    /// Initiator side: send `payload` and wait for the target's answer.
    pub fn peer_exchange(&mut self, payload: &[u8], timeout: Duration) -> Result<Vec<u8>> {
        self.peer(PollListenMode::Poll)?;
        self.send_data(payload)?;
        self.receive_data(timeout)
    }

    /// Target side: answer every inbound payload with `handler(payload)`
    /// until the initiator leaves or `timeout` elapses. Returns the number
    /// of completed exchanges.
    pub fn serve_peer<F>(&mut self, timeout: Duration, mut handler: F) -> Result<usize>
    where
        F: FnMut(&[u8]) -> Vec<u8>,
    {
        self.peer(PollListenMode::Listen)?;
        let deadline = Deadline::after(timeout);
        let mut served = 0;

        loop {
            let inbound = match self.receive_data(deadline.remaining()) {
                Ok(data) => data,
                Err(Error::Deactivated) | Err(Error::Timeout) => break,
                Err(e) => return Err(e),
            };
            let reply = handler(&inbound);
            self.send_data(&reply)?;
            served += 1;
        }

        debug!("peer session ended after {} exchanges", served);
        Ok(served)
    }

    fn peer(&self, side: PollListenMode) -> Result<()> {
        let dev = self.activated_device()?;
        if dev.interface != Interface::NfcDep || dev.poll_listen() != side {
            return Err(Error::InvalidState(format!(
                "{} over {} is not an NFC-DEP {} link",
                dev.protocol, dev.interface, side
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use crate::transport::MockTransport;
    use crate::types::Mode;
    use crate::utils::ms;

    #[test]
    fn initiator_exchange() {
        let mock = MockTransport::new();
        let mut ctrl =
            activated_controller_in(&mock, Mode::PeerToPeer, nfc_dep_activation_ntf(false))
                .unwrap();
        mock.queue_reply(vec![data_packet(b"pong")]);
        assert_eq!(ctrl.peer_exchange(b"ping", ms(100)).unwrap(), b"pong".to_vec());
        assert_eq!(mock.last_written().unwrap(), data_packet(b"ping"));
    }

    #[test]
    fn target_answers_until_deactivated() {
        let mock = MockTransport::new();
        let mut ctrl =
            activated_controller_in(&mock, Mode::PeerToPeer, nfc_dep_activation_ntf(true))
                .unwrap();
        mock.push_frame(&data_packet(b"one"));
        mock.queue_reply(vec![data_packet(b"two")]);
        mock.queue_reply(vec![deactivate_ntf(0x03)]);

        let served = ctrl
            .serve_peer(ms(500), |p| {
                let mut r = p.to_vec();
                r.reverse();
                r
            })
            .unwrap();
        assert_eq!(served, 2);
        assert_eq!(mock.last_written().unwrap(), data_packet(b"owt"));
    }

    #[test]
    fn wrong_side_is_rejected() {
        let mock = MockTransport::new();
        let mut ctrl =
            activated_controller_in(&mock, Mode::PeerToPeer, nfc_dep_activation_ntf(true))
                .unwrap();
        assert!(matches!(
            ctrl.peer_exchange(b"x", ms(10)),
            Err(Error::InvalidState(_))
        ));
    }
}
