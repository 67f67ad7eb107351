// pn7150/src/controller/emulation.rs

//! Card emulation: the controller answers a reader as an NFC Forum
//! Type 4 tag holding one NDEF message.

use std::time::Duration;

use log::{debug, trace};

use super::Controller;
use super::t4t::{CapabilityContainer, INS_READ_BINARY, INS_SELECT, INS_UPDATE_BINARY};
use crate::constants::*;
use crate::ndef::NdefMessage;
use crate::types::{Mode, PollListenMode};
use crate::utils::{Deadline, bytes_to_hex_spaced};
use crate::{Error, Result};

/// Capability container served by the emulated tag: version 2.0, MLe and
/// MLc 0xFF, NDEF file E104 of 255 bytes, read-only. Larger messages
/// advertise their own file size.
pub const EMULATED_CC: CapabilityContainer = CapabilityContainer {
    version: 0x20,
    max_le: 0x00FF,
    max_lc: 0x00FF,
    ndef_file_id: T4T_NDEF_FILE_ID,
    ndef_max_size: 0x00FF,
    read_access: 0x00,
    write_access: 0xFF,
};

/// Largest NDEF file a version 2.0 CC can describe
const MAX_NDEF_FILE_SIZE: usize = 0xFFFE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selected {
    Nothing,
    Application,
    CapabilityContainer,
    NdefFile,
}

/// Type 4 tag NDEF responder. Pure APDU in, APDU out.
#[derive(Debug, Clone)]
pub struct T4tEmulator {
    cc: [u8; 15],
    /// NLEN followed by the message
    ndef_file: Vec<u8>,
    selected: Selected,
    fully_read: bool,
}

impl T4tEmulator {
    /// Fails with `CapacityExceeded` when NLEN plus the message does not
    /// fit the largest NDEF file the CC can advertise.
    pub fn new(message: &NdefMessage) -> Result<Self> {
        let bytes = message.as_bytes();
        let file_size = bytes.len() + 2;
        if file_size > MAX_NDEF_FILE_SIZE {
            return Err(Error::CapacityExceeded {
                capacity: MAX_NDEF_FILE_SIZE,
                required: file_size,
            });
        }

        // both fit in u16 after the check above
        let mut ndef_file = Vec::with_capacity(file_size);
        ndef_file.extend_from_slice(&(bytes.len() as u16).to_be_bytes());
        ndef_file.extend_from_slice(bytes);
        let cc = CapabilityContainer {
            ndef_max_size: (file_size as u16).max(EMULATED_CC.ndef_max_size),
            ..EMULATED_CC
        };
        Ok(Self {
            cc: cc.to_bytes(),
            ndef_file,
            selected: Selected::Nothing,
            fully_read: false,
        })
    }

    /// The reader has read the NDEF file up to its last byte.
    pub fn ndef_fully_read(&self) -> bool {
        self.fully_read
    }

    /// Answer one command APDU.
    pub fn respond(&mut self, apdu: &[u8]) -> Vec<u8> {
        let [_cla, ins, p1, p2, rest @ ..] = apdu else {
            return SW_INS_NOT_SUPPORTED.to_vec();
        };
        match *ins {
            INS_SELECT => self.select(*p1, rest),
            INS_READ_BINARY => self.read_binary(*p1, *p2, rest),
            INS_UPDATE_BINARY => SW_SECURITY_NOT_SATISFIED.to_vec(),
            _ => SW_INS_NOT_SUPPORTED.to_vec(),
        }
    }

    fn select(&mut self, p1: u8, rest: &[u8]) -> Vec<u8> {
        let data = match rest.split_first() {
            Some((lc, body)) => &body[..body.len().min(*lc as usize)],
            None => &[][..],
        };
        let target = match p1 {
            0x04 if data == T4T_NDEF_AID => Some(Selected::Application),
            0x00 if self.selected != Selected::Nothing && data == T4T_CC_FILE_ID => {
                Some(Selected::CapabilityContainer)
            }
            0x00 if self.selected != Selected::Nothing && data == T4T_NDEF_FILE_ID => {
                Some(Selected::NdefFile)
            }
            _ => None,
        };
        match target {
            Some(s) => {
                trace!("t4t select {:?}", s);
                self.selected = s;
                SW_OK.to_vec()
            }
            None => SW_FILE_NOT_FOUND.to_vec(),
        }
    }

    fn read_binary(&mut self, p1: u8, p2: u8, rest: &[u8]) -> Vec<u8> {
        let file: &[u8] = match self.selected {
            Selected::CapabilityContainer => &self.cc,
            Selected::NdefFile => &self.ndef_file,
            _ => return SW_FILE_NOT_FOUND.to_vec(),
        };
        let offset = u16::from_be_bytes([p1 & 0x7F, p2]) as usize;
        if offset > file.len() {
            return SW_WRONG_OFFSET.to_vec();
        }
        let le = match rest.first() {
            Some(0) | None => 256,
            Some(n) => *n as usize,
        };
        let end = (offset + le).min(file.len());

        let mut out = file[offset..end].to_vec();
        out.extend_from_slice(&SW_OK);
        if self.selected == Selected::NdefFile && end > offset && end == file.len() {
            self.fully_read = true;
        }
        out
    }
}

impl Controller {
    /// Send one response APDU to the reader.
    pub fn card_mode_send(&mut self, data: &[u8]) -> Result<()> {
        self.emulating()?;
        self.send_data(data)
    }

    /// Receive the next command APDU from the reader.
    pub fn card_mode_receive(&mut self, timeout: Duration) -> Result<Vec<u8>> {
        self.emulating()?;
        self.receive_data(timeout)
    }

    /// Serve `message` as a Type 4 tag until the reader leaves the field
    /// or `timeout` elapses. Returns whether the whole NDEF file was read.
    pub fn emulate(&mut self, message: &NdefMessage, timeout: Duration) -> Result<bool> {
        self.emulating()?;
        let mut emulator = T4tEmulator::new(message)?;
        let deadline = Deadline::after(timeout);

        loop {
            let wait = self.config().emulation_timeout.min(deadline.remaining());
            let apdu = match self.receive_data(wait) {
                Ok(apdu) => apdu,
                Err(Error::Deactivated) => break,
                Err(Error::Timeout) if deadline.expired() => break,
                Err(Error::Timeout) => continue,
                Err(e) => return Err(e),
            };
            let resp = emulator.respond(&apdu);
            trace!("c-apdu {} r-apdu {}", bytes_to_hex_spaced(&apdu), bytes_to_hex_spaced(&resp));
            match self.send_data(&resp) {
                Ok(()) => {}
                Err(Error::InvalidState(_)) => break,
                Err(e) => return Err(e),
            }
        }

        debug!("emulation finished, ndef read: {}", emulator.ndef_fully_read());
        Ok(emulator.ndef_fully_read())
    }

    fn emulating(&self) -> Result<()> {
        let dev = self.activated_device()?;
        if self.mode() != Some(Mode::Emulation) || dev.poll_listen() != PollListenMode::Listen {
            return Err(Error::InvalidState(format!(
                "card emulation needs a listen-mode activation, state is {}",
                self.state()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::State;
    use crate::controller::t4t;
    use crate::test_support::*;
    use crate::transport::MockTransport;
    use crate::utils::ms;

    fn emulator() -> T4tEmulator {
        let mut msg = NdefMessage::new();
        msg.add_text_record("emulated", "en").unwrap();
        T4tEmulator::new(&msg).unwrap()
    }

    #[test]
    fn serves_cc_file() {
        let mut e = emulator();
        assert_eq!(e.respond(&t4t::select_application()), SW_OK.to_vec());
        assert_eq!(e.respond(&t4t::select_cc()), SW_OK.to_vec());
        let resp = e.respond(&t4t::read_binary(0, 0x0F));
        assert_eq!(
            resp,
            vec![
                0x00, 0x0F, 0x20, 0x00, 0xFF, 0x00, 0xFF, 0x04, 0x06, 0xE1, 0x04, 0x00, 0xFF, 0x00,
                0xFF, 0x90, 0x00
            ]
        );
    }

    #[test]
    fn reading_the_whole_file_is_tracked() {
        let mut e = emulator();
        e.respond(&t4t::select_application());
        e.respond(&t4t::select_file(T4T_NDEF_FILE_ID));
        let nlen = e.respond(&t4t::read_binary(0, 2));
        let len = u16::from_be_bytes([nlen[0], nlen[1]]);
        assert!(!e.ndef_fully_read());

        let body = e.respond(&t4t::read_binary(2, len as u8));
        assert_eq!(body.len(), len as usize + 2);
        assert!(e.ndef_fully_read());
        let msg = NdefMessage::from_bytes(&body[..len as usize]).unwrap();
        assert_eq!(msg.records().unwrap()[0].as_text(), "emulated");
    }

    #[test]
    fn empty_read_at_end_of_file_is_not_a_full_read() {
        let mut e = emulator();
        e.respond(&t4t::select_application());
        e.respond(&t4t::select_file(T4T_NDEF_FILE_ID));
        let nlen = e.respond(&t4t::read_binary(0, 2));
        let end = u16::from_be_bytes([nlen[0], nlen[1]]) + 2;

        assert_eq!(e.respond(&t4t::read_binary(end, 0x10)), SW_OK.to_vec());
        assert!(!e.ndef_fully_read());
    }

    #[test]
    fn large_message_advertises_its_file_size() {
        let mut msg = NdefMessage::with_capacity(1024);
        msg.add_mime_media_record("application/octet-stream", &[0x11; 600])
            .unwrap();
        let mut e = T4tEmulator::new(&msg).unwrap();
        e.respond(&t4t::select_application());
        e.respond(&t4t::select_cc());
        let cc = CapabilityContainer::parse(&e.respond(&t4t::read_binary(0, 0x0F))[..15]).unwrap();
        assert_eq!(cc.ndef_max_size as usize, msg.len() + 2);

        let mut huge = NdefMessage::with_capacity(70_000);
        huge.add_mime_media_record("application/octet-stream", &vec![0x22; 66_000])
            .unwrap();
        assert!(matches!(
            T4tEmulator::new(&huge),
            Err(Error::CapacityExceeded { capacity: 0xFFFE, .. })
        ));
    }

    #[test]
    fn error_status_words() {
        let mut e = emulator();
        // file select before the application
        assert_eq!(e.respond(&t4t::select_cc()), SW_FILE_NOT_FOUND.to_vec());
        assert_eq!(e.respond(&t4t::read_binary(0, 2)), SW_FILE_NOT_FOUND.to_vec());
        e.respond(&t4t::select_application());
        assert_eq!(e.respond(&t4t::select_file([0xE1, 0x05])), SW_FILE_NOT_FOUND.to_vec());
        e.respond(&t4t::select_cc());
        assert_eq!(e.respond(&t4t::read_binary(0x40, 1)), SW_WRONG_OFFSET.to_vec());
        assert_eq!(
            e.respond(&t4t::update_binary(0, &[0x00])),
            SW_SECURITY_NOT_SATISFIED.to_vec()
        );
        assert_eq!(e.respond(&[0x00, 0xCA, 0x00, 0x00]), SW_INS_NOT_SUPPORTED.to_vec());
        assert_eq!(e.respond(&[0x00]), SW_INS_NOT_SUPPORTED.to_vec());
    }

    #[test]
    fn emulate_serves_reader_until_deactivation() {
        let mock = MockTransport::new();
        let mut ctrl =
            activated_controller_in(&mock, Mode::Emulation, listen_a_activation_ntf(1)).unwrap();

        let mut msg = NdefMessage::new();
        msg.add_uri_record("https://www.example.com").unwrap();
        let len = msg.len() as u8;

        mock.push_frame(&data_packet(&t4t::select_application()));
        mock.queue_reply(vec![data_packet(&t4t::select_file(T4T_NDEF_FILE_ID))]);
        mock.queue_reply(vec![data_packet(&t4t::read_binary(0, 2))]);
        mock.queue_reply(vec![data_packet(&t4t::read_binary(2, len))]);
        mock.queue_reply(vec![deactivate_ntf(0x03)]);

        assert!(ctrl.emulate(&msg, ms(500)).unwrap());
        assert_eq!(ctrl.state(), State::Discovering(Mode::Emulation));

        let last = mock.last_written().unwrap();
        assert_eq!(&last[last.len() - 2..], &SW_OK);
        assert_eq!(&last[3..last.len() - 2], msg.as_bytes());
    }

    #[test]
    fn emulation_needs_listen_activation() {
        let mock = MockTransport::new();
        let mut ctrl = activated_controller(&mock, t2t_activation_ntf(1)).unwrap();
        assert!(matches!(
            ctrl.card_mode_receive(ms(10)),
            Err(Error::InvalidState(_))
        ));
    }
}
