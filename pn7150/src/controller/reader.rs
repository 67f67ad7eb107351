// pn7150/src/controller/reader.rs

//! Reader/writer operations against an activated tag

use std::time::Duration;

use log::debug;

use super::{Controller, t2t, t4t};
use crate::ndef::NdefMessage;
use crate::protocol::{Command, Notification};
use crate::types::{DeactivationType, Interface, Protocol};
use crate::utils::Deadline;
use crate::{Error, Result};

/// T1T read identification
const T1T_RID: [u8; 7] = [0x78, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
/// ISO15693 inventory, single slot
const ISO15693_INVENTORY: [u8; 3] = [0x26, 0x01, 0x00];
/// Tag-cmd interface MIFARE read of block 0
const MIFARE_READ_BLOCK0: [u8; 3] = [0x10, 0x30, 0x00];
const T3T_WILDCARD_SYSTEM_CODE: u16 = 0xFFFF;

impl Controller {
    /// Exchange raw bytes with the activated device. On the Frame
    /// interface the trailing status byte is checked and stripped.
    pub fn transceive(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        let interface = self.activated_device()?.interface;
        self.send_data(data)?;
        let mut resp = self.receive_data(self.config().tag_timeout)?;

        if interface == Interface::Frame {
            match resp.pop() {
                Some(0x00) => {}
                Some(status) => {
                    return Err(Error::Tag(format!("rf frame status {:#04x}", status)));
                }
                None => return Err(Error::Tag("response without status byte".into())),
            }
        }
        Ok(resp)
    }

    /// One presence check suited to the activated protocol. Errors from
    /// the tag side mean "gone"; only transport failures are returned.
    pub fn presence_check(&mut self) -> Result<bool> {
        let protocol = self.activated_device()?.protocol;
        let outcome = match protocol {
            Protocol::T1T => self.transceive(&T1T_RID).map(|_| true),
            Protocol::T2T => self.transceive(&[t2t::CMD_READ, 0x00]).map(|_| true),
            Protocol::Iso15693 => self.transceive(&ISO15693_INVENTORY).map(|_| true),
            Protocol::T3T => self.t3t_presence(),
            Protocol::IsoDep => self.iso_dep_presence(),
            Protocol::Mifare => self.transceive(&MIFARE_READ_BLOCK0).map(|r| {
                // tag-cmd responses end with their own status byte
                r.last() == Some(&0x00)
            }),
            other => {
                return Err(Error::UnsupportedOperation(format!(
                    "presence check for {}",
                    other
                )));
            }
        };

        match outcome {
            Ok(present) => Ok(present),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                debug!("presence check failed: {}", e);
                Ok(false)
            }
        }
    }

    fn t3t_presence(&mut self) -> Result<bool> {
        self.execute(&Command::RfT3tPolling {
            system_code: T3T_WILDCARD_SYSTEM_CODE,
            request_code: 0x01,
            time_slot: 0x00,
        })?;
        match self.wait_notification(|n| matches!(n, Notification::T3tPolling { .. }))? {
            Notification::T3tPolling { status, responses } => {
                Ok(status == 0x00 && !responses.is_empty())
            }
            _ => Ok(false),
        }
    }

    fn iso_dep_presence(&mut self) -> Result<bool> {
        self.execute(&Command::IsoDepPresenceCheck)?;
        match self.wait_notification(|n| matches!(n, Notification::IsoDepPresence { .. }))? {
            Notification::IsoDepPresence { present } => Ok(present),
            _ => Ok(false),
        }
    }

    /// Wait for a notification accepted by `wanted`; deactivation ends the
    /// wait with `Deactivated`.
    fn wait_notification(&mut self, wanted: impl Fn(&Notification) -> bool) -> Result<Notification> {
        let deadline = Deadline::after(self.config().tag_timeout);
        loop {
            let frame = self.next_frame(deadline.remaining())?;
            let Some(n) = self.decode_notification(&frame)? else {
                continue;
            };
            if wanted(&n) {
                return Ok(n);
            }
            if let Notification::Deactivated { kind, .. } = n {
                self.after_deactivation(kind);
                return Err(Error::Deactivated);
            }
        }
    }

    /// Presence-check until the tag is gone, then resume discovery.
    /// Returns `false` when the tag was still present at `timeout`.
    pub fn wait_for_removal(&mut self, timeout: Duration) -> Result<bool> {
        let deadline = Deadline::after(timeout);
        loop {
            if !self.presence_check()? {
                break;
            }
            if deadline.expired() {
                return Ok(false);
            }
            let pause = self.config().presence_check_interval.min(deadline.remaining());
            self.delay(pause);
        }

        debug!("tag removed");
        if self.state().is_activated() {
            self.deactivate(DeactivationType::Discovery)?;
        }
        Ok(true)
    }

    /// Read the NDEF message of a Type 2 or Type 4 tag.
    pub fn read_ndef(&mut self) -> Result<NdefMessage> {
        match self.activated_device()?.protocol {
            Protocol::T2T => self.read_ndef_t2t(),
            Protocol::IsoDep => self.read_ndef_t4t(),
            other => Err(Error::UnsupportedOperation(format!("ndef read on {}", other))),
        }
    }

    /// Write `message` to a Type 2 or Type 4 tag.
    pub fn write_ndef(&mut self, message: &NdefMessage) -> Result<()> {
        match self.activated_device()?.protocol {
            Protocol::T2T => self.write_ndef_t2t(message),
            Protocol::IsoDep => self.write_ndef_t4t(message),
            other => Err(Error::UnsupportedOperation(format!("ndef write on {}", other))),
        }
    }

    fn t2t_read(&mut self, page: u8) -> Result<Vec<u8>> {
        let data = self.transceive(&[t2t::CMD_READ, page])?;
        if data.len() < t2t::READ_SIZE {
            return Err(Error::Tag(format!(
                "short type 2 read of page {}: {} bytes",
                page,
                data.len()
            )));
        }
        Ok(data)
    }

    fn read_ndef_t2t(&mut self) -> Result<NdefMessage> {
        let cc = t2t::CapabilityContainer::parse(&self.t2t_read(t2t::CC_PAGE)?)?;

        let limit = cc.addressable_size();
        let mut area = Vec::with_capacity(limit);
        let mut page = t2t::DATA_PAGE as usize;
        loop {
            match t2t::scan_tlvs(&area) {
                t2t::TlvScan::Found { start, len } => {
                    return NdefMessage::from_bytes(&area[start..start + len]);
                }
                t2t::TlvScan::Absent => return Ok(NdefMessage::new()),
                t2t::TlvScan::NeedMore if area.len() >= limit => {
                    return Err(Error::Tag("ndef tlv runs past the data area".into()));
                }
                t2t::TlvScan::NeedMore => {}
            }
            area.extend(self.t2t_read(t2t::page_number(page)?)?);
            page += t2t::READ_SIZE / t2t::PAGE_SIZE;
        }
    }

    fn write_ndef_t2t(&mut self, message: &NdefMessage) -> Result<()> {
        let cc = t2t::CapabilityContainer::parse(&self.t2t_read(t2t::CC_PAGE)?)?;
        if !cc.writable() {
            return Err(Error::Tag("type 2 tag is read-only".into()));
        }

        let tlv = t2t::wrap_ndef(message.as_bytes());
        if tlv.len() > cc.addressable_size() {
            return Err(Error::CapacityExceeded {
                capacity: cc.addressable_size(),
                required: tlv.len(),
            });
        }

        for (i, chunk) in tlv.chunks(t2t::PAGE_SIZE).enumerate() {
            let page = t2t::page_number(t2t::DATA_PAGE as usize + i)?;
            let mut cmd = vec![t2t::CMD_WRITE, page];
            cmd.extend_from_slice(chunk);
            let ack = self.transceive(&cmd)?;
            if ack.first().map(|b| b & 0x0F) != Some(t2t::ACK) {
                return Err(Error::Tag(format!("write of page {} not acknowledged", page)));
            }
        }
        debug!("wrote {} bytes of ndef tlv to type 2 tag", tlv.len());
        Ok(())
    }

    fn apdu(&mut self, apdu: &[u8]) -> Result<Vec<u8>> {
        let resp = self.transceive(apdu)?;
        t4t::check_sw(&resp).map(|d| d.to_vec())
    }

    /// Select the NDEF application and read the capability container.
    fn t4t_open(&mut self) -> Result<t4t::CapabilityContainer> {
        self.apdu(&t4t::select_application())?;
        self.apdu(&t4t::select_cc())?;
        let cc = t4t::CapabilityContainer::parse(&self.apdu(&t4t::read_binary(0, 0x0F))?)?;
        self.apdu(&t4t::select_file(cc.ndef_file_id))?;
        Ok(cc)
    }

    fn read_ndef_t4t(&mut self) -> Result<NdefMessage> {
        let cc = self.t4t_open()?;
        let nlen = self.apdu(&t4t::read_binary(0, 2))?;
        let [hi, lo, ..] = nlen.as_slice() else {
            return Err(Error::Tag("short NLEN read".into()));
        };
        let total = u16::from_be_bytes([*hi, *lo]) as usize;
        if total + 2 > cc.ndef_max_size as usize {
            return Err(Error::Tag(format!(
                "NLEN {} exceeds ndef file size {}",
                total, cc.ndef_max_size
            )));
        }

        let mut data = Vec::with_capacity(total);
        while data.len() < total {
            let want = (total - data.len()).min(cc.read_chunk());
            let offset = (2 + data.len()) as u16;
            let chunk = self.apdu(&t4t::read_binary(offset, want as u8))?;
            if chunk.is_empty() {
                return Err(Error::Tag("empty read binary response".into()));
            }
            data.extend_from_slice(&chunk[..chunk.len().min(want)]);
        }
        NdefMessage::from_bytes(&data)
    }

    fn write_ndef_t4t(&mut self, message: &NdefMessage) -> Result<()> {
        let cc = self.t4t_open()?;
        if cc.write_access != 0x00 {
            return Err(Error::Tag("type 4 tag ndef file is read-only".into()));
        }
        let bytes = message.as_bytes();
        if bytes.len() + 2 > cc.ndef_max_size as usize {
            return Err(Error::CapacityExceeded {
                capacity: (cc.ndef_max_size as usize).saturating_sub(2),
                required: bytes.len(),
            });
        }

        // empty NLEN while the content is rewritten
        self.apdu(&t4t::update_binary(0, &[0x00, 0x00]))?;
        for (i, chunk) in bytes.chunks(cc.write_chunk()).enumerate() {
            let offset = (2 + i * cc.write_chunk()) as u16;
            self.apdu(&t4t::update_binary(offset, chunk))?;
        }
        self.apdu(&t4t::update_binary(0, &(bytes.len() as u16).to_be_bytes()))?;
        debug!(
            "wrote {} bytes to type 4 ndef file {:02X}{:02X}",
            bytes.len(),
            cc.ndef_file_id[0],
            cc.ndef_file_id[1]
        );
        Ok(())
    }
}
