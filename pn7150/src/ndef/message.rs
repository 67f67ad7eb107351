// pn7150/src/ndef/message.rs

use log::debug;

use super::bluetooth::BluetoothHandover;
use super::header::{RecordHeader, RecordPosition, reposition};
use super::record::NdefRecord;
use super::wifi::WifiCredential;
use crate::constants::NDEF_MAX_MESSAGE_LEN;
use crate::{Error, Result};

/// An NDEF message held as one contiguous, ready-to-send buffer.
///
/// Record start offsets are tracked alongside the bytes, so header flags
/// can be re-derived after every change without scanning payload content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdefMessage {
    buf: Vec<u8>,
    offsets: Vec<usize>,
    capacity: usize,
}

impl Default for NdefMessage {
    fn default() -> Self {
        Self::new()
    }
}

impl NdefMessage {
    /// Empty message with the default 249 byte budget
    pub fn new() -> Self {
        Self::with_capacity(NDEF_MAX_MESSAGE_LEN)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity.min(4096)),
            offsets: Vec::new(),
            capacity,
        }
    }

    /// Adopt a serialized message, e.g. one read from a tag. The
    /// capacity grows to fit the buffer if needed. Header bytes are kept
    /// as found.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut offsets = Vec::new();
        let mut pos = 0;
        while pos < bytes.len() {
            let (_, _, used) = NdefRecord::decode(&bytes[pos..])?;
            offsets.push(pos);
            pos += used;
        }
        Ok(Self {
            buf: bytes.to_vec(),
            offsets,
            capacity: bytes.len().max(NDEF_MAX_MESSAGE_LEN),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn record_count(&self) -> usize {
        self.offsets.len()
    }

    /// Serialized length in bytes
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn clear(&mut self) {
        self.buf.clear();
        self.offsets.clear();
    }

    /// Append a record. Fails with `CapacityExceeded` when the message
    /// would outgrow its budget; the buffer is untouched in that case.
    pub fn append(&mut self, record: &NdefRecord) -> Result<()> {
        record.validate()?;
        let required = self.buf.len() + record.encoded_len();
        if required > self.capacity {
            return Err(Error::CapacityExceeded {
                capacity: self.capacity,
                required,
            });
        }

        self.offsets.push(self.buf.len());
        record.encode_into(RecordPosition::Single, &mut self.buf);
        self.assign_headers();
        debug!(
            "ndef: appended {} record, {} records / {} bytes",
            record.kind(),
            self.offsets.len(),
            self.buf.len()
        );
        Ok(())
    }

    /// Remove the record at `index` and return it.
    pub fn remove(&mut self, index: usize) -> Result<NdefRecord> {
        let Some(&start) = self.offsets.get(index) else {
            return Err(Error::NdefFormat(format!(
                "record index {} out of range ({} records)",
                index,
                self.offsets.len()
            )));
        };
        let (_, record, used) = NdefRecord::decode(&self.buf[start..])?;

        self.buf.drain(start..start + used);
        self.offsets.remove(index);
        for off in self.offsets.iter_mut().skip(index) {
            *off -= used;
        }
        self.assign_headers();
        Ok(record)
    }

    pub fn add_text_record(&mut self, text: &str, language: &str) -> Result<()> {
        self.append(&NdefRecord::text(text, language))
    }

    pub fn add_uri_record(&mut self, uri: &str) -> Result<()> {
        self.append(&NdefRecord::uri(uri))
    }

    pub fn add_mime_media_record(&mut self, mime_type: &str, payload: &[u8]) -> Result<()> {
        self.append(&NdefRecord::mime(mime_type, payload.to_vec()))
    }

    pub fn add_wifi_record(&mut self, credential: &WifiCredential) -> Result<()> {
        self.append(&NdefRecord::wifi(credential))
    }

    pub fn add_bluetooth_record(&mut self, handover: &BluetoothHandover) -> Result<()> {
        self.append(&NdefRecord::bluetooth(handover))
    }

    pub fn add_vcard_record(&mut self, vcard: &str) -> Result<()> {
        self.append(&NdefRecord::vcard(vcard))
    }

    /// Decode the record at `index`
    pub fn get(&self, index: usize) -> Option<NdefRecord> {
        let start = *self.offsets.get(index)?;
        NdefRecord::decode(&self.buf[start..]).ok().map(|(_, r, _)| r)
    }

    /// Walk the buffer from the start, one record at a time. Decoding
    /// never mutates the message, so the walk can be restarted freely.
    pub fn iter(&self) -> Records<'_> {
        Records {
            buf: &self.buf,
            pos: 0,
        }
    }

    /// Decode every record in order
    pub fn records(&self) -> Result<Vec<NdefRecord>> {
        self.iter().map(|r| r.map(|(_, record)| record)).collect()
    }

    fn assign_headers(&mut self) {
        let count = self.offsets.len();
        for (i, &off) in self.offsets.iter().enumerate() {
            self.buf[off] = reposition(self.buf[off], RecordPosition::for_index(i, count));
        }
    }
}

/// Iterator over the records of a serialized message
pub struct Records<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Iterator for Records<'a> {
    type Item = Result<(RecordHeader, NdefRecord)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.buf.len() {
            return None;
        }
        match NdefRecord::decode(&self.buf[self.pos..]) {
            Ok((header, record, used)) => {
                self.pos += used;
                Some(Ok((header, record)))
            }
            Err(e) => {
                self.pos = self.buf.len();
                Some(Err(e))
            }
        }
    }
}
