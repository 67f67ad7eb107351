// pn7150/src/protocol/parser.rs

use crate::{Error, Result};

/// Ensure the slice has at least `min` bytes.
pub fn ensure_len(data: &[u8], min: usize) -> Result<()> {
    if data.len() < min {
        return Err(Error::InvalidLength {
            expected: min,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Read a single byte at `idx` with bounds checking.
pub fn byte_at(data: &[u8], idx: usize) -> Result<u8> {
    ensure_len(data, idx + 1)?;
    Ok(data[idx])
}

/// Read a big-endian u16 at given index, with bounds checking.
pub fn be_u16_at(data: &[u8], idx: usize) -> Result<u16> {
    ensure_len(data, idx + 2)?;
    Ok(u16::from_be_bytes([data[idx], data[idx + 1]]))
}

/// Read a big-endian u32 at given index, with bounds checking.
pub fn be_u32_at(data: &[u8], idx: usize) -> Result<u32> {
    ensure_len(data, idx + 4)?;
    Ok(u32::from_be_bytes([
        data[idx],
        data[idx + 1],
        data[idx + 2],
        data[idx + 3],
    ]))
}

/// Return a subslice with bounds checking.
pub fn slice_at(data: &[u8], idx: usize, len: usize) -> Result<&[u8]> {
    ensure_len(data, idx + len)?;
    Ok(&data[idx..idx + len])
}

/// Read a declared-length field: `declared` bytes starting at `idx`.
/// Fewer available bytes than declared is a malformed frame.
pub fn declared_at(data: &[u8], idx: usize, declared: usize) -> Result<&[u8]> {
    let available = data.len().saturating_sub(idx);
    if available < declared {
        return Err(Error::MalformedFrame {
            declared,
            actual: available,
        });
    }
    Ok(&data[idx..idx + declared])
}

/// Read a one-byte length prefix at `idx` followed by that many bytes.
/// Returns the field and the index just past it.
pub fn length_prefixed_at(data: &[u8], idx: usize) -> Result<(&[u8], usize)> {
    let len = byte_at(data, idx)? as usize;
    let field = declared_at(data, idx + 1, len)?;
    Ok((field, idx + 1 + len))
}

/// Reject a field longer than the model can hold.
pub fn bounded(field: &[u8], max: usize) -> Result<Vec<u8>> {
    if field.len() > max {
        return Err(Error::MalformedFrame {
            declared: field.len(),
            actual: max,
        });
    }
    Ok(field.to_vec())
}

/// Ensure a control response carries status OK. Returns `Status` otherwise.
pub fn expect_status_ok(group: u8, opcode: u8, payload: &[u8]) -> Result<()> {
    let status = byte_at(payload, 0)?;
    if status != crate::constants::NCI_STATUS_OK {
        return Err(Error::Status {
            gid: group,
            oid: opcode,
            status,
        });
    }
    Ok(())
}
