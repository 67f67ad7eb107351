//! Hex rendering used by frame tracing and `Debug`-style accessors.

use std::fmt::Write;

/// Convert a byte slice to a lowercase hex string with a single space between
/// each byte. This is the format used in `trace!` frame dumps.
///
/// Example: `&[0x61, 0x05]` -> `"61 05"`
pub fn bytes_to_hex_spaced(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i != 0 {
            s.push(' ');
        }
        let _ = write!(&mut s, "{:02x}", b);
    }
    s
}

/// Render a Bluetooth-style address, most significant byte first.
///
/// Example: `&[0x00, 0x1a, 0x7d]` -> `"00:1A:7D"`
pub fn bytes_to_colon_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i != 0 {
            s.push(':');
        }
        let _ = write!(&mut s, "{:02X}", b);
    }
    s
}
