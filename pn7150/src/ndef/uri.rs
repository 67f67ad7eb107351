// pn7150/src/ndef/uri.rs

//! URI record identifier codes (NFC Forum URI RTD)

/// Prefixes indexed by identifier code 0x00..=0x23
pub const URI_PREFIXES: [&str; 36] = [
    "",
    "http://www.",
    "https://www.",
    "http://",
    "https://",
    "tel:",
    "mailto:",
    "ftp://anonymous:anonymous@",
    "ftp://ftp.",
    "ftps://",
    "sftp://",
    "smb://",
    "nfs://",
    "ftp://",
    "dav://",
    "news:",
    "telnet://",
    "imap:",
    "rtsp://",
    "urn:",
    "pop:",
    "sip:",
    "sips:",
    "tftp:",
    "btspp://",
    "btl2cap://",
    "btgoep://",
    "tcpobex://",
    "irdaobex://",
    "file://",
    "urn:epc:id:",
    "urn:epc:tag:",
    "urn:epc:pat:",
    "urn:epc:raw:",
    "urn:epc:",
    "urn:nfc:",
];

/// Recognised when reading but never chosen when writing
const DECODE_ONLY: &[u8] = &[0x0D];

/// Split a URI into its identifier code and the remainder to store.
/// The longest matching prefix wins; no match gives code 0x00 and the
/// full URI.
pub fn abbreviate(uri: &str) -> (u8, &str) {
    URI_PREFIXES
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(code, _)| !DECODE_ONLY.contains(&(*code as u8)))
        .filter(|(_, prefix)| uri.starts_with(*prefix))
        .max_by_key(|(_, prefix)| prefix.len())
        .map(|(code, prefix)| (code as u8, &uri[prefix.len()..]))
        .unwrap_or((0x00, uri))
}

/// Prefix for an identifier code; unknown codes expand to nothing.
pub fn prefix(code: u8) -> &'static str {
    URI_PREFIXES.get(code as usize).copied().unwrap_or("")
}

/// Rebuild the full URI from a URI record payload (code + remainder).
pub fn expand(payload: &[u8]) -> String {
    match payload.split_first() {
        Some((code, rest)) => format!("{}{}", prefix(*code), String::from_utf8_lossy(rest)),
        None => String::new(),
    }
}
