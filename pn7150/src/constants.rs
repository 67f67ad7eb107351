// pn7150/src/constants.rs
//! Common protocol constants used across the crate

/// NCI control/data packet header length: MT|PBF|GID, OID, payload length
pub const NCI_HEADER_LEN: usize = 3;

/// Maximum NCI payload length (NCI 1.0, section 3.1)
pub const NCI_MAX_PAYLOAD_LEN: usize = 255;

/// Maximum NCI frame length (header + payload)
pub const NCI_MAX_FRAME_LEN: usize = NCI_HEADER_LEN + NCI_MAX_PAYLOAD_LEN;

/// Message type field values (bits 7..5 of the first header byte)
pub const NCI_MT_DATA: u8 = 0x00;
pub const NCI_MT_COMMAND: u8 = 0x01;
pub const NCI_MT_RESPONSE: u8 = 0x02;
pub const NCI_MT_NOTIFICATION: u8 = 0x03;

/// Packet boundary flag (segment follows)
pub const NCI_PBF: u8 = 0x10;

/// Group identifiers
pub const NCI_GID_CORE: u8 = 0x00;
pub const NCI_GID_RF: u8 = 0x01;
pub const NCI_GID_PROPRIETARY: u8 = 0x0F;

/// Core group opcodes
pub const NCI_OID_CORE_RESET: u8 = 0x00;
pub const NCI_OID_CORE_INIT: u8 = 0x01;
pub const NCI_OID_CORE_CONN_CREDITS: u8 = 0x06;
pub const NCI_OID_CORE_GENERIC_ERROR: u8 = 0x07;
pub const NCI_OID_CORE_INTERFACE_ERROR: u8 = 0x08;

/// RF group opcodes
pub const NCI_OID_RF_DISCOVER_MAP: u8 = 0x00;
pub const NCI_OID_RF_SET_LISTEN_MODE_ROUTING: u8 = 0x01;
pub const NCI_OID_RF_DISCOVER: u8 = 0x03;
pub const NCI_OID_RF_DISCOVER_SELECT: u8 = 0x04;
pub const NCI_OID_RF_INTF_ACTIVATED: u8 = 0x05;
pub const NCI_OID_RF_DEACTIVATE: u8 = 0x06;
pub const NCI_OID_RF_T3T_POLLING: u8 = 0x08;

/// Proprietary ISO-DEP presence check
pub const NCI_OID_PROP_ISO_DEP_PRESENCE_CHECK: u8 = 0x11;

/// Static RF connection used for data exchange with the activated device
pub const NCI_STATIC_RF_CONN_ID: u8 = 0x00;

/// NCI status code: success
pub const NCI_STATUS_OK: u8 = 0x00;

/// RF_DISCOVER_NTF notification type meaning more notifications follow
pub const NCI_DISCOVER_NTF_MORE: u8 = 0x02;

/// NDEF record header flag byte values (MB ME CF SR IL TNF)
pub const NDEF_HEADER_SINGLE_WELL_KNOWN: u8 = 0xD1;
pub const NDEF_HEADER_SINGLE_MEDIA: u8 = 0xD2;
pub const NDEF_HEADER_FIRST_WELL_KNOWN: u8 = 0x91;
pub const NDEF_HEADER_FIRST_MEDIA: u8 = 0x92;
pub const NDEF_HEADER_NEXT_WELL_KNOWN: u8 = 0x11;
pub const NDEF_HEADER_NEXT_MEDIA: u8 = 0x12;
pub const NDEF_HEADER_LAST_WELL_KNOWN: u8 = 0x51;
pub const NDEF_HEADER_LAST_MEDIA: u8 = 0x52;

/// Default NDEF message budget for tag writes and card emulation memory
pub const NDEF_MAX_MESSAGE_LEN: usize = 249;

/// NFC Forum Type 4 tag NDEF application identifier
pub const T4T_NDEF_AID: [u8; 7] = [0xD2, 0x76, 0x00, 0x00, 0x85, 0x01, 0x01];

/// Type 4 tag capability container file identifier
pub const T4T_CC_FILE_ID: [u8; 2] = [0xE1, 0x03];

/// Type 4 tag NDEF file identifier used by the emulated tag
pub const T4T_NDEF_FILE_ID: [u8; 2] = [0xE1, 0x04];

/// ISO 7816 status words
pub const SW_OK: [u8; 2] = [0x90, 0x00];
pub const SW_FILE_NOT_FOUND: [u8; 2] = [0x6A, 0x82];
pub const SW_WRONG_OFFSET: [u8; 2] = [0x6B, 0x00];
pub const SW_INS_NOT_SUPPORTED: [u8; 2] = [0x6D, 0x00];
pub const SW_SECURITY_NOT_SATISFIED: [u8; 2] = [0x69, 0x82];
