// pn7150/src/protocol/commands/core.rs

/// CORE_RESET reset type: keep the current configuration
pub const RESET_KEEP_CONFIG: u8 = 0x00;
/// CORE_RESET reset type: reset configuration to defaults
pub const RESET_CONFIG: u8 = 0x01;

/// Encode CORE_RESET_CMD payload
pub fn encode_core_reset(reset_type: u8) -> Vec<u8> {
    vec![reset_type]
}

/// Encode CORE_INIT_CMD payload (empty in NCI 1.0)
pub fn encode_core_init() -> Vec<u8> {
    Vec::new()
}
