// pn7150/src/protocol/responses/discover.rs

use crate::constants::NCI_DISCOVER_NTF_MORE;
use crate::protocol::parser;
use crate::types::Protocol;
use crate::Result;

/// One candidate reported by RF_DISCOVER_NTF
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredDevice {
    pub discovery_id: u8,
    pub protocol: Protocol,
    pub mode_tech: u8,
    pub tech_params: Vec<u8>,
    /// No further RF_DISCOVER_NTF follows in this cycle
    pub last: bool,
}

/// Decode RF_DISCOVER_NTF payload
/// Layout: id(1) protocol(1) mode_tech(1) n(1) tech_params(n) type(1)
pub fn decode_discover(data: &[u8]) -> Result<DiscoveredDevice> {
    parser::ensure_len(data, 4)?;
    let (params, next) = parser::length_prefixed_at(data, 3)?;
    let kind = parser::byte_at(data, next)?;

    Ok(DiscoveredDevice {
        discovery_id: data[0],
        protocol: Protocol::from_byte(data[1]),
        mode_tech: data[2],
        tech_params: params.to_vec(),
        last: kind != NCI_DISCOVER_NTF_MORE,
    })
}
