// pn7150/src/protocol/responses/activation.rs

use crate::protocol::parser;
use crate::remote::{RemoteDevice, TechInfo};
use crate::types::{Interface, Protocol};
use crate::Result;

/// Decode RF_INTF_ACTIVATED_NTF payload
/// Layout: id(1) interface(1) protocol(1) mode_tech(1) max_payload(1)
/// credits(1) n(1) tech_params(n) exchange_mode_tech(1) tx_rate(1)
/// rx_rate(1) m(1) activation_params(m)
pub fn decode_intf_activated(data: &[u8]) -> Result<RemoteDevice> {
    const FIXED_LEN: usize = 7;
    parser::ensure_len(data, FIXED_LEN)?;

    let mode_tech = data[3];
    let (tech_params, next) = parser::length_prefixed_at(data, 6)?;
    // exchange mode/tech and bit rates are not modelled
    let (activation_params, _) = parser::length_prefixed_at(data, next + 3)?;

    Ok(RemoteDevice {
        discovery_id: data[0],
        interface: Interface::from_byte(data[1]),
        protocol: Protocol::from_byte(data[2]),
        mode_tech,
        max_payload: data[4],
        initial_credits: data[5],
        more_tags_pending: false,
        info: TechInfo::parse(mode_tech, tech_params, activation_params)?,
    })
}
