// pn7150/src/protocol/commands/mod.rs

pub mod core;
pub mod rf;

pub use self::core::{RESET_CONFIG, RESET_KEEP_CONFIG, encode_core_init, encode_core_reset};
pub use rf::{
    DiscoverMapEntry, MapMode, encode_deactivate, encode_discover, encode_discover_map,
    encode_discover_select, encode_listen_mode_routing, encode_t3t_polling,
};

use crate::constants::*;
use crate::protocol::Frame;
use crate::types::{DeactivationType, Interface, ModeTech, Protocol};

/// High-level Command enum. New control messages should be added here and
/// their payload encoder placed in `protocol::commands::<group>.rs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CoreReset {
        reset_type: u8,
    },
    CoreInit,
    RfDiscoverMap {
        entries: Vec<DiscoverMapEntry>,
    },
    RfSetListenModeRouting {
        protocols: Vec<Protocol>,
    },
    RfDiscover {
        techs: Vec<ModeTech>,
    },
    RfDiscoverSelect {
        discovery_id: u8,
        protocol: Protocol,
        interface: Interface,
    },
    RfDeactivate {
        kind: DeactivationType,
    },
    RfT3tPolling {
        system_code: u16,
        request_code: u8,
        time_slot: u8,
    },
    /// Proprietary ISO-DEP presence check; answered by a notification
    IsoDepPresenceCheck,
}

impl Command {
    /// NCI group identifier
    pub fn group(&self) -> u8 {
        match self {
            Self::CoreReset { .. } | Self::CoreInit => NCI_GID_CORE,
            Self::IsoDepPresenceCheck => NCI_GID_PROPRIETARY,
            _ => NCI_GID_RF,
        }
    }

    /// NCI opcode identifier
    pub fn opcode(&self) -> u8 {
        match self {
            Self::CoreReset { .. } => NCI_OID_CORE_RESET,
            Self::CoreInit => NCI_OID_CORE_INIT,
            Self::RfDiscoverMap { .. } => NCI_OID_RF_DISCOVER_MAP,
            Self::RfSetListenModeRouting { .. } => NCI_OID_RF_SET_LISTEN_MODE_ROUTING,
            Self::RfDiscover { .. } => NCI_OID_RF_DISCOVER,
            Self::RfDiscoverSelect { .. } => NCI_OID_RF_DISCOVER_SELECT,
            Self::RfDeactivate { .. } => NCI_OID_RF_DEACTIVATE,
            Self::RfT3tPolling { .. } => NCI_OID_RF_T3T_POLLING,
            Self::IsoDepPresenceCheck => NCI_OID_PROP_ISO_DEP_PRESENCE_CHECK,
        }
    }

    /// GID/OID packed as `gid << 8 | oid`
    pub fn id(&self) -> u16 {
        ((self.group() as u16) << 8) | self.opcode() as u16
    }

    /// Encode the command parameters into the control message payload.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::CoreReset { reset_type } => encode_core_reset(*reset_type),
            Self::CoreInit => encode_core_init(),
            Self::RfDiscoverMap { entries } => encode_discover_map(entries),
            Self::RfSetListenModeRouting { protocols } => encode_listen_mode_routing(protocols),
            Self::RfDiscover { techs } => encode_discover(techs),
            Self::RfDiscoverSelect {
                discovery_id,
                protocol,
                interface,
            } => encode_discover_select(*discovery_id, *protocol, *interface),
            Self::RfDeactivate { kind } => encode_deactivate(*kind),
            Self::RfT3tPolling {
                system_code,
                request_code,
                time_slot,
            } => encode_t3t_polling(*system_code, *request_code, *time_slot),
            Self::IsoDepPresenceCheck => Vec::new(),
        }
    }

    pub fn to_frame(&self) -> Frame {
        Frame::command(self.group(), self.opcode(), self.encode())
    }
}
