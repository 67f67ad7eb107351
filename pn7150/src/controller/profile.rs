// pn7150/src/controller/profile.rs

//! What the controller is told to look for in each mode

use crate::protocol::{DiscoverMapEntry, MapMode};
use crate::types::{Interface, Mode, ModeTech, Protocol, Technology};

/// Discover map, listen-mode routing and discovery technologies for one mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryProfile {
    pub map: Vec<DiscoverMapEntry>,
    /// Protocols routed to the host in listen mode; empty means no
    /// routing command is sent
    pub routing: Vec<Protocol>,
    pub techs: Vec<ModeTech>,
}

impl DiscoveryProfile {
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::ReaderWriter => Self {
                map: vec![
                    DiscoverMapEntry::new(Protocol::T1T, MapMode::Poll, Interface::Frame),
                    DiscoverMapEntry::new(Protocol::T2T, MapMode::Poll, Interface::Frame),
                    DiscoverMapEntry::new(Protocol::T3T, MapMode::Poll, Interface::Frame),
                    DiscoverMapEntry::new(Protocol::IsoDep, MapMode::Poll, Interface::IsoDep),
                    DiscoverMapEntry::new(Protocol::Iso15693, MapMode::Poll, Interface::Frame),
                    DiscoverMapEntry::new(Protocol::Mifare, MapMode::Poll, Interface::TagCmd),
                ],
                routing: Vec::new(),
                techs: vec![
                    ModeTech::poll(Technology::PassiveNfcA),
                    ModeTech::poll(Technology::PassiveNfcF),
                    ModeTech::poll(Technology::PassiveNfcB),
                    ModeTech::poll(Technology::PassiveNfcV),
                ],
            },
            Mode::Emulation => Self {
                map: vec![DiscoverMapEntry::new(
                    Protocol::IsoDep,
                    MapMode::Listen,
                    Interface::IsoDep,
                )],
                routing: vec![Protocol::IsoDep],
                techs: vec![
                    ModeTech::listen(Technology::PassiveNfcA),
                    ModeTech::listen(Technology::PassiveNfcB),
                ],
            },
            Mode::PeerToPeer => Self {
                map: vec![DiscoverMapEntry::new(
                    Protocol::NfcDep,
                    MapMode::Both,
                    Interface::NfcDep,
                )],
                routing: Vec::new(),
                techs: vec![
                    ModeTech::poll(Technology::PassiveNfcA),
                    ModeTech::poll(Technology::PassiveNfcF),
                    ModeTech::listen(Technology::PassiveNfcA),
                    ModeTech::listen(Technology::PassiveNfcF),
                ],
            },
        }
    }
}
