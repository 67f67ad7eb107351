// pn7150/src/types.rs

use crate::Error;
use derive_more::Display;
use std::convert::TryFrom;

/// RF interface reported in activation notifications
#[repr(u8)]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Interface {
    #[default]
    Undetermined = 0x00,
    Frame = 0x01,
    IsoDep = 0x02,
    NfcDep = 0x03,
    TagCmd = 0x80,
}

impl Interface {
    /// Map a wire byte; values outside the known set map to `Undetermined`.
    pub fn from_byte(value: u8) -> Self {
        match value {
            0x01 => Self::Frame,
            0x02 => Self::IsoDep,
            0x03 => Self::NfcDep,
            0x80 => Self::TagCmd,
            _ => Self::Undetermined,
        }
    }

    /// Interface the controller should open for a given protocol
    pub fn for_protocol(protocol: Protocol) -> Self {
        match protocol {
            Protocol::IsoDep => Self::IsoDep,
            Protocol::NfcDep => Self::NfcDep,
            Protocol::Mifare => Self::TagCmd,
            _ => Self::Frame,
        }
    }
}

/// RF protocol of a discovered device
#[repr(u8)]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Protocol {
    #[default]
    Undetermined = 0x00,
    /// NFC Forum Type 1 tag (Topaz/Jewel)
    T1T = 0x01,
    /// NFC Forum Type 2 tag
    T2T = 0x02,
    /// NFC Forum Type 3 tag (FeliCa)
    T3T = 0x03,
    /// ISO14443-4 (Type 4 tag)
    IsoDep = 0x04,
    NfcDep = 0x05,
    /// NFC-V
    Iso15693 = 0x06,
    /// MIFARE Classic
    Mifare = 0x80,
}

impl Protocol {
    /// Map a wire byte; values outside the known set map to `Undetermined`.
    pub fn from_byte(value: u8) -> Self {
        match value {
            0x01 => Self::T1T,
            0x02 => Self::T2T,
            0x03 => Self::T3T,
            0x04 => Self::IsoDep,
            0x05 => Self::NfcDep,
            0x06 => Self::Iso15693,
            0x80 => Self::Mifare,
            _ => Self::Undetermined,
        }
    }
}

/// RF technology (low nibble of the mode/tech byte)
#[repr(u8)]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Technology {
    PassiveNfcA = 0,
    PassiveNfcB = 1,
    PassiveNfcF = 2,
    ActiveNfcA = 3,
    ActiveNfcF = 5,
    /// ISO15693 / NFC-V
    PassiveNfcV = 6,
}

impl TryFrom<u8> for Technology {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::PassiveNfcA),
            1 => Ok(Self::PassiveNfcB),
            2 => Ok(Self::PassiveNfcF),
            3 => Ok(Self::ActiveNfcA),
            5 => Ok(Self::ActiveNfcF),
            6 => Ok(Self::PassiveNfcV),
            other => Err(Error::UnsupportedTechnology(other)),
        }
    }
}

/// Poll or listen side (high nibble of the mode/tech byte)
#[repr(u8)]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PollListenMode {
    Poll = 0x00,
    Listen = 0x80,
}

impl PollListenMode {
    pub const MASK: u8 = 0xF0;

    pub fn from_mode_tech(mode_tech: u8) -> Self {
        if mode_tech & Self::MASK == Self::Listen as u8 {
            Self::Listen
        } else {
            Self::Poll
        }
    }
}

/// Combined mode/technology value as carried on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModeTech {
    pub mode: PollListenMode,
    pub technology: Technology,
}

impl ModeTech {
    pub const fn new(mode: PollListenMode, technology: Technology) -> Self {
        Self { mode, technology }
    }

    pub const fn poll(technology: Technology) -> Self {
        Self::new(PollListenMode::Poll, technology)
    }

    pub const fn listen(technology: Technology) -> Self {
        Self::new(PollListenMode::Listen, technology)
    }

    pub fn as_byte(&self) -> u8 {
        self.mode as u8 | self.technology as u8
    }
}

impl TryFrom<u8> for ModeTech {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        let mode = match value & PollListenMode::MASK {
            0x00 => PollListenMode::Poll,
            0x80 => PollListenMode::Listen,
            _ => return Err(Error::UnsupportedTechnology(value)),
        };
        let technology =
            Technology::try_from(value & 0x0F).map_err(|_| Error::UnsupportedTechnology(value))?;
        Ok(Self { mode, technology })
    }
}

/// Operating mode selected by the application
#[repr(u8)]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    #[default]
    ReaderWriter = 1,
    Emulation = 2,
    PeerToPeer = 3,
}

impl TryFrom<u8> for Mode {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::ReaderWriter),
            2 => Ok(Self::Emulation),
            3 => Ok(Self::PeerToPeer),
            other => Err(Error::UnsupportedMode(other)),
        }
    }
}

/// RF_DEACTIVATE type
#[repr(u8)]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeactivationType {
    Idle = 0x00,
    Sleep = 0x01,
    SleepAf = 0x02,
    Discovery = 0x03,
}

impl DeactivationType {
    pub fn from_byte(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Self::Idle),
            0x01 => Some(Self::Sleep),
            0x02 => Some(Self::SleepAf),
            0x03 => Some(Self::Discovery),
            _ => None,
        }
    }
}
