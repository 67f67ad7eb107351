// pn7150/src/controller/state.rs

use derive_more::Display;

use crate::types::Mode;

/// Controller state as tracked by the host
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    /// No successful reset/init yet, or a transport failure since
    #[default]
    Uninitialized,
    Initialized,
    #[display(fmt = "Configured({})", _0)]
    Configured(Mode),
    #[display(fmt = "Discovering({})", _0)]
    Discovering(Mode),
    /// A remote device is activated
    #[display(fmt = "Activated({})", _0)]
    Activated(Mode),
}

impl State {
    pub fn mode(&self) -> Option<Mode> {
        match self {
            Self::Configured(m) | Self::Discovering(m) | Self::Activated(m) => Some(*m),
            _ => None,
        }
    }

    pub fn is_activated(&self) -> bool {
        matches!(self, Self::Activated(_))
    }
}
