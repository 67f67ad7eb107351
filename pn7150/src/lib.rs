// pn7150/src/lib.rs

//! pn7150
//!
//! Pure Rust host driver for PN7150-class NFC controllers speaking NCI,
//! with an NDEF record/message codec. The controller runs in reader/writer,
//! card emulation or peer-to-peer mode over any byte transport.
#![warn(missing_docs)]

pub mod constants;
pub mod controller;
pub mod error;
pub mod ndef;
pub mod prelude;
pub mod protocol;
pub mod remote;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the enumerations in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
