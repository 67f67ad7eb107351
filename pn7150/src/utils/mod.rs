//! Small helpers shared by the protocol and controller layers: hex rendering
//! for log output and deadline arithmetic for the bounded polling loops.

pub mod hex;
pub mod timeout;

pub use hex::*;
pub use timeout::*;
