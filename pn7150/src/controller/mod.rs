// pn7150/src/controller/mod.rs

//! Discovery and mode state machine

mod builder;
mod config;
mod emulation;
mod handle;
mod p2p;
pub mod profile;
mod reader;
mod state;
pub mod t2t;
pub mod t4t;

pub use builder::ControllerBuilder;
pub use config::Config;
pub use emulation::{EMULATED_CC, T4tEmulator};
pub use handle::Controller;
pub use profile::DiscoveryProfile;
pub use state::State;
