// pn7150/src/protocol/mod.rs

pub mod codec;
pub mod commands;
pub mod frame;
pub mod parser;
pub mod responses;

pub use codec::{poll_frame, read_frame, write_frame};
pub use commands::{Command, DiscoverMapEntry, MapMode};
pub use frame::{Frame, MessageType};
pub use responses::{DiscoveredDevice, Notification, Response};
