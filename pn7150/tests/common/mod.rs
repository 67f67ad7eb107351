// Shared helpers for integration tests. Each test module includes this
// through `#[path]`, so not every helper is used everywhere.
#![allow(dead_code)]

pub mod fixtures;
pub mod helpers;
