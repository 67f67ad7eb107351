// helpers.rs — controller scripting shared by the integration tests

pub use pn7150::test_support::*;

/// Route `log` output through env_logger when RUST_LOG is set.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
