//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system, ignoring repeated initialization
///
/// Useful for tests and hosts that may initialize logging more than once.
pub fn try_init() {
    let _ = env_logger::try_init();
}
