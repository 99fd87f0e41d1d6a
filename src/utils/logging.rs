//! Structured logging setup.
//!
//! Maps the configuration's `debug_enabled` flag onto a `tracing`
//! subscriber, mirroring the debug/info switch the appliance tooling
//! exposes.

use tracing::level_filters::LevelFilter;

/// Install a process-wide fmt subscriber.
///
/// `debug` selects DEBUG as the maximum level, otherwise INFO. Safe to
/// call more than once; later calls are ignored.
pub fn init(debug: bool) {
    let level = if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}
