//! Process-wide `env_logger` setup for the library and the `trend_report` binary

use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

/// Install the logger on first call; later calls keep the first level.
///
/// `level` applies to this crate and the binary, everything else logs warnings
/// only. `RUST_LOG` directives are applied on top.
pub fn initialize_logger(level: LevelFilter) {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();

        builder
            .filter_level(LevelFilter::Warn)
            .filter_module("fx_trend", level)
            .filter_module("trend_report", level)
            .format_timestamp_millis()
            .parse_default_env();

        // A test harness or embedding program may own the global logger
        if builder.try_init().is_err() {
            log::debug!("logger already installed, keeping it");
        }
    });
}
