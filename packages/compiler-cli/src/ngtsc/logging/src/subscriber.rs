// Tracing Subscriber
//
// Installs the process-wide `tracing` subscriber used by the binaries.

use super::logger::LogLevel;
use std::sync::Once;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Filter for `level`, unless `RUST_LOG` says otherwise.
pub fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter()))
}

/// Send log output to stderr at `level` and above.
///
/// Only the first call has an effect. A subscriber installed by someone
/// else is left in place.
pub fn init_tracing(level: LogLevel) {
    TRACING_INIT.call_once(|| {
        let installed = tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(env_filter(level))
            .try_init();
        if installed.is_ok() {
            tracing::debug!(%level, "tracing initialized");
        }
    });
}
