//! Logging to stderr.

use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, prelude::*};

pub const DEFAULT_FILTER: &str = "error,dashboard=debug,payloads=debug";

/// Initialize logging. `RUST_LOG` takes precedence over `default_filter`.
///
/// Safe to call more than once; only the first call installs anything.
pub fn init_logging(default_filter: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_line_number(true)
        .with_target(true);

    let _ = LogTracer::init();
    if tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .is_ok()
    {
        tracing::info!("Initialized logs");
    }
}
