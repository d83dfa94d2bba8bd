//! Logging setup for the Vitrine toolkit
//!
//! Thin wrapper around `tracing-subscriber`; call [`init`] once at startup.
//! Verbosity is controlled through `RUST_LOG` (e.g.
//! `RUST_LOG=vitrine_renderer=debug`).

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging system.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
    tracing::debug!("logging initialized");
}
