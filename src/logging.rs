//! Timestamped diagnostic logging (spec §1 external-collaborator contract).
//!
//! Grounded on the teacher's `src/logging.rs`: an `EnvFilter` (config/env
//! override, default `info`) feeding a `tracing-subscriber` `fmt` layer with
//! RFC3339 timestamps. The teacher's JSON-vs-text format switch and rolling
//! file appender are dropped here — this server has no `LoggingConfig`
//! surface in spec §3/§6, so logging is always text-to-stdout, matching
//! `original_source`'s `printf`-to-stdout diagnostics made structured.

use tracing_subscriber::{fmt::time::UtcTime, prelude::*};

/// Initialize the global `tracing` subscriber.
///
/// Respects `RUST_LOG` if set; otherwise defaults to `info`.
pub fn init() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_ansi(true)
            .with_timer(UtcTime::rfc_3339())
            .with_target(true)
            .with_writer(std::io::stdout),
    );

    let _ = registry.try_init();
}
