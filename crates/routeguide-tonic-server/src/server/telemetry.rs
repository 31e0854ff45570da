//! Logging setup.
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` (driven by
//! `RUST_LOG`, defaulting to `info`) and a fmt layer. Spans created with
//! `tracing::instrument` on the handlers show up here; there is no remote
//! telemetry backend.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initializes the global tracing subscriber.
///
/// # Errors
///
/// Fails if a global subscriber has already been installed.
pub fn init_telemetry() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    Ok(())
}
