//! Process bootstrap for binaries consuming this crate.
//!
//! The library itself only emits `tracing` events; a consuming binary calls
//! [`init`] once at startup to load `.env` and install a formatted
//! subscriber filtered by `RUST_LOG`.

use anyhow::Result;

/// Load `.env` (ignored when absent) and install the tracing subscriber.
///
/// Returns an error if a global subscriber is already set.
pub fn init() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("channel_translator=info".parse()?),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))?;

    Ok(())
}
