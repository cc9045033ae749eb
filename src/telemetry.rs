//! Process-wide `tracing` subscriber setup.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Builds the event filter.
///
/// `RUST_LOG` wins when set and valid; otherwise `fallback` applies, and an
/// invalid fallback degrades to `info`.
#[must_use]
pub fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs a formatting subscriber as the global default.
///
/// # Errors
///
/// Returns [`TryInitError`] when a global subscriber is already installed.
pub fn init(fallback: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter(fallback))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}
