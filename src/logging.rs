//! Tracing subscriber setup for binaries and tests embedding the crate

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a global fmt subscriber
///
/// `RUST_LOG` takes precedence over `default_filter`. Returns `false` when a
/// global subscriber was already installed, so calling this more than once is
/// harmless.
pub fn init_tracing(default_filter: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
