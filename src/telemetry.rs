//! Diagnostic logging setup.
//!
//! CI-facing log lines go through [crate::github::ActionsPlatform]; this
//! subscriber only carries `tracing` diagnostics, on stderr so it never
//! mixes with workflow commands on stdout.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialise the global tracing subscriber.
///
/// Respects `RUST_LOG`; falls back to `level` when it is not set. Only the
/// first call takes effect.
pub fn init_tracing(level: Level) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init()
        .ok();
}
