//! Log output for the desktop front end.
//!
//! Everything goes to stderr so it ends up next to the native backend's own
//! logs. Notifications shown to the user are a separate channel; see
//! [`crate::contexts::toast`].

use tracing::Subscriber;
use tracing::subscriber::set_global_default;
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};

/// Log an error with its whole cause chain.
pub fn log_error(e: impl Into<anyhow::Error>) {
    let e: anyhow::Error = e.into();
    tracing::error!("{e:#}");
}

/// `RUST_LOG` wins over `env_filter` when it is set.
pub fn get_subscriber(env_filter: String) -> impl Subscriber + Sync + Send {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(env_filter));
    let stderr = fmt::Layer::new()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true);
    Registry::default().with(env_filter).with(stderr)
}

/// Register a subscriber as the global default, and route `log` records
/// into it.
///
/// Fails if a global subscriber or logger is already installed.
pub fn init_subscriber(
    subscriber: impl Subscriber + Sync + Send,
) -> anyhow::Result<()> {
    LogTracer::init()?;
    set_global_default(subscriber)?;
    tracing::debug!("initialized logging");
    Ok(())
}
