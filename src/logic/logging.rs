use tracing_subscriber::EnvFilter;

use crate::logic::config::Config;

// Set up the tracing subscriber. RUST_LOG wins over the configured filter.
// Calling this again, or after another subscriber is set, does nothing.
pub fn init(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_str()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
