pub mod config;
pub mod models;
pub mod pipeline;
pub mod repo;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for hosts that don't install their own subscriber.
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();
}
