//! Tracing setup for the binary
//!
//! Logs go to stderr so that generated passwords are the only thing on stdout.
//! Filtering follows `RUST_LOG`, defaulting to `info`.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Install the global subscriber. Call once at startup.
pub fn setup_tracing() {
    Registry::default().with(console_layer()).init();
    tracing::debug!("Tracing initialized");
}

fn console_layer() -> Box<dyn Layer<Registry> + Send + Sync + 'static> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter)
        .boxed()
}
