//! Tracing setup

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Installs the global tracing subscriber.
///
/// Honors `RUST_LOG`; otherwise logs `subkeep` at info level. Safe to call more
/// than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("subkeep=info"));

        // A subscriber may already be installed by an embedding application.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
