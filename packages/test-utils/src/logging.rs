//! Tracing configuration for tests

use std::sync::Once;

static INIT: Once = Once::new();

const DEFAULT_FILTER: &str = "info,solana_runtime=warn,solana_rbpf=warn,tarpc=off";

/// Initialize tracing for tests
///
/// `RUST_LOG` overrides the default filter. Safe to call from every test;
/// only the first call installs the subscriber.
pub fn init_test_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));

        // try_init: another harness in the same binary may already own the global subscriber
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
