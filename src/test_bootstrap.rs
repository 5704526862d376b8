//! One-time logging bootstrap for the unit-test binary.
//!
//! Runs before any test; honors `RUST_LOG` and stays quiet by default.

use ctor::ctor;

#[ctor]
fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}
