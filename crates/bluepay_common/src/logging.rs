//! Logging utilities for the BluePay gateway bridge.
//!
//! Provides a standardized tracing setup used by the backend binary and by
//! integration tests.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber with the default level (INFO).
///
/// Call once at process start; repeated calls are harmless.
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
pub fn init_with_level(level: Level) {
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("bluepay={}", level).parse().unwrap());

    // try_init so a second call (e.g. from tests) is a no-op
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}
