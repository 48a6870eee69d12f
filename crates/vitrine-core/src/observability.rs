//! Observability infrastructure for vitrine.
//!
//! Structured logging with consistent spans. This module provides
//! initialization helpers and span constructors shared by the catalog
//! and API crates.

use std::sync::Once;
use tracing::Span;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON structured logs (for production).
    Json,
    /// Pretty-printed logs (for development).
    #[default]
    Pretty,
}

/// Initializes the logging subsystem.
///
/// Call once at application startup. Safe to call multiple times;
/// subsequent calls are no-ops.
///
/// # Environment Variables
///
/// - `RUST_LOG`: Controls log levels (e.g., `info`, `vitrine_catalog=debug`)
pub fn init_logging(format: LogFormat) {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        match format {
            LogFormat::Json => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().json())
                    .init();
            }
            LogFormat::Pretty => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().pretty())
                    .init();
            }
        }
    });
}

/// Creates a span for catalog operations (build, reload, publish).
///
/// # Example
///
/// ```rust
/// use vitrine_core::observability::catalog_span;
///
/// let span = catalog_span("build", "./resources");
/// let _guard = span.enter();
/// // ... read the catalog tree
/// ```
#[must_use]
pub fn catalog_span(operation: &str, root: &str) -> Span {
    tracing::info_span!("catalog", op = operation, root = root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_succeeds() {
        // Should not panic (uses Once internally)
        init_logging(LogFormat::Pretty);
        init_logging(LogFormat::Json);
    }

    #[test]
    fn test_catalog_span_creates_span() {
        let span = catalog_span("build", "/tmp/resources");
        let _guard = span.enter();
        tracing::info!("message in catalog span");
    }
}
