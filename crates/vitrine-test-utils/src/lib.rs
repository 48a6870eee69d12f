//! Shared test utilities for vitrine integration tests.
//!
//! This crate provides:
//! - [`CatalogFixture`]: A resource tree in a temporary directory
//! - [`ProductSpec`]: Builder for product detail records
//! - Custom assertion helpers for snapshots
//!
//! # Example
//!
//! ```rust
//! use vitrine_test_utils::{CatalogFixture, ProductSpec};
//!
//! let catalog = CatalogFixture::new()
//!     .category("fruits", &[ProductSpec::new("apple").image("a.jpg")])
//!     .write();
//! assert!(catalog.root().join("resources.yml").exists());
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
// Test utilities use expect/unwrap for cleaner test code - panics are acceptable in tests
#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::missing_panics_doc)]

pub mod assertions;
pub mod fixtures;

pub use assertions::*;
pub use fixtures::*;

/// Initialize test logging (call once per test module).
pub fn init_test_logging() {
    use tracing_subscriber::{EnvFilter, fmt};

    let _ = fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("vitrine=debug".parse().expect("valid directive")),
        )
        .with_test_writer()
        .try_init();
}
