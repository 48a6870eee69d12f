//! # vitrine-api
//!
//! HTTP composition layer for the vitrine product catalog.
//!
//! This crate is a **thin composition layer** with no domain policy. Catalog
//! loading, snapshots and reload coordination live in `vitrine-catalog`.
//!
//! ## Endpoints
//!
//! ```text
//! POST /list_categories                  - All categories
//! POST /list_products_by?category_id=N   - Products of one category
//! POST /show_product?product_id=N        - One product (404 if unknown)
//! GET  /rebuild_data/:secret_key         - Reload the catalog from disk
//! GET  /resources/*                      - Static files from the resource tree
//! GET  /health                           - Live snapshot summary
//! GET  /metrics                          - Prometheus metrics
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use vitrine_api::server::Server;
//! use vitrine_catalog::{CatalogService, FsCatalogSource};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let source = Arc::new(FsCatalogSource::new("./resources"));
//! let catalog = Arc::new(CatalogService::bootstrap(source)?);
//!
//! let server = Server::builder(catalog)
//!     .port(8080)
//!     .secret("change-me")
//!     .build();
//!
//! server.serve().await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod extract;
pub mod metrics;
pub mod routes;
pub mod server;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::server::{Server, ServerBuilder};
}
