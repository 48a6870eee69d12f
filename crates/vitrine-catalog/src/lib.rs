//! # vitrine-catalog
//!
//! The catalog domain for the vitrine service: reading the on-disk catalog,
//! building immutable snapshots, publishing them and answering queries.
//!
//! ## Architecture
//!
//! - **Source**: [`CatalogSource`] reads manifests and detail records. The
//!   filesystem implementation walks a resources tree; an in-memory one
//!   backs tests.
//! - **Builder**: [`CatalogBuilder`] turns a source into a
//!   [`CatalogSnapshot`] in a single pass, assigning category and product ids.
//! - **Store**: [`CatalogStore`] holds the live snapshot and swaps it
//!   atomically. Readers never observe a partial catalog.
//! - **Service**: [`CatalogService`] ties the three together and serializes
//!   reloads.
//!
//! ## Storage Layout
//!
//! ```text
//! {resources}/
//! ├── resources.yml                     # categories: [fruits, veggies]
//! └── categories/
//!     └── {category}/
//!         ├── products.yml              # products: [apple, pear]
//!         └── products/
//!             └── {product}/
//!                 ├── details.yml       # name, description, code, qty, ...
//!                 └── images/{file}
//! ```
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use vitrine_catalog::prelude::*;
//!
//! let source = MemoryCatalogSource::new().with_category("fruits");
//! let service = CatalogService::bootstrap(Arc::new(source))?;
//!
//! let snapshot = service.snapshot();
//! assert_eq!(list_categories(&snapshot)[0].name, "fruits");
//! # Ok::<(), vitrine_catalog::SourceReadError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod builder;
pub mod check;
pub mod error;
pub mod layout;
pub mod metrics;
pub mod model;
pub mod query;
pub mod service;
pub mod snapshot;
pub mod source;
pub mod store;

// Re-export main types at crate root
pub use builder::CatalogBuilder;
pub use check::{CheckReport, check_catalog};
pub use error::{CatalogError, Result, SourceLocation, SourceReadError, SourceReadErrorKind};
pub use layout::CatalogLayout;
pub use model::{Category, Image, Product};
pub use service::{BuildSummary, CatalogService};
pub use snapshot::CatalogSnapshot;
pub use source::{CatalogSource, FsCatalogSource, MemoryCatalogSource};
pub use store::{CatalogStore, Published};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::builder::CatalogBuilder;
    pub use crate::error::{CatalogError, SourceReadError};
    pub use crate::model::{Category, Image, Product};
    pub use crate::query::{get_product, list_categories, list_products};
    pub use crate::service::{BuildSummary, CatalogService};
    pub use crate::snapshot::CatalogSnapshot;
    pub use crate::source::{CatalogSource, FsCatalogSource, MemoryCatalogSource};
    pub use crate::store::CatalogStore;
}
