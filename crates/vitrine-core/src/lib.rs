//! # vitrine-core
//!
//! Core primitives shared by the vitrine catalog service crates.
//!
//! - **Identifiers**: Strongly-typed category and product ids
//! - **Path segments**: Names that are safe to join into filesystem paths and URLs
//! - **Error Types**: Shared error definitions and result types
//! - **Observability**: Logging initialization and span helpers
//!
//! ## Example
//!
//! ```rust
//! use vitrine_core::prelude::*;
//!
//! let category = PathSegment::new("fruits").unwrap();
//! assert_eq!(category.as_str(), "fruits");
//! assert_eq!(ProductId::new(3).get(), 3);
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod id;
pub mod observability;
pub mod segment;

pub use error::{Error, Result};
pub use id::{CategoryId, ProductId};
pub use segment::PathSegment;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::id::{CategoryId, ProductId};
    pub use crate::observability::{LogFormat, catalog_span, init_logging};
    pub use crate::segment::PathSegment;
}
