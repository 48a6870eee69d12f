//! Catalog source readers.
//!
//! A [`CatalogSource`] turns a hierarchical resource store into raw,
//! strongly-typed records. It performs no id assignment and no
//! cross-referencing; that is the builder's job.
//!
//! Reads are synchronous: sources are local and bounded by catalog size, and
//! builds run on a blocking thread so readers of the live snapshot are never
//! stalled behind file I/O.

pub mod fs;
pub mod memory;

use vitrine_core::PathSegment;

use crate::error::SourceReadError;

pub use fs::FsCatalogSource;
pub use memory::MemoryCatalogSource;

/// Entry of the categories manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    /// Category name, validated as a single path segment.
    pub name: PathSegment,
}

/// Entry of a per-category products manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductEntry {
    /// Product name, validated as a single path segment.
    pub name: PathSegment,
}

/// A fully decoded product detail record.
///
/// Every field is required in the source; none is defaulted.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetail {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Merchant product code.
    pub code: i64,
    /// Units in stock.
    pub quantity: i64,
    /// Regular price.
    pub price: f64,
    /// Whether the discount price applies.
    pub discount: bool,
    /// Discounted price.
    pub disprice: f64,
    /// Image file names inside the product's image directory.
    pub images: Vec<PathSegment>,
}

/// Reader for a hierarchical catalog resource store.
pub trait CatalogSource: Send + Sync + 'static {
    /// Reads the categories manifest, in display order.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceReadError`] if the manifest is missing or malformed,
    /// or lists a name that is not a safe path segment.
    fn read_categories(&self) -> Result<Vec<CategoryEntry>, SourceReadError>;

    /// Reads the product names listed for `category`, in display order.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceReadError`] if the manifest is missing or malformed,
    /// or lists a name that is not a safe path segment.
    fn read_product_names(
        &self,
        category: &PathSegment,
    ) -> Result<Vec<ProductEntry>, SourceReadError>;

    /// Reads the detail record of `product` in `category`.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceReadError`] if the record is missing, a field is
    /// missing or mistyped, or an image name is not a safe path segment.
    fn read_product_detail(
        &self,
        category: &PathSegment,
        product: &PathSegment,
    ) -> Result<ProductDetail, SourceReadError>;

    /// Human-readable description of where records come from, for logs.
    fn describe(&self) -> String;
}

/// Validates a name read from `location` as a path segment.
pub(crate) fn validate_segment(
    name: &str,
    location: &crate::error::SourceLocation,
) -> Result<PathSegment, SourceReadError> {
    use crate::error::SourceReadErrorKind;

    PathSegment::new(name).map_err(|err| {
        let kind = match err {
            vitrine_core::Error::InvalidSegment { segment, reason } => {
                SourceReadErrorKind::InvalidSegment { segment, reason }
            }
            _ => SourceReadErrorKind::InvalidSegment {
                segment: name.to_string(),
                reason: "not a valid path segment",
            },
        };
        SourceReadError::new(location.clone(), kind)
    })
}
