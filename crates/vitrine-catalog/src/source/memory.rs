//! In-memory catalog source for testing and benchmarks.
//!
//! ## Limitations
//!
//! - **NOT suitable for production**: Records live only in process memory
//! - Names are validated when added, so an invalid name panics at setup
//!   time instead of surfacing as a [`SourceReadError`]

use std::collections::HashMap;

use vitrine_core::PathSegment;

use super::{CatalogSource, CategoryEntry, ProductDetail, ProductEntry};
use crate::error::{SourceLocation, SourceReadError, SourceReadErrorKind};
use crate::layout::CatalogLayout;

const MEMORY_ROOT: &str = "memory:";

/// In-memory catalog source.
///
/// A category added without products has an empty products manifest. A
/// product listed without a detail record reads as a missing file.
///
/// ## Example
///
/// ```rust
/// use vitrine_catalog::source::{CatalogSource, MemoryCatalogSource};
///
/// let source = MemoryCatalogSource::new()
///     .with_category("fruits")
///     .with_category("veggies");
/// assert_eq!(source.read_categories().unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalogSource {
    categories: Vec<PathSegment>,
    products: HashMap<PathSegment, Vec<PathSegment>>,
    details: HashMap<(PathSegment, PathSegment), ProductDetail>,
}

fn segment(name: &str) -> PathSegment {
    PathSegment::new(name).unwrap_or_else(|err| panic!("invalid test fixture name: {err}"))
}

impl MemoryCatalogSource {
    /// Creates an empty source (a categories manifest listing nothing).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a category to the categories manifest.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a valid path segment.
    #[must_use]
    pub fn with_category(mut self, name: &str) -> Self {
        let name = segment(name);
        self.products.entry(name.clone()).or_default();
        self.categories.push(name);
        self
    }

    /// Appends a product to `category`'s manifest and stores its detail record.
    ///
    /// # Panics
    ///
    /// Panics if either name is not a valid path segment.
    #[must_use]
    pub fn with_product(mut self, category: &str, product: &str, detail: ProductDetail) -> Self {
        let (category, product) = (segment(category), segment(product));
        self.products
            .entry(category.clone())
            .or_default()
            .push(product.clone());
        self.details.insert((category, product), detail);
        self
    }

    /// Lists a product in `category`'s manifest without a detail record.
    ///
    /// # Panics
    ///
    /// Panics if either name is not a valid path segment.
    #[must_use]
    pub fn with_listed_product(mut self, category: &str, product: &str) -> Self {
        self.products
            .entry(segment(category))
            .or_default()
            .push(segment(product));
        self
    }

    fn layout() -> CatalogLayout {
        CatalogLayout::new(MEMORY_ROOT)
    }
}

impl CatalogSource for MemoryCatalogSource {
    fn read_categories(&self) -> Result<Vec<CategoryEntry>, SourceReadError> {
        Ok(self
            .categories
            .iter()
            .map(|name| CategoryEntry { name: name.clone() })
            .collect())
    }

    fn read_product_names(
        &self,
        category: &PathSegment,
    ) -> Result<Vec<ProductEntry>, SourceReadError> {
        let Some(products) = self.products.get(category) else {
            return Err(SourceReadError::new(
                SourceLocation::file(Self::layout().products_manifest(category))
                    .in_category(category.as_str()),
                SourceReadErrorKind::Missing,
            ));
        };

        Ok(products
            .iter()
            .map(|name| ProductEntry { name: name.clone() })
            .collect())
    }

    fn read_product_detail(
        &self,
        category: &PathSegment,
        product: &PathSegment,
    ) -> Result<ProductDetail, SourceReadError> {
        self.details
            .get(&(category.clone(), product.clone()))
            .cloned()
            .ok_or_else(|| {
                SourceReadError::new(
                    SourceLocation::file(Self::layout().product_details(category, product))
                        .in_category(category.as_str())
                        .in_product(product.as_str()),
                    SourceReadErrorKind::Missing,
                )
            })
    }

    fn describe(&self) -> String {
        MEMORY_ROOT.to_string()
    }
}
