//! Immutable, query-ready materialization of the catalog.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use vitrine_core::{CategoryId, ProductId};

use crate::model::{Category, Product};

/// One complete, immutable in-memory catalog.
///
/// Constructed in a single pass by [`CatalogBuilder`](crate::CatalogBuilder)
/// and never mutated after it is published to the
/// [`CatalogStore`](crate::CatalogStore).
///
/// Invariants upheld by the builder:
/// - every product's `category_id` names a category in `categories`
/// - `product_index` maps exactly the ids of all products to their category
/// - product ids are `0..N` in traversal order; category ids are `0..C`
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    categories: Vec<Category>,
    products_by_category: HashMap<CategoryId, Vec<Product>>,
    product_index: HashMap<ProductId, CategoryId>,
    built_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    pub(crate) fn new(
        categories: Vec<Category>,
        products_by_category: HashMap<CategoryId, Vec<Product>>,
        product_index: HashMap<ProductId, CategoryId>,
    ) -> Self {
        Self {
            categories,
            products_by_category,
            product_index,
            built_at: Utc::now(),
        }
    }

    /// A catalog with no categories.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new(), HashMap::new(), HashMap::new())
    }

    /// Categories in manifest order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Products of a category in manifest order; empty for unknown ids.
    #[must_use]
    pub fn products_in(&self, category_id: CategoryId) -> &[Product] {
        self.products_by_category
            .get(&category_id)
            .map_or(&[], Vec::as_slice)
    }

    /// Resolves a product id to its category through the inverse index.
    #[must_use]
    pub fn category_of(&self, product_id: ProductId) -> Option<CategoryId> {
        self.product_index.get(&product_id).copied()
    }

    /// Per-category product lists.
    #[must_use]
    pub fn products_by_category(&self) -> &HashMap<CategoryId, Vec<Product>> {
        &self.products_by_category
    }

    /// Inverse index from product id to category id.
    #[must_use]
    pub fn product_index(&self) -> &HashMap<ProductId, CategoryId> {
        &self.product_index
    }

    /// All products, category by category in manifest order.
    pub fn products(&self) -> impl Iterator<Item = &Product> + '_ {
        self.categories
            .iter()
            .flat_map(|category| self.products_in(category.id))
    }

    /// Number of categories.
    #[must_use]
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Number of products across all categories.
    #[must_use]
    pub fn product_count(&self) -> usize {
        self.product_index.len()
    }

    /// When the build that produced this snapshot finished.
    #[must_use]
    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }
}

impl Default for CatalogSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}
