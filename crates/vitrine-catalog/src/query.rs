//! Read-side queries against a catalog snapshot.
//!
//! All functions are pure lookups on an immutable snapshot; callers fetch the
//! snapshot from the store once per request so a request never straddles a
//! reload.

use vitrine_core::{CategoryId, ProductId};

use crate::error::{CatalogError, Result};
use crate::model::{Category, Product};
use crate::snapshot::CatalogSnapshot;

/// Lists all categories in manifest order.
#[must_use]
pub fn list_categories(snapshot: &CatalogSnapshot) -> &[Category] {
    snapshot.categories()
}

/// Lists the products of a category in manifest order.
///
/// An unknown category has no products; this is not an error.
#[must_use]
pub fn list_products(snapshot: &CatalogSnapshot, category_id: CategoryId) -> &[Product] {
    snapshot.products_in(category_id)
}

/// Looks up a product by id.
///
/// # Errors
///
/// Returns [`CatalogError::NotFound`] if no product has this id.
pub fn get_product(snapshot: &CatalogSnapshot, product_id: ProductId) -> Result<&Product> {
    let Some(category_id) = snapshot.category_of(product_id) else {
        tracing::debug!(product_id = %product_id, "Product id not in index");
        return Err(CatalogError::not_found("product", product_id));
    };

    snapshot
        .products_in(category_id)
        .iter()
        .find(|product| product.id == product_id)
        .ok_or_else(|| {
            tracing::warn!(
                product_id = %product_id,
                category_id = %category_id,
                "Product index points at a category that does not list the product"
            );
            CatalogError::not_found("product", product_id)
        })
}
