//! Custom assertion helpers for integration tests.

use std::collections::HashSet;

use vitrine_catalog::CatalogSnapshot;
use vitrine_core::ProductId;

/// Asserts the structural invariants every built snapshot must satisfy.
///
/// - Category ids are `0..n` in order.
/// - Product ids are `0..m` in traversal order, with no gaps or repeats.
/// - Every product's `category_id` matches the category listing it.
/// - The product index holds exactly one entry per product, pointing at the
///   listing category.
///
/// # Panics
///
/// Panics if any invariant does not hold.
pub fn assert_snapshot_consistent(snapshot: &CatalogSnapshot) {
    let mut expected_product = 0_u64;
    let mut seen = HashSet::new();

    for (position, category) in snapshot.categories().iter().enumerate() {
        assert_eq!(
            category.id.get(),
            position as u64,
            "Expected category {:?} at position {position}, but id was {}",
            category.name,
            category.id
        );

        for product in snapshot.products_in(category.id) {
            assert_eq!(
                product.id,
                ProductId::new(expected_product),
                "Expected product {:?} to have id {expected_product}",
                product.name
            );
            assert_eq!(
                product.category_id, category.id,
                "Product {} lists category {}, but is listed under {}",
                product.id, product.category_id, category.id
            );
            assert_eq!(
                snapshot.category_of(product.id),
                Some(category.id),
                "Product index entry for {} is wrong",
                product.id
            );
            assert!(seen.insert(product.id), "Duplicate product id {}", product.id);
            expected_product += 1;
        }
    }

    assert_eq!(
        snapshot.product_index().len(),
        seen.len(),
        "Product index has entries for products no category lists"
    );
    assert_eq!(snapshot.product_count(), seen.len());
}

/// Asserts the snapshot lists exactly these category names, in order.
///
/// # Panics
///
/// Panics if the names differ.
pub fn assert_category_names(snapshot: &CatalogSnapshot, expected: &[&str]) {
    let actual: Vec<&str> = snapshot
        .categories()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(actual, expected, "Unexpected category names");
}
