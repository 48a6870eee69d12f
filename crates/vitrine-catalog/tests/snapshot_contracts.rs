//! Snapshot contract tests against on-disk resource trees.
//!
//! # Invariants Tested
//!
//! 1. Category ids follow manifest order; product ids are global across categories
//! 2. Every product is reachable through the product index
//! 3. Image paths are built from directory names under the static prefix
//! 4. Any unreadable record aborts the build

use std::sync::Arc;

use anyhow::{Context, Result};
use vitrine_catalog::prelude::*;
use vitrine_catalog::SourceReadErrorKind;
use vitrine_core::{CategoryId, ProductId};
use vitrine_test_utils::{
    CatalogFixture, ProductSpec, assert_category_names, assert_snapshot_consistent,
    init_test_logging,
};

fn build(root: &std::path::Path) -> std::result::Result<CatalogSnapshot, SourceReadError> {
    let source = FsCatalogSource::new(root);
    CatalogBuilder::new(&source).build()
}

#[test]
fn contract_fruits_and_veggies() -> Result<()> {
    init_test_logging();
    let catalog = CatalogFixture::fruits_and_veggies().write();
    let snapshot = build(catalog.root()).context("build fixture")?;

    assert_snapshot_consistent(&snapshot);
    assert_category_names(&snapshot, &["fruits", "veggies"]);

    let veggies = list_products(&snapshot, CategoryId::new(1));
    assert_eq!(veggies.len(), 1);
    assert_eq!(veggies[0].id, ProductId::new(2));
    assert_eq!(veggies[0].name, "Carrot");

    let pear = get_product(&snapshot, ProductId::new(1)).context("pear")?;
    assert_eq!(pear.category_id, CategoryId::new(0));
    assert!(pear.has_discount);
    assert!((pear.discount_price - 1.5).abs() < f64::EPSILON);
    assert!(pear.images.is_empty());

    assert!(list_products(&snapshot, CategoryId::new(7)).is_empty());
    assert!(matches!(
        get_product(&snapshot, ProductId::new(3)),
        Err(CatalogError::NotFound { .. })
    ));
    Ok(())
}

#[test]
fn contract_image_paths_use_directory_names() -> Result<()> {
    let catalog = CatalogFixture::new()
        .category(
            "fruits",
            &[ProductSpec::new("green-apple")
                .name("Granny Smith")
                .image("side.jpg")
                .image("top.jpg")],
        )
        .write();
    let snapshot = build(catalog.root())?;

    let product = get_product(&snapshot, ProductId::new(0))?;
    let paths: Vec<&str> = product.images.iter().map(|i| i.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "/resources/categories/fruits/products/green-apple/images/side.jpg",
            "/resources/categories/fruits/products/green-apple/images/top.jpg",
        ]
    );
    Ok(())
}

#[test]
fn contract_ids_are_dense_across_many_categories() -> Result<()> {
    let mut fixture = CatalogFixture::new();
    for c in 0..5 {
        let products: Vec<ProductSpec> =
            (0..c).map(|p| ProductSpec::new(format!("p{c}-{p}"))).collect();
        fixture = fixture.category(format!("cat{c}"), &products);
    }
    let catalog = fixture.write();
    let snapshot = build(catalog.root())?;

    assert_snapshot_consistent(&snapshot);
    assert_eq!(snapshot.category_count(), 5);
    assert_eq!(snapshot.product_count(), 10);
    assert!(list_products(&snapshot, CategoryId::new(0)).is_empty());
    Ok(())
}

#[test]
fn contract_empty_catalog_builds() -> Result<()> {
    let catalog = CatalogFixture::new().write();
    let snapshot = build(catalog.root())?;

    assert!(list_categories(&snapshot).is_empty());
    assert!(snapshot.product_index().is_empty());
    assert!(get_product(&snapshot, ProductId::new(0)).is_err());
    Ok(())
}

#[test]
fn contract_missing_detail_aborts_build() {
    let catalog = CatalogFixture::fruits_and_veggies().write();
    catalog.remove("categories/veggies/products/carrot/details.yml");

    let err = build(catalog.root()).unwrap_err();
    assert!(matches!(err.kind, SourceReadErrorKind::Missing));
    assert_eq!(err.location.category.as_deref(), Some("veggies"));
    assert_eq!(err.location.product.as_deref(), Some("carrot"));
}

#[test]
fn contract_malformed_manifest_aborts_build() {
    let catalog = CatalogFixture::fruits_and_veggies().write();
    catalog.overwrite("categories/fruits/products.yml", "products: {not: a list}\n");

    let err = build(catalog.root()).unwrap_err();
    assert!(matches!(err.kind, SourceReadErrorKind::Malformed(_)));
}

#[test]
fn contract_traversal_names_are_rejected() {
    let catalog = CatalogFixture::new().write();
    catalog.overwrite("resources.yml", "categories:\n  - ../etc\n");

    let err = build(catalog.root()).unwrap_err();
    assert!(matches!(err.kind, SourceReadErrorKind::InvalidSegment { .. }));
}

#[test]
fn contract_source_describes_its_root() {
    let catalog = CatalogFixture::new().write();
    let source: Arc<dyn CatalogSource> = Arc::new(FsCatalogSource::new(catalog.root()));
    assert!(source.describe().contains(&*catalog.root().to_string_lossy()));
}
