//! Benchmarks for catalog build and lookup operations.
//!
//! Lookups run against a published snapshot and must not depend on catalog
//! size; builds scale with the number of records read.

#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use vitrine_catalog::prelude::*;
use vitrine_catalog::source::ProductDetail;
use vitrine_core::{CategoryId, PathSegment, ProductId};

fn detail(name: &str) -> ProductDetail {
    ProductDetail {
        name: name.to_string(),
        description: format!("{name} for benchmarking"),
        code: 1,
        quantity: 10,
        price: 9.99,
        discount: false,
        disprice: 0.0,
        images: vec![PathSegment::new("front.jpg").expect("valid segment")],
    }
}

fn setup_source(categories: usize, products_per_category: usize) -> MemoryCatalogSource {
    let mut source = MemoryCatalogSource::new();
    for c in 0..categories {
        let category = format!("category-{c:04}");
        source = source.with_category(&category);
        for p in 0..products_per_category {
            let product = format!("product-{p:04}");
            source = source.with_product(&category, &product, detail(&product));
        }
    }
    source
}

fn catalog_lookup_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_lookup");

    // Benchmark: build with varying sizes
    for categories in [1, 10, 50] {
        group.bench_with_input(
            BenchmarkId::new("build", categories),
            &categories,
            |b, &categories| {
                let source = setup_source(categories, 20);
                b.iter(|| black_box(CatalogBuilder::new(&source).build()));
            },
        );
    }

    let source = setup_source(50, 20);
    let snapshot = CatalogBuilder::new(&source)
        .build()
        .expect("build benchmark catalog");

    group.bench_function("list_categories", |b| {
        b.iter(|| black_box(list_categories(&snapshot).len()));
    });

    group.bench_function("list_products", |b| {
        b.iter(|| black_box(list_products(&snapshot, CategoryId::new(25)).len()));
    });

    group.bench_function("get_product", |b| {
        b.iter(|| black_box(get_product(&snapshot, ProductId::new(517)).is_ok()));
    });

    group.finish();
}

criterion_group!(benches, catalog_lookup_benchmark);
criterion_main!(benches);
