//! Pre-built catalog fixtures for common test scenarios.
//!
//! Provides a builder that writes a resource tree into a temporary
//! directory, with sensible defaults for every detail field.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::TempDir;

use vitrine_catalog::layout::{
    CATEGORIES_DIR, CATEGORIES_MANIFEST, DETAILS_FILE, IMAGES_DIR, PRODUCTS_DIR,
    PRODUCTS_MANIFEST,
};

/// A product to be written into a fixture tree.
#[derive(Debug, Clone, Serialize)]
pub struct ProductSpec {
    #[serde(skip)]
    dir: String,
    name: String,
    description: String,
    code: i64,
    quantity: i64,
    price: f64,
    discount: bool,
    disprice: f64,
    images: Vec<String>,
}

impl ProductSpec {
    /// Creates a product whose directory name and display name are `dir`.
    pub fn new(dir: impl Into<String>) -> Self {
        let dir = dir.into();
        Self {
            name: dir.clone(),
            dir,
            description: String::new(),
            code: 1,
            quantity: 1,
            price: 1.0,
            discount: false,
            disprice: 0.0,
            images: Vec::new(),
        }
    }

    /// Sets the display name, leaving the directory name unchanged.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the product code.
    #[must_use]
    pub fn code(mut self, code: i64) -> Self {
        self.code = code;
        self
    }

    /// Sets the stock quantity.
    #[must_use]
    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Sets the price.
    #[must_use]
    pub fn price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    /// Marks the product as discounted at `disprice`.
    #[must_use]
    pub fn discounted(mut self, disprice: f64) -> Self {
        self.discount = true;
        self.disprice = disprice;
        self
    }

    /// Appends an image file name.
    #[must_use]
    pub fn image(mut self, file: impl Into<String>) -> Self {
        self.images.push(file.into());
        self
    }

    /// Returns the directory name.
    pub fn dir(&self) -> &str {
        &self.dir
    }
}

#[derive(Serialize)]
struct CategoriesManifest<'a> {
    categories: &'a [String],
}

#[derive(Serialize)]
struct ProductsManifest<'a> {
    products: Vec<&'a str>,
}

/// Builder for an on-disk resource tree.
#[derive(Debug, Default)]
pub struct CatalogFixture {
    categories: Vec<(String, Vec<ProductSpec>)>,
}

impl CatalogFixture {
    /// Creates an empty fixture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a category and its products, in manifest order.
    #[must_use]
    pub fn category(mut self, name: impl Into<String>, products: &[ProductSpec]) -> Self {
        self.categories.push((name.into(), products.to_vec()));
        self
    }

    /// The two-category catalog used across integration tests:
    /// `fruits` with `apple` and `pear`, `veggies` with `carrot`.
    pub fn fruits_and_veggies() -> Self {
        Self::new()
            .category(
                "fruits",
                &[
                    ProductSpec::new("apple")
                        .name("Apple")
                        .description("Crisp red apple")
                        .code(1001)
                        .quantity(40)
                        .price(1.5)
                        .image("a1.jpg"),
                    ProductSpec::new("pear")
                        .name("Pear")
                        .code(1002)
                        .quantity(12)
                        .price(2.0)
                        .discounted(1.5),
                ],
            )
            .category(
                "veggies",
                &[ProductSpec::new("carrot")
                    .name("Carrot")
                    .code(2001)
                    .quantity(100)
                    .price(0.5)
                    .image("c1.jpg")
                    .image("c2.jpg")],
            )
    }

    /// Writes the tree into a new temporary directory.
    pub fn write(&self) -> WrittenCatalog {
        let dir = tempfile::tempdir().expect("create temp dir");
        self.write_to(dir.path());
        WrittenCatalog { dir }
    }

    /// Writes the tree under `root`, replacing any manifests already there.
    pub fn write_to(&self, root: &Path) {
        let names: Vec<String> = self.categories.iter().map(|(name, _)| name.clone()).collect();
        write_yaml(
            &root.join(CATEGORIES_MANIFEST),
            &CategoriesManifest { categories: &names },
        );

        for (category, products) in &self.categories {
            let category_dir = root.join(CATEGORIES_DIR).join(category);
            write_yaml(
                &category_dir.join(PRODUCTS_MANIFEST),
                &ProductsManifest {
                    products: products.iter().map(ProductSpec::dir).collect(),
                },
            );

            for product in products {
                let product_dir = category_dir.join(PRODUCTS_DIR).join(&product.dir);
                write_yaml(&product_dir.join(DETAILS_FILE), product);
                for image in &product.images {
                    write_file(&product_dir.join(IMAGES_DIR).join(image), b"\x89PNG");
                }
            }
        }
    }
}

/// A fixture tree living in a temporary directory.
///
/// The directory is removed when this value is dropped.
#[derive(Debug)]
pub struct WrittenCatalog {
    dir: TempDir,
}

impl WrittenCatalog {
    /// Returns the resource root.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Returns the resource root as an owned path.
    pub fn root_buf(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Overwrites a file relative to the root, creating parents as needed.
    pub fn overwrite(&self, relative: impl AsRef<Path>, contents: &str) {
        write_file(&self.dir.path().join(relative), contents.as_bytes());
    }

    /// Removes a file relative to the root.
    pub fn remove(&self, relative: impl AsRef<Path>) {
        fs::remove_file(self.dir.path().join(relative)).expect("remove fixture file");
    }

    /// Replaces the tree contents with `fixture`.
    pub fn rewrite(&self, fixture: &CatalogFixture) {
        fixture.write_to(self.dir.path());
    }
}

fn write_yaml<T: Serialize>(path: &Path, value: &T) {
    let yaml = serde_yaml::to_string(value).expect("serialize fixture yaml");
    write_file(path, yaml.as_bytes());
}

fn write_file(path: &Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create fixture dirs");
    }
    fs::write(path, contents).expect("write fixture file");
}
