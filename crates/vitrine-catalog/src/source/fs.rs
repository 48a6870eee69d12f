//! Filesystem-backed catalog source.
//!
//! Reads the YAML manifests and detail records laid out as described in
//! [`crate::layout`].

use std::path::PathBuf;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use vitrine_core::PathSegment;

use super::{CatalogSource, CategoryEntry, ProductDetail, ProductEntry, validate_segment};
use crate::error::{SourceLocation, SourceReadError, SourceReadErrorKind};
use crate::layout::CatalogLayout;

#[derive(Debug, Default, Deserialize)]
struct CategoriesManifest {
    #[serde(default)]
    categories: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ProductsManifest {
    #[serde(default)]
    products: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DetailRecord {
    name: String,
    description: String,
    code: i64,
    quantity: i64,
    price: f64,
    discount: bool,
    disprice: f64,
    images: Vec<String>,
}

/// Catalog source reading a resource tree on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsCatalogSource {
    layout: CatalogLayout,
}

impl FsCatalogSource {
    /// Creates a source rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            layout: CatalogLayout::new(root),
        }
    }

    /// Returns the tree layout.
    #[must_use]
    pub fn layout(&self) -> &CatalogLayout {
        &self.layout
    }
}

fn read_file(location: &SourceLocation) -> Result<String, SourceReadError> {
    std::fs::read_to_string(&location.file)
        .map_err(|err| SourceReadError::new(location.clone(), err))
}

fn decode<T: DeserializeOwned>(
    content: &str,
    location: &SourceLocation,
) -> Result<T, SourceReadError> {
    serde_yaml::from_str(content)
        .map_err(|err| SourceReadError::new(location.clone(), SourceReadErrorKind::Malformed(err)))
}

/// Reads a manifest. An empty document lists nothing.
fn read_manifest<T: DeserializeOwned + Default>(
    location: &SourceLocation,
) -> Result<T, SourceReadError> {
    let content = read_file(location)?;
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    decode(&content, location)
}

impl CatalogSource for FsCatalogSource {
    fn read_categories(&self) -> Result<Vec<CategoryEntry>, SourceReadError> {
        let location = SourceLocation::file(self.layout.categories_manifest());
        let manifest: CategoriesManifest = read_manifest(&location)?;

        manifest
            .categories
            .iter()
            .map(|name| {
                let location = location.clone().in_category(name.as_str());
                validate_segment(name, &location).map(|name| CategoryEntry { name })
            })
            .collect()
    }

    fn read_product_names(
        &self,
        category: &PathSegment,
    ) -> Result<Vec<ProductEntry>, SourceReadError> {
        let location = SourceLocation::file(self.layout.products_manifest(category))
            .in_category(category.as_str());
        let manifest: ProductsManifest = read_manifest(&location)?;

        manifest
            .products
            .iter()
            .map(|name| {
                let location = location.clone().in_product(name.as_str());
                validate_segment(name, &location).map(|name| ProductEntry { name })
            })
            .collect()
    }

    fn read_product_detail(
        &self,
        category: &PathSegment,
        product: &PathSegment,
    ) -> Result<ProductDetail, SourceReadError> {
        let location = SourceLocation::file(self.layout.product_details(category, product))
            .in_category(category.as_str())
            .in_product(product.as_str());

        let record: DetailRecord = decode(&read_file(&location)?, &location)?;

        let images = record
            .images
            .iter()
            .map(|image| validate_segment(image, &location))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ProductDetail {
            name: record.name,
            description: record.description,
            code: record.code,
            quantity: record.quantity,
            price: record.price,
            discount: record.discount,
            disprice: record.disprice,
            images,
        })
    }

    fn describe(&self) -> String {
        self.layout.root().display().to_string()
    }
}
