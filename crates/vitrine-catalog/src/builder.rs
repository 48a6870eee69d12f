//! Catalog builder: one pass from a [`CatalogSource`] to a [`CatalogSnapshot`].
//!
//! ## Algorithm
//!
//! 1. Read the categories manifest; category ids are manifest positions.
//! 2. For each category in order, read its products manifest and then each
//!    product's detail record, in order.
//! 3. Product ids come from a single counter shared by all categories, bumped
//!    once per product that is read successfully.
//!
//! Any [`SourceReadError`] aborts the whole build. Nothing partially built
//! escapes: the snapshot is only returned once every record has been read.

use std::collections::{HashMap, HashSet};

use vitrine_core::{CategoryId, PathSegment, ProductId};

use crate::error::SourceReadError;
use crate::layout::{DEFAULT_STATIC_PREFIX, image_url};
use crate::model::{Category, Image, Product};
use crate::snapshot::CatalogSnapshot;
use crate::source::{CatalogSource, ProductDetail};

/// Builds snapshots from a catalog source.
pub struct CatalogBuilder<'a> {
    source: &'a dyn CatalogSource,
    static_prefix: String,
}

impl std::fmt::Debug for CatalogBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogBuilder")
            .field("source", &self.source.describe())
            .field("static_prefix", &self.static_prefix)
            .finish()
    }
}

impl<'a> CatalogBuilder<'a> {
    /// Creates a builder reading from `source`, with images served under
    /// [`DEFAULT_STATIC_PREFIX`].
    #[must_use]
    pub fn new(source: &'a dyn CatalogSource) -> Self {
        Self {
            source,
            static_prefix: DEFAULT_STATIC_PREFIX.to_string(),
        }
    }

    /// Sets the URL prefix image paths are built under.
    #[must_use]
    pub fn with_static_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.static_prefix = prefix.into();
        self
    }

    /// Reads the whole source and assembles a snapshot.
    ///
    /// # Errors
    ///
    /// Returns the first [`SourceReadError`] encountered; no snapshot is
    /// produced in that case.
    pub fn build(&self) -> Result<CatalogSnapshot, SourceReadError> {
        self.build_visiting_images(|_, _, _| {})
    }

    /// Like [`CatalogBuilder::build`], calling `visit_image` with the
    /// category, product and file segments of every image as it is read.
    ///
    /// # Errors
    ///
    /// Returns the first [`SourceReadError`] encountered.
    pub fn build_visiting_images<F>(
        &self,
        mut visit_image: F,
    ) -> Result<CatalogSnapshot, SourceReadError>
    where
        F: FnMut(&PathSegment, &PathSegment, &PathSegment),
    {
        let entries = self.source.read_categories()?;

        let mut categories = Vec::with_capacity(entries.len());
        let mut products_by_category = HashMap::with_capacity(entries.len());
        // Allocated up front so an empty catalog still has a usable index.
        let mut product_index = HashMap::new();
        let mut seen_names = HashSet::with_capacity(entries.len());

        let mut category_id = CategoryId::new(0);
        let mut product_id = ProductId::new(0);

        for entry in entries {
            if !seen_names.insert(entry.name.clone()) {
                tracing::warn!(
                    category = %entry.name,
                    category_id = %category_id,
                    "Category listed more than once; each listing gets its own id"
                );
            }

            let names = self.source.read_product_names(&entry.name)?;
            let mut products = Vec::with_capacity(names.len());

            for product in names {
                let detail = self.source.read_product_detail(&entry.name, &product.name)?;
                for image in &detail.images {
                    visit_image(&entry.name, &product.name, image);
                }
                products.push(self.product(
                    product_id,
                    category_id,
                    &entry.name,
                    &product.name,
                    detail,
                ));
                product_index.insert(product_id, category_id);
                product_id = product_id.next();
            }

            tracing::debug!(
                category = %entry.name,
                category_id = %category_id,
                products = products.len(),
                "Category loaded"
            );

            products_by_category.insert(category_id, products);
            categories.push(Category {
                id: category_id,
                name: entry.name.into(),
            });
            category_id = category_id.next();
        }

        Ok(CatalogSnapshot::new(
            categories,
            products_by_category,
            product_index,
        ))
    }

    fn product(
        &self,
        id: ProductId,
        category_id: CategoryId,
        category: &PathSegment,
        product: &PathSegment,
        detail: ProductDetail,
    ) -> Product {
        let images = detail
            .images
            .iter()
            .map(|image| Image {
                path: image_url(&self.static_prefix, category, product, image),
            })
            .collect();

        Product {
            id,
            category_id,
            name: detail.name,
            description: detail.description,
            code: detail.code,
            quantity: detail.quantity,
            price: detail.price,
            has_discount: detail.discount,
            discount_price: detail.disprice,
            images,
        }
    }
}
