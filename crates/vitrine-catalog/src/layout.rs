//! Canonical layout of the on-disk resource tree.
//!
//! This module is the single place that knows file and directory names.
//! Both the filesystem reader and the image URL builder go through it.
//!
//! ```text
//! {root}/
//! ├── resources.yml                      # categories: [name, ...]
//! └── categories/
//!     └── {category}/
//!         ├── products.yml               # products: [name, ...]
//!         └── products/
//!             └── {product}/
//!                 ├── details.yml        # product detail record
//!                 └── images/
//!                     └── {image}
//! ```

use std::path::{Path, PathBuf};

use vitrine_core::PathSegment;

/// Categories manifest file name at the tree root.
pub const CATEGORIES_MANIFEST: &str = "resources.yml";
/// Directory holding one directory per category.
pub const CATEGORIES_DIR: &str = "categories";
/// Per-category manifest listing product names.
pub const PRODUCTS_MANIFEST: &str = "products.yml";
/// Directory holding one directory per product.
pub const PRODUCTS_DIR: &str = "products";
/// Per-product detail record.
pub const DETAILS_FILE: &str = "details.yml";
/// Per-product image directory.
pub const IMAGES_DIR: &str = "images";

/// URL prefix under which the resource tree is served.
pub const DEFAULT_STATIC_PREFIX: &str = "/resources";

/// Path builder rooted at a resource tree directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogLayout {
    root: PathBuf,
}

impl CatalogLayout {
    /// Creates a layout rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the tree root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `{root}/resources.yml`
    #[must_use]
    pub fn categories_manifest(&self) -> PathBuf {
        self.root.join(CATEGORIES_MANIFEST)
    }

    /// `{root}/categories/{category}`
    #[must_use]
    pub fn category_dir(&self, category: &PathSegment) -> PathBuf {
        self.root.join(CATEGORIES_DIR).join(category)
    }

    /// `{root}/categories/{category}/products.yml`
    #[must_use]
    pub fn products_manifest(&self, category: &PathSegment) -> PathBuf {
        self.category_dir(category).join(PRODUCTS_MANIFEST)
    }

    /// `{root}/categories/{category}/products/{product}`
    #[must_use]
    pub fn product_dir(&self, category: &PathSegment, product: &PathSegment) -> PathBuf {
        self.category_dir(category).join(PRODUCTS_DIR).join(product)
    }

    /// `{root}/categories/{category}/products/{product}/details.yml`
    #[must_use]
    pub fn product_details(&self, category: &PathSegment, product: &PathSegment) -> PathBuf {
        self.product_dir(category, product).join(DETAILS_FILE)
    }

    /// `{root}/categories/{category}/products/{product}/images/{image}`
    #[must_use]
    pub fn image_file(
        &self,
        category: &PathSegment,
        product: &PathSegment,
        image: &PathSegment,
    ) -> PathBuf {
        self.product_dir(category, product)
            .join(IMAGES_DIR)
            .join(image)
    }
}

/// Builds the servable URL path of a product image.
///
/// `{prefix}/categories/{category}/products/{product}/images/{image}`
#[must_use]
pub fn image_url(
    prefix: &str,
    category: &PathSegment,
    product: &PathSegment,
    image: &PathSegment,
) -> String {
    format!(
        "{}/{CATEGORIES_DIR}/{category}/{PRODUCTS_DIR}/{product}/{IMAGES_DIR}/{image}",
        prefix.trim_end_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(s: &str) -> PathSegment {
        PathSegment::new(s).unwrap()
    }

    #[test]
    fn file_paths_follow_layout() {
        let layout = CatalogLayout::new("/srv/resources");
        assert_eq!(
            layout.categories_manifest(),
            PathBuf::from("/srv/resources/resources.yml")
        );
        assert_eq!(
            layout.products_manifest(&seg("fruits")),
            PathBuf::from("/srv/resources/categories/fruits/products.yml")
        );
        assert_eq!(
            layout.product_details(&seg("fruits"), &seg("apple")),
            PathBuf::from("/srv/resources/categories/fruits/products/apple/details.yml")
        );
        assert_eq!(
            layout.image_file(&seg("fruits"), &seg("apple"), &seg("a.jpg")),
            PathBuf::from("/srv/resources/categories/fruits/products/apple/images/a.jpg")
        );
    }

    #[test]
    fn image_url_matches_static_mount() {
        let url = image_url(
            DEFAULT_STATIC_PREFIX,
            &seg("fruits"),
            &seg("apple"),
            &seg("a.jpg"),
        );
        assert_eq!(url, "/resources/categories/fruits/products/apple/images/a.jpg");
    }

    #[test]
    fn image_url_tolerates_trailing_slash_prefix() {
        let url = image_url("/static/", &seg("c"), &seg("p"), &seg("i.png"));
        assert_eq!(url, "/static/categories/c/products/p/images/i.png");
    }
}
