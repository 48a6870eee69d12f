//! Offline catalog linting.
//!
//! Runs a full build against an on-disk tree and, in the same pass, reports
//! image files that detail records list but that do not exist. Missing images do
//! not fail a build (the static file handler answers 404 for them), so they
//! are reported rather than raised.

use std::path::PathBuf;

use crate::builder::CatalogBuilder;
use crate::error::SourceReadError;
use crate::source::FsCatalogSource;

/// Result of linting a resource tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Categories the tree would publish.
    pub categories: usize,
    /// Products the tree would publish.
    pub products: usize,
    /// Listed image files that are absent on disk, in traversal order.
    pub missing_images: Vec<PathBuf>,
}

impl CheckReport {
    /// Returns true when every listed image exists.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.missing_images.is_empty()
    }
}

/// Lints the tree behind `source`.
///
/// # Errors
///
/// Returns the [`SourceReadError`] that would abort a build of this tree.
pub fn check_catalog(source: &FsCatalogSource) -> Result<CheckReport, SourceReadError> {
    let layout = source.layout();
    let mut missing_images = Vec::new();

    let snapshot = CatalogBuilder::new(source).build_visiting_images(|category, product, image| {
        let path = layout.image_file(category, product, image);
        if !path.is_file() {
            tracing::warn!(
                category = %category,
                product = %product,
                path = %path.display(),
                "Listed image file does not exist"
            );
            missing_images.push(path);
        }
    })?;

    Ok(CheckReport {
        categories: snapshot.category_count(),
        products: snapshot.product_count(),
        missing_images,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;
    use std::path::Path;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn tree(root: &Path) {
        write(root, "resources.yml", "categories: [fruits]\n");
        write(root, "categories/fruits/products.yml", "products: [apple]\n");
        write(
            root,
            "categories/fruits/products/apple/details.yml",
            "name: Apple\ndescription: ''\ncode: 1\nquantity: 1\nprice: 1.0\n\
             discount: false\ndisprice: 0.0\nimages: [a.jpg, b.jpg]\n",
        );
        write(root, "categories/fruits/products/apple/images/a.jpg", "x");
    }

    #[test]
    fn reports_missing_images() {
        let dir = tempfile::tempdir().unwrap();
        tree(dir.path());

        let report = check_catalog(&FsCatalogSource::new(dir.path())).unwrap();

        assert_eq!(report.categories, 1);
        assert_eq!(report.products, 1);
        assert!(!report.is_clean());
        assert_eq!(report.missing_images.len(), 1);
        assert!(report.missing_images[0].ends_with("images/b.jpg"));
    }

    #[test]
    fn clean_tree_has_no_findings() {
        let dir = tempfile::tempdir().unwrap();
        tree(dir.path());
        write(dir.path(), "categories/fruits/products/apple/images/b.jpg", "x");

        let report = check_catalog(&FsCatalogSource::new(dir.path())).unwrap();
        assert!(report.is_clean());
    }

    #[test]
    fn build_errors_propagate() {
        let dir = tempfile::tempdir().unwrap();
        assert!(check_catalog(&FsCatalogSource::new(dir.path())).is_err());
    }
}
