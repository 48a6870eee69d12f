//! Error types for vitrine-catalog operations.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Where in the resource tree a read failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// File that was being read.
    pub file: PathBuf,
    /// Category being read, if any.
    pub category: Option<String>,
    /// Product being read, if any.
    pub product: Option<String>,
}

impl SourceLocation {
    /// Location of a file outside any category.
    #[must_use]
    pub fn file(file: impl AsRef<Path>) -> Self {
        Self {
            file: file.as_ref().to_path_buf(),
            category: None,
            product: None,
        }
    }

    /// Scopes the location to a category.
    #[must_use]
    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Scopes the location to a product.
    #[must_use]
    pub fn in_product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file={}", self.file.display())?;
        if let Some(category) = &self.category {
            write!(f, " category={category}")?;
        }
        if let Some(product) = &self.product {
            write!(f, " product={product}")?;
        }
        Ok(())
    }
}

/// What went wrong while reading a source file.
#[derive(Debug, Error)]
pub enum SourceReadErrorKind {
    /// The file does not exist.
    #[error("file is missing")]
    Missing,

    /// The file exists but could not be read.
    #[error("failed to read file: {0}")]
    Io(#[source] std::io::Error),

    /// The file is not valid YAML or a field is missing or mistyped.
    #[error("malformed record: {0}")]
    Malformed(#[source] serde_yaml::Error),

    /// A name cannot be used as a path segment.
    #[error("invalid name {segment:?}: {reason}")]
    InvalidSegment {
        /// The rejected name.
        segment: String,
        /// Why the name was rejected.
        reason: &'static str,
    },
}

impl From<std::io::Error> for SourceReadErrorKind {
    fn from(value: std::io::Error) -> Self {
        if value.kind() == std::io::ErrorKind::NotFound {
            Self::Missing
        } else {
            Self::Io(value)
        }
    }
}

/// A structural error in the on-disk catalog.
///
/// Fatal for the build that raised it: no partial snapshot is ever produced.
#[derive(Debug, Error)]
#[error("{location}: {kind}")]
pub struct SourceReadError {
    /// Where the error occurred.
    pub location: SourceLocation,
    /// What went wrong.
    #[source]
    pub kind: SourceReadErrorKind,
}

impl SourceReadError {
    /// Creates a new source read error.
    #[must_use]
    pub fn new(location: SourceLocation, kind: impl Into<SourceReadErrorKind>) -> Self {
        Self {
            location,
            kind: kind.into(),
        }
    }
}

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The resource tree could not be read.
    #[error(transparent)]
    Source(#[from] SourceReadError),

    /// Resource not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of entity that was looked up.
        entity: &'static str,
        /// Identifier that was looked up.
        id: String,
    },

    /// Another reload is currently building a snapshot.
    #[error("a catalog reload is already in progress")]
    ReloadInProgress,

    /// An internal error occurred that should not happen in normal operation.
    #[error("internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl CatalogError {
    /// Creates a not-found error.
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_full_location() {
        let err = SourceReadError::new(
            SourceLocation::file("/srv/resources/categories/fruits/products/apple/details.yml")
                .in_category("fruits")
                .in_product("apple"),
            SourceReadErrorKind::Missing,
        );
        let message = err.to_string();
        assert!(message.contains("details.yml"));
        assert!(message.contains("category=fruits"));
        assert!(message.contains("product=apple"));
        assert!(message.contains("file is missing"));
    }

    #[test]
    fn io_not_found_maps_to_missing() {
        let kind = SourceReadErrorKind::from(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(matches!(kind, SourceReadErrorKind::Missing));

        let kind =
            SourceReadErrorKind::from(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        assert!(matches!(kind, SourceReadErrorKind::Io(_)));
    }
}
