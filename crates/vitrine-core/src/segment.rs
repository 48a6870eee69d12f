//! Validated path segments.
//!
//! Category names, product names and image file names double as filesystem
//! path components and URL segments. A [`PathSegment`] is guaranteed to be a
//! single, non-traversing component:
//! - Non-empty
//! - Not `.` or `..`
//! - No `/` or `\` separators
//! - No NUL or other control characters
//!
//! # Example
//!
//! ```rust
//! use vitrine_core::segment::PathSegment;
//!
//! assert!(PathSegment::new("red-apple").is_ok());
//! assert!(PathSegment::new("../etc").is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// A name that is safe to join onto a directory path or URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PathSegment(String);

impl PathSegment {
    /// Creates a segment after validating it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSegment`] if the name could escape its parent
    /// directory or is not a single component.
    pub fn new(segment: impl Into<String>) -> Result<Self> {
        let segment = segment.into();
        Self::validate(&segment)?;
        Ok(Self(segment))
    }

    /// Returns the segment as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(segment: &str) -> Result<()> {
        let reason = if segment.is_empty() {
            "must not be empty"
        } else if segment == "." || segment == ".." {
            "must not be a relative directory reference"
        } else if segment.contains(['/', '\\']) {
            "must not contain path separators"
        } else if segment.chars().any(char::is_control) {
            "must not contain control characters"
        } else {
            return Ok(());
        };

        Err(Error::InvalidSegment {
            segment: segment.to_string(),
            reason,
        })
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PathSegment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<std::path::Path> for PathSegment {
    fn as_ref(&self) -> &std::path::Path {
        std::path::Path::new(&self.0)
    }
}

impl TryFrom<String> for PathSegment {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<PathSegment> for String {
    fn from(value: PathSegment) -> Self {
        value.0
    }
}
