//! Strongly-typed identifiers for catalog entities.
//!
//! Identifiers are dense integers assigned by the catalog builder in
//! traversal order. They are only stable within a single build.
//!
//! # Example
//!
//! ```rust
//! use vitrine_core::id::{CategoryId, ProductId};
//!
//! let category = CategoryId::new(0);
//! let product = ProductId::new(0);
//!
//! // IDs are different types - this won't compile:
//! // let wrong: CategoryId = product;
//! # let _ = (category, product);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

macro_rules! catalog_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Creates an id from its raw index.
            #[must_use]
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Returns the raw index.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }

            /// Returns the id that follows this one.
            #[must_use]
            pub const fn next(self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i64> for $name {
            type Error = Error;

            fn try_from(value: i64) -> Result<Self> {
                u64::try_from(value).map(Self).map_err(|_| Error::InvalidId {
                    message: format!("{} cannot be negative: {value}", $label),
                })
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                s.trim()
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|e| Error::InvalidId {
                        message: format!("invalid {} '{s}': {e}", $label),
                    })
            }
        }
    };
}

catalog_id!(
    /// Identifier of a category: its position in the categories manifest.
    CategoryId,
    "category id"
);

catalog_id!(
    /// Identifier of a product: its position in the global traversal of all
    /// categories' product lists.
    ProductId,
    "product id"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_plain_integers() {
        let json = serde_json::to_string(&ProductId::new(42)).unwrap();
        assert_eq!(json, "42");
        let parsed: CategoryId = serde_json::from_str("7").unwrap();
        assert_eq!(parsed, CategoryId::new(7));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!("12".parse::<ProductId>().unwrap(), ProductId::new(12));
        assert!("abc".parse::<ProductId>().is_err());
        assert!("-1".parse::<CategoryId>().is_err());
    }

    #[test]
    fn negative_values_are_not_ids() {
        assert!(CategoryId::try_from(-3).is_err());
        assert_eq!(CategoryId::try_from(3).unwrap(), CategoryId::new(3));
    }

    #[test]
    fn next_increments() {
        assert_eq!(ProductId::new(0).next(), ProductId::new(1));
    }
}
