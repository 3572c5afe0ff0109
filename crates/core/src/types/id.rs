//! Product identifiers.
//!
//! Product IDs come from the descriptor files (`"apple"`, `"grapes"`, ...)
//! and double as the descriptor file stem. Wrapping them keeps a product ID
//! from being confused with a name or an image file name.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A product identifier, unique within the catalog.
///
/// # Example
///
/// ```rust
/// # use daily_harvest_core::ProductId;
/// let id = ProductId::new("apple");
/// assert_eq!(id.as_str(), "apple");
/// assert_eq!(id.descriptor_file(), "apple.json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new product ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the JSON descriptor this product is loaded from.
    #[must_use]
    pub fn descriptor_file(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
