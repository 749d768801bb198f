//! Product type and the built-in catalog.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// A product as listed by the API.
///
/// Serializes as `{"name": .., "description": .., "price": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Product {
    /// Product name.
    pub name: Cow<'static, str>,
    /// Short description.
    pub description: Cow<'static, str>,
    /// Price in whole currency units.
    pub price: u64,
}

impl Product {
    /// Create a product with owned text fields.
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: u64) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            description: Cow::Owned(description.into()),
            price,
        }
    }

    /// Create a product from static text, usable in `const` context.
    pub const fn from_static(name: &'static str, description: &'static str, price: u64) -> Self {
        Self {
            name: Cow::Borrowed(name),
            description: Cow::Borrowed(description),
            price,
        }
    }
}

/// The product every default catalog lists.
pub const DEFAULT_PRODUCT: Product =
    Product::from_static("Default product", "product description", 100);

/// The built-in catalog. Immutable for the lifetime of the process.
pub static DEFAULT_CATALOG: [Product; 1] = [DEFAULT_PRODUCT];

/// An immutable product list, either the built-in one or a configured one.
pub type Catalog = Cow<'static, [Product]>;

/// Borrow the built-in catalog.
pub fn default_catalog() -> Catalog {
    Cow::Borrowed(&DEFAULT_CATALOG)
}
