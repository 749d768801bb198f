//! Product types and the default catalog for vitrine.
//!
//! # Example
//!
//! ```rust
//! use vitrine_catalog::prelude::*;
//!
//! let catalog = default_catalog();
//! assert_eq!(catalog.len(), 1);
//! assert_eq!(catalog[0].name, "Default product");
//! assert_eq!(catalog[0].price, 100);
//! ```

pub mod product;

pub use product::{default_catalog, Catalog, Product, DEFAULT_CATALOG, DEFAULT_PRODUCT};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::product::{default_catalog, Catalog, Product, DEFAULT_CATALOG, DEFAULT_PRODUCT};
}
