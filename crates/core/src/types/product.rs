//! Product catalog.
//!
//! The catalog is an append-only, insertion-ordered list of products. Names
//! are not required to be unique; the only rule is that a name must contain
//! something other than whitespace.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when registering a product.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The product name was empty or whitespace-only.
    #[error("product name is required")]
    EmptyName,
}

/// A registered product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Display name, stored exactly as typed.
    pub name: String,
    /// Free-text description, may be empty.
    pub description: String,
}

/// Append-only collection of registered products.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogStore {
    products: Vec<Product>,
}

impl CatalogStore {
    /// Create an empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Register a new product.
    ///
    /// The name and description are stored verbatim; trimming is only used to
    /// decide whether the name is present.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyName`] if `name` is empty after trimming.
    /// The catalog is left untouched in that case.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Product, CatalogError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }

        let product = Product {
            name,
            description: description.into(),
        };
        self.products.push(product.clone());
        Ok(product)
    }

    /// All products in registration order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Product names in registration order, duplicates included.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.products.iter().map(|p| p.name.as_str())
    }

    /// Whether any product carries exactly this name.
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.products.iter().any(|p| p.name == name)
    }

    /// Number of registered products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether no product has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
