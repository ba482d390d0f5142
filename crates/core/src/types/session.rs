//! Per-session application state.
//!
//! Each browser session owns one [`SalesSession`]. It is created empty on
//! first use and passed explicitly to every page handler; nothing is shared
//! between sessions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::product::{CatalogError, CatalogStore, Product};
use super::sale::{Sale, SaleInput, SalesLedger};
use super::summary::SalesSummary;

/// Errors raised when recording a sale.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaleError {
    /// No product has been registered yet, so the sale form is unavailable.
    #[error("register a product before recording sales")]
    EmptyCatalog,
}

/// Catalog and ledger belonging to one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesSession {
    #[serde(default)]
    catalog: CatalogStore,
    #[serde(default)]
    ledger: SalesLedger,
}

impl SalesSession {
    /// Start an empty session.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            catalog: CatalogStore::new(),
            ledger: SalesLedger::new(),
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    #[must_use]
    pub const fn ledger(&self) -> &SalesLedger {
        &self.ledger
    }

    /// Register a product in this session's catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyName`] for a blank name.
    pub fn register_product(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Product, CatalogError> {
        self.catalog.register(name, description)
    }

    /// Record a sale in this session's ledger.
    ///
    /// The product name is not checked against the catalog; the form only
    /// offers catalog names.
    ///
    /// # Errors
    ///
    /// Returns [`SaleError::EmptyCatalog`] while no product is registered.
    pub fn record_sale(&mut self, input: SaleInput) -> Result<Sale, SaleError> {
        if self.catalog.is_empty() {
            return Err(SaleError::EmptyCatalog);
        }
        Ok(self.ledger.record(input))
    }

    /// Totals over every recorded sale.
    #[must_use]
    pub fn summary(&self) -> SalesSummary {
        SalesSummary::from(&self.ledger)
    }
}
