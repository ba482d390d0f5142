//! Core types for the sales ledger.

pub mod money;
pub mod product;
pub mod sale;
pub mod session;
pub mod summary;

pub use money::{
    MONEY_SCALE, PERCENT_SCALE, compute_receivable, format_money, format_percent, sold_value,
};
pub use product::{CatalogError, CatalogStore, Product};
pub use sale::{Sale, SaleInput, SalesLedger};
pub use session::{SaleError, SalesSession};
pub use summary::SalesSummary;
