//! Sales Ledger Core - Domain types for the sales ledger.
//!
//! This crate provides the types shared by the web binary and its tests:
//! - [`CatalogStore`] - Append-only list of registered products
//! - [`SalesLedger`] - Append-only list of recorded sales
//! - [`SalesSummary`] - Report totals over the ledger
//! - [`SalesSession`] - Catalog and ledger owned by one browser session
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP,
//! no session storage. The receivable amount is computed by a single function,
//! [`compute_receivable`], used for both the live preview and the stored
//! snapshot.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
