//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                  - Redirect to product registration
//! GET  /health            - Health check
//!
//! # Cadastro de produtos
//! GET  /products          - Registration form and catalog table
//! POST /products          - Register a product
//!
//! # Registrar venda
//! GET  /sales             - Sale form (warning if the catalog is empty)
//! POST /sales             - Record a sale
//! POST /sales/preview     - Receivable preview fragment
//!
//! # Relatórios
//! GET  /reports           - Ledger table and totals
//! GET  /reports/export    - Download relatorio_vendas.xlsx
//! ```

pub mod products;
pub mod reports;
pub mod sales;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::components::Page;
use crate::state::AppState;

/// Create the product registration routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/", get(products::index).post(products::register))
}

/// Create the sale entry routes router.
pub fn sale_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(sales::index).post(sales::record))
        .route("/preview", post(sales::preview))
}

/// Create the report routes router.
pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(reports::index))
        .route("/export", get(reports::export))
}

/// Create all page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        // First sidebar option is the landing page
        .route("/", get(|| async { Redirect::to(Page::Products.path()) }))
        .nest("/products", product_routes())
        .nest("/sales", sale_routes())
        .nest("/reports", report_routes())
}
