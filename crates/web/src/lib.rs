//! Sales Ledger web library.
//!
//! This crate provides the browser UI as a library, allowing the router to be
//! driven in-process by tests and reused by the binary.
//!
//! # Pages
//!
//! - Cadastro de produtos - register products and list the catalog
//! - Registrar venda - record a sale with a live receivable preview
//! - Relatórios - ledger table, totals and spreadsheet export
//!
//! Catalog and ledger live in the visitor's server-side session and are lost
//! when the session expires or the process restarts.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod components;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::{Router, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the full application router.
///
/// Includes the session layer, static files and request tracing. Sentry
/// layers are added by the binary so tests run without them.
pub fn build_router(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());
    let static_dir = ServeDir::new(&state.config().static_dir);

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", static_dir)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}
