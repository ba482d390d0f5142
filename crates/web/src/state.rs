//! Application state shared across handlers.
//!
//! Holds only process-wide configuration. Catalog and ledger data live in
//! each visitor's session (see [`crate::models::session`]), never here.

use std::sync::Arc;

use crate::config::LedgerConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: LedgerConfig,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &LedgerConfig {
        &self.inner.config
    }
}
