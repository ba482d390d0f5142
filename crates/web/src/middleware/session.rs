//! Session middleware configuration.
//!
//! Sets up in-memory sessions using tower-sessions. The session store is the
//! only home of catalog and ledger data, so a restart drops everything.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::LedgerConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "ledger_session";

/// Create the session layer with an in-memory store.
///
/// Sessions expire after `session_idle_minutes` without a request.
#[must_use]
pub fn create_session_layer(config: &LedgerConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::minutes(config.session_idle_minutes),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
