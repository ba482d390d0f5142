//! Session-stored application data.
//!
//! Every visitor's [`SalesSession`] is kept under a single session key. A
//! handler loads it at the start of the request and saves it back after a
//! mutation; read-only pages never write.

use sales_ledger_core::SalesSession;
use tower_sessions::Session;

/// Session keys for application data.
pub mod keys {
    /// Key for the visitor's catalog and ledger.
    pub const SALES_SESSION: &str = "sales_session";
}

/// Load the visitor's data, starting empty on first use.
///
/// # Errors
///
/// Returns an error if the session store fails or the stored value cannot be
/// deserialized.
pub async fn load_sales_session(
    session: &Session,
) -> Result<SalesSession, tower_sessions::session::Error> {
    Ok(session
        .get::<SalesSession>(keys::SALES_SESSION)
        .await?
        .unwrap_or_default())
}

/// Store the visitor's data.
///
/// # Errors
///
/// Returns an error if the session store fails or the value cannot be
/// serialized.
pub async fn save_sales_session(
    session: &Session,
    data: &SalesSession,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::SALES_SESSION, data).await
}
