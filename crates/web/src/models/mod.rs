//! Data models for the web layer.

pub mod session;

pub use session::{keys as session_keys, load_sales_session, save_sales_session};
