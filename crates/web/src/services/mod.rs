//! Services used by the route handlers.

pub mod export;

pub use export::{ExportError, sales_workbook};
