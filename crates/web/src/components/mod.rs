//! Reusable view components shared by the page templates.

pub mod nav;
pub mod notice;

pub use nav::{NavItem, Page};
pub use notice::Notice;
