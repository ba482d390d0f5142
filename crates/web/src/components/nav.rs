//! Sidebar page selector.
//!
//! The three pages are mutually exclusive and freely switchable; the sidebar
//! simply links to each one and highlights the current page.

/// One of the three UI pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Products,
    Sales,
    Reports,
}

impl Page {
    /// Pages in sidebar order.
    pub const ALL: [Self; 3] = [Self::Products, Self::Sales, Self::Reports];

    /// Sidebar label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Products => "Cadastro de produtos",
            Self::Sales => "Registrar venda",
            Self::Reports => "Relatórios",
        }
    }

    /// Path of the page.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Products => "/products",
            Self::Sales => "/sales",
            Self::Reports => "/reports",
        }
    }

    /// Sidebar entries with `self` marked active.
    #[must_use]
    pub fn nav(self) -> Vec<NavItem> {
        Self::ALL
            .iter()
            .map(|&page| NavItem {
                label: page.label(),
                href: page.path(),
                active: page == self,
            })
            .collect()
    }
}

/// Sidebar entry for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
    pub active: bool,
}
