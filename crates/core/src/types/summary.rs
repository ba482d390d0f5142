//! Report totals over the whole sales ledger.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::sale::{Sale, SalesLedger};

/// Aggregates shown on the report page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesSummary {
    /// Sum of quantities.
    pub total_quantity: u64,
    /// Sum of `quantity * unit_price`.
    pub total_sold_value: Decimal,
    /// Sum of the stored receivable snapshots.
    pub total_receivable: Decimal,
}

impl SalesSummary {
    /// Compute totals over a sequence of sales.
    pub fn from_sales<'a>(sales: impl IntoIterator<Item = &'a Sale>) -> Self {
        sales.into_iter().fold(Self::default(), |acc, sale| Self {
            total_quantity: acc.total_quantity.saturating_add(u64::from(sale.quantity)),
            total_sold_value: acc.total_sold_value.saturating_add(sale.sold_value()),
            total_receivable: acc.total_receivable.saturating_add(sale.receivable_amount),
        })
    }
}

impl From<&SalesLedger> for SalesSummary {
    fn from(ledger: &SalesLedger) -> Self {
        Self::from_sales(ledger.sales())
    }
}
