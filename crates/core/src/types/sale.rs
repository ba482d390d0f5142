//! Sales ledger.
//!
//! A [`Sale`] is a snapshot: its receivable amount is computed once, when the
//! sale is recorded, and never recalculated.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::{compute_receivable, sold_value};

/// Values entered on the sale form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleInput {
    /// Name of a catalog product.
    pub product_name: String,
    /// Units sold, at least 1.
    pub quantity: u32,
    /// Price per unit.
    pub unit_price: Decimal,
    /// Share of the sold value owed to the seller, in percent.
    pub receivable_percent: Decimal,
    /// Date of the sale.
    pub date: NaiveDate,
}

impl SaleInput {
    /// Receivable amount these inputs would produce if recorded now.
    #[must_use]
    pub fn receivable_amount(&self) -> Decimal {
        compute_receivable(self.quantity, self.unit_price, self.receivable_percent)
    }
}

/// A recorded sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub receivable_percent: Decimal,
    /// Computed at entry time.
    pub receivable_amount: Decimal,
    pub date: NaiveDate,
}

impl Sale {
    /// Gross value of the sale (`quantity * unit_price`).
    #[must_use]
    pub fn sold_value(&self) -> Decimal {
        sold_value(self.quantity, self.unit_price)
    }
}

impl From<SaleInput> for Sale {
    fn from(input: SaleInput) -> Self {
        let receivable_amount = input.receivable_amount();
        Self {
            product_name: input.product_name,
            quantity: input.quantity,
            unit_price: input.unit_price,
            receivable_percent: input.receivable_percent,
            receivable_amount,
            date: input.date,
        }
    }
}

/// Append-only collection of recorded sales.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SalesLedger {
    sales: Vec<Sale>,
}

impl SalesLedger {
    /// Create an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self { sales: Vec::new() }
    }

    /// Record a sale. Always succeeds.
    pub fn record(&mut self, input: SaleInput) -> Sale {
        let sale = Sale::from(input);
        self.sales.push(sale.clone());
        sale
    }

    /// All sales in the order they were recorded.
    #[must_use]
    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sales.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }
}
