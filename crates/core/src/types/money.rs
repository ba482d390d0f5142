//! Decimal arithmetic for sale amounts.
//!
//! All amounts are `rust_decimal::Decimal` so that `0.1 + 0.2` stays `0.3`.
//! Arithmetic saturates instead of panicking on absurdly large inputs.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places shown for monetary values (unit price, totals).
pub const MONEY_SCALE: u32 = 2;

/// Decimal places shown for the receivable percentage.
pub const PERCENT_SCALE: u32 = 1;

/// Amount owed for a sale: `quantity * unit_price * (percent / 100)`.
///
/// This is the single source of truth for the receivable amount; the live
/// preview and the stored snapshot both call it.
#[must_use]
pub fn compute_receivable(quantity: u32, unit_price: Decimal, percent: Decimal) -> Decimal {
    sold_value(quantity, unit_price).saturating_mul(percent) / Decimal::ONE_HUNDRED
}

/// Gross value of a sale line: `quantity * unit_price`.
#[must_use]
pub fn sold_value(quantity: u32, unit_price: Decimal) -> Decimal {
    Decimal::from(quantity).saturating_mul(unit_price)
}

/// Format a monetary value with two decimals, e.g. `6.00`.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    format_scaled(amount, MONEY_SCALE)
}

/// Format a percentage with one decimal, e.g. `20.0`.
#[must_use]
pub fn format_percent(percent: Decimal) -> String {
    format_scaled(percent, PERCENT_SCALE)
}

fn format_scaled(value: Decimal, scale: u32) -> String {
    let rounded = value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    let width = scale as usize;
    format!("{rounded:.width$}")
}
