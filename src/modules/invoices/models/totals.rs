use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::Currency;

/// Computed money breakdown for an invoice
///
/// Stored as a snapshot on the invoice; recomputed while the invoice is a
/// draft and frozen afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub discount_amount: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
}

impl InvoiceTotals {
    /// Taxable amount: subtotal minus discount
    pub fn taxable_amount(&self) -> Decimal {
        self.subtotal - self.discount_amount
    }

    /// Display strings for each component in the given currency
    pub fn formatted(&self, currency: Currency) -> FormattedTotals {
        FormattedTotals {
            subtotal: currency.format_amount(self.subtotal),
            discount_amount: currency.format_amount(self.discount_amount),
            tax_amount: currency.format_amount(self.tax_amount),
            total_amount: currency.format_amount(self.total_amount),
        }
    }
}

/// Currency-formatted totals for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedTotals {
    pub subtotal: String,
    pub discount_amount: String,
    pub tax_amount: String,
    pub total_amount: String,
}
