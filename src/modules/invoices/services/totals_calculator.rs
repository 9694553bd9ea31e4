use rust_decimal::Decimal;

use crate::core::{AppError, Currency, Result};
use crate::modules::discounts::models::{DiscountPolicy, DiscountSpec};
use crate::modules::discounts::services::DiscountApplier;
use crate::modules::invoices::models::{aggregate, InvoiceTotals, LineItem};
use crate::modules::taxes::models::TaxSpec;
use crate::modules::taxes::services::TaxCalculator;

/// Composes invoice totals: aggregate -> discount -> tax -> total
///
/// Inputs are validated up front. Each component is rounded once, to the
/// currency scale, and the total is derived from the rounded components so
/// `total = subtotal - discount + tax` holds exactly.
#[derive(Debug, Clone, Copy)]
pub struct TotalsCalculator {
    currency: Currency,
    discounts: DiscountApplier,
}

impl TotalsCalculator {
    pub fn new(currency: Currency, policy: DiscountPolicy) -> Self {
        Self {
            currency,
            discounts: DiscountApplier::new(currency, policy),
        }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn policy(&self) -> DiscountPolicy {
        self.discounts.policy()
    }

    pub fn compose_totals(
        &self,
        items: &[LineItem],
        discount: &DiscountSpec,
        tax: &TaxSpec,
    ) -> Result<InvoiceTotals> {
        for item in items {
            item.validate()?;
        }
        discount.validate()?;
        tax.validate()?;

        let subtotal = self.currency.round(aggregate(items)?);
        let discount_amount = self.discounts.apply_discount(subtotal, discount)?;

        let raw_tax = TaxCalculator::new().apply_tax(subtotal, discount_amount, tax)?;
        let tax_amount = self.currency.round(raw_tax);

        // discount <= subtotal here, so only the tax can push the total out of range
        let total_amount = (subtotal - discount_amount)
            .checked_add(tax_amount)
            .ok_or_else(|| AppError::overflow("invoice total"))?;

        Ok(InvoiceTotals {
            subtotal: normalize(subtotal),
            discount_amount: normalize(discount_amount),
            tax_amount: normalize(tax_amount),
            total_amount: normalize(total_amount),
        })
    }
}

impl Default for TotalsCalculator {
    fn default() -> Self {
        Self::new(Currency::default(), DiscountPolicy::default())
    }
}

// Strip trailing zeros so equal values serialize identically ("330" not "330.00")
fn normalize(amount: Decimal) -> Decimal {
    amount.normalize()
}
