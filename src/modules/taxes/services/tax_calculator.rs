use rust_decimal::Decimal;

use crate::core::error::AppError;
use crate::modules::taxes::models::TaxSpec;

/// TaxCalculator applies a percentage rate to the post-discount amount
pub struct TaxCalculator;

impl TaxCalculator {
    pub fn new() -> Self {
        Self
    }

    /// taxable_amount = subtotal - discount_amount
    /// tax_amount = taxable_amount × rate / 100
    pub fn apply_tax(
        &self,
        subtotal: Decimal,
        discount_amount: Decimal,
        spec: &TaxSpec,
    ) -> Result<Decimal, AppError> {
        spec.validate()?;

        let taxable_amount = subtotal - discount_amount;
        if taxable_amount < Decimal::ZERO {
            return Err(AppError::NegativeTaxableAmount {
                subtotal,
                discount: discount_amount,
            });
        }

        taxable_amount
            .checked_mul(spec.rate)
            .and_then(|amount| amount.checked_div(Decimal::ONE_HUNDRED))
            .ok_or_else(|| AppError::overflow(format!("tax at {}% on {}", spec.rate, taxable_amount)))
    }
}

impl Default for TaxCalculator {
    fn default() -> Self {
        Self::new()
    }
}
