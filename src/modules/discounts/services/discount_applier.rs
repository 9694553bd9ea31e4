use rust_decimal::Decimal;

use crate::core::error::AppError;
use crate::core::Currency;
use crate::modules::discounts::models::{DiscountKind, DiscountPolicy, DiscountSpec};

/// Resolves discount terms into a money amount against a subtotal
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscountApplier {
    currency: Currency,
    policy: DiscountPolicy,
}

impl DiscountApplier {
    pub fn new(currency: Currency, policy: DiscountPolicy) -> Self {
        Self { currency, policy }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn policy(&self) -> DiscountPolicy {
        self.policy
    }

    /// Resolve, round to the currency scale, then enforce the overflow policy
    ///
    /// percentage: subtotal × value / 100
    /// fixed: value
    ///
    /// The policy compares the rounded amount, so a fixed discount that rounds
    /// to exactly the subtotal is not an overflow.
    pub fn apply_discount(&self, subtotal: Decimal, spec: &DiscountSpec) -> Result<Decimal, AppError> {
        spec.validate()?;
        let discount = self.currency.round(Self::resolve(subtotal, spec)?);
        self.enforce_policy(subtotal, discount)
    }

    fn resolve(subtotal: Decimal, spec: &DiscountSpec) -> Result<Decimal, AppError> {
        match spec.kind {
            DiscountKind::Percentage => subtotal
                .checked_mul(spec.value)
                .and_then(|amount| amount.checked_div(Decimal::ONE_HUNDRED))
                .ok_or_else(|| AppError::overflow(format!("{}% discount on {}", spec.value, subtotal))),
            DiscountKind::Fixed => Ok(spec.value),
        }
    }

    fn enforce_policy(&self, subtotal: Decimal, discount: Decimal) -> Result<Decimal, AppError> {
        if discount <= subtotal {
            return Ok(discount);
        }

        match self.policy {
            DiscountPolicy::Clamp => {
                tracing::debug!(%subtotal, %discount, "Discount clamped to subtotal");
                Ok(subtotal)
            }
            DiscountPolicy::Reject => Err(AppError::NegativeTaxableAmount { subtotal, discount }),
        }
    }
}
