use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// Tax terms for an invoice; `rate` is a percentage of the taxable amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSpec {
    pub rate: Decimal,
}

impl TaxSpec {
    pub fn new(rate: Decimal) -> Self {
        Self { rate }
    }

    /// Zero-rated
    pub fn exempt() -> Self {
        Self::new(Decimal::ZERO)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rate < Decimal::ZERO {
            return Err(AppError::InvalidTaxRate(format!(
                "Tax rate cannot be negative, got: {}",
                self.rate
            )));
        }

        Ok(())
    }
}

impl Default for TaxSpec {
    fn default() -> Self {
        Self::exempt()
    }
}
