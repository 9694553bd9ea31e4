use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// How a discount value is interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    /// Percentage of the subtotal (0-100)
    #[default]
    Percentage,
    /// Absolute amount in the invoice currency
    Fixed,
}

impl std::fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscountKind::Percentage => write!(f, "percentage"),
            DiscountKind::Fixed => write!(f, "fixed"),
        }
    }
}

/// User-configured discount terms for an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountSpec {
    #[serde(rename = "type")]
    pub kind: DiscountKind,
    pub value: Decimal,
}

impl DiscountSpec {
    pub fn percentage(value: Decimal) -> Self {
        Self {
            kind: DiscountKind::Percentage,
            value,
        }
    }

    pub fn fixed(value: Decimal) -> Self {
        Self {
            kind: DiscountKind::Fixed,
            value,
        }
    }

    /// No discount (0%)
    pub fn none() -> Self {
        Self::percentage(Decimal::ZERO)
    }

    /// Percentages must lie in [0, 100]; fixed amounts must be non-negative
    pub fn validate(&self) -> Result<()> {
        match self.kind {
            DiscountKind::Percentage => {
                if self.value < Decimal::ZERO || self.value > Decimal::ONE_HUNDRED {
                    return Err(AppError::InvalidDiscount(format!(
                        "Percentage discount must be between 0 and 100, got: {}",
                        self.value
                    )));
                }
            }
            DiscountKind::Fixed => {
                if self.value < Decimal::ZERO {
                    return Err(AppError::InvalidDiscount(format!(
                        "Fixed discount cannot be negative, got: {}",
                        self.value
                    )));
                }
            }
        }

        Ok(())
    }
}

impl Default for DiscountSpec {
    fn default() -> Self {
        Self::none()
    }
}

/// What to do when a resolved discount exceeds the subtotal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountPolicy {
    /// Cap the discount at the subtotal (taxable amount becomes zero)
    #[default]
    Clamp,
    /// Fail with `NegativeTaxableAmount`
    Reject,
}

impl std::str::FromStr for DiscountPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "clamp" => Ok(DiscountPolicy::Clamp),
            "reject" => Ok(DiscountPolicy::Reject),
            _ => Err(format!("Invalid discount policy: {}", s)),
        }
    }
}
