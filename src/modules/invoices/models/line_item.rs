// A line item is one billable row on an invoice: a therapy session type,
// assessment or report, billed as quantity × unit_price.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

const MAX_DESCRIPTION_LEN: usize = 255;

/// Represents a single line item in an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Description of the billed service
    #[serde(default)]
    pub description: String,

    /// Number of units (sessions, hours)
    pub quantity: i32,

    /// Price per unit
    pub unit_price: Decimal,
}

impl LineItem {
    /// Create a new line item with validation
    ///
    /// # Arguments
    /// * `description` - Service description (max 255 chars, may be empty on drafts)
    /// * `quantity` - Must be non-negative
    /// * `unit_price` - Must be non-negative
    pub fn new(description: impl Into<String>, quantity: i32, unit_price: Decimal) -> Result<Self> {
        let item = Self {
            description: description.into(),
            quantity,
            unit_price,
        };
        item.validate()?;

        Ok(item)
    }

    /// Unrounded subtotal: quantity × unit_price
    pub fn subtotal(&self) -> Result<Decimal> {
        Decimal::from(self.quantity)
            .checked_mul(self.unit_price)
            .ok_or_else(|| AppError::overflow(format!("subtotal of line item '{}'", self.description)))
    }

    /// Check boundary constraints, returning `InvalidLineItem` on failure
    pub fn validate(&self) -> Result<()> {
        if self.quantity < 0 {
            return Err(AppError::InvalidLineItem(format!(
                "Quantity must be non-negative, got: {}",
                self.quantity
            )));
        }

        if self.unit_price < Decimal::ZERO {
            return Err(AppError::InvalidLineItem(format!(
                "Unit price must be non-negative, got: {}",
                self.unit_price
            )));
        }

        if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(AppError::InvalidLineItem(format!(
                "Description cannot exceed {} characters",
                MAX_DESCRIPTION_LEN
            )));
        }

        Ok(())
    }
}

/// Sum of quantity × unit_price over all items. Empty input yields zero.
pub fn aggregate(items: &[LineItem]) -> Result<Decimal> {
    items.iter().try_fold(Decimal::ZERO, |sum, item| {
        sum.checked_add(item.subtotal()?)
            .ok_or_else(|| AppError::overflow("invoice subtotal"))
    })
}
