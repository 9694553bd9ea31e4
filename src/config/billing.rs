use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;

use crate::core::{AppError, Currency, Result};
use crate::modules::discounts::models::DiscountPolicy;

/// Invoicing rules shared by every totals computation
#[derive(Debug, Clone)]
pub struct BillingConfig {
    pub currency: Currency,
    pub discount_policy: DiscountPolicy,
    /// Tax percentage applied when a request omits tax terms
    pub default_tax_rate: Decimal,
    pub invoice_due_days: u32,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            discount_policy: DiscountPolicy::default(),
            default_tax_rate: Decimal::ZERO,
            invoice_due_days: 30,
        }
    }
}

impl BillingConfig {
    pub fn from_env() -> Result<Self> {
        Ok(BillingConfig {
            currency: parse_var("INVOICE_CURRENCY", "USD", Currency::from_str)?,
            discount_policy: parse_var("DISCOUNT_OVERFLOW_POLICY", "clamp", DiscountPolicy::from_str)?,
            default_tax_rate: parse_var("DEFAULT_TAX_RATE", "0", |s| {
                Decimal::from_str(s).map_err(|e| e.to_string())
            })?,
            invoice_due_days: parse_var("INVOICE_DUE_DAYS", "30", |s| {
                s.parse::<u32>().map_err(|e| e.to_string())
            })?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_tax_rate < Decimal::ZERO {
            return Err(AppError::Configuration(
                "DEFAULT_TAX_RATE cannot be negative".to_string(),
            ));
        }

        if self.invoice_due_days == 0 {
            return Err(AppError::Configuration(
                "Invoice due days must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_var<T>(
    name: &str,
    default: &str,
    parse: impl FnOnce(&str) -> std::result::Result<T, String>,
) -> Result<T> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    parse(&raw).map_err(|e| AppError::Configuration(format!("Invalid {}: {}", name, e)))
}
