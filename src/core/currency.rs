use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Invoicing currencies with their decimal precision rules
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US Dollar (2 decimal places)
    #[default]
    USD,
    /// Euro (2 decimal places)
    EUR,
    /// Pound Sterling (2 decimal places)
    GBP,
    /// South African Rand (2 decimal places)
    ZAR,
    /// Japanese Yen (no decimal places)
    JPY,
}

impl Currency {
    /// Returns the decimal scale for this currency
    pub fn scale(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            Currency::USD | Currency::EUR | Currency::GBP | Currency::ZAR => 2,
        }
    }

    /// Rounds to this currency's scale, midpoints away from zero
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(self.scale(), RoundingStrategy::MidpointAwayFromZero)
    }

    /// Formats an amount for display with grouped thousands, e.g. `ZAR 3,415.50`
    pub fn format_amount(&self, amount: Decimal) -> String {
        let rounded = self.round(amount);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let text = format!("{:.width$}", rounded.abs(), width = self.scale() as usize);
        let (whole, fraction) = match text.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (text.as_str(), None),
        };

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (idx, ch) in whole.chars().enumerate() {
            if idx > 0 && (whole.len() - idx) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        match fraction {
            Some(fraction) => format!("{} {}{}.{}", self, sign, grouped, fraction),
            None => format!("{} {}{}", self, sign, grouped),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::USD => write!(f, "USD"),
            Currency::EUR => write!(f, "EUR"),
            Currency::GBP => write!(f, "GBP"),
            Currency::ZAR => write!(f, "ZAR"),
            Currency::JPY => write!(f, "JPY"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            "ZAR" => Ok(Currency::ZAR),
            "JPY" => Ok(Currency::JPY),
            _ => Err(format!("Invalid currency: {}", s)),
        }
    }
}
