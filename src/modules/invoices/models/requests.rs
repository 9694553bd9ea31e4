use serde::{Deserialize, Serialize};

use super::invoice::Invoice;
use super::line_item::LineItem;
use super::totals::{FormattedTotals, InvoiceTotals};
use crate::core::Currency;
use crate::modules::discounts::models::DiscountSpec;
use crate::modules::taxes::models::TaxSpec;

/// Totals preview for an unsaved invoice form
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    pub discount: Option<DiscountSpec>,
    pub tax: Option<TaxSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub currency: Currency,
    pub totals: InvoiceTotals,
    pub formatted: FormattedTotals,
}

/// Create a draft invoice
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvoiceRequest {
    pub client_id: String,
    pub child_name: String,
    pub therapist_id: Option<String>,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    pub discount: Option<DiscountSpec>,
    pub tax: Option<TaxSpec>,
}

/// Replace the totals inputs of a draft invoice
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInvoiceRequest {
    pub line_items: Vec<LineItem>,
    pub discount: Option<DiscountSpec>,
    pub tax: Option<TaxSpec>,
}

/// Parent-submitted payment for a pending invoice
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitPaymentRequest {
    pub payment_reference: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    Approve,
    Reject,
}

/// Admin decision on a submitted payment
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewPaymentRequest {
    pub decision: ReviewDecision,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceResponse {
    #[serde(flatten)]
    pub invoice: Invoice,
    pub formatted_totals: FormattedTotals,
    pub is_mutable: bool,
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        Self {
            formatted_totals: invoice.formatted_totals(),
            is_mutable: invoice.is_mutable(),
            invoice,
        }
    }
}
