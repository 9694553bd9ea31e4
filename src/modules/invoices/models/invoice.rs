// An invoice bills a parent/guardian for therapy delivered to their child.
// Totals are a snapshot owned by the invoice: recomputed on every edit while
// the invoice is a draft, frozen once it is issued.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::line_item::LineItem;
use super::totals::{FormattedTotals, InvoiceTotals};
use crate::core::{AppError, Currency, Result};
use crate::modules::discounts::models::DiscountSpec;
use crate::modules::taxes::models::TaxSpec;

/// Invoice status lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Being prepared by an admin; totals inputs are editable
    #[default]
    Draft,

    /// Issued to the parent, awaiting payment
    Pending,

    /// Parent submitted a payment, awaiting admin review
    UnderReview,

    /// Payment approved
    Paid,

    /// Withdrawn before payment
    Cancelled,
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvoiceStatus::Draft => write!(f, "draft"),
            InvoiceStatus::Pending => write!(f, "pending"),
            InvoiceStatus::UnderReview => write!(f, "under_review"),
            InvoiceStatus::Paid => write!(f, "paid"),
            InvoiceStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "draft" => Ok(InvoiceStatus::Draft),
            "pending" => Ok(InvoiceStatus::Pending),
            "under_review" => Ok(InvoiceStatus::UnderReview),
            "paid" => Ok(InvoiceStatus::Paid),
            "cancelled" => Ok(InvoiceStatus::Cancelled),
            _ => Err(format!("Invalid invoice status: {}", s)),
        }
    }
}

impl InvoiceStatus {
    pub fn can_transition_to(self, next: InvoiceStatus) -> bool {
        use InvoiceStatus::*;

        matches!(
            (self, next),
            (Draft, Pending)
                | (Draft, Cancelled)
                | (Pending, UnderReview)
                | (Pending, Cancelled)
                | (UnderReview, Paid)
                | (UnderReview, Pending)
        )
    }
}

/// Represents a client invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,

    /// Parent/guardian account being billed
    pub client_id: String,

    /// Child receiving therapy
    pub child_name: String,

    pub therapist_id: Option<String>,

    pub currency: Currency,

    pub line_items: Vec<LineItem>,

    pub discount: DiscountSpec,

    pub tax: TaxSpec,

    /// Snapshot of the computed breakdown
    pub totals: InvoiceTotals,

    pub status: InvoiceStatus,

    pub due_date: Option<NaiveDate>,

    /// Reference supplied by the parent when paying (bank ref, receipt number)
    pub payment_reference: Option<String>,

    /// Admin note left when a payment is rejected or approved
    pub review_note: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub issued_at: Option<DateTime<Utc>>,
    pub paid_at: Option<DateTime<Utc>>,
}

impl Invoice {
    /// Create a new draft invoice
    ///
    /// Totals start zeroed; the caller computes and stores them via `set_terms`.
    pub fn new_draft(
        client_id: impl Into<String>,
        child_name: impl Into<String>,
        therapist_id: Option<String>,
        currency: Currency,
    ) -> Result<Self> {
        let client_id = client_id.into();
        let child_name = child_name.into();
        Self::validate_client_id(&client_id)?;
        Self::validate_child_name(&child_name)?;

        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4(),
            client_id,
            child_name,
            therapist_id,
            currency,
            line_items: Vec::new(),
            discount: DiscountSpec::none(),
            tax: TaxSpec::exempt(),
            totals: InvoiceTotals::default(),
            status: InvoiceStatus::Draft,
            due_date: None,
            payment_reference: None,
            review_note: None,
            created_at: now,
            updated_at: now,
            issued_at: None,
            paid_at: None,
        })
    }

    /// Totals inputs may only change while the invoice is a draft
    pub fn is_mutable(&self) -> bool {
        self.status == InvoiceStatus::Draft
    }

    /// Replace line items, discount, tax and the totals computed from them
    pub fn set_terms(
        &mut self,
        line_items: Vec<LineItem>,
        discount: DiscountSpec,
        tax: TaxSpec,
        totals: InvoiceTotals,
    ) -> Result<()> {
        if !self.is_mutable() {
            return Err(AppError::InvoiceFrozen(self.id.to_string()));
        }

        self.line_items = line_items;
        self.discount = discount;
        self.tax = tax;
        self.totals = totals;
        self.updated_at = Utc::now();

        Ok(())
    }

    /// Move to `next`, rejecting transitions the lifecycle does not allow
    pub fn transition(&mut self, next: InvoiceStatus) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(AppError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }

        let now = Utc::now();
        match next {
            InvoiceStatus::Pending if self.status == InvoiceStatus::Draft => {
                if self.line_items.is_empty() {
                    return Err(AppError::validation(
                        "Invoice must have at least one line item before it is issued",
                    ));
                }
                self.issued_at = Some(now);
            }
            InvoiceStatus::Paid => self.paid_at = Some(now),
            _ => {}
        }

        self.status = next;
        self.updated_at = now;

        Ok(())
    }

    pub fn formatted_totals(&self) -> FormattedTotals {
        self.totals.formatted(self.currency)
    }

    fn validate_client_id(client_id: &str) -> Result<()> {
        if client_id.trim().is_empty() {
            return Err(AppError::validation("Client ID cannot be empty"));
        }

        Ok(())
    }

    fn validate_child_name(child_name: &str) -> Result<()> {
        if child_name.trim().is_empty() {
            return Err(AppError::validation("Child name cannot be empty"));
        }

        if child_name.len() > 100 {
            return Err(AppError::validation(
                "Child name cannot exceed 100 characters",
            ));
        }

        Ok(())
    }
}
