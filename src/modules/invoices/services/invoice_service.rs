use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::config::BillingConfig;
use crate::core::error::AppError;
use crate::modules::discounts::models::DiscountSpec;
use crate::modules::invoices::models::{
    CreateInvoiceRequest, Invoice, InvoiceResponse, InvoiceStatus, InvoiceTotals, LineItem,
    QuoteRequest, QuoteResponse, ReviewDecision, ReviewPaymentRequest, SubmitPaymentRequest,
    UpdateInvoiceRequest,
};
use crate::modules::invoices::repositories::{InvoiceFilter, InvoiceRepository, InvoiceUpdate};
use crate::modules::invoices::services::TotalsCalculator;
use crate::modules::taxes::models::TaxSpec;

/// Service for invoice business logic
///
/// Shared by the admin create form, the admin payment review screen and the
/// parent invoice view so all three see the same totals.
pub struct InvoiceService {
    invoice_repo: Arc<dyn InvoiceRepository>,
    calculator: TotalsCalculator,
    default_tax: TaxSpec,
    due_days: i64,
}

impl InvoiceService {
    pub fn new(invoice_repo: Arc<dyn InvoiceRepository>, billing: &BillingConfig) -> Self {
        Self {
            invoice_repo,
            calculator: TotalsCalculator::new(billing.currency, billing.discount_policy),
            default_tax: TaxSpec::new(billing.default_tax_rate),
            due_days: i64::from(billing.invoice_due_days),
        }
    }

    /// Compute totals for an unsaved form without persisting anything
    pub fn quote(&self, request: QuoteRequest) -> Result<QuoteResponse, AppError> {
        let (discount, tax) = self.resolve_terms(request.discount, request.tax);
        let totals = self
            .calculator
            .compose_totals(&request.line_items, &discount, &tax)?;
        let currency = self.calculator.currency();

        Ok(QuoteResponse {
            currency,
            formatted: totals.formatted(currency),
            totals,
        })
    }

    /// Create a draft invoice with computed totals
    pub async fn create_invoice(
        &self,
        request: CreateInvoiceRequest,
    ) -> Result<InvoiceResponse, AppError> {
        let mut invoice = Invoice::new_draft(
            request.client_id,
            request.child_name,
            request.therapist_id,
            self.calculator.currency(),
        )?;

        let (discount, tax) = self.resolve_terms(request.discount, request.tax);
        let totals = self.compute(&request.line_items, &discount, &tax)?;
        invoice.set_terms(request.line_items, discount, tax, totals)?;

        let saved = self.invoice_repo.save_invoice(&invoice).await?;
        tracing::info!(
            invoice_id = %saved.id,
            client_id = %saved.client_id,
            total = %saved.totals.total_amount,
            "Draft invoice created"
        );

        Ok(saved.into())
    }

    /// Get invoice by ID
    pub async fn get_invoice(&self, id: Uuid) -> Result<InvoiceResponse, AppError> {
        Ok(self.load(id).await?.into())
    }

    /// List invoices, optionally for one client and/or status
    pub async fn list_invoices(
        &self,
        filter: &InvoiceFilter,
    ) -> Result<Vec<InvoiceResponse>, AppError> {
        let invoices = self.invoice_repo.get_invoices(filter).await?;

        Ok(invoices.into_iter().map(InvoiceResponse::from).collect())
    }

    /// Replace the totals inputs of a draft and recompute its snapshot
    ///
    /// The draft check and the write happen in one repository step, so an
    /// edit racing an issue either lands before it or fails as frozen.
    pub async fn update_invoice(
        &self,
        id: Uuid,
        request: UpdateInvoiceRequest,
    ) -> Result<InvoiceResponse, AppError> {
        let (discount, tax) = self.resolve_terms(request.discount, request.tax);
        let totals = self.compute(&request.line_items, &discount, &tax)?;
        let line_items = request.line_items;

        let saved = self
            .invoice_repo
            .update_invoice(
                id,
                Box::new(move |invoice: &mut Invoice| {
                    invoice.set_terms(line_items, discount, tax, totals)
                }),
            )
            .await?;
        tracing::debug!(invoice_id = %id, total = %saved.totals.total_amount, "Draft totals recomputed");

        Ok(saved.into())
    }

    /// Issue a draft to the parent; totals are frozen from here on
    pub async fn issue_invoice(&self, id: Uuid) -> Result<InvoiceResponse, AppError> {
        let due_date = (Utc::now() + Duration::days(self.due_days)).date_naive();

        self.apply_transition(
            id,
            "Invoice issued",
            Box::new(move |invoice: &mut Invoice| -> Result<(), AppError> {
                invoice.transition(InvoiceStatus::Pending)?;
                invoice.due_date = Some(due_date);
                Ok(())
            }),
        )
        .await
    }

    /// Parent submits a payment reference for admin review
    pub async fn submit_payment(
        &self,
        id: Uuid,
        request: SubmitPaymentRequest,
    ) -> Result<InvoiceResponse, AppError> {
        let reference = request.payment_reference.trim().to_string();
        if reference.is_empty() {
            return Err(AppError::validation("Payment reference cannot be empty"));
        }

        self.apply_transition(
            id,
            "Payment submitted for review",
            Box::new(move |invoice: &mut Invoice| -> Result<(), AppError> {
                invoice.transition(InvoiceStatus::UnderReview)?;
                invoice.payment_reference = Some(reference);
                Ok(())
            }),
        )
        .await
    }

    /// Admin approves (paid) or rejects (back to pending) a submitted payment
    pub async fn review_payment(
        &self,
        id: Uuid,
        request: ReviewPaymentRequest,
    ) -> Result<InvoiceResponse, AppError> {
        self.apply_transition(
            id,
            "Payment reviewed",
            Box::new(move |invoice: &mut Invoice| -> Result<(), AppError> {
                match request.decision {
                    ReviewDecision::Approve => invoice.transition(InvoiceStatus::Paid)?,
                    ReviewDecision::Reject => {
                        invoice.transition(InvoiceStatus::Pending)?;
                        invoice.payment_reference = None;
                    }
                }
                invoice.review_note = request.note;
                Ok(())
            }),
        )
        .await
    }

    pub async fn cancel_invoice(&self, id: Uuid) -> Result<InvoiceResponse, AppError> {
        self.apply_transition(
            id,
            "Invoice cancelled",
            Box::new(|invoice: &mut Invoice| invoice.transition(InvoiceStatus::Cancelled)),
        )
        .await
    }

    async fn load(&self, id: Uuid) -> Result<Invoice, AppError> {
        self.invoice_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Invoice {}", id)))
    }

    async fn apply_transition(
        &self,
        id: Uuid,
        message: &'static str,
        update: InvoiceUpdate,
    ) -> Result<InvoiceResponse, AppError> {
        let saved = self.invoice_repo.update_invoice(id, update).await?;
        tracing::info!(invoice_id = %saved.id, status = %saved.status, "{}", message);

        Ok(saved.into())
    }

    fn compute(
        &self,
        items: &[LineItem],
        discount: &DiscountSpec,
        tax: &TaxSpec,
    ) -> Result<InvoiceTotals, AppError> {
        self.calculator
            .compose_totals(items, discount, tax)
            .inspect_err(|err| tracing::warn!(error = %err, "Invoice totals rejected"))
    }

    fn resolve_terms(
        &self,
        discount: Option<DiscountSpec>,
        tax: Option<TaxSpec>,
    ) -> (DiscountSpec, TaxSpec) {
        (
            discount.unwrap_or_default(),
            tax.unwrap_or(self.default_tax),
        )
    }
}
