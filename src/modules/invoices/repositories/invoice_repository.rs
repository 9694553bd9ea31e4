// Invoice storage seam. The service depends only on the trait; the in-memory
// implementation backs the HTTP server and the test suite.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::invoices::models::{Invoice, InvoiceStatus};

/// Filters for listing invoices
#[derive(Debug, Clone, Default)]
pub struct InvoiceFilter {
    pub client_id: Option<String>,
    pub status: Option<InvoiceStatus>,
}

impl InvoiceFilter {
    fn matches(&self, invoice: &Invoice) -> bool {
        self.client_id
            .as_deref()
            .map_or(true, |client_id| invoice.client_id == client_id)
            && self.status.map_or(true, |status| invoice.status == status)
    }
}

/// In-place change to a stored invoice, run by `update_invoice`
pub type InvoiceUpdate = Box<dyn FnOnce(&mut Invoice) -> Result<()> + Send>;

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// List invoices matching the filter, newest first
    async fn get_invoices(&self, filter: &InvoiceFilter) -> Result<Vec<Invoice>>;

    /// Find invoice by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>>;

    /// Insert or replace the whole invoice record
    async fn save_invoice(&self, invoice: &Invoice) -> Result<Invoice>;

    /// Load, change and store one invoice as a single step.
    ///
    /// Updates to the same invoice never interleave. If `update` fails the
    /// stored record is left as it was.
    async fn update_invoice(&self, id: Uuid, update: InvoiceUpdate) -> Result<Invoice>;
}

/// Repository backed by a process-local map
#[derive(Debug, Default)]
pub struct InMemoryInvoiceRepository {
    invoices: RwLock<HashMap<Uuid, Invoice>>,
}

impl InMemoryInvoiceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
    async fn get_invoices(&self, filter: &InvoiceFilter) -> Result<Vec<Invoice>> {
        let invoices = self.invoices.read().await;

        let mut matching: Vec<Invoice> = invoices
            .values()
            .filter(|invoice| filter.matches(invoice))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        Ok(matching)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>> {
        Ok(self.invoices.read().await.get(&id).cloned())
    }

    async fn save_invoice(&self, invoice: &Invoice) -> Result<Invoice> {
        self.invoices
            .write()
            .await
            .insert(invoice.id, invoice.clone());

        Ok(invoice.clone())
    }

    async fn update_invoice(&self, id: Uuid, update: InvoiceUpdate) -> Result<Invoice> {
        let mut invoices = self.invoices.write().await;

        let mut invoice = invoices
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Invoice {}", id)))?;
        update(&mut invoice)?;
        invoices.insert(id, invoice.clone());

        Ok(invoice)
    }
}
