// Invoices module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Invoice, InvoiceStatus, InvoiceTotals, LineItem};
pub use repositories::{InMemoryInvoiceRepository, InvoiceRepository};
pub use services::{InvoiceService, TotalsCalculator};
