pub mod invoice_service;
pub mod totals_calculator;

pub use invoice_service::InvoiceService;
pub use totals_calculator::TotalsCalculator;
