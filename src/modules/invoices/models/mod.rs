mod invoice;
mod line_item;
mod requests;
mod totals;

pub use invoice::{Invoice, InvoiceStatus};
pub use line_item::{aggregate, LineItem};
pub use requests::{
    CreateInvoiceRequest, InvoiceResponse, QuoteRequest, QuoteResponse, ReviewDecision,
    ReviewPaymentRequest, SubmitPaymentRequest, UpdateInvoiceRequest,
};
pub use totals::{FormattedTotals, InvoiceTotals};
