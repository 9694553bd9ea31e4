use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main application error type
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum AppError {
    /// Line item quantity, unit price or description rejected
    #[error("Invalid line item: {0}")]
    InvalidLineItem(String),

    /// Discount percentage outside [0, 100] or negative fixed amount
    #[error("Invalid discount: {0}")]
    InvalidDiscount(String),

    /// Negative tax rate
    #[error("Invalid tax rate: {0}")]
    InvalidTaxRate(String),

    /// Discount larger than the subtotal under the reject policy
    #[error("Negative taxable amount: discount {discount} exceeds subtotal {subtotal}")]
    NegativeTaxableAmount {
        subtotal: rust_decimal::Decimal,
        discount: rust_decimal::Decimal,
    },

    /// Amount too large to represent while composing totals
    #[error("Amount overflow: {0}")]
    AmountOverflow(String),

    /// Validation errors for business rules
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Totals inputs edited after the invoice left draft
    #[error("Invoice {0} is no longer a draft and cannot be edited")]
    InvoiceFrozen(String),

    /// Lifecycle transition not allowed from the current status
    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Json(err.to_string())
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();

        HttpResponse::build(status_code).json(serde_json::json!({
            "error": {
                "code": status_code.as_u16(),
                "kind": self.kind(),
                "message": self.to_string(),
            }
        }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidLineItem(_)
            | AppError::InvalidDiscount(_)
            | AppError::InvalidTaxRate(_)
            | AppError::NegativeTaxableAmount { .. }
            | AppError::AmountOverflow(_)
            | AppError::Validation(_)
            | AppError::Json(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvoiceFrozen(_) | AppError::InvalidStatusTransition { .. } => {
                StatusCode::CONFLICT
            }
            AppError::Configuration(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// Helper functions for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFound(resource.into())
    }

    pub fn overflow(operation: impl Into<String>) -> Self {
        AppError::AmountOverflow(operation.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Stable machine-readable kind, used in JSON error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::InvalidLineItem(_) => "invalid_line_item",
            AppError::InvalidDiscount(_) => "invalid_discount",
            AppError::InvalidTaxRate(_) => "invalid_tax_rate",
            AppError::NegativeTaxableAmount { .. } => "negative_taxable_amount",
            AppError::AmountOverflow(_) => "amount_overflow",
            AppError::Validation(_) => "validation",
            AppError::NotFound(_) => "not_found",
            AppError::InvoiceFrozen(_) => "invoice_frozen",
            AppError::InvalidStatusTransition { .. } => "invalid_status_transition",
            AppError::Configuration(_) => "configuration",
            AppError::Json(_) => "json",
            AppError::Internal(_) => "internal",
        }
    }
}
