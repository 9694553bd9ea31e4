//! Clinic Invoicing Library
//!
//! Invoice totals (subtotal, discount, tax, total) for a pediatric therapy
//! practice, plus the draft/issue/payment-review lifecycle around them.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

use actix_web::{
    error::{JsonPayloadError, PathError, QueryPayloadError},
    web, HttpRequest,
};

use crate::core::AppError;

// Re-export commonly used types
pub use modules::discounts;
pub use modules::invoices;
pub use modules::taxes;

/// Register every HTTP route
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(modules::health::controllers::configure)
        .configure(modules::invoices::controllers::configure);
}

/// Extractor configs so malformed bodies, query strings and path segments
/// are reported in the standard error shape
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config());
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(256 * 1024)
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
            AppError::Json(err.to_string()).into()
        })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        AppError::validation(err.to_string()).into()
    })
}

// An unparseable id cannot name any invoice
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err: PathError, req: &HttpRequest| {
        tracing::debug!(path = %req.path(), error = %err, "Unmatched path parameter");
        AppError::not_found(req.path().to_string()).into()
    })
}
