use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::core::error::AppError;
use crate::modules::invoices::models::{
    CreateInvoiceRequest, InvoiceStatus, QuoteRequest, ReviewPaymentRequest,
    SubmitPaymentRequest, UpdateInvoiceRequest,
};
use crate::modules::invoices::repositories::InvoiceFilter;
use crate::modules::invoices::services::InvoiceService;

/// Query parameters for listing invoices
#[derive(Debug, Deserialize)]
pub struct ListInvoicesQuery {
    pub client_id: Option<String>,
    pub status: Option<InvoiceStatus>,
}

/// Preview totals for an invoice form
/// POST /invoices/quote
pub async fn quote_invoice(
    service: web::Data<Arc<InvoiceService>>,
    request: web::Json<QuoteRequest>,
) -> Result<HttpResponse, AppError> {
    let quote = service.quote(request.into_inner())?;

    Ok(HttpResponse::Ok().json(quote))
}

/// Create a draft invoice
/// POST /invoices
pub async fn create_invoice(
    service: web::Data<Arc<InvoiceService>>,
    request: web::Json<CreateInvoiceRequest>,
) -> Result<HttpResponse, AppError> {
    let invoice = service.create_invoice(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(invoice))
}

/// GET /invoices
pub async fn list_invoices(
    service: web::Data<Arc<InvoiceService>>,
    query: web::Query<ListInvoicesQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let filter = InvoiceFilter {
        client_id: query.client_id,
        status: query.status,
    };
    let invoices = service.list_invoices(&filter).await?;

    Ok(HttpResponse::Ok().json(invoices))
}

/// GET /invoices/{id}
pub async fn get_invoice(
    service: web::Data<Arc<InvoiceService>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let invoice = service.get_invoice(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(invoice))
}

/// Replace draft line items, discount and tax
/// PUT /invoices/{id}
pub async fn update_invoice(
    service: web::Data<Arc<InvoiceService>>,
    path: web::Path<Uuid>,
    request: web::Json<UpdateInvoiceRequest>,
) -> Result<HttpResponse, AppError> {
    let invoice = service
        .update_invoice(path.into_inner(), request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(invoice))
}

/// POST /invoices/{id}/issue
pub async fn issue_invoice(
    service: web::Data<Arc<InvoiceService>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let invoice = service.issue_invoice(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(invoice))
}

/// Parent payment submission
/// POST /invoices/{id}/payment
pub async fn submit_payment(
    service: web::Data<Arc<InvoiceService>>,
    path: web::Path<Uuid>,
    request: web::Json<SubmitPaymentRequest>,
) -> Result<HttpResponse, AppError> {
    let invoice = service
        .submit_payment(path.into_inner(), request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(invoice))
}

/// Admin payment review
/// POST /invoices/{id}/review
pub async fn review_payment(
    service: web::Data<Arc<InvoiceService>>,
    path: web::Path<Uuid>,
    request: web::Json<ReviewPaymentRequest>,
) -> Result<HttpResponse, AppError> {
    let invoice = service
        .review_payment(path.into_inner(), request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(invoice))
}

/// POST /invoices/{id}/cancel
pub async fn cancel_invoice(
    service: web::Data<Arc<InvoiceService>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let invoice = service.cancel_invoice(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(invoice))
}

/// Configure invoice routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/invoices")
            .route("", web::post().to(create_invoice))
            .route("", web::get().to(list_invoices))
            .route("/quote", web::post().to(quote_invoice))
            .route("/{id}", web::get().to(get_invoice))
            .route("/{id}", web::put().to(update_invoice))
            .route("/{id}/issue", web::post().to(issue_invoice))
            .route("/{id}/payment", web::post().to(submit_payment))
            .route("/{id}/review", web::post().to(review_payment))
            .route("/{id}/cancel", web::post().to(cancel_invoice)),
    );
}
