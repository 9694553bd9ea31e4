use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use clinic_invoicing::config::{Config, LogFormat};
use clinic_invoicing::invoices::{InMemoryInvoiceRepository, InvoiceService};
use clinic_invoicing::middleware::RequestId;
use clinic_invoicing::{configure_extractors, configure_routes};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "clinic_invoicing={},actix_web=info",
            config.app.log_level
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    match config.app.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config
        .validate()
        .context("Configuration validation failed")?;

    init_tracing(&config);

    tracing::info!("Starting clinic invoicing service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!(
        currency = %config.billing.currency,
        discount_policy = ?config.billing.discount_policy,
        default_tax_rate = %config.billing.default_tax_rate,
        "Billing rules loaded"
    );

    let repository = Arc::new(InMemoryInvoiceRepository::new());
    let service = Arc::new(InvoiceService::new(repository, &config.billing));

    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(RequestId)
            .app_data(web::Data::new(service.clone()))
            .configure(configure_extractors)
            .configure(configure_routes)
    })
    .workers(config.server.workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await.context("Server terminated with an error")
}
