//! QuizCert service binary.
//!
//! Loads and validates configuration, wires the adapters behind their
//! ports, and serves the HTTP API.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use quizcert::adapters::confirmation::InMemoryConfirmationStore;
use quizcert::adapters::http::{api_router, CertificateAppState, CheckoutAppState};
use quizcert::adapters::pdf::PrintpdfCertificateRenderer;
use quizcert::adapters::stripe::{StripeCheckoutAdapter, StripeConfig};
use quizcert::application::handlers::checkout::CheckoutSettings;
use quizcert::config::AppConfig;
use quizcert::ports::{CertificateRenderer, ConfirmationStore, PaymentProvider};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    if !config.payment.webhook_verification_enabled() {
        tracing::warn!(
            "No webhook signing secret configured; webhook deliveries will be \
             acknowledged unverified and payment confirmation relies on polling"
        );
    }

    // Wire adapters behind their ports
    let payment_provider: Arc<dyn PaymentProvider> = Arc::new(StripeCheckoutAdapter::new(
        StripeConfig::from_payment_config(&config.payment),
    ));
    let confirmation_store: Arc<dyn ConfirmationStore> =
        Arc::new(InMemoryConfirmationStore::new());
    let certificate_renderer: Arc<dyn CertificateRenderer> = Arc::new(
        PrintpdfCertificateRenderer::new(config.certificate.organization.clone()),
    );

    let checkout_state = CheckoutAppState {
        payment_provider: payment_provider.clone(),
        confirmation_store: confirmation_store.clone(),
        settings: CheckoutSettings {
            amount_cents: config.payment.certificate_price_cents,
            currency: config.payment.currency.clone(),
            public_base_url: config.server.public_base_url(),
        },
        verify_webhook_signatures: config.payment.webhook_verification_enabled(),
    };
    let certificate_state = CertificateAppState {
        payment_provider,
        confirmation_store,
        certificate_renderer,
    };

    let app = api_router(checkout_state, certificate_state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config)?);

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        public_base_url = %config.server.public_base_url(),
        test_mode = config.payment.is_test_mode(),
        "QuizCert listening"
    );

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn cors_layer(config: &AppConfig) -> Result<CorsLayer, Box<dyn std::error::Error>> {
    let origins = config.server.cors_origins_list();
    if origins.is_empty() {
        // Development default; production deployments configure explicit origins
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let origins = origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any))
}
