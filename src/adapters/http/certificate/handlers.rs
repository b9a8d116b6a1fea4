//! HTTP handlers for the certificate download endpoint.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::application::handlers::certificate::{IssueCertificateCommand, IssueCertificateHandler};
use crate::ports::{
    CertificateRenderer, ConfirmationStore, PaymentProvider, CERTIFICATE_CONTENT_TYPE,
};

use super::super::error::ApiError;

/// Shared state for the certificate endpoint.
#[derive(Clone)]
pub struct CertificateAppState {
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub confirmation_store: Arc<dyn ConfirmationStore>,
    pub certificate_renderer: Arc<dyn CertificateRenderer>,
}

impl CertificateAppState {
    pub fn issue_handler(&self) -> IssueCertificateHandler {
        IssueCertificateHandler::new(
            self.payment_provider.clone(),
            self.confirmation_store.clone(),
            self.certificate_renderer.clone(),
        )
    }
}

/// Query parameters for the certificate endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CertificateParams {
    pub session_id: String,
}

/// GET /certificate?session_id=... - Download the certificate for a paid session
///
/// Streams the rendered PDF with an attachment disposition; nothing is
/// persisted server-side. An unpaid session gets a 402, never a document.
pub async fn download_certificate(
    State(state): State<CertificateAppState>,
    Query(params): Query<CertificateParams>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.issue_handler();
    let cmd = IssueCertificateCommand {
        session_id: params.session_id,
    };

    let issued = handler.handle(cmd).await?;

    let headers = [
        (header::CONTENT_TYPE, CERTIFICATE_CONTENT_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", issued.filename),
        ),
    ];

    Ok((headers, issued.content))
}
