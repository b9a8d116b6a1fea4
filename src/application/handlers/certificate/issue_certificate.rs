//! IssueCertificateHandler - Command handler for rendering a paid session's certificate.

use std::sync::Arc;

use crate::domain::certificate::Certificate;
use crate::domain::checkout::CheckoutError;
use crate::ports::{CertificateRenderer, ConfirmationStore, PaymentProvider};

/// Fallback recipient when the session metadata carries no name.
const DEFAULT_RECIPIENT: &str = "Participante";

/// Command to issue a certificate for a session.
#[derive(Debug, Clone)]
pub struct IssueCertificateCommand {
    pub session_id: String,
}

/// A freshly rendered certificate ready for download.
#[derive(Debug, Clone)]
pub struct IssuedCertificate {
    pub content: Vec<u8>,
    pub filename: String,
}

/// Handler for the certificate download, the single authorization gate of
/// the whole flow.
///
/// Paid status is re-derived on every call: the confirmation cache is
/// checked first, then the provider's live state. The double path exists
/// because the cache may be empty when the webhook never arrived and this
/// request is the first to discover payment completion. A client-supplied
/// "I paid" claim is never trusted; an id without genuine provider-confirmed
/// payment cannot pass this gate.
///
/// The session is always retrieved from the provider because the
/// certificate's recipient and score live in its metadata. The rendered
/// document is regenerated per request and never persisted.
pub struct IssueCertificateHandler {
    payment_provider: Arc<dyn PaymentProvider>,
    confirmation_store: Arc<dyn ConfirmationStore>,
    certificate_renderer: Arc<dyn CertificateRenderer>,
}

impl IssueCertificateHandler {
    pub fn new(
        payment_provider: Arc<dyn PaymentProvider>,
        confirmation_store: Arc<dyn ConfirmationStore>,
        certificate_renderer: Arc<dyn CertificateRenderer>,
    ) -> Self {
        Self {
            payment_provider,
            confirmation_store,
            certificate_renderer,
        }
    }

    pub async fn handle(
        &self,
        cmd: IssueCertificateCommand,
    ) -> Result<IssuedCertificate, CheckoutError> {
        let session = self
            .payment_provider
            .retrieve_session(&cmd.session_id)
            .await
            .map_err(|e| CheckoutError::provider_failed(e.to_string(), e.retryable))?
            .ok_or_else(|| CheckoutError::session_not_found(&cmd.session_id))?;

        let cached = self
            .confirmation_store
            .is_paid(&cmd.session_id)
            .await
            .map_err(|e| CheckoutError::infrastructure(e.to_string()))?;

        if !cached && !session.is_paid() {
            tracing::info!(session_id = %cmd.session_id, "Certificate refused: payment not confirmed");
            return Err(CheckoutError::payment_not_confirmed(&cmd.session_id));
        }

        if !cached && session.is_paid() {
            // First caller to observe completion back-fills the cache
            self.confirmation_store
                .mark_paid(&cmd.session_id)
                .await
                .map_err(|e| CheckoutError::infrastructure(e.to_string()))?;
        }

        let recipient = if session.recipient_name.is_empty() {
            DEFAULT_RECIPIENT.to_string()
        } else {
            session.recipient_name
        };

        let certificate = Certificate::new(
            recipient,
            session.score,
            chrono::Local::now().date_naive(),
        );

        let content = self
            .certificate_renderer
            .render(&certificate)
            .await
            .map_err(|e| CheckoutError::infrastructure(e.to_string()))?;

        tracing::info!(session_id = %cmd.session_id, "Certificate issued");

        Ok(IssuedCertificate {
            content,
            filename: Certificate::filename(&cmd.session_id),
        })
    }
}
