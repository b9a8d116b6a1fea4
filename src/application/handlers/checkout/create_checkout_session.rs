//! CreateCheckoutSessionHandler - Command handler for starting a paid checkout.

use std::sync::Arc;

use crate::domain::checkout::{CheckoutError, Submission};
use crate::ports::{CreateCheckoutRequest, PaymentProvider};

/// Command to create a checkout session from raw client input.
#[derive(Debug, Clone)]
pub struct CreateCheckoutSessionCommand {
    pub name: String,
    pub email: String,
    /// Raw score as submitted; validated into a non-negative integer.
    pub score: i64,
}

/// Result of a successful checkout session creation.
#[derive(Debug, Clone)]
pub struct CheckoutSessionCreated {
    pub session_id: String,
    /// The provider-hosted payment page the client is redirected to.
    pub url: String,
}

/// Pricing and redirect policy for checkout sessions.
///
/// The success URL carries the provider's session-id placeholder, which the
/// provider substitutes at redirect time; the cancel path has no
/// parameters and no side effects.
#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    pub amount_cents: u32,
    pub currency: String,
    pub public_base_url: String,
}

impl CheckoutSettings {
    pub fn success_url(&self) -> String {
        format!(
            "{}/success.html?session_id={{CHECKOUT_SESSION_ID}}",
            self.public_base_url
        )
    }

    pub fn cancel_url(&self) -> String {
        format!("{}/index.html#pagamento-cancelado", self.public_base_url)
    }
}

/// Handler for creating payment sessions.
///
/// Validates the submission first so that garbage input never costs a
/// provider API call, then creates one remote session per call. The
/// operation is deliberately not idempotent: resubmitting after a failure
/// is safe because every attempt creates an independent session.
pub struct CreateCheckoutSessionHandler {
    payment_provider: Arc<dyn PaymentProvider>,
    settings: CheckoutSettings,
}

impl CreateCheckoutSessionHandler {
    pub fn new(payment_provider: Arc<dyn PaymentProvider>, settings: CheckoutSettings) -> Self {
        Self {
            payment_provider,
            settings,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateCheckoutSessionCommand,
    ) -> Result<CheckoutSessionCreated, CheckoutError> {
        // 1. Validate before any side effect
        let submission = Submission::parse(&cmd.name, &cmd.email, cmd.score)?;

        // 2. Create the remote session, folding the submission into its
        //    metadata (the only durable record of the submission)
        let session = self
            .payment_provider
            .create_checkout_session(CreateCheckoutRequest {
                name: submission.name().to_string(),
                score: submission.score(),
                email: submission.email().to_string(),
                amount_cents: self.settings.amount_cents,
                currency: self.settings.currency.clone(),
                success_url: self.settings.success_url(),
                cancel_url: self.settings.cancel_url(),
            })
            .await
            .map_err(|e| CheckoutError::provider_failed(e.to_string(), e.retryable))?;

        tracing::info!(session_id = %session.id, score = submission.score(), "Checkout session created");

        Ok(CheckoutSessionCreated {
            session_id: session.id,
            url: session.url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::stripe::MockPaymentProvider;
    use crate::ports::PaymentError;

    fn test_settings() -> CheckoutSettings {
        CheckoutSettings {
            amount_cents: 400,
            currency: "brl".to_string(),
            public_base_url: "http://localhost:4242".to_string(),
        }
    }

    fn command(name: &str, email: &str, score: i64) -> CreateCheckoutSessionCommand {
        CreateCheckoutSessionCommand {
            name: name.to_string(),
            email: email.to_string(),
            score,
        }
    }

    #[test]
    fn settings_build_redirect_urls() {
        let settings = test_settings();
        assert_eq!(
            settings.success_url(),
            "http://localhost:4242/success.html?session_id={CHECKOUT_SESSION_ID}"
        );
        assert_eq!(
            settings.cancel_url(),
            "http://localhost:4242/index.html#pagamento-cancelado"
        );
    }

    #[tokio::test]
    async fn valid_submission_creates_session() {
        let provider = Arc::new(MockPaymentProvider::new());
        let handler = CreateCheckoutSessionHandler::new(provider.clone(), test_settings());

        let result = handler.handle(command("Ana", "ana@x.com", 3)).await.unwrap();

        assert!(!result.url.is_empty());
        assert_eq!(provider.call_count("create_checkout_session"), 1);
    }

    #[tokio::test]
    async fn invalid_submission_never_reaches_provider() {
        let provider = Arc::new(MockPaymentProvider::new());
        let handler = CreateCheckoutSessionHandler::new(provider.clone(), test_settings());

        let result = handler.handle(command("Ana", "ana@x.com", -1)).await;

        assert!(matches!(
            result,
            Err(CheckoutError::ValidationFailed { ref field, .. }) if field == "score"
        ));
        assert!(!provider.was_called("create_checkout_session"));
    }

    #[tokio::test]
    async fn empty_name_is_rejected() {
        let provider = Arc::new(MockPaymentProvider::new());
        let handler = CreateCheckoutSessionHandler::new(provider.clone(), test_settings());

        let result = handler.handle(command("   ", "ana@x.com", 3)).await;

        assert!(matches!(
            result,
            Err(CheckoutError::ValidationFailed { ref field, .. }) if field == "name"
        ));
        assert!(!provider.was_called("create_checkout_session"));
    }

    #[tokio::test]
    async fn provider_failure_surfaces_as_provider_error() {
        let provider = Arc::new(MockPaymentProvider::new());
        provider.set_error(PaymentError::network("connection refused"));
        let handler = CreateCheckoutSessionHandler::new(provider, test_settings());

        let result = handler.handle(command("Ana", "ana@x.com", 3)).await;

        match result {
            Err(CheckoutError::PaymentProviderFailed { reason, retryable }) => {
                assert!(reason.contains("connection refused"));
                assert!(retryable);
            }
            other => panic!("Expected provider error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn repeated_submissions_create_distinct_sessions() {
        let provider = Arc::new(MockPaymentProvider::new());
        let handler = CreateCheckoutSessionHandler::new(provider.clone(), test_settings());

        let first = handler.handle(command("Ana", "ana@x.com", 3)).await.unwrap();
        let second = handler.handle(command("Ana", "ana@x.com", 3)).await.unwrap();

        assert_ne!(first.session_id, second.session_id);
        assert_eq!(provider.call_count("create_checkout_session"), 2);
    }
}
