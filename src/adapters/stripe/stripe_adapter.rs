//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` trait against the Stripe Checkout API.
//! Handles one-shot payment-mode session creation, session retrieval, and
//! webhook verification.
//!
//! # Security
//!
//! - HMAC-SHA256 signature verification with constant-time comparison
//! - Timestamp validation (5-minute window) for replay attack prevention
//! - Secrets handled via `secrecy::SecretString`
//!
//! # Configuration
//!
//! ```ignore
//! let config = StripeConfig::new(api_key, Some(webhook_secret));
//! let adapter = StripeCheckoutAdapter::new(config);
//! ```

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::config::PaymentConfig;
use crate::ports::{
    CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentProvider, PaymentSession,
    PaymentSessionStatus, WebhookEvent, WebhookEventData, WebhookEventType,
};

use super::webhook_types::{
    hex_encode, SignatureHeader, StripeCheckoutSession, StripeWebhookEvent,
};

type HmacSha256 = Hmac<Sha256>;

/// Maximum age for webhook events (5 minutes).
const MAX_TIMESTAMP_AGE_SECS: i64 = 300;

/// Clock skew tolerance for future timestamps (60 seconds).
const MAX_FUTURE_TOLERANCE_SECS: i64 = 60;

/// Product name shown on the Stripe checkout page.
const PRODUCT_NAME: &str = "Certificado do Teste Lógico";

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Webhook signing secret (whsec_...). Absent when webhook
    /// verification is not configured.
    webhook_secret: Option<SecretString>,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,
}

impl StripeConfig {
    /// Create a new Stripe configuration.
    pub fn new(api_key: impl Into<String>, webhook_secret: Option<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            webhook_secret: webhook_secret.map(SecretString::new),
            api_base_url: "https://api.stripe.com".to_string(),
        }
    }

    /// Create configuration from the application's payment section.
    pub fn from_payment_config(payment: &PaymentConfig) -> Self {
        Self::new(
            payment.stripe_api_key.clone(),
            payment.stripe_webhook_secret.clone(),
        )
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

/// Stripe payment provider adapter.
///
/// Implements `PaymentProvider` for the Stripe Checkout API.
pub struct StripeCheckoutAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripeCheckoutAdapter {
    /// Create a new Stripe adapter with the given configuration.
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Verify webhook signature using HMAC-SHA256.
    ///
    /// # Security
    ///
    /// - Uses constant-time comparison to prevent timing attacks
    /// - Validates timestamp to prevent replay attacks
    fn verify_signature(
        &self,
        payload: &[u8],
        header: &SignatureHeader,
    ) -> Result<(), PaymentError> {
        let secret = self.config.webhook_secret.as_ref().ok_or_else(|| {
            PaymentError::authentication("No webhook signing secret configured")
        })?;

        // 1. Validate timestamp (prevent replay attacks)
        let now = chrono::Utc::now().timestamp();
        let age = now - header.timestamp;

        if age > MAX_TIMESTAMP_AGE_SECS {
            tracing::warn!(
                event_timestamp = header.timestamp,
                current_time = now,
                age_secs = age,
                "Webhook event too old - possible replay attack"
            );
            return Err(PaymentError::invalid_webhook(format!(
                "Event too old ({} seconds)",
                age
            )));
        }

        if age < -MAX_FUTURE_TOLERANCE_SECS {
            tracing::warn!(
                event_timestamp = header.timestamp,
                current_time = now,
                "Webhook event from future - clock skew or manipulation"
            );
            return Err(PaymentError::invalid_webhook("Event timestamp in future"));
        }

        // 2. Compute expected signature
        let signed_payload = format!(
            "{}.{}",
            header.timestamp,
            String::from_utf8_lossy(payload)
        );

        let mut mac = HmacSha256::new_from_slice(secret.expose_secret().as_bytes())
            .expect("HMAC can take key of any size");

        mac.update(signed_payload.as_bytes());
        let expected = mac.finalize().into_bytes();

        // 3. Constant-time comparison
        let expected_bytes: &[u8] = expected.as_slice();
        let provided_bytes: &[u8] = &header.v1_signature;

        if expected_bytes.ct_eq(provided_bytes).unwrap_u8() != 1 {
            tracing::warn!(
                expected_signature = hex_encode(expected_bytes),
                "Invalid webhook signature"
            );
            return Err(PaymentError::invalid_webhook("Invalid signature"));
        }

        Ok(())
    }

    /// Parse a Stripe event and convert to domain types.
    fn parse_event(&self, payload: &[u8]) -> Result<WebhookEvent, PaymentError> {
        let stripe_event: StripeWebhookEvent = serde_json::from_slice(payload).map_err(|e| {
            tracing::warn!(error = %e, "Failed to parse webhook payload");
            PaymentError::invalid_webhook(format!("Invalid JSON: {}", e))
        })?;

        let (event_type, data) = match stripe_event.event_type.as_str() {
            "checkout.session.completed" => {
                let session = self.parse_session_object(&stripe_event)?;
                (
                    WebhookEventType::CheckoutSessionCompleted,
                    WebhookEventData::Checkout {
                        session_id: session.id,
                    },
                )
            }
            "checkout.session.expired" => {
                let session = self.parse_session_object(&stripe_event)?;
                (
                    WebhookEventType::CheckoutSessionExpired,
                    WebhookEventData::Checkout {
                        session_id: session.id,
                    },
                )
            }
            other => (
                WebhookEventType::Unknown(other.to_string()),
                WebhookEventData::Raw {
                    json: serde_json::to_string(&stripe_event.data.object).unwrap_or_default(),
                },
            ),
        };

        Ok(WebhookEvent {
            id: stripe_event.id,
            event_type,
            data,
            created_at: stripe_event.created,
        })
    }

    fn parse_session_object(
        &self,
        event: &StripeWebhookEvent,
    ) -> Result<StripeCheckoutSession, PaymentError> {
        serde_json::from_value(event.data.object.clone()).map_err(|e| {
            PaymentError::invalid_webhook(format!("Invalid checkout session: {}", e))
        })
    }

    /// Map a Stripe checkout session object to the provider-agnostic view.
    ///
    /// `recipient_name` and `score` round-trip through session metadata;
    /// a missing or unparsable score maps to 0, matching how the metadata
    /// was written at session creation.
    fn to_payment_session(session: StripeCheckoutSession) -> PaymentSession {
        let status = if session.payment_status == "paid" {
            PaymentSessionStatus::Paid
        } else if session.status == "expired" {
            PaymentSessionStatus::Expired
        } else {
            PaymentSessionStatus::Open
        };

        let recipient_name = session
            .metadata
            .get("name")
            .cloned()
            .unwrap_or_default();
        let score = session
            .metadata
            .get("score")
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(0);

        PaymentSession {
            id: session.id,
            status,
            recipient_name,
            score,
            customer_email: session.customer_email,
        }
    }
}

#[async_trait]
impl PaymentProvider for StripeCheckoutAdapter {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        let params = vec![
            ("mode", "payment".to_string()),
            ("payment_method_types[0]", "card".to_string()),
            ("customer_email", request.email),
            (
                "line_items[0][price_data][currency]",
                request.currency.clone(),
            ),
            (
                "line_items[0][price_data][unit_amount]",
                request.amount_cents.to_string(),
            ),
            (
                "line_items[0][price_data][product_data][name]",
                PRODUCT_NAME.to_string(),
            ),
            (
                "line_items[0][price_data][product_data][description]",
                format!("Certificado com sua pontuação: {}", request.score),
            ),
            ("line_items[0][quantity]", "1".to_string()),
            ("success_url", request.success_url),
            ("cancel_url", request.cancel_url),
            ("metadata[name]", request.name),
            ("metadata[score]", request.score.to_string()),
        ];

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(error = %error_text, "Stripe create_checkout_session failed");
            return Err(PaymentError::provider(format!(
                "Stripe API error: {}",
                error_text
            )));
        }

        let stripe_session: StripeCheckoutSession = response.json().await.map_err(|e| {
            PaymentError::provider(format!("Failed to parse Stripe response: {}", e))
        })?;

        // The hosted page URL is present on freshly created sessions; the
        // fallback only covers responses from older API versions.
        let url = stripe_session.url.unwrap_or_else(|| {
            format!("https://checkout.stripe.com/c/pay/{}", &stripe_session.id)
        });

        Ok(CheckoutSession {
            id: stripe_session.id,
            url,
        })
    }

    async fn retrieve_session(
        &self,
        session_id: &str,
    ) -> Result<Option<PaymentSession>, PaymentError> {
        let url = format!(
            "{}/v1/checkout/sessions/{}",
            self.config.api_base_url, session_id
        );

        let response = self
            .http_client
            .get(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PaymentError::provider(format!(
                "Stripe API error: {}",
                error_text
            )));
        }

        let stripe_session: StripeCheckoutSession = response.json().await.map_err(|e| {
            PaymentError::provider(format!("Failed to parse Stripe response: {}", e))
        })?;

        Ok(Some(Self::to_payment_session(stripe_session)))
    }

    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, PaymentError> {
        // 1. Parse signature header
        let header = SignatureHeader::parse(signature).map_err(|e| {
            tracing::warn!(error = %e, "Failed to parse Stripe-Signature header");
            PaymentError::invalid_webhook(e.to_string())
        })?;

        // 2. Verify signature (includes timestamp validation)
        self.verify_signature(payload, &header)?;

        // 3. Parse and convert event
        let webhook_event = self.parse_event(payload)?;

        tracing::info!(
            event_id = %webhook_event.id,
            event_type = ?webhook_event.event_type,
            "Webhook signature verified"
        );

        Ok(webhook_event)
    }
}
