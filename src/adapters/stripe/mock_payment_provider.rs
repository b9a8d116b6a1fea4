//! Mock payment provider for testing.
//!
//! Provides a configurable mock implementation of `PaymentProvider` for unit
//! and integration tests. Supports:
//! - In-memory session state with pay/expire transitions
//! - Error injection
//! - Call tracking
//! - Webhook event simulation

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{
    CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentProvider, PaymentSession,
    PaymentSessionStatus, WebhookEvent, WebhookEventData, WebhookEventType,
};

/// Mock payment provider for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentProvider::new();
///
/// // Drive the session lifecycle
/// let session = mock.create_checkout_session(request).await?;
/// mock.mark_session_paid(&session.id);
///
/// // Inject errors
/// mock.set_error(PaymentError::network("Test outage"));
/// ```
#[derive(Default)]
pub struct MockPaymentProvider {
    /// Inner state (thread-safe for async tests).
    inner: Arc<Mutex<MockState>>,
}

/// Internal mutable state.
#[derive(Default)]
struct MockState {
    /// Sessions by id, in provider-visible form.
    sessions: HashMap<String, PaymentSession>,

    /// Next checkout session to return.
    next_checkout: Option<CheckoutSession>,

    /// Next webhook event to return.
    next_webhook_event: Option<WebhookEvent>,

    /// Error to return on next call.
    next_error: Option<PaymentError>,

    /// Specific errors by method name.
    method_errors: HashMap<String, PaymentError>,

    /// Track method calls for assertions.
    call_log: Vec<MethodCall>,

    /// Webhook verification behavior.
    webhook_verify_mode: WebhookVerifyMode,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

/// How to handle webhook verification.
#[derive(Default, Clone)]
enum WebhookVerifyMode {
    /// Accept any payload and return configured event.
    #[default]
    AcceptAll,

    /// Always fail verification.
    AlwaysFail,
}

impl MockPaymentProvider {
    /// Create a new mock provider with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that fails all webhook verifications.
    pub fn rejecting_webhooks() -> Self {
        let mock = Self::new();
        mock.inner.lock().unwrap().webhook_verify_mode = WebhookVerifyMode::AlwaysFail;
        mock
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Add a session to the "provider database".
    pub fn add_session(&self, session: PaymentSession) {
        let id = session.id.clone();
        self.inner.lock().unwrap().sessions.insert(id, session);
    }

    /// Transition an existing session to paid (simulating the provider).
    ///
    /// Does nothing if the session does not exist.
    pub fn mark_session_paid(&self, session_id: &str) {
        if let Some(session) = self.inner.lock().unwrap().sessions.get_mut(session_id) {
            session.status = PaymentSessionStatus::Paid;
        }
    }

    /// Set the checkout session to return on the next create call.
    pub fn set_checkout_session(&self, session: CheckoutSession) {
        self.inner.lock().unwrap().next_checkout = Some(session);
    }

    /// Set the webhook event to return on verification.
    pub fn set_webhook_event(&self, event: WebhookEvent) {
        self.inner.lock().unwrap().next_webhook_event = Some(event);
    }

    /// Set an error to return on the next call to any method.
    pub fn set_error(&self, error: PaymentError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    /// Set an error for a specific method.
    pub fn set_method_error(&self, method: &str, error: PaymentError) {
        self.inner
            .lock()
            .unwrap()
            .method_errors
            .insert(method.to_string(), error);
    }

    /// Clear all configured errors.
    pub fn clear_errors(&self) {
        let mut state = self.inner.lock().unwrap();
        state.next_error = None;
        state.method_errors.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    /// Get all recorded method calls.
    pub fn calls(&self) -> Vec<MethodCall> {
        self.inner.lock().unwrap().call_log.clone()
    }

    /// Check if a method was called.
    pub fn was_called(&self, method: &str) -> bool {
        self.inner
            .lock()
            .unwrap()
            .call_log
            .iter()
            .any(|c| c.method == method)
    }

    /// Get count of calls to a method.
    pub fn call_count(&self, method: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    /// Clear the call log.
    pub fn clear_calls(&self) {
        self.inner.lock().unwrap().call_log.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Internal Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn record_call(&self, method: &str, args: Vec<String>) {
        self.inner.lock().unwrap().call_log.push(MethodCall {
            method: method.to_string(),
            args,
        });
    }

    fn check_error(&self, method: &str) -> Result<(), PaymentError> {
        let mut state = self.inner.lock().unwrap();

        // Check method-specific error first
        if let Some(error) = state.method_errors.get(method) {
            return Err(error.clone());
        }

        // Check global error (consumes it)
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        Ok(())
    }
}

impl Clone for MockPaymentProvider {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        self.record_call(
            "create_checkout_session",
            vec![
                request.name.clone(),
                request.email.clone(),
                request.score.to_string(),
            ],
        );
        self.check_error("create_checkout_session")?;

        let mut state = self.inner.lock().unwrap();

        let checkout = state.next_checkout.take().unwrap_or_else(|| {
            let id = format!(
                "cs_mock_{}",
                uuid::Uuid::new_v4().to_string().split('-').next().unwrap()
            );
            CheckoutSession {
                id: id.clone(),
                url: format!("https://checkout.stripe.com/c/pay/{}", id),
            }
        });

        // Store the session as the provider would see it
        state.sessions.insert(
            checkout.id.clone(),
            PaymentSession {
                id: checkout.id.clone(),
                status: PaymentSessionStatus::Open,
                recipient_name: request.name,
                score: request.score,
                customer_email: Some(request.email),
            },
        );

        Ok(checkout)
    }

    async fn retrieve_session(
        &self,
        session_id: &str,
    ) -> Result<Option<PaymentSession>, PaymentError> {
        self.record_call("retrieve_session", vec![session_id.to_string()]);
        self.check_error("retrieve_session")?;

        let state = self.inner.lock().unwrap();
        Ok(state.sessions.get(session_id).cloned())
    }

    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, PaymentError> {
        self.record_call(
            "verify_webhook",
            vec![
                String::from_utf8_lossy(payload).chars().take(50).collect(),
                signature.chars().take(20).collect(),
            ],
        );
        self.check_error("verify_webhook")?;

        let state = self.inner.lock().unwrap();

        match &state.webhook_verify_mode {
            WebhookVerifyMode::AcceptAll => {}
            WebhookVerifyMode::AlwaysFail => {
                return Err(PaymentError::invalid_webhook("Verification disabled"));
            }
        }

        // Return configured event or parse from payload
        if let Some(event) = &state.next_webhook_event {
            return Ok(event.clone());
        }

        // Try to parse the payload and create a default event
        let parsed: serde_json::Value = serde_json::from_slice(payload)
            .map_err(|e| PaymentError::invalid_webhook(e.to_string()))?;

        let id = parsed["id"].as_str().unwrap_or("evt_mock").to_string();
        let event_type = parsed["type"].as_str().unwrap_or("unknown");
        let created = parsed["created"]
            .as_i64()
            .unwrap_or_else(|| chrono::Utc::now().timestamp());

        let session_id = parsed["data"]["object"]["id"]
            .as_str()
            .unwrap_or_default()
            .to_string();

        let (webhook_event_type, data) = match event_type {
            "checkout.session.completed" => (
                WebhookEventType::CheckoutSessionCompleted,
                WebhookEventData::Checkout { session_id },
            ),
            "checkout.session.expired" => (
                WebhookEventType::CheckoutSessionExpired,
                WebhookEventData::Checkout { session_id },
            ),
            other => (
                WebhookEventType::Unknown(other.to_string()),
                WebhookEventData::Raw {
                    json: String::from_utf8_lossy(payload).to_string(),
                },
            ),
        };

        Ok(WebhookEvent {
            id,
            event_type: webhook_event_type,
            data,
            created_at: created,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Test Helpers
// ════════════════════════════════════════════════════════════════════════════════

impl MockPaymentProvider {
    /// Create a mock with a pre-configured open session.
    pub fn with_open_session(session_id: &str, name: &str, score: u32) -> Self {
        let mock = Self::new();
        mock.add_session(PaymentSession {
            id: session_id.to_string(),
            status: PaymentSessionStatus::Open,
            recipient_name: name.to_string(),
            score,
            customer_email: Some("test@example.com".to_string()),
        });
        mock
    }

    /// Create a mock with a pre-configured paid session.
    pub fn with_paid_session(session_id: &str, name: &str, score: u32) -> Self {
        let mock = Self::with_open_session(session_id, name, score);
        mock.mark_session_paid(session_id);
        mock
    }

    /// Create a checkout completed webhook event.
    pub fn checkout_completed_event(session_id: &str) -> WebhookEvent {
        WebhookEvent {
            id: format!("evt_checkout_{}", uuid::Uuid::new_v4()),
            event_type: WebhookEventType::CheckoutSessionCompleted,
            data: WebhookEventData::Checkout {
                session_id: session_id.to_string(),
            },
            created_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Create a checkout expired webhook event.
    pub fn checkout_expired_event(session_id: &str) -> WebhookEvent {
        WebhookEvent {
            id: format!("evt_expired_{}", uuid::Uuid::new_v4()),
            event_type: WebhookEventType::CheckoutSessionExpired,
            data: WebhookEventData::Checkout {
                session_id: session_id.to_string(),
            },
            created_at: chrono::Utc::now().timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::PaymentErrorCode;

    fn test_request() -> CreateCheckoutRequest {
        CreateCheckoutRequest {
            name: "Ana".to_string(),
            score: 3,
            email: "ana@x.com".to_string(),
            amount_cents: 400,
            currency: "brl".to_string(),
            success_url: "https://example.com/success.html?session_id={CHECKOUT_SESSION_ID}"
                .to_string(),
            cancel_url: "https://example.com/index.html#pagamento-cancelado".to_string(),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Basic Operation Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn create_checkout_session_returns_mock_session() {
        let mock = MockPaymentProvider::new();

        let result = mock.create_checkout_session(test_request()).await;

        assert!(result.is_ok());
        let session = result.unwrap();
        assert!(session.id.starts_with("cs_mock_"));
        assert!(session.url.contains(&session.id));
    }

    #[tokio::test]
    async fn retrieve_session_after_create() {
        let mock = MockPaymentProvider::new();

        let created = mock.create_checkout_session(test_request()).await.unwrap();

        let fetched = mock.retrieve_session(&created.id).await.unwrap();
        assert!(fetched.is_some());

        let session = fetched.unwrap();
        assert_eq!(session.id, created.id);
        assert_eq!(session.status, PaymentSessionStatus::Open);
        assert_eq!(session.recipient_name, "Ana");
        assert_eq!(session.score, 3);
        assert_eq!(session.customer_email, Some("ana@x.com".to_string()));
    }

    #[tokio::test]
    async fn retrieve_session_not_found() {
        let mock = MockPaymentProvider::new();
        let result = mock.retrieve_session("cs_nonexistent").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn mark_session_paid_transitions_status() {
        let mock = MockPaymentProvider::new();
        let created = mock.create_checkout_session(test_request()).await.unwrap();

        mock.mark_session_paid(&created.id);

        let session = mock.retrieve_session(&created.id).await.unwrap().unwrap();
        assert!(session.is_paid());
    }

    #[tokio::test]
    async fn repeated_creates_produce_distinct_sessions() {
        let mock = MockPaymentProvider::new();

        let first = mock.create_checkout_session(test_request()).await.unwrap();
        let second = mock.create_checkout_session(test_request()).await.unwrap();

        assert_ne!(first.id, second.id);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn set_checkout_session_returns_configured() {
        let mock = MockPaymentProvider::new();
        mock.set_checkout_session(CheckoutSession {
            id: "cs_custom".to_string(),
            url: "https://custom.checkout.url".to_string(),
        });

        let result = mock.create_checkout_session(test_request()).await.unwrap();

        assert_eq!(result.id, "cs_custom");
        assert_eq!(result.url, "https://custom.checkout.url");
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Error Injection Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn set_error_returns_error() {
        let mock = MockPaymentProvider::new();
        mock.set_error(PaymentError::network("Test outage"));

        let result = mock.create_checkout_session(test_request()).await;

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code, PaymentErrorCode::NetworkError);
    }

    #[tokio::test]
    async fn set_method_error_only_affects_method() {
        let mock = MockPaymentProvider::new();
        mock.set_method_error("retrieve_session", PaymentError::network("Down"));

        // create_checkout_session should work
        let created = mock.create_checkout_session(test_request()).await;
        assert!(created.is_ok());

        // retrieve_session should fail
        let fetched = mock.retrieve_session(&created.unwrap().id).await;
        assert!(fetched.is_err());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn tracks_method_calls() {
        let mock = MockPaymentProvider::new();

        mock.create_checkout_session(test_request()).await.unwrap();

        assert!(mock.was_called("create_checkout_session"));
        assert_eq!(mock.call_count("create_checkout_session"), 1);
        assert!(!mock.was_called("retrieve_session"));
    }

    #[tokio::test]
    async fn call_log_contains_arguments() {
        let mock = MockPaymentProvider::new();

        mock.create_checkout_session(test_request()).await.unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].args.contains(&"ana@x.com".to_string()));
    }

    #[tokio::test]
    async fn clear_calls_resets_log() {
        let mock = MockPaymentProvider::new();

        mock.create_checkout_session(test_request()).await.unwrap();
        assert_eq!(mock.call_count("create_checkout_session"), 1);

        mock.clear_calls();

        assert_eq!(mock.call_count("create_checkout_session"), 0);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Webhook Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn verify_webhook_returns_configured_event() {
        let mock = MockPaymentProvider::new();
        let event = MockPaymentProvider::checkout_completed_event("cs_123");
        mock.set_webhook_event(event.clone());

        let result = mock.verify_webhook(b"{}", "signature").await.unwrap();

        assert_eq!(result.id, event.id);
        assert_eq!(result.event_type, WebhookEventType::CheckoutSessionCompleted);
    }

    #[tokio::test]
    async fn verify_webhook_parses_payload_when_no_event_set() {
        let mock = MockPaymentProvider::new();

        let payload = r#"{
            "id": "evt_test",
            "type": "checkout.session.completed",
            "created": 1704067200,
            "data": {"object": {"id": "cs_from_payload"}}
        }"#;
        let result = mock.verify_webhook(payload.as_bytes(), "sig").await.unwrap();

        assert_eq!(result.id, "evt_test");
        assert_eq!(result.event_type, WebhookEventType::CheckoutSessionCompleted);
        match result.data {
            WebhookEventData::Checkout { session_id } => {
                assert_eq!(session_id, "cs_from_payload");
            }
            _ => panic!("Expected Checkout data"),
        }
    }

    #[tokio::test]
    async fn rejecting_webhooks_fails_verification() {
        let mock = MockPaymentProvider::rejecting_webhooks();

        let result = mock.verify_webhook(b"{}", "signature").await;

        assert!(result.is_err());
        assert!(result.unwrap_err().message.contains("disabled"));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Helper Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn with_paid_session_creates_correct_state() {
        let mock = MockPaymentProvider::with_paid_session("cs_test", "Ana", 3);

        let session = mock.retrieve_session("cs_test").await.unwrap().unwrap();
        assert!(session.is_paid());
        assert_eq!(session.recipient_name, "Ana");
        assert_eq!(session.score, 3);
    }

    #[test]
    fn checkout_completed_event_has_correct_structure() {
        let event = MockPaymentProvider::checkout_completed_event("cs_1");

        assert!(event.id.starts_with("evt_checkout_"));
        assert_eq!(event.event_type, WebhookEventType::CheckoutSessionCompleted);

        match event.data {
            WebhookEventData::Checkout { session_id } => {
                assert_eq!(session_id, "cs_1");
            }
            _ => panic!("Expected Checkout data"),
        }
    }
}
