//! Payment configuration (Stripe)

use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Stripe Checkout)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret API key
    #[serde(default)]
    pub stripe_api_key: String,

    /// Stripe webhook signing secret. When unset, webhook deliveries are
    /// acknowledged without verification or processing (permissive
    /// dev-mode fallback).
    pub stripe_webhook_secret: Option<String>,

    /// Certificate fee in the smallest currency unit
    #[serde(default = "default_certificate_price_cents")]
    pub certificate_price_cents: u32,

    /// ISO 4217 currency code, lowercase
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl PaymentConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.stripe_api_key.starts_with("sk_test_")
    }

    /// Check if using Stripe live mode
    pub fn is_live_mode(&self) -> bool {
        self.stripe_api_key.starts_with("sk_live_")
    }

    /// Whether webhook signature verification is enabled
    pub fn webhook_verification_enabled(&self) -> bool {
        self.stripe_webhook_secret.is_some()
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.stripe_api_key.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_API_KEY"));
        }

        // Verify key prefixes for safety
        if !self.stripe_api_key.starts_with("sk_") {
            return Err(ValidationError::InvalidStripeKey);
        }
        if let Some(secret) = &self.stripe_webhook_secret {
            if !secret.starts_with("whsec_") {
                return Err(ValidationError::InvalidStripeWebhookSecret);
            }
        }

        if self.certificate_price_cents == 0 {
            return Err(ValidationError::InvalidCertificatePrice);
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(ValidationError::InvalidCurrency);
        }

        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            stripe_api_key: String::new(),
            stripe_webhook_secret: None,
            certificate_price_cents: default_certificate_price_cents(),
            currency: default_currency(),
        }
    }
}

fn default_certificate_price_cents() -> u32 {
    400
}

fn default_currency() -> String {
    "brl".to_string()
}
