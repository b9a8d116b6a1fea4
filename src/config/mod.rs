//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `QUIZCERT` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use quizcert::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod certificate;
mod error;
mod payment;
mod server;

pub use certificate::CertificateConfig;
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the quizcert service.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, public base URL)
    #[serde(default)]
    pub server: ServerConfig,

    /// Payment configuration (Stripe Checkout)
    #[serde(default)]
    pub payment: PaymentConfig,

    /// Certificate rendering configuration
    #[serde(default)]
    pub certificate: CertificateConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `QUIZCERT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `QUIZCERT__SERVER__PORT=4242` -> `server.port = 4242`
    /// - `QUIZCERT__PAYMENT__STRIPE_API_KEY=sk_...` -> `payment.stripe_api_key = sk_...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("QUIZCERT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Performs semantic validation of configuration:
    /// - Port/timeout bounds and URL formats
    /// - Required Stripe key prefixes
    /// - Fee and currency constraints
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.payment.validate()?;
        self.certificate.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to set environment variables for testing
    /// Uses double underscores to separate nested config values
    fn set_minimal_env() {
        env::set_var("QUIZCERT__PAYMENT__STRIPE_API_KEY", "sk_test_xxx");
        env::set_var("QUIZCERT__PAYMENT__STRIPE_WEBHOOK_SECRET", "whsec_xxx");
    }

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("QUIZCERT__PAYMENT__STRIPE_API_KEY");
        env::remove_var("QUIZCERT__PAYMENT__STRIPE_WEBHOOK_SECRET");
        env::remove_var("QUIZCERT__SERVER__PORT");
        env::remove_var("QUIZCERT__SERVER__ENVIRONMENT");
        env::remove_var("QUIZCERT__SERVER__PUBLIC_BASE_URL");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.payment.stripe_api_key, "sk_test_xxx");
        assert_eq!(
            config.payment.stripe_webhook_secret.as_deref(),
            Some("whsec_xxx")
        );
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok());
        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 4242);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("QUIZCERT__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("QUIZCERT__SERVER__PORT", "3000");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
    }
}
