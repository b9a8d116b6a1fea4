//! Certificate configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Certificate rendering configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CertificateConfig {
    /// Organization name printed on the signature line
    #[serde(default = "default_organization")]
    pub organization: String,
}

impl CertificateConfig {
    /// Validate certificate configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.organization.trim().is_empty() {
            return Err(ValidationError::EmptyOrganization);
        }
        Ok(())
    }
}

impl Default for CertificateConfig {
    fn default() -> Self {
        Self {
            organization: default_organization(),
        }
    }
}

fn default_organization() -> String {
    "SaberDigital".to_string()
}
