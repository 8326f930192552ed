//! Security configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Secrets gating destructive operations
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// Password confirming a project removal cascade
    pub cascade_password: SecretString,
}

impl SecurityConfig {
    /// Validate security configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.cascade_password.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("CASCADE_PASSWORD"));
        }
        Ok(())
    }
}
