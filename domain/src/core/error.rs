//! Domain error types

use crate::core::model::Provider;
use thiserror::Error;

/// Domain-level errors
///
/// Resolution failures are reported inline as failed query records by the
/// application layer; they never escape an outward operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Cannot resolve model identifier '{0}': no provider prefix matched and no router is configured")]
    UnresolvableModel(String),

    #[error(
        "Provider '{provider}' is not configured for model '{model}' (missing {credential}); fallback attempted: {fallback}"
    )]
    MissingCredential {
        provider: Provider,
        model: String,
        credential: String,
        fallback: String,
    },

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DomainError {
    /// Check if this error comes from model resolution
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            DomainError::UnresolvableModel(_) | DomainError::MissingCredential { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_display_names_fallback() {
        let error = DomainError::MissingCredential {
            provider: Provider::Anthropic,
            model: "anthropic/claude-sonnet-4.5".to_string(),
            credential: "ANTHROPIC_API_KEY".to_string(),
            fallback: "openrouter (not configured)".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("ANTHROPIC_API_KEY"));
        assert!(msg.contains("openrouter (not configured)"));
    }

    #[test]
    fn test_is_resolution_error() {
        assert!(DomainError::UnresolvableModel("x".to_string()).is_resolution_error());
        assert!(!DomainError::UnknownProvider("x".to_string()).is_resolution_error());
    }
}
