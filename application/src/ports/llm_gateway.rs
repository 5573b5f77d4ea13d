//! LLM endpoint ports
//!
//! Defines the interface for sending a single completion request to one
//! provider. Implementations (adapters) live in the infrastructure layer.

use async_trait::async_trait;
use council_domain::Provider;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during a provider call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Whether a transport-level retry may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            GatewayError::ConnectionError(_) => true,
            GatewayError::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// One completion request, addressed with a provider-relative model name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub model: String,
    pub system_prompt: Option<String>,
    pub prompt: String,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system_prompt: None,
            prompt: prompt.into(),
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: Option<String>) -> Self {
        self.system_prompt = system_prompt;
        self
    }
}

/// A callable bound to one provider.
///
/// Built once per provider per [`OrchestrationContext`](crate::engine::OrchestrationContext)
/// and shared read-only by every concurrent caller.
#[async_trait]
pub trait ModelEndpoint: Send + Sync {
    /// The provider this endpoint talks to
    fn provider(&self) -> Provider;

    /// Send one request and return the response text
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError>;
}

/// Builds endpoints for configured providers
pub trait EndpointFactory: Send + Sync {
    fn create(&self, provider: Provider) -> Result<Arc<dyn ModelEndpoint>, GatewayError>;
}
