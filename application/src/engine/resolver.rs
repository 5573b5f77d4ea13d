//! Model resolution: identifier to endpoint, with router fallback.
//!
//! Resolution happens in two steps:
//!
//! 1. [`ResolutionPlan::new`] is pure: it parses the identifier and picks
//!    the provider to call (direct first, the router second).
//! 2. [`ModelResolver::resolve`] binds the plan to an endpoint, building
//!    each provider's endpoint at most once per resolver.

use crate::ports::llm_gateway::{EndpointFactory, GatewayError, ModelEndpoint};
use council_domain::providers::default_credential_env;
use council_domain::{DomainError, ParsedModel, Provider, ProviderConfig};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::debug;

/// Errors from [`ModelResolver::resolve`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Failed to build endpoint for {provider}: {source}")]
    Endpoint {
        provider: Provider,
        #[source]
        source: GatewayError,
    },
}

/// Where a parsed model will be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionPlan {
    /// The identifier as the caller wrote it
    pub requested: String,
    pub parsed: ParsedModel,
    /// Provider that will receive the request
    pub target: Provider,
    /// Model name sent on the wire, relative to `target`
    pub request_model: String,
}

impl ResolutionPlan {
    /// Deterministic function of `(model_id, providers)`.
    pub fn new(model_id: &str, providers: &ProviderConfig) -> Result<Self, DomainError> {
        let parsed = ParsedModel::parse(model_id, providers)?;

        if providers.is_configured(parsed.provider) {
            return Ok(Self {
                requested: model_id.to_string(),
                target: parsed.provider,
                request_model: parsed.model_name.clone(),
                parsed,
            });
        }

        let router = Provider::OpenRouter;
        if !parsed.provider.is_router() && providers.is_configured(router) {
            return Ok(Self {
                requested: model_id.to_string(),
                target: router,
                request_model: parsed.router_path(),
                parsed,
            });
        }

        let fallback = if parsed.provider.is_router() {
            "none (model is already addressed through the router)".to_string()
        } else {
            format!(
                "{} (not configured, set {})",
                router,
                default_credential_env(router)
            )
        };

        Err(DomainError::MissingCredential {
            provider: parsed.provider,
            model: model_id.to_string(),
            credential: default_credential_env(parsed.provider).to_string(),
            fallback,
        })
    }

    /// Whether the request is routed through the router instead of the
    /// model's own provider.
    pub fn is_fallback(&self) -> bool {
        self.target != self.parsed.provider
    }
}

/// A plan bound to a live endpoint.
#[derive(Clone)]
pub struct ResolvedEndpoint {
    plan: ResolutionPlan,
    endpoint: Arc<dyn ModelEndpoint>,
}

impl ResolvedEndpoint {
    pub fn plan(&self) -> &ResolutionPlan {
        &self.plan
    }

    pub fn endpoint(&self) -> &Arc<dyn ModelEndpoint> {
        &self.endpoint
    }

    pub fn request_model(&self) -> &str {
        &self.plan.request_model
    }

    /// Router-relative model path, when served through the fallback.
    pub fn actual_model(&self) -> Option<String> {
        self.plan
            .is_fallback()
            .then(|| self.plan.request_model.clone())
    }
}

impl std::fmt::Debug for ResolvedEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedEndpoint")
            .field("plan", &self.plan)
            .field("endpoint", &self.endpoint.provider())
            .finish()
    }
}

/// Resolves identifiers and caches one endpoint per provider.
pub struct ModelResolver {
    providers: ProviderConfig,
    factory: Arc<dyn EndpointFactory>,
    endpoints: HashMap<Provider, OnceCell<Arc<dyn ModelEndpoint>>>,
}

impl ModelResolver {
    pub fn new(providers: ProviderConfig, factory: Arc<dyn EndpointFactory>) -> Self {
        let endpoints = Provider::ALL
            .into_iter()
            .map(|p| (p, OnceCell::new()))
            .collect();
        Self {
            providers,
            factory,
            endpoints,
        }
    }

    pub fn providers(&self) -> &ProviderConfig {
        &self.providers
    }

    /// Plan without touching the endpoint cache.
    pub fn plan(&self, model_id: &str) -> Result<ResolutionPlan, DomainError> {
        ResolutionPlan::new(model_id, &self.providers)
    }

    pub async fn resolve(&self, model_id: &str) -> Result<ResolvedEndpoint, ResolveError> {
        let plan = self.plan(model_id)?;
        if plan.is_fallback() {
            debug!(
                "{} not configured, routing {} through {} as {}",
                plan.parsed.provider, model_id, plan.target, plan.request_model
            );
        } else {
            debug!("Resolved {} to {}", model_id, plan.target);
        }

        let endpoint = self.endpoint(plan.target).await?;
        Ok(ResolvedEndpoint { plan, endpoint })
    }

    async fn endpoint(&self, provider: Provider) -> Result<Arc<dyn ModelEndpoint>, ResolveError> {
        let Some(cell) = self.endpoints.get(&provider) else {
            // Unreachable: the map is built from Provider::ALL
            return self.build(provider);
        };
        cell.get_or_try_init(|| async { self.build(provider) })
            .await
            .cloned()
    }

    fn build(&self, provider: Provider) -> Result<Arc<dyn ModelEndpoint>, ResolveError> {
        debug!("Building endpoint for {}", provider);
        self.factory
            .create(provider)
            .map_err(|source| ResolveError::Endpoint { provider, source })
    }
}
