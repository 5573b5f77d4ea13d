//! Orchestration context: the shared state every operation runs against.

use crate::config::OrchestrationConfig;
use crate::engine::gate::ConcurrencyGate;
use crate::engine::resolver::{ModelResolver, ResolutionPlan, ResolveError, ResolvedEndpoint};
use crate::ports::llm_gateway::EndpointFactory;
use council_domain::{DomainError, ProviderConfig};
use std::sync::Arc;

/// Holds the concurrency gate and the endpoint cache.
///
/// One context is one admission domain: every query issued through it,
/// from any operation, competes for the same permits. Independent
/// contexts share nothing.
pub struct OrchestrationContext {
    config: OrchestrationConfig,
    gate: ConcurrencyGate,
    resolver: ModelResolver,
}

impl OrchestrationContext {
    pub fn new(
        config: OrchestrationConfig,
        providers: ProviderConfig,
        factory: Arc<dyn EndpointFactory>,
    ) -> Self {
        Self {
            gate: ConcurrencyGate::new(config.max_concurrent),
            resolver: ModelResolver::new(providers, factory),
            config,
        }
    }

    pub fn config(&self) -> &OrchestrationConfig {
        &self.config
    }

    pub fn gate(&self) -> &ConcurrencyGate {
        &self.gate
    }

    pub fn providers(&self) -> &ProviderConfig {
        self.resolver.providers()
    }

    /// Where a model identifier would be sent, without building anything.
    pub fn plan(&self, model_id: &str) -> Result<ResolutionPlan, DomainError> {
        self.resolver.plan(model_id)
    }

    /// Resolve a model identifier to a callable endpoint.
    pub async fn resolve(&self, model_id: &str) -> Result<ResolvedEndpoint, ResolveError> {
        self.resolver.resolve(model_id).await
    }
}

impl std::fmt::Debug for OrchestrationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrchestrationContext")
            .field("config", &self.config)
            .field("gate", &self.gate)
            .field("providers", &self.providers().configured())
            .finish()
    }
}
