//! Application layer for model-council
//!
//! This crate contains the orchestration engine, port definitions, use
//! cases and application configuration. It depends only on the domain
//! layer; provider adapters are injected through [`EndpointFactory`].

pub mod config;
pub mod council;
pub mod engine;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use config::OrchestrationConfig;
pub use council::Council;
pub use engine::{
    ConcurrencyGate, GateError, ModelResolver, OrchestrationContext, ResolutionPlan, ResolveError,
    ResolvedEndpoint,
};
pub use ports::{
    llm_gateway::{CompletionRequest, EndpointFactory, GatewayError, ModelEndpoint},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::query_model::{QueryModelInput, QueryModelUseCase};
pub use use_cases::query_models::{QueryModelsInput, QueryModelsUseCase};
pub use use_cases::run_challenge::{RunChallengeInput, RunChallengeUseCase};
pub use use_cases::run_critique::{RunCritiqueInput, RunCritiqueUseCase};
pub use use_cases::run_debate::{DebateError, RunDebateInput, RunDebateUseCase};
