//! Query Model use case
//!
//! Issues one request to one model through the concurrency gate. Every
//! outcome, including resolution errors, timeouts and panics inside the
//! endpoint, comes back as a [`QueryResult`].

use crate::engine::OrchestrationContext;
use crate::ports::llm_gateway::{CompletionRequest, GatewayError};
use council_domain::QueryResult;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Input for the QueryModel use case
#[derive(Debug, Clone)]
pub struct QueryModelInput {
    pub model: String,
    pub prompt: String,
    pub system_prompt: Option<String>,
}

impl QueryModelInput {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            system_prompt: None,
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: Option<String>) -> Self {
        self.system_prompt = system_prompt;
        self
    }
}

/// Use case for querying a single model
#[derive(Clone)]
pub struct QueryModelUseCase {
    context: Arc<OrchestrationContext>,
}

impl QueryModelUseCase {
    pub fn new(context: Arc<OrchestrationContext>) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &Arc<OrchestrationContext> {
        &self.context
    }

    pub async fn execute(&self, input: QueryModelInput) -> QueryResult {
        let QueryModelInput {
            model,
            prompt,
            system_prompt,
        } = input;

        let resolved = match self.context.resolve(&model).await {
            Ok(resolved) => resolved,
            Err(e) => {
                warn!("Model {} could not be resolved: {}", model, e);
                return QueryResult::failure(model, e.to_string());
            }
        };

        let request = CompletionRequest::new(resolved.request_model(), prompt)
            .with_system_prompt(system_prompt);
        let timeout = self.context.config().timeout();
        let gate = self.context.gate();
        let started = Instant::now();

        let call = async {
            let _permit = gate
                .acquire()
                .await
                .map_err(|e| GatewayError::Other(e.to_string()))?;
            debug!("Querying {} via {}", model, resolved.plan().target);
            match tokio::time::timeout(timeout, resolved.endpoint().complete(&request)).await {
                Ok(result) => result,
                Err(_) => Err(GatewayError::Timeout(timeout)),
            }
        };
        let outcome = AssertUnwindSafe(call).catch_unwind().await;
        let latency_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(Ok(text)) => {
                debug!("Model {} responded in {}ms", model, latency_ms);
                QueryResult::success(model, text, latency_ms)
                    .with_actual_model(resolved.actual_model())
            }
            Ok(Err(e)) => {
                warn!("Model {} failed: {}", model, e);
                QueryResult::failure(model, e.to_string())
            }
            Err(panic) => {
                let reason = panic_message(panic.as_ref());
                warn!("Model {} panicked: {}", model, reason);
                QueryResult::failure(model, format!("Endpoint panicked: {}", reason))
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
