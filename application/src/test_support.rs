//! Scripted endpoints for use case tests.

use crate::config::OrchestrationConfig;
use crate::engine::OrchestrationContext;
use crate::ports::llm_gateway::{CompletionRequest, EndpointFactory, GatewayError, ModelEndpoint};
use async_trait::async_trait;
use council_domain::{Provider, ProviderConfig, ProviderSettings};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What a mock endpoint does for one call.
#[derive(Debug, Clone)]
pub enum Script {
    Reply(String),
    Fail(GatewayError),
    /// Sleep, then reply
    Slow(Duration, String),
    Panic,
}

pub fn reply(text: &str) -> Script {
    Script::Reply(text.to_string())
}

#[derive(Default)]
struct MockState {
    /// Keyed by the model name the endpoint receives. The last entry
    /// repeats once the others are used up.
    scripts: Mutex<HashMap<String, VecDeque<Script>>>,
    calls: Mutex<Vec<CompletionRequest>>,
    builds: Mutex<HashMap<Provider, usize>>,
    failing_builds: HashSet<Provider>,
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl MockState {
    fn next_script(&self, model: &str) -> Option<Script> {
        let mut scripts = self.scripts.lock().unwrap();
        let queue = scripts.get_mut(model)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

pub struct MockFactory {
    state: Arc<MockState>,
}

impl MockFactory {
    /// Unscripted models answer `"<model>: <prompt>"`.
    pub fn echo() -> Self {
        Self {
            state: Arc::new(MockState::default()),
        }
    }

    pub fn script(self, model: &str, steps: Vec<Script>) -> Self {
        self.state
            .scripts
            .lock()
            .unwrap()
            .insert(model.to_string(), steps.into());
        self
    }

    pub fn failing_build(self, provider: Provider) -> Self {
        let mut state = Arc::try_unwrap(self.state).unwrap_or_else(|_| panic!("factory in use"));
        state.failing_builds.insert(provider);
        Self {
            state: Arc::new(state),
        }
    }

    pub fn build_count(&self, provider: Provider) -> usize {
        self.state
            .builds
            .lock()
            .unwrap()
            .get(&provider)
            .copied()
            .unwrap_or(0)
    }

    pub fn peak_concurrency(&self) -> usize {
        self.state.peak.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.state.calls.lock().unwrap().clone()
    }
}

impl EndpointFactory for MockFactory {
    fn create(&self, provider: Provider) -> Result<Arc<dyn ModelEndpoint>, GatewayError> {
        *self.state.builds.lock().unwrap().entry(provider).or_insert(0) += 1;
        if self.state.failing_builds.contains(&provider) {
            return Err(GatewayError::NotConfigured(provider.to_string()));
        }
        Ok(Arc::new(MockEndpoint {
            provider,
            state: Arc::clone(&self.state),
        }))
    }
}

struct MockEndpoint {
    provider: Provider,
    state: Arc<MockState>,
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ModelEndpoint for MockEndpoint {
    fn provider(&self) -> Provider {
        self.provider
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        self.state.calls.lock().unwrap().push(request.clone());
        let now = self.state.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.peak.fetch_max(now, Ordering::SeqCst);
        let _in_flight = InFlight(&self.state.current);

        match self.state.next_script(&request.model) {
            None => Ok(format!("{}: {}", request.model, request.prompt)),
            Some(Script::Reply(text)) => Ok(text),
            Some(Script::Fail(error)) => Err(error),
            Some(Script::Slow(delay, text)) => {
                tokio::time::sleep(delay).await;
                Ok(text)
            }
            Some(Script::Panic) => panic!("scripted endpoint panic"),
        }
    }
}

pub fn providers_with(providers: &[Provider]) -> ProviderConfig {
    providers.iter().fold(ProviderConfig::new(), |config, p| {
        config.with(*p, ProviderSettings::with_api_key("test-key"))
    })
}

/// Context with every direct provider configured and the router absent.
pub fn context(
    factory: Arc<MockFactory>,
    config: OrchestrationConfig,
) -> Arc<OrchestrationContext> {
    let providers = providers_with(&[
        Provider::Anthropic,
        Provider::OpenAi,
        Provider::Google,
        Provider::DeepSeek,
        Provider::Xai,
    ]);
    Arc::new(OrchestrationContext::new(config, providers, factory))
}
