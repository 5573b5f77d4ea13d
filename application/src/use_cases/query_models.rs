//! Query Models use case
//!
//! Sends one prompt to many models at once and waits for every one of
//! them to settle. Failures are isolated per model; the operation itself
//! never fails.

use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::query_model::{QueryModelInput, QueryModelUseCase};
use council_domain::{AggregateResult, Phase, QueryResult};
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{info, warn};

/// Input for the QueryModels use case
#[derive(Debug, Clone)]
pub struct QueryModelsInput {
    /// Models to query; empty means the configured defaults
    pub models: Vec<String>,
    pub prompt: String,
    pub system_prompt: Option<String>,
}

impl QueryModelsInput {
    pub fn new(models: Vec<String>, prompt: impl Into<String>) -> Self {
        Self {
            models,
            prompt: prompt.into(),
            system_prompt: None,
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: Option<String>) -> Self {
        self.system_prompt = system_prompt;
        self
    }
}

/// Use case for fanning one prompt out to many models
#[derive(Clone)]
pub struct QueryModelsUseCase {
    query: QueryModelUseCase,
}

impl QueryModelsUseCase {
    pub fn new(query: QueryModelUseCase) -> Self {
        Self { query }
    }

    pub async fn execute(&self, input: QueryModelsInput) -> AggregateResult {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute with progress callbacks under [`Phase::FanOut`]
    pub async fn execute_with_progress(
        &self,
        input: QueryModelsInput,
        progress: &dyn ProgressNotifier,
    ) -> AggregateResult {
        self.fan_out(input, Phase::FanOut, progress).await
    }

    /// Fan out and report progress under the given phase.
    pub(crate) async fn fan_out(
        &self,
        input: QueryModelsInput,
        phase: Phase,
        progress: &dyn ProgressNotifier,
    ) -> AggregateResult {
        let models = if input.models.is_empty() {
            self.query.context().config().default_models.clone()
        } else {
            input.models
        };

        info!("Querying {} models", models.len());
        progress.on_phase_start(&phase, models.len());
        let started = Instant::now();

        let mut join_set = JoinSet::new();
        for (index, model) in models.iter().enumerate() {
            let query = self.query.clone();
            let input = QueryModelInput::new(model.clone(), input.prompt.clone())
                .with_system_prompt(input.system_prompt.clone());

            join_set.spawn(async move { (index, query.execute(input).await) });
        }

        let mut settled = vec![false; models.len()];
        let mut results = Vec::with_capacity(models.len());

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, result)) => {
                    settled[index] = true;
                    progress.on_task_complete(&phase, result.model(), result.is_success());
                    results.push(result);
                }
                Err(e) => warn!("Task join error: {}", e),
            }
        }

        // A task that never reported still owes its model a record
        for (model, _) in models.iter().zip(&settled).filter(|(_, done)| !**done) {
            progress.on_task_complete(&phase, model, false);
            results.push(QueryResult::failure(model.clone(), "Query task aborted"));
        }

        let total_latency_ms = started.elapsed().as_millis() as u64;
        progress.on_phase_complete(&phase);

        let aggregate = AggregateResult::from_results(results, total_latency_ms);
        info!(
            "Fan-out finished: {}/{} succeeded in {}ms",
            aggregate.success_count,
            aggregate.total(),
            total_latency_ms
        );
        aggregate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OrchestrationConfig;
    use crate::ports::llm_gateway::GatewayError;
    use crate::test_support::{MockFactory, Script, context};
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::time::Duration;

    fn use_case(factory: Arc<MockFactory>, config: OrchestrationConfig) -> QueryModelsUseCase {
        QueryModelsUseCase::new(QueryModelUseCase::new(context(factory, config)))
    }

    fn models(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_timeout_does_not_block_others() {
        let factory = Arc::new(MockFactory::echo().script(
            "b",
            vec![Script::Slow(Duration::from_secs(600), "too late".to_string())],
        ));
        let uc = use_case(
            factory,
            OrchestrationConfig::default().with_timeout(Duration::from_secs(60)),
        );

        let result = uc
            .execute(QueryModelsInput::new(
                models(&["openai/a", "openai/b", "openai/c"]),
                "prompt",
            ))
            .await;

        assert_eq!(result.success_count, 2);
        assert!(result.success_for("openai/a").is_some());
        assert!(result.success_for("openai/c").is_some());
        let failure = result.failure_for("openai/b").unwrap();
        assert!(failure.error.contains("timed out"));
        assert_eq!(result.failures.len(), 1);
    }

    #[tokio::test]
    async fn test_k_failures() {
        let fail = || vec![Script::Fail(GatewayError::ConnectionError("refused".into()))];
        let factory = Arc::new(
            MockFactory::echo()
                .script("m2", fail())
                .script("m4", fail())
                .script("m5", vec![Script::Panic]),
        );
        let uc = use_case(factory, OrchestrationConfig::default());

        let ids = models(&[
            "openai/m1",
            "openai/m2",
            "anthropic/m3",
            "google/m4",
            "deepseek/m5",
            "unknown-model",
        ]);
        let result = uc.execute(QueryModelsInput::new(ids, "p")).await;

        assert_eq!(result.total(), 6);
        assert_eq!(result.success_count, 2);
        assert_eq!(result.successes.len(), 2);
        assert_eq!(result.failures.len(), 4);
        assert!(result.failure_for("unknown-model").is_some());
    }

    #[tokio::test]
    async fn test_all_failed_still_returns() {
        let factory = Arc::new(MockFactory::echo());
        let uc = use_case(factory, OrchestrationConfig::default());
        let result = uc
            .execute(QueryModelsInput::new(models(&["x", "y"]), "p"))
            .await;
        assert!(result.all_failed());
        assert_eq!(result.success_count, 0);
        assert_eq!(result.failures.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrency_ceiling_holds() {
        let mut factory = MockFactory::echo();
        let ids: Vec<String> = (0..12).map(|i| format!("openai/m{i}")).collect();
        for i in 0..12 {
            factory = factory.script(
                &format!("m{i}"),
                vec![Script::Slow(Duration::from_millis(100), "ok".to_string())],
            );
        }
        let factory = Arc::new(factory);
        let uc = use_case(
            factory.clone(),
            OrchestrationConfig::default().with_max_concurrent(3),
        );

        let result = uc.execute(QueryModelsInput::new(ids, "p")).await;
        assert_eq!(result.success_count, 12);
        assert_eq!(factory.peak_concurrency(), 3);
        // 12 calls of 100ms through 3 permits take four waves
        assert!(result.total_latency_ms >= 400);
    }

    #[tokio::test]
    async fn test_empty_list_uses_defaults() {
        let factory = Arc::new(MockFactory::echo());
        let config = OrchestrationConfig::default()
            .with_default_models(models(&["openai/d1", "anthropic/d2"]));
        let uc = use_case(factory, config);

        let result = uc.execute(QueryModelsInput::new(vec![], "p")).await;
        assert_eq!(result.success_count, 2);
        assert!(result.success_for("anthropic/d2").is_some());
    }

    struct Recorder(Mutex<Vec<String>>);

    impl ProgressNotifier for Recorder {
        fn on_phase_start(&self, phase: &Phase, total: usize) {
            self.0.lock().unwrap().push(format!("start {} {}", phase, total));
        }
        fn on_task_complete(&self, _phase: &Phase, model: &str, success: bool) {
            self.0.lock().unwrap().push(format!("{} {}", model, success));
        }
        fn on_phase_complete(&self, phase: &Phase) {
            self.0.lock().unwrap().push(format!("done {}", phase));
        }
    }

    #[tokio::test]
    async fn test_progress_callbacks() {
        let factory = Arc::new(MockFactory::echo());
        let uc = use_case(factory, OrchestrationConfig::default());
        let recorder = Recorder(Mutex::new(Vec::new()));

        uc.execute_with_progress(
            QueryModelsInput::new(models(&["openai/a", "bad"]), "p"),
            &recorder,
        )
        .await;

        let events = recorder.0.into_inner().unwrap();
        assert_eq!(events.len(), 4);
        assert!(events[0].starts_with("start"));
        assert!(events.contains(&"openai/a true".to_string()));
        assert!(events.contains(&"bad false".to_string()));
        assert!(events[3].starts_with("done"));
    }
}
