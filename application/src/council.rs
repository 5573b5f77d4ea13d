//! Council facade
//!
//! The five outward operations behind one handle. Everything returned is
//! a plain serializable record; only a debate can fail as a whole.

use crate::engine::OrchestrationContext;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::query_model::{QueryModelInput, QueryModelUseCase};
use crate::use_cases::query_models::{QueryModelsInput, QueryModelsUseCase};
use crate::use_cases::run_challenge::{RunChallengeInput, RunChallengeUseCase};
use crate::use_cases::run_critique::{RunCritiqueInput, RunCritiqueUseCase};
use crate::use_cases::run_debate::{DebateError, RunDebateInput, RunDebateUseCase};
use council_domain::{AggregateResult, ChallengeResult, CritiqueResult, DebateResult, QueryResult};
use std::sync::Arc;

/// Entry point for callers (CLI, tool servers, tests).
#[derive(Clone)]
pub struct Council {
    context: Arc<OrchestrationContext>,
    progress: Arc<dyn ProgressNotifier>,
}

impl Council {
    pub fn new(context: Arc<OrchestrationContext>) -> Self {
        Self {
            context,
            progress: Arc::new(NoProgress),
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    pub fn context(&self) -> &Arc<OrchestrationContext> {
        &self.context
    }

    fn query(&self) -> QueryModelUseCase {
        QueryModelUseCase::new(Arc::clone(&self.context))
    }

    pub async fn query_model(
        &self,
        model: &str,
        prompt: &str,
        system_prompt: Option<&str>,
    ) -> QueryResult {
        self.query()
            .execute(
                QueryModelInput::new(model, prompt)
                    .with_system_prompt(system_prompt.map(str::to_string)),
            )
            .await
    }

    pub async fn query_models(
        &self,
        models: Vec<String>,
        prompt: &str,
        system_prompt: Option<&str>,
    ) -> AggregateResult {
        QueryModelsUseCase::new(self.query())
            .execute_with_progress(
                QueryModelsInput::new(models, prompt)
                    .with_system_prompt(system_prompt.map(str::to_string)),
                self.progress.as_ref(),
            )
            .await
    }

    pub async fn run_debate(
        &self,
        topic: &str,
        affirmative_model: &str,
        negative_model: &str,
        rounds: Option<u32>,
    ) -> Result<DebateResult, DebateError> {
        RunDebateUseCase::new(self.query())
            .execute_with_progress(
                RunDebateInput::new(topic, affirmative_model, negative_model).with_rounds(rounds),
                self.progress.as_ref(),
            )
            .await
    }

    pub async fn run_critique(&self, input: RunCritiqueInput) -> CritiqueResult {
        RunCritiqueUseCase::new(self.query())
            .execute_with_progress(input, self.progress.as_ref())
            .await
    }

    pub async fn run_challenge(&self, input: RunChallengeInput) -> ChallengeResult {
        RunChallengeUseCase::new(QueryModelsUseCase::new(self.query()))
            .execute_with_progress(input, self.progress.as_ref())
            .await
    }
}
