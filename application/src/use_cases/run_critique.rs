//! Run Critique use case
//!
//! Asks one critic model to evaluate a response and scrapes a structured
//! [`Critique`](council_domain::Critique) out of its answer. Unparseable
//! output degrades to a record carrying the raw text; a failed query is
//! reported as [`CritiqueResult::Failed`].

use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::query_model::{QueryModelInput, QueryModelUseCase};
use council_domain::critique::critique_or_fallback;
use council_domain::{CritiqueResult, DEFAULT_CRITIQUE_ASPECTS, Phase, PromptTemplate, QueryResult};
use tracing::{info, warn};

/// Input for the RunCritique use case
#[derive(Debug, Clone)]
pub struct RunCritiqueInput {
    pub original_prompt: String,
    pub response: String,
    pub critic_model: String,
    /// Empty means [`DEFAULT_CRITIQUE_ASPECTS`]
    pub aspects: Vec<String>,
}

impl RunCritiqueInput {
    pub fn new(
        original_prompt: impl Into<String>,
        response: impl Into<String>,
        critic_model: impl Into<String>,
    ) -> Self {
        Self {
            original_prompt: original_prompt.into(),
            response: response.into(),
            critic_model: critic_model.into(),
            aspects: Vec::new(),
        }
    }

    pub fn with_aspects(mut self, aspects: Vec<String>) -> Self {
        self.aspects = aspects;
        self
    }
}

/// Use case for a single-critic critique
pub struct RunCritiqueUseCase {
    query: QueryModelUseCase,
}

impl RunCritiqueUseCase {
    pub fn new(query: QueryModelUseCase) -> Self {
        Self { query }
    }

    pub async fn execute(&self, input: RunCritiqueInput) -> CritiqueResult {
        self.execute_with_progress(input, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        input: RunCritiqueInput,
        progress: &dyn ProgressNotifier,
    ) -> CritiqueResult {
        let aspects = if input.aspects.is_empty() {
            DEFAULT_CRITIQUE_ASPECTS.iter().map(|a| a.to_string()).collect()
        } else {
            input.aspects
        };

        info!("Requesting critique from {}", input.critic_model);
        progress.on_phase_start(&Phase::Critique, 1);

        let prompt =
            PromptTemplate::critique_prompt(&input.original_prompt, &input.response, &aspects);
        let result = self
            .query
            .execute(
                QueryModelInput::new(input.critic_model, prompt)
                    .with_system_prompt(Some(PromptTemplate::critique_system().to_string())),
            )
            .await;

        progress.on_task_complete(&Phase::Critique, result.model(), result.is_success());
        progress.on_phase_complete(&Phase::Critique);

        match result {
            QueryResult::Success(s) => {
                let critique = critique_or_fallback(&s.text);
                if !critique.is_structured() && critique.score.is_none() {
                    warn!(
                        "Critique from {} had no structured fields, keeping raw text",
                        s.model
                    );
                }
                CritiqueResult::Completed {
                    critic_model: s.model,
                    critique,
                    latency_ms: s.latency_ms,
                }
            }
            QueryResult::Failure(f) => CritiqueResult::Failed {
                critic_model: f.model,
                error: f.error,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OrchestrationConfig;
    use crate::test_support::{MockFactory, context, reply};
    use std::sync::Arc;

    fn use_case(factory: Arc<MockFactory>) -> RunCritiqueUseCase {
        RunCritiqueUseCase::new(QueryModelUseCase::new(context(
            factory,
            OrchestrationConfig::default(),
        )))
    }

    #[tokio::test]
    async fn test_structured_critique() {
        let factory = Arc::new(MockFactory::echo().script(
            "critic",
            vec![reply(
                r#"```json
{"assessment": "Solid", "strengths": ["clear"], "weaknesses": [], "suggestions": ["add tests"], "score": 8}
```"#,
            )],
        ));
        let uc = use_case(factory.clone());

        let result = uc
            .execute(RunCritiqueInput::new("Explain TCP", "TCP is...", "openai/critic"))
            .await;
        let critique = result.critique().unwrap();
        assert_eq!(critique.assessment, "Solid");
        assert_eq!(critique.strengths, vec!["clear"]);
        assert_eq!(critique.suggestions, vec!["add tests"]);
        assert_eq!(critique.score, Some(8.0));

        // Default aspects are listed in the prompt
        let prompt = &factory.calls()[0].prompt;
        assert!(prompt.contains("accuracy"));
        assert!(prompt.contains("reasoning"));
    }

    #[tokio::test]
    async fn test_unstructured_response_falls_back() {
        let raw = "Honestly it reads fine to me, maybe a bit long.";
        let factory = Arc::new(MockFactory::echo().script("critic", vec![reply(raw)]));
        let uc = use_case(factory);

        let result = uc
            .execute(RunCritiqueInput::new("Q", "A", "anthropic/critic"))
            .await;
        let critique = result.critique().unwrap();
        assert_eq!(critique.assessment, raw);
        assert!(critique.strengths.is_empty());
        assert!(critique.weaknesses.is_empty());
        assert!(critique.suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_query_failure_is_data() {
        let uc = use_case(Arc::new(MockFactory::echo()));
        let result = uc.execute(RunCritiqueInput::new("Q", "A", "no-such-model")).await;
        match result {
            CritiqueResult::Failed {
                critic_model,
                error,
            } => {
                assert_eq!(critic_model, "no-such-model");
                assert!(!error.is_empty());
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_custom_aspects() {
        let factory = Arc::new(MockFactory::echo());
        let uc = use_case(factory.clone());
        uc.execute(
            RunCritiqueInput::new("Q", "A", "openai/critic")
                .with_aspects(vec!["tone".to_string()]),
        )
        .await;
        let prompt = &factory.calls()[0].prompt;
        assert!(prompt.contains("1. tone"));
        assert!(!prompt.contains("accuracy"));
    }
}
