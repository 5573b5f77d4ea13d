//! Run Challenge use case
//!
//! Fans a proposed thought out to several challenger models and collects
//! the objections each one raises. Every response is parsed on its own: a
//! response with no recognisable challenge list contributes nothing, and a
//! malformed entry is dropped without affecting its siblings.

use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::query_models::{QueryModelsInput, QueryModelsUseCase};
use council_domain::critique::parse_challenges;
use council_domain::{ChallengeCategory, ChallengeResult, Phase, PromptTemplate};
use tracing::{info, warn};

/// Input for the RunChallenge use case
#[derive(Debug, Clone)]
pub struct RunChallengeInput {
    pub proposed_thought: String,
    pub context: Option<String>,
    /// Empty means the configured default models
    pub challengers: Vec<String>,
    /// Categories to focus on; empty means all of them
    pub categories: Vec<ChallengeCategory>,
}

impl RunChallengeInput {
    pub fn new(proposed_thought: impl Into<String>, challengers: Vec<String>) -> Self {
        Self {
            proposed_thought: proposed_thought.into(),
            context: None,
            challengers,
            categories: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: Option<String>) -> Self {
        self.context = context;
        self
    }

    pub fn with_categories(mut self, categories: Vec<ChallengeCategory>) -> Self {
        self.categories = categories;
        self
    }
}

/// Use case for devil's-advocate challenges
pub struct RunChallengeUseCase {
    fan_out: QueryModelsUseCase,
}

impl RunChallengeUseCase {
    pub fn new(fan_out: QueryModelsUseCase) -> Self {
        Self { fan_out }
    }

    pub async fn execute(&self, input: RunChallengeInput) -> ChallengeResult {
        self.execute_with_progress(input, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        input: RunChallengeInput,
        progress: &dyn ProgressNotifier,
    ) -> ChallengeResult {
        let prompt = PromptTemplate::challenge_prompt(
            &input.proposed_thought,
            input.context.as_deref(),
            &input.categories,
        );
        let query = QueryModelsInput::new(input.challengers, prompt)
            .with_system_prompt(Some(PromptTemplate::challenge_system().to_string()));

        let aggregate = self.fan_out.fan_out(query, Phase::Challenge, progress).await;

        let mut challenges = Vec::new();
        let mut challengers = Vec::with_capacity(aggregate.successes.len());
        for success in &aggregate.successes {
            challengers.push(success.model.clone());
            match parse_challenges(&success.model, &success.text) {
                Some(parsed) => challenges.extend(parsed),
                None => warn!(
                    "Challenger {} returned no parseable challenge list",
                    success.model
                ),
            }
        }

        info!(
            "Collected {} challenges from {} challengers ({} failed)",
            challenges.len(),
            challengers.len(),
            aggregate.failures.len()
        );

        ChallengeResult {
            proposed_thought: input.proposed_thought,
            challenges,
            challengers,
            failures: aggregate.failures,
            total_latency_ms: aggregate.total_latency_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OrchestrationConfig;
    use crate::test_support::{MockFactory, context, reply};
    use crate::use_cases::query_model::QueryModelUseCase;
    use council_domain::ChallengeSeverity;
    use std::sync::Arc;

    fn use_case(factory: Arc<MockFactory>) -> RunChallengeUseCase {
        RunChallengeUseCase::new(QueryModelsUseCase::new(QueryModelUseCase::new(context(
            factory,
            OrchestrationConfig::default(),
        ))))
    }

    #[tokio::test]
    async fn test_parse_failures_isolated_per_challenger() {
        let factory = Arc::new(
            MockFactory::echo()
                .script(
                    "sharp",
                    vec![reply(
                        r#"{"challenges": [
                            {"category": "risk", "severity": "high", "description": "No rollback plan"},
                            {"category": "feelings", "description": "I dislike it"},
                            {"category": "evidence", "description": "No benchmarks", "suggestion": "Measure first"}
                        ]}"#,
                    )],
                )
                .script("vague", vec![reply("Looks good to me!")]),
        );
        let uc = use_case(factory);

        let result = uc
            .execute(RunChallengeInput::new(
                "Rewrite the service in one weekend",
                vec![
                    "openai/sharp".to_string(),
                    "anthropic/vague".to_string(),
                    "missing-model".to_string(),
                ],
            ))
            .await;

        assert_eq!(result.challenges.len(), 2);
        assert!(result.challenges.iter().all(|c| c.challenger == "openai/sharp"));
        assert_eq!(result.at_least(ChallengeSeverity::High).count(), 1);
        assert_eq!(result.challengers.len(), 2);
        assert!(result.challengers.contains(&"anthropic/vague".to_string()));
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].model, "missing-model");
    }

    #[tokio::test]
    async fn test_prompt_carries_context_and_categories() {
        let factory = Arc::new(MockFactory::echo());
        let uc = use_case(factory.clone());

        uc.execute(
            RunChallengeInput::new("Use a queue", vec!["google/g".to_string()])
                .with_context(Some("high write volume".to_string()))
                .with_categories(vec![ChallengeCategory::Alternative]),
        )
        .await;

        let call = &factory.calls()[0];
        assert!(call.prompt.contains("high write volume"));
        assert!(call.prompt.contains("Focus on these categories: alternative"));
        assert!(call.system_prompt.is_some());
    }
}
