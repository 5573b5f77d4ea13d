//! Run Debate use case
//!
//! Drives a [`DebateState`] turn by turn. Turns are strictly sequential
//! since each one sees the transcript of everything said before it. Any
//! failed turn aborts the whole debate; no partial rounds are returned.

use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::query_model::{QueryModelInput, QueryModelUseCase};
use council_domain::{
    DebateResult, DebateSide, DebateState, DebateTurn, Phase, PromptTemplate, QueryResult,
};
use thiserror::Error;
use tokio::time::Instant;
use tracing::{info, warn};

/// Errors that abort a debate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DebateError {
    #[error("Debate aborted: {side} side ({model}) failed in round {round}: {reason}")]
    TurnFailed {
        side: DebateSide,
        round: u32,
        model: String,
        reason: String,
    },

    #[error("Invalid number of rounds: {requested} (must be between 1 and {max})")]
    InvalidRounds { requested: u32, max: u32 },

    #[error("Turn order violated: {0}")]
    TurnOrder(String),
}

/// Input for the RunDebate use case
#[derive(Debug, Clone)]
pub struct RunDebateInput {
    pub topic: String,
    pub affirmative_model: String,
    pub negative_model: String,
    /// `None` uses the configured default
    pub rounds: Option<u32>,
}

impl RunDebateInput {
    pub fn new(
        topic: impl Into<String>,
        affirmative_model: impl Into<String>,
        negative_model: impl Into<String>,
    ) -> Self {
        Self {
            topic: topic.into(),
            affirmative_model: affirmative_model.into(),
            negative_model: negative_model.into(),
            rounds: None,
        }
    }

    pub fn with_rounds(mut self, rounds: Option<u32>) -> Self {
        self.rounds = rounds;
        self
    }
}

/// Use case for running a two-model debate
pub struct RunDebateUseCase {
    query: QueryModelUseCase,
}

impl RunDebateUseCase {
    pub fn new(query: QueryModelUseCase) -> Self {
        Self { query }
    }

    pub async fn execute(&self, input: RunDebateInput) -> Result<DebateResult, DebateError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        input: RunDebateInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<DebateResult, DebateError> {
        let config = self.query.context().config();
        let max = config.max_debate_rounds;
        let rounds = input.rounds.unwrap_or(config.default_debate_rounds);
        if rounds == 0 || rounds > max {
            return Err(DebateError::InvalidRounds {
                requested: rounds,
                max,
            });
        }

        info!(
            "Starting {}-round debate: {} (affirmative) vs {} (negative)",
            rounds, input.affirmative_model, input.negative_model
        );
        let started = Instant::now();
        let mut state = DebateState::new(rounds);

        while let DebateTurn::Speak { round, side } = state.next_turn() {
            let phase = Phase::DebateRound(round);
            if side == DebateSide::Affirmative {
                progress.on_phase_start(&phase, 2);
            }

            let (model, system, prompt) = match side {
                DebateSide::Affirmative => (
                    &input.affirmative_model,
                    PromptTemplate::debate_affirmative_system(),
                    PromptTemplate::debate_affirmative(
                        &input.topic,
                        round,
                        rounds,
                        state.transcript(),
                    ),
                ),
                DebateSide::Negative => (
                    &input.negative_model,
                    PromptTemplate::debate_negative_system(),
                    PromptTemplate::debate_negative(
                        &input.topic,
                        round,
                        rounds,
                        state.transcript(),
                    ),
                ),
            };

            let result = self
                .query
                .execute(
                    QueryModelInput::new(model.clone(), prompt)
                        .with_system_prompt(Some(system.to_string())),
                )
                .await;
            progress.on_task_complete(&phase, model, result.is_success());

            let text = match result {
                QueryResult::Success(s) => s.text,
                QueryResult::Failure(f) => {
                    warn!("Debate aborted: {} failed in round {}: {}", side, round, f.error);
                    progress.on_phase_complete(&phase);
                    return Err(DebateError::TurnFailed {
                        side,
                        round,
                        model: f.model,
                        reason: f.error,
                    });
                }
            };

            state
                .record(side, text)
                .map_err(|e| DebateError::TurnOrder(e.to_string()))?;

            if side == DebateSide::Negative {
                progress.on_phase_complete(&phase);
            }
        }

        let total_latency_ms = started.elapsed().as_millis() as u64;
        info!("Debate finished after {} rounds in {}ms", rounds, total_latency_ms);

        Ok(DebateResult::new(
            input.topic,
            input.affirmative_model,
            input.negative_model,
            state.into_rounds(),
            total_latency_ms,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OrchestrationConfig;
    use crate::ports::llm_gateway::GatewayError;
    use crate::test_support::{MockFactory, Script, context, reply};
    use std::sync::Arc;

    fn use_case(factory: Arc<MockFactory>) -> RunDebateUseCase {
        RunDebateUseCase::new(QueryModelUseCase::new(context(
            factory,
            OrchestrationConfig::default(),
        )))
    }

    #[tokio::test]
    async fn test_r_rounds_in_order() {
        let factory = Arc::new(
            MockFactory::echo()
                .script("pro", vec![reply("pro 1"), reply("pro 2"), reply("pro 3")])
                .script("con", vec![reply("con 1"), reply("con 2"), reply("con 3")]),
        );
        let uc = use_case(factory.clone());

        let result = uc
            .execute(
                RunDebateInput::new("Rust is fun", "openai/pro", "anthropic/con")
                    .with_rounds(Some(3)),
            )
            .await
            .unwrap();

        assert_eq!(result.rounds.len(), 3);
        assert_eq!(result.total_exchanges, 6);
        for (i, round) in result.rounds.iter().enumerate() {
            assert_eq!(round.round_number, i as u32 + 1);
            assert_eq!(round.affirmative_text, format!("pro {}", i + 1));
            assert_eq!(round.negative_text, format!("con {}", i + 1));
        }

        // Strict alternation, and each turn sees every earlier turn
        let calls = factory.calls();
        let order: Vec<_> = calls.iter().map(|c| c.model.as_str()).collect();
        assert_eq!(order, vec!["pro", "con", "pro", "con", "pro", "con"]);
        assert!(!calls[0].prompt.contains("Debate so far"));
        assert!(calls[1].prompt.contains("pro 1"));
        assert!(calls[4].prompt.contains("pro 1"));
        assert!(calls[4].prompt.contains("con 2"));
        assert!(calls[5].prompt.contains("pro 3"));
    }

    #[tokio::test]
    async fn test_default_rounds() {
        let factory = Arc::new(MockFactory::echo());
        let uc = use_case(factory);
        let result = uc
            .execute(RunDebateInput::new("t", "openai/a", "openai/b"))
            .await
            .unwrap();
        assert_eq!(result.rounds.len(), 2);
        assert_eq!(result.total_exchanges, 4);
    }

    #[tokio::test]
    async fn test_negative_failure_in_round_two_aborts() {
        let factory = Arc::new(MockFactory::echo().script(
            "con",
            vec![
                reply("con 1"),
                Script::Fail(GatewayError::HttpStatus {
                    status: 503,
                    body: "overloaded".to_string(),
                }),
            ],
        ));
        let uc = use_case(factory.clone());

        let err = uc
            .execute(RunDebateInput::new("t", "openai/pro", "openai/con").with_rounds(Some(3)))
            .await
            .unwrap_err();

        match &err {
            DebateError::TurnFailed {
                side, round, model, ..
            } => {
                assert_eq!(*side, DebateSide::Negative);
                assert_eq!(*round, 2);
                assert_eq!(model, "openai/con");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("negative"));
        assert!(err.to_string().contains("round 2"));
        // Round 3 never started
        assert_eq!(factory.calls().len(), 4);
    }

    #[tokio::test]
    async fn test_affirmative_resolution_failure_aborts_round_one() {
        let uc = use_case(Arc::new(MockFactory::echo()));
        let err = uc
            .execute(RunDebateInput::new("t", "mystery", "openai/con"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DebateError::TurnFailed {
                side: DebateSide::Affirmative,
                round: 1,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_rounds_out_of_range_rejected() {
        let factory = Arc::new(MockFactory::echo());
        let uc = use_case(factory.clone());

        for rounds in [0, 6] {
            let err = uc
                .execute(RunDebateInput::new("t", "openai/a", "openai/b").with_rounds(Some(rounds)))
                .await
                .unwrap_err();
            assert_eq!(
                err,
                DebateError::InvalidRounds {
                    requested: rounds,
                    max: 5
                }
            );
        }
        assert!(factory.calls().is_empty());
    }
}
