//! Orchestration limits from TOML (`[orchestration]` section)

use council_application::OrchestrationConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw orchestration configuration from TOML
///
/// # Example
///
/// ```toml
/// [orchestration]
/// max_concurrent = 5
/// timeout_seconds = 60
/// default_models = ["anthropic/claude-sonnet-4.5", "openai/gpt-5", "google/gemini-2.5-pro"]
/// max_debate_rounds = 5
/// default_debate_rounds = 2
/// max_retries = 2
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOrchestrationConfig {
    pub max_concurrent: usize,
    /// Per-query timeout; `timeout_ms` wins when both are set
    pub timeout_seconds: u64,
    pub timeout_ms: Option<u64>,
    pub default_models: Vec<String>,
    pub max_debate_rounds: u32,
    pub default_debate_rounds: u32,
    pub max_retries: u32,
}

impl Default for FileOrchestrationConfig {
    fn default() -> Self {
        let defaults = OrchestrationConfig::default();
        Self {
            max_concurrent: defaults.max_concurrent,
            timeout_seconds: defaults.timeout().as_secs(),
            timeout_ms: None,
            default_models: defaults.default_models,
            max_debate_rounds: defaults.max_debate_rounds,
            default_debate_rounds: defaults.default_debate_rounds,
            max_retries: defaults.max_retries,
        }
    }
}

impl FileOrchestrationConfig {
    pub fn timeout(&self) -> Duration {
        self.timeout_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| Duration::from_secs(self.timeout_seconds))
    }

    pub fn to_orchestration_config(&self) -> OrchestrationConfig {
        OrchestrationConfig::default()
            .with_max_concurrent(self.max_concurrent)
            .with_timeout(self.timeout())
            .with_default_models(
                self.default_models
                    .iter()
                    .map(|m| m.trim().to_string())
                    .collect(),
            )
            .with_max_debate_rounds(self.max_debate_rounds)
            .with_default_debate_rounds(self.default_debate_rounds)
            .with_max_retries(self.max_retries)
    }
}
