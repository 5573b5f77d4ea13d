//! Orchestration parameters: limits and defaults for every operation.
//!
//! These are application-layer concerns, not domain policy. The
//! infrastructure layer fills them from the `[orchestration]` config section.

use council_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Process-wide orchestration limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestrationConfig {
    /// Maximum number of provider calls in flight at once.
    pub max_concurrent: usize,
    /// Per-query timeout in milliseconds.
    pub timeout_ms: u64,
    /// Models used when a fan-out or challenge names none.
    pub default_models: Vec<String>,
    /// Ceiling for debate rounds.
    pub max_debate_rounds: u32,
    /// Rounds used when a debate does not specify any.
    pub default_debate_rounds: u32,
    /// Transport-level retries for transient failures.
    pub max_retries: u32,
}

impl Default for OrchestrationConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 5,
            timeout_ms: 60_000,
            default_models: vec![
                "anthropic/claude-sonnet-4.5".to_string(),
                "openai/gpt-5".to_string(),
                "google/gemini-2.5-pro".to_string(),
            ],
            max_debate_rounds: 5,
            default_debate_rounds: 2,
            max_retries: 2,
        }
    }
}

impl OrchestrationConfig {
    // ==================== Builder Methods ====================

    pub fn with_max_concurrent(mut self, max: usize) -> Self {
        self.max_concurrent = max;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn with_default_models(mut self, models: Vec<String>) -> Self {
        self.default_models = models;
        self
    }

    pub fn with_max_debate_rounds(mut self, max: u32) -> Self {
        self.max_debate_rounds = max;
        self
    }

    pub fn with_default_debate_rounds(mut self, rounds: u32) -> Self {
        self.default_debate_rounds = rounds;
        self
    }

    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    // ==================== Accessors ====================

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Validate limits, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.max_concurrent == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroLimit {
                    field: "orchestration.max_concurrent".to_string(),
                },
                "orchestration.max_concurrent must be at least 1",
            ));
        }
        if self.timeout_ms == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroLimit {
                    field: "orchestration.timeout_ms".to_string(),
                },
                "orchestration.timeout_ms must be positive",
            ));
        }
        if self.max_debate_rounds == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroLimit {
                    field: "orchestration.max_debate_rounds".to_string(),
                },
                "orchestration.max_debate_rounds must be at least 1",
            ));
        }
        if self.default_debate_rounds > self.max_debate_rounds {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::RoundsAboveCeiling {
                    rounds: self.default_debate_rounds,
                    max: self.max_debate_rounds,
                },
                format!(
                    "orchestration.default_debate_rounds ({}) exceeds max_debate_rounds ({}); debates without explicit rounds will be rejected",
                    self.default_debate_rounds, self.max_debate_rounds
                ),
            ));
        }
        if self.default_models.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyModelList,
                "orchestration.default_models must name at least one model",
            ));
        }
        for (i, model) in self.default_models.iter().enumerate() {
            if model.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyModelName {
                        field: format!("orchestration.default_models[{}]", i),
                    },
                    format!("orchestration.default_models[{}] is empty", i),
                ));
            }
        }

        issues
    }
}
