//! Orchestration value objects - immutable result records.
//!
//! These types are what every outward operation returns:
//! - [`QueryResult`] - one model's outcome, success or failure
//! - [`AggregateResult`] - a fan-out partitioned into successes and failures
//! - [`DebateRound`] / [`DebateResult`] - a completed multi-round debate
//!
//! All of them serialize to plain nested JSON records.

use serde::{Deserialize, Serialize};

/// A model that answered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySuccess {
    /// The identifier the caller asked for
    pub model: String,
    /// Router-relative model path when the request was served through the
    /// router fallback
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub actual_model: Option<String>,
    /// The response text
    pub text: String,
    /// Wall-clock time measured around the call, in milliseconds
    pub latency_ms: u64,
}

/// A model that could not answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFailure {
    /// The identifier the caller asked for
    pub model: String,
    /// Description of why the query failed
    pub error: String,
}

/// Outcome of querying one model.
///
/// Exactly one variant is populated; consumers discriminate on the presence
/// of `text` versus `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryResult {
    Success(QuerySuccess),
    Failure(QueryFailure),
}

impl QueryResult {
    /// Creates a successful result.
    pub fn success(model: impl Into<String>, text: impl Into<String>, latency_ms: u64) -> Self {
        QueryResult::Success(QuerySuccess {
            model: model.into(),
            actual_model: None,
            text: text.into(),
            latency_ms,
        })
    }

    /// Creates a failed result.
    pub fn failure(model: impl Into<String>, error: impl Into<String>) -> Self {
        QueryResult::Failure(QueryFailure {
            model: model.into(),
            error: error.into(),
        })
    }

    /// Records the router-relative model actually used. No-op on failures.
    pub fn with_actual_model(mut self, actual: Option<String>) -> Self {
        if let QueryResult::Success(ref mut s) = self {
            s.actual_model = actual;
        }
        self
    }

    /// The identifier the caller asked for.
    pub fn model(&self) -> &str {
        match self {
            QueryResult::Success(s) => &s.model,
            QueryResult::Failure(f) => &f.model,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, QueryResult::Success(_))
    }

    /// Response text, if the query succeeded.
    pub fn text(&self) -> Option<&str> {
        match self {
            QueryResult::Success(s) => Some(&s.text),
            QueryResult::Failure(_) => None,
        }
    }

    /// Error message, if the query failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            QueryResult::Success(_) => None,
            QueryResult::Failure(f) => Some(&f.error),
        }
    }
}

/// Fan-out outcome.
///
/// Element order follows completion order, not submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub successes: Vec<QuerySuccess>,
    pub failures: Vec<QueryFailure>,
    /// Wall-clock from dispatch to the last result settling
    pub total_latency_ms: u64,
    pub success_count: usize,
}

impl AggregateResult {
    /// Partitions settled results by their tag.
    pub fn from_results(results: Vec<QueryResult>, total_latency_ms: u64) -> Self {
        let mut successes = Vec::new();
        let mut failures = Vec::new();
        for result in results {
            match result {
                QueryResult::Success(s) => successes.push(s),
                QueryResult::Failure(f) => failures.push(f),
            }
        }
        Self {
            success_count: successes.len(),
            successes,
            failures,
            total_latency_ms,
        }
    }

    /// Total number of models queried.
    pub fn total(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    pub fn all_failed(&self) -> bool {
        self.successes.is_empty()
    }

    /// Successful response for a given model identifier.
    pub fn success_for(&self, model: &str) -> Option<&QuerySuccess> {
        self.successes.iter().find(|s| s.model == model)
    }

    /// Failure for a given model identifier.
    pub fn failure_for(&self, model: &str) -> Option<&QueryFailure> {
        self.failures.iter().find(|f| f.model == model)
    }
}

/// One completed debate round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateRound {
    /// 1-indexed
    pub round_number: u32,
    pub affirmative_text: String,
    pub negative_text: String,
}

/// A completed debate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateResult {
    pub topic: String,
    pub affirmative_model: String,
    pub negative_model: String,
    pub rounds: Vec<DebateRound>,
    /// Always `2 * rounds.len()`
    pub total_exchanges: usize,
    pub total_latency_ms: u64,
}

impl DebateResult {
    pub fn new(
        topic: impl Into<String>,
        affirmative_model: impl Into<String>,
        negative_model: impl Into<String>,
        rounds: Vec<DebateRound>,
        total_latency_ms: u64,
    ) -> Self {
        Self {
            topic: topic.into(),
            affirmative_model: affirmative_model.into(),
            negative_model: negative_model.into(),
            total_exchanges: rounds.len() * 2,
            rounds,
            total_latency_ms,
        }
    }
}
