//! Critique and challenge records.

use crate::orchestration::value_objects::QueryFailure;
use serde::{Deserialize, Serialize};

/// Default aspects a critic evaluates when the caller names none.
pub const DEFAULT_CRITIQUE_ASPECTS: [&str; 4] =
    ["accuracy", "completeness", "clarity", "reasoning"];

/// Structured critique of a response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Critique {
    /// Overall assessment; holds the raw response text when the critic's
    /// output could not be parsed.
    pub assessment: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    /// Score from 1 to 10, when the critic gave one
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub score: Option<f64>,
}

impl Critique {
    /// Degraded record used when structured extraction fails.
    pub fn fallback(raw: impl Into<String>) -> Self {
        Self {
            assessment: raw.into(),
            ..Default::default()
        }
    }

    /// Whether any structured list was populated.
    pub fn is_structured(&self) -> bool {
        !(self.strengths.is_empty() && self.weaknesses.is_empty() && self.suggestions.is_empty())
    }
}

/// Outcome of a critique operation.
///
/// A failed query is reported as data, never as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CritiqueResult {
    Completed {
        critic_model: String,
        critique: Critique,
        latency_ms: u64,
    },
    Failed {
        critic_model: String,
        error: String,
    },
}

impl CritiqueResult {
    pub fn critique(&self) -> Option<&Critique> {
        match self {
            CritiqueResult::Completed { critique, .. } => Some(critique),
            CritiqueResult::Failed { .. } => None,
        }
    }

    pub fn critic_model(&self) -> &str {
        match self {
            CritiqueResult::Completed { critic_model, .. }
            | CritiqueResult::Failed { critic_model, .. } => critic_model,
        }
    }
}

/// Kind of weakness a challenger points at (closed set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeCategory {
    /// An unstated or questionable premise.
    Assumption,
    /// A flaw in the chain of reasoning.
    Logic,
    /// Missing or weak supporting evidence.
    Evidence,
    /// A competing approach that was not considered.
    Alternative,
    /// A downside or failure mode.
    Risk,
    /// A boundary condition the thought does not cover.
    EdgeCase,
}

impl ChallengeCategory {
    pub const ALL: [ChallengeCategory; 6] = [
        ChallengeCategory::Assumption,
        ChallengeCategory::Logic,
        ChallengeCategory::Evidence,
        ChallengeCategory::Alternative,
        ChallengeCategory::Risk,
        ChallengeCategory::EdgeCase,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assumption => "assumption",
            Self::Logic => "logic",
            Self::Evidence => "evidence",
            Self::Alternative => "alternative",
            Self::Risk => "risk",
            Self::EdgeCase => "edge_case",
        }
    }

    /// Lenient lookup: case-insensitive, `-`/space/`_` interchangeable,
    /// trailing plural `s` accepted.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase().replace(['-', ' '], "_");
        let singular = normalized.strip_suffix('s').unwrap_or(&normalized);
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized || c.as_str() == singular)
    }
}

impl std::fmt::Display for ChallengeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How serious a challenge is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeSeverity {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl ChallengeSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "low" | "minor" => Some(Self::Low),
            "medium" | "moderate" => Some(Self::Medium),
            "high" | "major" => Some(Self::High),
            "critical" | "blocking" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for ChallengeSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One objection raised against a proposed thought.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    /// Model that raised the challenge
    pub challenger: String,
    pub category: ChallengeCategory,
    pub severity: ChallengeSeverity,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub suggestion: Option<String>,
}

/// Outcome of a challenge fan-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeResult {
    pub proposed_thought: String,
    /// Challenges from every challenger whose response parsed, in
    /// completion order
    pub challenges: Vec<Challenge>,
    /// Challengers that answered (whether or not their output parsed)
    pub challengers: Vec<String>,
    /// Challengers whose query failed
    pub failures: Vec<QueryFailure>,
    pub total_latency_ms: u64,
}

impl ChallengeResult {
    /// Challenges at or above the given severity.
    pub fn at_least(&self, severity: ChallengeSeverity) -> impl Iterator<Item = &Challenge> {
        self.challenges.iter().filter(move |c| c.severity >= severity)
    }
}
