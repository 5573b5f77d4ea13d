//! Workflow phases reported to progress notifiers.

use serde::{Deserialize, Serialize};

/// Stage of an outward operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Fan-out of one prompt to many models
    FanOut,
    /// One debate round (1-indexed)
    DebateRound(u32),
    /// Single-critic critique
    Critique,
    /// Multi-challenger challenge
    Challenge,
}

impl Phase {
    pub fn label(&self) -> String {
        match self {
            Phase::FanOut => "Fan-out".to_string(),
            Phase::DebateRound(r) => format!("Debate round {}", r),
            Phase::Critique => "Critique".to_string(),
            Phase::Challenge => "Challenge".to_string(),
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
