//! Debate state machine: turn order and transcript accumulation.
//!
//! A debate of `R` rounds alternates affirmative and negative turns:
//!
//! ```text
//! Affirmative(1) → Negative(1) → Affirmative(2) → ... → Negative(R) → Finished
//! ```
//!
//! [`DebateState`] owns the accumulated transcript. Every turn sees the full
//! text of all prior turns in order, including the affirmative turn of the
//! current round when it is the negative side's turn.

use crate::orchestration::value_objects::DebateRound;
use serde::{Deserialize, Serialize};

/// Side of a debate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebateSide {
    Affirmative,
    Negative,
}

impl DebateSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Affirmative => "affirmative",
            Self::Negative => "negative",
        }
    }

    /// Heading used for this side inside the transcript.
    fn heading(&self) -> &'static str {
        match self {
            Self::Affirmative => "AFFIRMATIVE",
            Self::Negative => "NEGATIVE",
        }
    }
}

impl std::fmt::Display for DebateSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whose turn is next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebateTurn {
    Speak { round: u32, side: DebateSide },
    Finished,
}

/// Error for out-of-order turn recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOrderError {
    pub expected: DebateTurn,
    pub got: DebateSide,
}

impl std::fmt::Display for TurnOrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "expected {:?}, got a {} turn", self.expected, self.got)
    }
}

impl std::error::Error for TurnOrderError {}

/// Progress of a debate.
#[derive(Debug, Clone)]
pub struct DebateState {
    total_rounds: u32,
    completed: Vec<DebateRound>,
    transcript: String,
    pending_affirmative: Option<String>,
}

impl DebateState {
    pub fn new(total_rounds: u32) -> Self {
        Self {
            total_rounds,
            completed: Vec::new(),
            transcript: String::new(),
            pending_affirmative: None,
        }
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    /// Full text of all prior turns, in order.
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn completed_rounds(&self) -> &[DebateRound] {
        &self.completed
    }

    pub fn next_turn(&self) -> DebateTurn {
        let round = self.completed.len() as u32 + 1;
        if round > self.total_rounds {
            return DebateTurn::Finished;
        }
        let side = if self.pending_affirmative.is_some() {
            DebateSide::Negative
        } else {
            DebateSide::Affirmative
        };
        DebateTurn::Speak { round, side }
    }

    pub fn is_finished(&self) -> bool {
        self.next_turn() == DebateTurn::Finished
    }

    /// Records the text of the side whose turn it is.
    pub fn record(
        &mut self,
        side: DebateSide,
        text: impl Into<String>,
    ) -> Result<(), TurnOrderError> {
        let expected = self.next_turn();
        let DebateTurn::Speak { round, side: due } = expected else {
            return Err(TurnOrderError { expected, got: side });
        };
        if due != side {
            return Err(TurnOrderError { expected, got: side });
        }

        let text = text.into();
        self.append_transcript(round, side, &text);

        match side {
            DebateSide::Affirmative => self.pending_affirmative = Some(text),
            DebateSide::Negative => {
                let affirmative_text = self.pending_affirmative.take().unwrap_or_default();
                self.completed.push(DebateRound {
                    round_number: round,
                    affirmative_text,
                    negative_text: text,
                });
            }
        }
        Ok(())
    }

    /// Consumes the state, returning the completed rounds.
    pub fn into_rounds(self) -> Vec<DebateRound> {
        self.completed
    }

    fn append_transcript(&mut self, round: u32, side: DebateSide, text: &str) {
        if !self.transcript.is_empty() {
            self.transcript.push_str("\n\n");
        }
        self.transcript
            .push_str(&format!("[Round {} - {}]\n{}", round, side.heading(), text.trim()));
    }
}
