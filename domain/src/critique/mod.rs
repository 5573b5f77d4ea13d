//! Critique and challenge domain
//!
//! Typed records derived from a critic's free-text response, and the
//! lenient parsers that derive them. Parse failure is a designed
//! degradation, not an error.

pub mod entities;
pub mod parsing;

pub use entities::{
    Challenge, ChallengeCategory, ChallengeResult, ChallengeSeverity, Critique, CritiqueResult,
    DEFAULT_CRITIQUE_ASPECTS,
};
pub use parsing::{
    critique_or_fallback, extract_json, fenced_blocks, parse_challenges, parse_critique,
};
