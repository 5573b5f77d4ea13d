//! Domain layer for model-council
//!
//! This crate contains the core value objects and pure logic.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Provider / ParsedModel**: a closed set of upstream services and the
//!   `provider/model` identifiers that address them
//! - **QueryResult / AggregateResult**: per-model outcomes, where failures
//!   are data rather than errors
//! - **DebateState**: strict affirmative-then-negative turn order with an
//!   accumulated transcript
//! - **Critique / Challenge**: structured records scraped leniently from
//!   free-text model output

pub mod config;
pub mod core;
pub mod critique;
pub mod orchestration;
pub mod prompt;
pub mod providers;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use core::{
    error::DomainError,
    model::{ParsedModel, Provider},
};
pub use critique::{
    Challenge, ChallengeCategory, ChallengeResult, ChallengeSeverity, Critique, CritiqueResult,
    DEFAULT_CRITIQUE_ASPECTS,
};
pub use orchestration::{
    debate::{DebateSide, DebateState, DebateTurn},
    phase::Phase,
    value_objects::{
        AggregateResult, DebateResult, DebateRound, QueryFailure, QueryResult, QuerySuccess,
    },
};
pub use prompt::PromptTemplate;
pub use providers::{ProviderConfig, ProviderSettings};
