//! Presentation layer for model-council
//!
//! This crate contains CLI definitions, output formatters and progress
//! reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{
    ChallengeArgs, Cli, Command, CritiqueArgs, DebateArgs, FanOutArgs, OutputFormat, QueryArgs,
};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
