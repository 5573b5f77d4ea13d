//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use council_domain::ChallengeCategory;
use std::path::PathBuf;

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Pretty-printed JSON records
    Json,
}

/// CLI arguments for model-council
#[derive(Parser, Debug)]
#[command(name = "model-council")]
#[command(author, version, about = "Query, fan out, debate and critique across multiple LLM providers")]
#[command(long_about = r#"
model-council sends prompts to models from several providers at once while
keeping the number of in-flight requests under a single ceiling.

Model identifiers are `provider/model`, e.g. `anthropic/claude-sonnet-4.5`,
`openai/gpt-5` or `openrouter/meta-llama/llama-4-maverick`. A provider without
an API key is reached through OpenRouter when OPENROUTER_API_KEY is set.

Configuration files are loaded from (in priority order):
1. COUNCIL_* environment variables
2. --config <path>     Explicit config file
3. ./council.toml      Project-level config
4. ~/.config/model-council/config.toml   Global config

Example:
  model-council query openai/gpt-5 "Explain the borrow checker in one paragraph"
  model-council fan-out -m anthropic/claude-sonnet-4.5 -m google/gemini-2.5-pro "Is P = NP?"
  model-council debate "Tabs are better than spaces" --affirmative openai/gpt-5 --negative xai/grok-4
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format (defaults to the config file setting, then text)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ask one model
    Query(QueryArgs),

    /// Ask several models the same prompt in parallel
    #[command(name = "fan-out")]
    FanOut(FanOutArgs),

    /// Run a multi-round debate between two models
    Debate(DebateArgs),

    /// Have a model critique a response
    Critique(CritiqueArgs),

    /// Have several models challenge a proposed idea
    Challenge(ChallengeArgs),

    /// Show configuration sources, providers and model resolution
    Config,
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Model identifier (`provider/model`)
    pub model: String,

    /// The prompt
    pub prompt: String,

    /// Optional system prompt
    #[arg(short, long)]
    pub system: Option<String>,
}

#[derive(Args, Debug)]
pub struct FanOutArgs {
    /// The prompt
    pub prompt: String,

    /// Models to query (can be specified multiple times; defaults from config)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Vec<String>,

    /// Optional system prompt
    #[arg(short, long)]
    pub system: Option<String>,
}

#[derive(Args, Debug)]
pub struct DebateArgs {
    /// The proposition to debate
    pub topic: String,

    /// Model arguing in favour
    #[arg(long, value_name = "MODEL")]
    pub affirmative: String,

    /// Model arguing against
    #[arg(long, value_name = "MODEL")]
    pub negative: String,

    /// Number of rounds (defaults from config)
    #[arg(short, long)]
    pub rounds: Option<u32>,
}

#[derive(Args, Debug)]
pub struct CritiqueArgs {
    /// Model acting as critic
    #[arg(long, value_name = "MODEL")]
    pub critic: String,

    /// The prompt that produced the response
    #[arg(long)]
    pub prompt: String,

    /// The response to critique
    #[arg(long, required_unless_present = "response_file", conflicts_with = "response_file")]
    pub response: Option<String>,

    /// Read the response to critique from a file
    #[arg(long, value_name = "PATH")]
    pub response_file: Option<PathBuf>,

    /// Aspect to evaluate (can be specified multiple times)
    #[arg(short, long = "aspect", value_name = "ASPECT")]
    pub aspects: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ChallengeArgs {
    /// The idea to challenge
    pub thought: String,

    /// Background the challengers should take into account
    #[arg(long)]
    pub context: Option<String>,

    /// Challenger models (can be specified multiple times; defaults from config)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Vec<String>,

    /// Challenge category to focus on (can be specified multiple times)
    #[arg(short, long = "category", value_name = "CATEGORY", value_parser = parse_category)]
    pub categories: Vec<ChallengeCategory>,
}

fn parse_category(s: &str) -> Result<ChallengeCategory, String> {
    ChallengeCategory::from_label(s).ok_or_else(|| {
        let valid = ChallengeCategory::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!("unknown category '{}' (expected one of: {})", s, valid)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_fan_out_args() {
        let cli = Cli::parse_from([
            "model-council",
            "fan-out",
            "-m",
            "openai/gpt-5",
            "-m",
            "anthropic/claude-sonnet-4.5",
            "hello",
            "-o",
            "json",
        ]);
        assert_eq!(cli.output, Some(OutputFormat::Json));
        match cli.command {
            Command::FanOut(args) => {
                assert_eq!(args.model.len(), 2);
                assert_eq!(args.prompt, "hello");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_challenge_categories() {
        let cli = Cli::parse_from([
            "model-council",
            "challenge",
            "Ship it",
            "-c",
            "edge-case",
            "-c",
            "risk",
        ]);
        match cli.command {
            Command::Challenge(args) => assert_eq!(
                args.categories,
                vec![ChallengeCategory::EdgeCase, ChallengeCategory::Risk]
            ),
            other => panic!("unexpected command: {other:?}"),
        }

        assert!(Cli::try_parse_from(["model-council", "challenge", "x", "-c", "vibes"]).is_err());
    }

    #[test]
    fn test_debate_requires_both_sides() {
        assert!(
            Cli::try_parse_from(["model-council", "debate", "t", "--affirmative", "openai/a"])
                .is_err()
        );
        let cli = Cli::parse_from([
            "model-council",
            "-vv",
            "debate",
            "t",
            "--affirmative",
            "openai/a",
            "--negative",
            "openai/b",
            "--rounds",
            "3",
        ]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Debate(DebateArgs { rounds: Some(3), .. })));
    }
}
