//! CLI entrypoint for model-council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use colored::Colorize;
use council_application::{
    Council, OrchestrationContext, ProgressNotifier, ResolutionPlan, RunChallengeInput,
    RunCritiqueInput,
};
use council_domain::{ConfigIssue, Provider, Severity};
use council_infrastructure::{ConfigLoader, FileConfig, FileOutputFormat, HttpEndpointFactory};
use council_presentation::{
    Cli, Command, ConsoleFormatter, OutputFormat, ProgressReporter, SimpleProgress,
};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; stdout is reserved for results
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting model-council");

    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    if !file_config.output.color {
        colored::control::set_override(false);
    }

    let providers = file_config.providers.to_provider_config();
    let issues = file_config.validate_with(&providers);

    if matches!(cli.command, Command::Config) {
        print_config(cli.no_config, cli.config.as_deref(), &file_config, &issues);
        return Ok(());
    }

    for issue in &issues {
        match issue.severity {
            Severity::Warning => warn!("{}", issue.message),
            Severity::Error => bail!("Invalid configuration: {}", issue.message),
        }
    }

    // === Dependency Injection ===
    let orchestration = file_config.orchestration.to_orchestration_config();
    let factory = Arc::new(
        HttpEndpointFactory::new(providers.clone(), orchestration.max_retries)
            .context("Failed to create HTTP client")?,
    );
    let context = Arc::new(OrchestrationContext::new(orchestration, providers, factory));

    let show_progress = !cli.quiet && file_config.output.show_progress;
    let mut council = Council::new(context);
    if show_progress {
        let progress: Arc<dyn ProgressNotifier> = if std::io::stderr().is_terminal() {
            Arc::new(ProgressReporter::new())
        } else {
            Arc::new(SimpleProgress)
        };
        council = council.with_progress(progress);
    }

    let format = cli.output.unwrap_or(match file_config.output.format {
        Some(FileOutputFormat::Json) => OutputFormat::Json,
        Some(FileOutputFormat::Text) | None => OutputFormat::Text,
    });

    let output = match cli.command {
        Command::Query(args) => {
            let result = council
                .query_model(&args.model, &args.prompt, args.system.as_deref())
                .await;
            ConsoleFormatter::format(&result, format)
        }
        Command::FanOut(args) => {
            let result = council
                .query_models(args.model, &args.prompt, args.system.as_deref())
                .await;
            ConsoleFormatter::format(&result, format)
        }
        Command::Debate(args) => {
            let result = council
                .run_debate(&args.topic, &args.affirmative, &args.negative, args.rounds)
                .await?;
            ConsoleFormatter::format(&result, format)
        }
        Command::Critique(args) => {
            let response = match (args.response, args.response_file) {
                (Some(response), _) => response,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                (None, None) => bail!("Either --response or --response-file is required"),
            };
            let input = RunCritiqueInput::new(args.prompt, response, args.critic)
                .with_aspects(args.aspects);
            let result = council.run_critique(input).await;
            ConsoleFormatter::format(&result, format)
        }
        Command::Challenge(args) => {
            let input = RunChallengeInput::new(args.thought, args.model)
                .with_context(args.context)
                .with_categories(args.categories);
            let result = council.run_challenge(input).await;
            ConsoleFormatter::format(&result, format)
        }
        Command::Config => return Ok(()),
    };

    println!("{}", output);

    Ok(())
}

/// Print configuration sources, limits, providers and how each default
/// model resolves.
fn print_config(
    no_config: bool,
    config_path: Option<&Path>,
    config: &FileConfig,
    issues: &[ConfigIssue],
) {
    println!("{}", "Configuration sources (in priority order):".bold());
    if no_config {
        println!("  [     ] files disabled by --no-config");
    } else {
        for source in ConfigLoader::sources(config_path) {
            let mark = if source.found { "FOUND" } else { "     " };
            println!("  [{}] {:<8} {}", mark, format!("{}:", source.label), source.location);
        }
    }

    let orchestration = config.orchestration.to_orchestration_config();
    println!("\n{}", "Orchestration:".bold());
    println!("  max_concurrent:        {}", orchestration.max_concurrent);
    println!("  timeout:               {}ms", orchestration.timeout_ms);
    println!("  max_retries:           {}", orchestration.max_retries);
    println!("  default_debate_rounds: {}", orchestration.default_debate_rounds);
    println!("  max_debate_rounds:     {}", orchestration.max_debate_rounds);

    let providers = config.providers.to_provider_config();
    println!("\n{}", "Providers:".bold());
    for provider in Provider::ALL {
        let entry = config.providers.entry(provider);
        let status = if providers.is_configured(provider) {
            "configured".green()
        } else {
            "missing key".dimmed()
        };
        println!(
            "  {:<11} {:<12} ({}, {})",
            provider.as_str(),
            status,
            entry.credential_env(provider),
            providers.base_url(provider)
        );
    }

    println!("\n{}", "Default models:".bold());
    for model in &orchestration.default_models {
        match ResolutionPlan::new(model, &providers) {
            Ok(plan) if plan.is_fallback() => println!(
                "  {} -> {} {}",
                model,
                plan.target,
                format!("({})", plan.request_model).dimmed()
            ),
            Ok(plan) => println!("  {} -> {}", model, plan.target),
            Err(e) => println!("  {} -> {}", model, e.to_string().red()),
        }
    }

    if !issues.is_empty() {
        println!("\n{}", "Issues:".bold());
        for issue in issues {
            let label = match issue.severity {
                Severity::Error => "error".red().bold(),
                Severity::Warning => "warning".yellow(),
            };
            println!("  {}: {}", label, issue.message);
        }
    }
}
