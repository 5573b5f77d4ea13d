//! Console output formatting for council results

use crate::cli::commands::OutputFormat;
use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use council_domain::{
    AggregateResult, ChallengeResult, ChallengeSeverity, CritiqueResult, DebateResult, QueryResult,
};

/// Formats results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format any result in the requested format
    pub fn format<T: OutputFormatter>(result: &T, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => result.format_text(),
            OutputFormat::Json => result.format_json(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}\n", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    fn bullets(output: &mut String, label: colored::ColoredString, items: &[String]) {
        if items.is_empty() {
            return;
        }
        output.push_str(&format!("\n{}\n", label));
        for item in items {
            output.push_str(&format!("  * {}\n", item));
        }
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for QueryResult {
    fn format_text(&self) -> String {
        match self {
            QueryResult::Success(s) => {
                let mut title = format!("── {} ({}ms) ──", s.model, s.latency_ms);
                if let Some(actual) = &s.actual_model {
                    title = format!(
                        "── {} via openrouter/{} ({}ms) ──",
                        s.model, actual, s.latency_ms
                    );
                }
                format!("{}\n{}\n", title.yellow().bold(), s.text)
            }
            QueryResult::Failure(f) => format!(
                "{}\nError: {}\n",
                format!("── {} ──", f.model).red().bold(),
                f.error
            ),
        }
    }
}

impl OutputFormatter for AggregateResult {
    fn format_text(&self) -> String {
        let mut output = ConsoleFormatter::header("Fan-out Results");

        for success in &self.successes {
            output.push('\n');
            output.push_str(&QueryResult::Success(success.clone()).format_text());
        }

        if !self.failures.is_empty() {
            output.push_str(&ConsoleFormatter::section_header("Failures"));
            for failure in &self.failures {
                output.push_str(&format!("  {} {}: {}\n", "x".red(), failure.model, failure.error));
            }
        }

        output.push_str(&format!(
            "\n{} {}/{} succeeded in {}ms\n",
            "Summary:".cyan().bold(),
            self.success_count,
            self.total(),
            self.total_latency_ms
        ));
        output.push_str(&ConsoleFormatter::footer());
        output
    }
}

impl OutputFormatter for DebateResult {
    fn format_text(&self) -> String {
        let mut output = ConsoleFormatter::header("Debate");
        output.push_str(&format!("{} {}\n", "Topic:".cyan().bold(), self.topic));
        output.push_str(&format!(
            "{} {}\n{} {}\n",
            "Affirmative:".green().bold(),
            self.affirmative_model,
            "Negative:".red().bold(),
            self.negative_model
        ));

        for round in &self.rounds {
            output.push_str(&ConsoleFormatter::section_header(&format!(
                "Round {}",
                round.round_number
            )));
            output.push_str(&format!(
                "\n{}\n{}\n",
                "Affirmative".green().bold(),
                ConsoleFormatter::indent(&round.affirmative_text, "  ")
            ));
            output.push_str(&format!(
                "\n{}\n{}\n",
                "Negative".red().bold(),
                ConsoleFormatter::indent(&round.negative_text, "  ")
            ));
        }

        output.push_str(&format!(
            "\n{} {} exchanges in {}ms\n",
            "Summary:".cyan().bold(),
            self.total_exchanges,
            self.total_latency_ms
        ));
        output.push_str(&ConsoleFormatter::footer());
        output
    }
}

impl OutputFormatter for CritiqueResult {
    fn format_text(&self) -> String {
        match self {
            CritiqueResult::Completed {
                critic_model,
                critique,
                latency_ms,
            } => {
                let mut output = ConsoleFormatter::header("Critique");
                output.push_str(&format!(
                    "{} {} ({}ms)\n",
                    "Critic:".cyan().bold(),
                    critic_model,
                    latency_ms
                ));
                if let Some(score) = critique.score {
                    output.push_str(&format!("{} {:.1}/10\n", "Score:".cyan().bold(), score));
                }
                output.push_str(&format!("\n{}\n", critique.assessment));
                ConsoleFormatter::bullets(
                    &mut output,
                    "Strengths:".green().bold(),
                    &critique.strengths,
                );
                ConsoleFormatter::bullets(
                    &mut output,
                    "Weaknesses:".yellow().bold(),
                    &critique.weaknesses,
                );
                ConsoleFormatter::bullets(
                    &mut output,
                    "Suggestions:".cyan().bold(),
                    &critique.suggestions,
                );
                output.push_str(&ConsoleFormatter::footer());
                output
            }
            CritiqueResult::Failed {
                critic_model,
                error,
            } => format!(
                "{}\nError: {}\n",
                format!("── Critique by {} failed ──", critic_model).red().bold(),
                error
            ),
        }
    }
}

impl OutputFormatter for ChallengeResult {
    fn format_text(&self) -> String {
        let mut output = ConsoleFormatter::header("Challenges");
        output.push_str(&format!(
            "{} {}\n",
            "Proposed:".cyan().bold(),
            self.proposed_thought
        ));

        let mut challenges: Vec<_> = self.challenges.iter().collect();
        challenges.sort_by(|a, b| b.severity.cmp(&a.severity));

        if challenges.is_empty() {
            output.push_str(&format!("\n{}\n", "No challenges raised.".dimmed()));
        }
        for challenge in challenges {
            let severity = match challenge.severity {
                ChallengeSeverity::Critical => challenge.severity.as_str().red().bold(),
                ChallengeSeverity::High => challenge.severity.as_str().red(),
                ChallengeSeverity::Medium => challenge.severity.as_str().yellow(),
                ChallengeSeverity::Low => challenge.severity.as_str().dimmed(),
            };
            output.push_str(&format!(
                "\n[{}] {} ({})\n  {}\n",
                severity,
                challenge.category.as_str().bold(),
                challenge.challenger.dimmed(),
                challenge.description
            ));
            if let Some(suggestion) = &challenge.suggestion {
                output.push_str(&format!("  {} {}\n", "->".cyan(), suggestion));
            }
        }

        if !self.failures.is_empty() {
            output.push_str(&ConsoleFormatter::section_header("Failed challengers"));
            for failure in &self.failures {
                output.push_str(&format!("  {} {}: {}\n", "x".red(), failure.model, failure.error));
            }
        }

        output.push_str(&format!(
            "\n{} {} challenges from {} models in {}ms\n",
            "Summary:".cyan().bold(),
            self.challenges.len(),
            self.challengers.len(),
            self.total_latency_ms
        ));
        output.push_str(&ConsoleFormatter::footer());
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{Critique, DebateRound};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_query_text_and_json() {
        plain();
        let ok = QueryResult::success("openai/gpt-5", "Hello", 42);
        let text = ConsoleFormatter::format(&ok, OutputFormat::Text);
        assert!(text.contains("openai/gpt-5 (42ms)"));
        assert!(text.contains("Hello"));

        let json = ConsoleFormatter::format(&ok, OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["text"], "Hello");
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_aggregate_lists_failures() {
        plain();
        let aggregate = AggregateResult::from_results(
            vec![
                QueryResult::success("a", "fine", 1),
                QueryResult::failure("b", "Request timed out after 60000ms"),
            ],
            99,
        );
        let text = aggregate.format_text();
        assert!(text.contains("Failures"));
        assert!(text.contains("b: Request timed out"));
        assert!(text.contains("1/2 succeeded in 99ms"));
    }

    #[test]
    fn test_debate_rounds_in_order() {
        plain();
        let result = DebateResult::new(
            "t",
            "openai/a",
            "openai/b",
            vec![
                DebateRound {
                    round_number: 1,
                    affirmative_text: "yes".into(),
                    negative_text: "no".into(),
                },
                DebateRound {
                    round_number: 2,
                    affirmative_text: "still yes".into(),
                    negative_text: "still no".into(),
                },
            ],
            10,
        );
        let text = result.format_text();
        assert!(text.find("Round 1").unwrap() < text.find("Round 2").unwrap());
        assert!(text.contains("4 exchanges"));
    }

    #[test]
    fn test_critique_omits_empty_sections() {
        plain();
        let result = CritiqueResult::Completed {
            critic_model: "anthropic/c".into(),
            critique: Critique::fallback("raw words"),
            latency_ms: 5,
        };
        let text = result.format_text();
        assert!(text.contains("raw words"));
        assert!(!text.contains("Strengths:"));
        assert!(!text.contains("Score:"));
    }
}
