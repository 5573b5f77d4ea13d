//! Prompt templates for debate, critique and challenge

use crate::critique::entities::ChallengeCategory;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the affirmative side of a debate
    pub fn debate_affirmative_system() -> &'static str {
        r#"You are a skilled debater arguing the AFFIRMATIVE side of a proposition.
Build the strongest honest case in favour of the proposition.
Use clear reasoning and concrete examples. Address the opposing side's points directly when they exist.
Be persuasive but never misrepresent facts."#
    }

    /// System prompt for the negative side of a debate
    pub fn debate_negative_system() -> &'static str {
        r#"You are a skilled debater arguing the NEGATIVE side of a proposition.
Build the strongest honest case against the proposition.
Use clear reasoning and concrete examples. Address the affirmative side's points directly.
Be persuasive but never misrepresent facts."#
    }

    /// User prompt for an affirmative turn.
    ///
    /// `transcript` is empty on round 1.
    pub fn debate_affirmative(
        topic: &str,
        round: u32,
        total_rounds: u32,
        transcript: &str,
    ) -> String {
        if transcript.trim().is_empty() {
            format!(
                r#"Debate topic: {topic}

This is round {round} of {total_rounds}. Present your opening argument IN FAVOUR of the topic."#
            )
        } else {
            format!(
                r#"Debate topic: {topic}

Debate so far:
{transcript}

This is round {round} of {total_rounds}. Rebut the negative side's latest arguments and strengthen your case IN FAVOUR of the topic."#
            )
        }
    }

    /// User prompt for a negative turn; `transcript` always includes the
    /// affirmative turn of the same round.
    pub fn debate_negative(topic: &str, round: u32, total_rounds: u32, transcript: &str) -> String {
        format!(
            r#"Debate topic: {topic}

Debate so far:
{transcript}

This is round {round} of {total_rounds}. Rebut the affirmative side's arguments and make your case AGAINST the topic."#
        )
    }

    /// System prompt for a critic
    pub fn critique_system() -> &'static str {
        r#"You are a rigorous, fair critic evaluating another model's response.
Identify genuine strengths and weaknesses and give actionable suggestions.
Respond ONLY with a JSON object, no commentary outside it."#
    }

    /// User prompt for a critique
    pub fn critique_prompt(original_prompt: &str, response: &str, aspects: &[String]) -> String {
        let aspects = aspects
            .iter()
            .enumerate()
            .map(|(i, a)| format!("{}. {}", i + 1, a))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"Original prompt:
{original_prompt}

Response to critique:
{response}

Evaluate the response on these aspects:
{aspects}

Respond with JSON in exactly this shape:
{{
  "assessment": "2-3 sentence overall assessment",
  "strengths": ["..."],
  "weaknesses": ["..."],
  "suggestions": ["..."],
  "score": <number from 1 to 10>
}}"#
        )
    }

    /// System prompt for a challenger
    pub fn challenge_system() -> &'static str {
        r#"You are a devil's advocate. Your job is to find the weakest points in a proposed line of thought.
Be specific and constructive; do not invent objections that do not apply.
Respond ONLY with a JSON object, no commentary outside it."#
    }

    /// User prompt for a challenge
    pub fn challenge_prompt(
        proposed_thought: &str,
        context: Option<&str>,
        categories: &[ChallengeCategory],
    ) -> String {
        let categories = if categories.is_empty() {
            ChallengeCategory::ALL.to_vec()
        } else {
            categories.to_vec()
        };
        let category_list = categories
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let mut prompt = format!("Proposed thought:\n{proposed_thought}\n");
        if let Some(ctx) = context.filter(|c| !c.trim().is_empty()) {
            prompt.push_str(&format!("\nContext:\n{ctx}\n"));
        }
        prompt.push_str(&format!(
            r#"
Challenge this thought. Focus on these categories: {category_list}

Respond with JSON in exactly this shape:
{{
  "challenges": [
    {{
      "category": "one of: {category_list}",
      "severity": "low | medium | high | critical",
      "description": "what is wrong",
      "suggestion": "how to address it"
    }}
  ]
}}"#
        ));
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affirmative_opening_has_no_transcript() {
        let prompt = PromptTemplate::debate_affirmative("Tabs beat spaces", 1, 2, "");
        assert!(prompt.contains("Tabs beat spaces"));
        assert!(prompt.contains("round 1 of 2"));
        assert!(!prompt.contains("Debate so far"));
    }

    #[test]
    fn test_affirmative_rebuttal_includes_transcript() {
        let prompt =
            PromptTemplate::debate_affirmative("T", 2, 2, "[Round 1 - NEGATIVE]\nspaces win");
        assert!(prompt.contains("spaces win"));
        assert!(prompt.contains("Rebut"));
    }

    #[test]
    fn test_negative_prompt_includes_transcript() {
        let prompt = PromptTemplate::debate_negative("T", 1, 3, "[Round 1 - AFFIRMATIVE]\nyes");
        assert!(prompt.contains("[Round 1 - AFFIRMATIVE]"));
        assert!(prompt.contains("AGAINST"));
    }

    #[test]
    fn test_critique_prompt_lists_aspects() {
        let aspects = vec!["accuracy".to_string(), "tone".to_string()];
        let prompt = PromptTemplate::critique_prompt("Q?", "A.", &aspects);
        assert!(prompt.contains("1. accuracy"));
        assert!(prompt.contains("2. tone"));
        assert!(prompt.contains("\"strengths\""));
    }

    #[test]
    fn test_challenge_prompt_defaults_to_all_categories() {
        let prompt = PromptTemplate::challenge_prompt("We should rewrite it", None, &[]);
        assert!(prompt.contains("edge_case"));
        assert!(!prompt.contains("Context:"));

        let prompt = PromptTemplate::challenge_prompt(
            "We should rewrite it",
            Some("legacy code"),
            &[ChallengeCategory::Risk],
        );
        assert!(prompt.contains("Context:\nlegacy code"));
        assert!(prompt.contains("Focus on these categories: risk"));
    }
}
