//! Lenient structured-output parsing for critique and challenge responses.
//!
//! Models are asked to answer in JSON but often wrap it in a code fence or
//! surround it with prose. These functions are pure `text -> Option<T>`
//! extractors: they never fail loudly, and the caller decides what the
//! degraded record looks like.
//!
//! | Function | Output |
//! |----------|--------|
//! | [`fenced_blocks`] | Bodies of every ```` ``` ```` block, in order |
//! | [`extract_json`] | First parseable JSON object/array in the text |
//! | [`parse_critique`] | [`Critique`] |
//! | [`parse_challenges`] | `Vec<Challenge>` (malformed entries dropped) |

use crate::critique::entities::{Challenge, ChallengeCategory, ChallengeSeverity, Critique};
use serde_json::Value;

const FENCE: &str = "```";

/// Bodies of all Markdown code fences in the text, in order.
///
/// The info string (e.g. `json`) on the opening line is skipped. An
/// unterminated fence yields the rest of the text.
pub fn fenced_blocks(text: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find(FENCE) {
        let after_open = &rest[open + FENCE.len()..];
        let body_start = after_open.find('\n').map(|i| i + 1).unwrap_or(after_open.len());
        let body = &after_open[body_start..];

        match body.find(FENCE) {
            Some(close) => {
                blocks.push(body[..close].trim());
                rest = &body[close + FENCE.len()..];
            }
            None => {
                blocks.push(body.trim());
                break;
            }
        }
    }

    blocks
}

fn composite(value: Value) -> Option<Value> {
    (value.is_object() || value.is_array()).then_some(value)
}

/// Parse text that is exactly one JSON object or array.
fn parse_whole(text: &str) -> Option<Value> {
    serde_json::from_str::<Value>(text).ok().and_then(composite)
}

/// Parse the JSON value at the start of `text`, ignoring whatever follows.
fn parse_leading(text: &str) -> Option<Value> {
    serde_json::Deserializer::from_str(text)
        .into_iter::<Value>()
        .next()?
        .ok()
        .and_then(composite)
}

/// Every JSON object/array the text plausibly carries, most likely first:
/// the whole text, then each fenced block, then each value starting at a
/// `{` or `[` anywhere in the text.
fn json_candidates(text: &str) -> impl Iterator<Item = Value> + '_ {
    let trimmed = text.trim();
    std::iter::once(trimmed)
        .chain(fenced_blocks(trimmed))
        .filter_map(parse_whole)
        .chain(
            trimmed
                .match_indices(|c: char| c == '{' || c == '[')
                .filter_map(move |(start, _)| parse_leading(&trimmed[start..])),
        )
}

/// Find the first parseable JSON object or array in free-form text.
pub fn extract_json(text: &str) -> Option<Value> {
    json_candidates(text).next()
}

/// Render a list item as text: strings as-is, objects by their most
/// descriptive field, anything else via its JSON form.
fn item_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Object(map) => ["description", "text", "point", "detail"]
            .iter()
            .find_map(|k| map.get(*k).and_then(Value::as_str))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn string_list(json: &Value, keys: &[&str]) -> Option<Vec<String>> {
    keys.iter().find_map(|k| json.get(*k)).map(|v| match v {
        Value::Array(items) => items.iter().filter_map(item_to_string).collect(),
        other => item_to_string(other).into_iter().collect(),
    })
}

fn first_str(json: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|k| json.get(*k).and_then(Value::as_str))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Parse a critique from a critic's response.
///
/// Expected schema:
/// ```json
/// {
///   "assessment": "string",
///   "strengths": ["..."],
///   "weaknesses": ["..."],
///   "suggestions": ["..."],
///   "score": 7
/// }
/// ```
///
/// Missing lists default to empty. The first JSON object in the response
/// carrying any critique field wins, so code samples quoted before the
/// critique are skipped. Returns `None` when there is no such object.
pub fn parse_critique(response: &str) -> Option<Critique> {
    json_candidates(response).find_map(|json| critique_from_json(&json))
}

fn critique_from_json(json: &Value) -> Option<Critique> {
    if !json.is_object() {
        return None;
    }

    let assessment = first_str(json, &["assessment", "overall_assessment", "summary"]);
    let strengths = string_list(json, &["strengths"]);
    let weaknesses = string_list(json, &["weaknesses", "issues"]);
    let suggestions = string_list(json, &["suggestions", "improvements"]);

    if assessment.is_none() && strengths.is_none() && weaknesses.is_none() && suggestions.is_none()
    {
        return None;
    }

    let score = json
        .get("score")
        .and_then(|v| v.as_f64().or_else(|| v.as_str()?.trim().parse().ok()))
        .map(|s| s.clamp(1.0, 10.0));

    Some(Critique {
        assessment: assessment.unwrap_or_default(),
        strengths: strengths.unwrap_or_default(),
        weaknesses: weaknesses.unwrap_or_default(),
        suggestions: suggestions.unwrap_or_default(),
        score,
    })
}

/// Parse a critique, degrading to [`Critique::fallback`] with the raw text.
pub fn critique_or_fallback(response: &str) -> Critique {
    parse_critique(response).unwrap_or_else(|| Critique::fallback(response.trim()))
}

/// Parse one challenge entry; `None` when a required field is missing or
/// the category is outside the fixed set.
fn parse_challenge_entry(challenger: &str, entry: &Value) -> Option<Challenge> {
    let category = entry
        .get("category")
        .or_else(|| entry.get("type"))
        .and_then(Value::as_str)
        .and_then(ChallengeCategory::from_label)?;
    let description = first_str(entry, &["description", "challenge", "issue"])?;
    let severity = entry
        .get("severity")
        .and_then(Value::as_str)
        .and_then(ChallengeSeverity::from_label)
        .unwrap_or_default();
    let suggestion = first_str(entry, &["suggestion", "counter_proposal", "recommendation"]);

    Some(Challenge {
        challenger: challenger.to_string(),
        category,
        severity,
        description,
        suggestion,
    })
}

/// Parse the challenges one challenger raised.
///
/// Accepts either a bare array of entry objects or an object with a
/// `challenges` array. Malformed entries are dropped individually; `None`
/// means the response as a whole carried no challenge list.
pub fn parse_challenges(challenger: &str, response: &str) -> Option<Vec<Challenge>> {
    json_candidates(response).find_map(|json| {
        let entries = match &json {
            Value::Array(items) if items.iter().any(Value::is_object) => items,
            Value::Object(_) => json.get("challenges")?.as_array()?,
            _ => return None,
        };
        Some(
            entries
                .iter()
                .filter_map(|e| parse_challenge_entry(challenger, e))
                .collect(),
        )
    })
}
