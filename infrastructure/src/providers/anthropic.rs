//! Anthropic Messages API adapter.

use super::http::HttpTransport;
use async_trait::async_trait;
use council_application::{CompletionRequest, GatewayError, ModelEndpoint};
use council_domain::Provider;
use serde_json::{Value, json};
use tracing::trace;

/// `anthropic-version` header value
pub const ANTHROPIC_API_VERSION: &str = "2023-06-01";

pub struct AnthropicEndpoint {
    url: String,
    api_key: String,
    max_tokens: u32,
    transport: HttpTransport,
}

impl AnthropicEndpoint {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        max_tokens: u32,
        transport: HttpTransport,
    ) -> Self {
        Self {
            url: format!("{}/v1/messages", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
            max_tokens,
            transport,
        }
    }
}

pub fn build_request(request: &CompletionRequest, max_tokens: u32) -> Value {
    let mut body = json!({
        "model": request.model,
        "max_tokens": max_tokens,
        "messages": [{ "role": "user", "content": request.prompt }],
    });
    if let Some(system) = request.system_prompt.as_deref().filter(|s| !s.is_empty()) {
        body["system"] = json!(system);
    }
    body
}

/// Concatenate the `text` blocks of a Messages response.
pub fn parse_response(body: &Value) -> Result<String, GatewayError> {
    if body.get("type").and_then(Value::as_str) == Some("error") {
        let message = body
            .pointer("/error/message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(GatewayError::InvalidResponse(message.to_string()));
    }

    let blocks = body
        .get("content")
        .and_then(Value::as_array)
        .ok_or_else(|| GatewayError::InvalidResponse("Response has no content".to_string()))?;

    let text = blocks
        .iter()
        .filter(|b| b.get("type").and_then(Value::as_str) == Some("text"))
        .filter_map(|b| b.get("text").and_then(Value::as_str))
        .collect::<Vec<_>>()
        .join("");

    if text.trim().is_empty() {
        return Err(GatewayError::InvalidResponse(
            "Response contained no text".to_string(),
        ));
    }
    Ok(text)
}

#[async_trait]
impl ModelEndpoint for AnthropicEndpoint {
    fn provider(&self) -> Provider {
        Provider::Anthropic
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        let body = build_request(request, self.max_tokens);
        let headers = [
            ("x-api-key", self.api_key.clone()),
            ("anthropic-version", ANTHROPIC_API_VERSION.to_string()),
        ];
        trace!("POST {} model={}", self.url, request.model);
        let response = self.transport.post_json(&self.url, &headers, &body).await?;
        parse_response(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_is_top_level() {
        let request = CompletionRequest::new("claude-sonnet-4.5", "hi")
            .with_system_prompt(Some("You are a critic".to_string()));
        let body = build_request(&request, 2048);
        assert_eq!(body["system"], "You are a critic");
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["max_tokens"], 2048);

        let body = build_request(&CompletionRequest::new("m", "hi"), 1);
        assert!(body.get("system").is_none());
    }

    #[test]
    fn test_parse_text_blocks() {
        let body = json!({
            "type": "message",
            "content": [
                {"type": "thinking", "thinking": "hmm"},
                {"type": "text", "text": "Part one. "},
                {"type": "text", "text": "Part two."}
            ]
        });
        assert_eq!(parse_response(&body).unwrap(), "Part one. Part two.");
    }

    #[test]
    fn test_parse_error_envelope() {
        let body = json!({
            "type": "error",
            "error": {"type": "overloaded_error", "message": "Overloaded"}
        });
        assert_eq!(
            parse_response(&body).unwrap_err(),
            GatewayError::InvalidResponse("Overloaded".to_string())
        );
    }

    #[test]
    fn test_parse_missing_content() {
        assert!(parse_response(&json!({"type": "message"})).is_err());
    }
}
