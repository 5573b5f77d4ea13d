//! OpenAI-compatible chat completions adapter.
//!
//! Serves every provider that speaks `POST {base_url}/chat/completions`:
//! OpenRouter, OpenAI, Google (OpenAI-compatible surface), DeepSeek and xAI.

use super::http::HttpTransport;
use async_trait::async_trait;
use council_application::{CompletionRequest, GatewayError, ModelEndpoint};
use council_domain::Provider;
use serde_json::{Value, json};
use tracing::trace;

pub struct OpenAiCompatEndpoint {
    provider: Provider,
    url: String,
    api_key: String,
    max_tokens: u32,
    transport: HttpTransport,
}

impl OpenAiCompatEndpoint {
    pub fn new(
        provider: Provider,
        base_url: &str,
        api_key: impl Into<String>,
        max_tokens: u32,
        transport: HttpTransport,
    ) -> Self {
        Self {
            provider,
            url: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
            max_tokens,
            transport,
        }
    }

    fn headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = vec![("Authorization", format!("Bearer {}", self.api_key))];
        if self.provider.is_router() {
            headers.push((
                "HTTP-Referer",
                "https://github.com/model-council/model-council".to_string(),
            ));
            headers.push(("X-Title", "model-council".to_string()));
        }
        headers
    }
}

/// Request body for a single-turn chat completion.
pub fn build_request(request: &CompletionRequest, max_tokens: u32) -> Value {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = request.system_prompt.as_deref().filter(|s| !s.is_empty()) {
        messages.push(json!({ "role": "system", "content": system }));
    }
    messages.push(json!({ "role": "user", "content": request.prompt }));

    json!({
        "model": request.model,
        "messages": messages,
        "max_tokens": max_tokens,
    })
}

/// Extract the assistant text from a chat completions response.
///
/// `content` may be a plain string or a list of `{type: "text", text}`
/// parts. An `error` object in a 200 response is reported as invalid.
pub fn parse_response(body: &Value) -> Result<String, GatewayError> {
    if let Some(error) = body.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(GatewayError::InvalidResponse(message));
    }

    let content = body
        .pointer("/choices/0/message/content")
        .ok_or_else(|| GatewayError::InvalidResponse("Response has no choices".to_string()))?;

    let text = match content {
        Value::String(s) => s.clone(),
        Value::Array(parts) => parts
            .iter()
            .filter_map(|p| p.get("text").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join(""),
        _ => String::new(),
    };

    if text.trim().is_empty() {
        return Err(GatewayError::InvalidResponse(
            "Response contained no text".to_string(),
        ));
    }
    Ok(text)
}

#[async_trait]
impl ModelEndpoint for OpenAiCompatEndpoint {
    fn provider(&self) -> Provider {
        self.provider
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        let body = build_request(request, self.max_tokens);
        trace!("POST {} model={}", self.url, request.model);
        let response = self
            .transport
            .post_json(&self.url, &self.headers(), &body)
            .await?;
        parse_response(&response)
    }
}
