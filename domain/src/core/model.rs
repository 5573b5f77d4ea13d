//! Provider and model identifier value objects
//!
//! A model identifier is a `provider/model` string such as
//! `anthropic/claude-sonnet-4.5` or `openrouter/google/gemini-2.5-pro`.
//! [`ParsedModel::parse`] turns it into a `(provider, model_name)` pair.

use crate::core::error::DomainError;
use crate::providers::ProviderConfig;
use serde::{Deserialize, Serialize};

/// Upstream text-generation services (closed set)
///
/// Adding a variant is a compile error until every exhaustive `match`
/// over providers (prefixes, router namespaces, endpoint construction)
/// handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Cross-provider router multiplexing every vendor under one namespace
    OpenRouter,
    Anthropic,
    OpenAi,
    Google,
    DeepSeek,
    Xai,
}

impl Provider {
    /// All providers, router first.
    ///
    /// The order matters for identifier parsing: a router path such as
    /// `openrouter/anthropic/...` contains another provider's prefix.
    pub const ALL: [Provider; 6] = [
        Provider::OpenRouter,
        Provider::Anthropic,
        Provider::OpenAi,
        Provider::Google,
        Provider::DeepSeek,
        Provider::Xai,
    ];

    /// Identifier prefix name (`<name>/model`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenRouter => "openrouter",
            Provider::Anthropic => "anthropic",
            Provider::OpenAi => "openai",
            Provider::Google => "google",
            Provider::DeepSeek => "deepseek",
            Provider::Xai => "xai",
        }
    }

    /// Vendor segment used when addressing this provider's models through
    /// the router namespace.
    pub fn router_namespace(&self) -> &'static str {
        match self {
            Provider::OpenRouter => "openrouter",
            Provider::Anthropic => "anthropic",
            Provider::OpenAi => "openai",
            Provider::Google => "google",
            Provider::DeepSeek => "deepseek",
            Provider::Xai => "x-ai",
        }
    }

    /// Whether this provider is the cross-provider router
    pub fn is_router(&self) -> bool {
        matches!(self, Provider::OpenRouter)
    }

    /// Look a provider up by its prefix name
    pub fn from_name(name: &str) -> Option<Provider> {
        Provider::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Provider {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Provider::from_name(s).ok_or_else(|| DomainError::UnknownProvider(s.to_string()))
    }
}

/// A model identifier split into provider and provider-relative name
/// (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParsedModel {
    pub provider: Provider,
    pub model_name: String,
}

impl ParsedModel {
    pub fn new(provider: Provider, model_name: impl Into<String>) -> Self {
        Self {
            provider,
            model_name: model_name.into(),
        }
    }

    /// Parse a model identifier.
    ///
    /// 1. Match the first path segment against the provider names,
    ///    ignoring ASCII case (`OpenAI/gpt-5` is `openai/gpt-5`). The rest
    ///    of the identifier is kept verbatim, so `openrouter/anthropic/x`
    ///    stays a router model.
    /// 2. Otherwise, when the router is configured, treat the whole
    ///    identifier as a router-relative model path.
    /// 3. Otherwise the identifier is unresolvable.
    ///
    /// Pure function of `(model_id, providers)`.
    pub fn parse(model_id: &str, providers: &ProviderConfig) -> Result<Self, DomainError> {
        let trimmed = model_id.trim();
        if trimmed.is_empty() {
            return Err(DomainError::UnresolvableModel(model_id.to_string()));
        }

        if let Some((prefix, rest)) = trimmed.split_once('/')
            && let Some(provider) = Provider::from_name(prefix)
            && !rest.is_empty()
        {
            return Ok(Self::new(provider, rest));
        }

        if providers.is_configured(Provider::OpenRouter) {
            return Ok(Self::new(Provider::OpenRouter, trimmed));
        }

        Err(DomainError::UnresolvableModel(model_id.to_string()))
    }

    /// Model path addressing this model through the router namespace.
    ///
    /// Router models are returned unchanged.
    pub fn router_path(&self) -> String {
        if self.provider.is_router() {
            self.model_name.clone()
        } else {
            format!("{}/{}", self.provider.router_namespace(), self.model_name)
        }
    }

    /// Fully qualified identifier (`provider/model_name`)
    pub fn qualified(&self) -> String {
        format!("{}/{}", self.provider, self.model_name)
    }
}

impl std::fmt::Display for ParsedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.provider, self.model_name)
    }
}
