//! Provider configuration types (provider-neutral, serde-free).
//!
//! These types define the shape of provider settings without depending
//! on any serialization format (TOML, JSON, etc.). The resolver only asks
//! one question of them: [`ProviderConfig::is_configured`].

use crate::core::model::Provider;
use std::collections::BTreeMap;

/// Default max tokens per response
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Settings for one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    /// Resolved API key (from the environment or the config file).
    pub api_key: Option<String>,
    /// Base URL override; `None` uses [`default_base_url`].
    pub base_url: Option<String>,
    /// Max tokens per response.
    pub max_tokens: u32,
}

impl ProviderSettings {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Whether a non-empty credential is present.
    pub fn has_credential(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Top-level provider configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderConfig {
    providers: BTreeMap<Provider, ProviderSettings>,
}

impl ProviderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, provider: Provider, settings: ProviderSettings) -> Self {
        self.set(provider, settings);
        self
    }

    pub fn set(&mut self, provider: Provider, settings: ProviderSettings) {
        self.providers.insert(provider, settings);
    }

    pub fn settings(&self, provider: Provider) -> Option<&ProviderSettings> {
        self.providers.get(&provider)
    }

    /// Whether the provider has a credential and can be called directly.
    pub fn is_configured(&self, provider: Provider) -> bool {
        self.settings(provider)
            .is_some_and(ProviderSettings::has_credential)
    }

    /// Providers with a credential present, in [`Provider::ALL`] order.
    pub fn configured(&self) -> Vec<Provider> {
        Provider::ALL
            .into_iter()
            .filter(|p| self.is_configured(*p))
            .collect()
    }

    /// Base URL for a provider, honouring overrides.
    pub fn base_url(&self, provider: Provider) -> String {
        self.settings(provider)
            .and_then(|s| s.base_url.clone())
            .unwrap_or_else(|| default_base_url(provider).to_string())
    }
}

/// Environment variable conventionally holding each provider's API key.
pub fn default_credential_env(provider: Provider) -> &'static str {
    match provider {
        Provider::OpenRouter => "OPENROUTER_API_KEY",
        Provider::Anthropic => "ANTHROPIC_API_KEY",
        Provider::OpenAi => "OPENAI_API_KEY",
        Provider::Google => "GEMINI_API_KEY",
        Provider::DeepSeek => "DEEPSEEK_API_KEY",
        Provider::Xai => "XAI_API_KEY",
    }
}

/// Public API base URL for each provider.
pub fn default_base_url(provider: Provider) -> &'static str {
    match provider {
        Provider::OpenRouter => "https://openrouter.ai/api/v1",
        Provider::Anthropic => "https://api.anthropic.com",
        Provider::OpenAi => "https://api.openai.com/v1",
        Provider::Google => "https://generativelanguage.googleapis.com/v1beta/openai",
        Provider::DeepSeek => "https://api.deepseek.com/v1",
        Provider::Xai => "https://api.x.ai/v1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_key_is_not_configured() {
        let config = ProviderConfig::new()
            .with(Provider::OpenAi, ProviderSettings::with_api_key("   "))
            .with(Provider::Anthropic, ProviderSettings::default());
        assert!(!config.is_configured(Provider::OpenAi));
        assert!(!config.is_configured(Provider::Anthropic));
        assert!(!config.is_configured(Provider::Google));
    }

    #[test]
    fn test_configured_keeps_router_first() {
        let config = ProviderConfig::new()
            .with(Provider::Xai, ProviderSettings::with_api_key("k"))
            .with(Provider::OpenRouter, ProviderSettings::with_api_key("k"));
        assert_eq!(config.configured(), vec![Provider::OpenRouter, Provider::Xai]);
    }

    #[test]
    fn test_base_url_override() {
        let config = ProviderConfig::new().with(
            Provider::OpenAi,
            ProviderSettings::with_api_key("k").with_base_url("http://localhost:8080/v1"),
        );
        assert_eq!(config.base_url(Provider::OpenAi), "http://localhost:8080/v1");
        assert_eq!(config.base_url(Provider::Xai), "https://api.x.ai/v1");
    }
}
