//! Provider configuration from TOML (`[providers.<name>]` sections)
//!
//! Every provider is considered, whether or not it has a section: a
//! provider with no section still picks up its API key from the
//! conventional environment variable.

use council_domain::providers::{DEFAULT_MAX_TOKENS, default_credential_env};
use council_domain::{ConfigIssue, ConfigIssueCode, Provider, ProviderConfig, ProviderSettings};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One provider's settings.
///
/// ```toml
/// [providers.anthropic]
/// api_key_env = "ANTHROPIC_API_KEY"
/// max_tokens = 8192
///
/// [providers.openrouter]
/// base_url = "https://openrouter.ai/api/v1"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderEntry {
    /// Environment variable holding the API key (defaults per provider).
    pub api_key_env: Option<String>,
    /// Direct API key (not recommended, prefer the env var).
    pub api_key: Option<String>,
    /// Base URL override.
    pub base_url: Option<String>,
    /// Max tokens per response.
    pub max_tokens: Option<u32>,
}

impl FileProviderEntry {
    pub fn credential_env(&self, provider: Provider) -> String {
        self.api_key_env
            .clone()
            .unwrap_or_else(|| default_credential_env(provider).to_string())
    }

    fn to_settings(
        &self,
        provider: Provider,
        env: &dyn Fn(&str) -> Option<String>,
    ) -> ProviderSettings {
        let api_key = self
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| env(&self.credential_env(provider)))
            .filter(|k| !k.trim().is_empty());

        ProviderSettings {
            api_key,
            base_url: self.base_url.clone(),
            max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        }
    }
}

/// `[providers]` table, keyed by provider name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileProvidersConfig {
    pub entries: BTreeMap<String, FileProviderEntry>,
}

impl FileProvidersConfig {
    pub fn entry(&self, provider: Provider) -> FileProviderEntry {
        self.entries
            .iter()
            .find(|(name, _)| Provider::from_name(name) == Some(provider))
            .map(|(_, entry)| entry.clone())
            .unwrap_or_default()
    }

    /// Resolve settings for every provider, reading keys from the process
    /// environment.
    pub fn to_provider_config(&self) -> ProviderConfig {
        self.to_provider_config_with(&|var| std::env::var(var).ok())
    }

    /// Resolve settings with an injected environment lookup.
    pub fn to_provider_config_with(&self, env: &dyn Fn(&str) -> Option<String>) -> ProviderConfig {
        Provider::ALL
            .into_iter()
            .fold(ProviderConfig::new(), |config, provider| {
                config.with(provider, self.entry(provider).to_settings(provider, env))
            })
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        for (name, entry) in &self.entries {
            if Provider::from_name(name).is_none() {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnknownProvider { name: name.clone() },
                    format!("providers.{}: unknown provider, section ignored", name),
                ));
            }
            if entry.max_tokens == Some(0) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::ZeroLimit {
                        field: format!("providers.{}.max_tokens", name),
                    },
                    format!("providers.{}.max_tokens must be positive", name),
                ));
            }
        }
        issues
    }
}
