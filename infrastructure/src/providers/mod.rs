//! HTTP provider adapters
//!
//! | Provider | Adapter |
//! |----------|---------|
//! | OpenRouter, OpenAI, Google, DeepSeek, xAI | [`OpenAiCompatEndpoint`] |
//! | Anthropic | [`AnthropicEndpoint`] |

pub mod anthropic;
pub mod http;
pub mod openai_compat;

pub use anthropic::AnthropicEndpoint;
pub use http::HttpTransport;
pub use openai_compat::OpenAiCompatEndpoint;

use council_application::{EndpointFactory, GatewayError, ModelEndpoint};
use council_domain::providers::default_credential_env;
use council_domain::{Provider, ProviderConfig};
use std::sync::Arc;
use tracing::debug;

/// Builds real HTTP endpoints from provider settings.
pub struct HttpEndpointFactory {
    providers: ProviderConfig,
    transport: HttpTransport,
}

impl HttpEndpointFactory {
    pub fn new(providers: ProviderConfig, max_retries: u32) -> Result<Self, GatewayError> {
        Ok(Self {
            providers,
            transport: HttpTransport::new(max_retries)?,
        })
    }
}

impl EndpointFactory for HttpEndpointFactory {
    fn create(&self, provider: Provider) -> Result<Arc<dyn ModelEndpoint>, GatewayError> {
        let settings = self
            .providers
            .settings(provider)
            .filter(|s| s.has_credential())
            .ok_or_else(|| {
                GatewayError::NotConfigured(format!(
                    "{} (set {})",
                    provider,
                    default_credential_env(provider)
                ))
            })?;
        let api_key = settings.api_key.clone().unwrap_or_default();
        let base_url = self.providers.base_url(provider);
        let transport = self.transport.clone();

        debug!("Creating {} endpoint at {}", provider, base_url);

        let endpoint: Arc<dyn ModelEndpoint> = match provider {
            Provider::Anthropic => Arc::new(AnthropicEndpoint::new(
                &base_url,
                api_key,
                settings.max_tokens,
                transport,
            )),
            Provider::OpenRouter
            | Provider::OpenAi
            | Provider::Google
            | Provider::DeepSeek
            | Provider::Xai => Arc::new(OpenAiCompatEndpoint::new(
                provider,
                &base_url,
                api_key,
                settings.max_tokens,
                transport,
            )),
        };
        Ok(endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::ProviderSettings;

    #[test]
    fn test_unconfigured_provider_is_rejected() {
        let factory = HttpEndpointFactory::new(ProviderConfig::new(), 2).unwrap();
        let err = factory.create(Provider::DeepSeek).err().unwrap();
        assert!(err.to_string().contains("DEEPSEEK_API_KEY"));
    }

    #[test]
    fn test_every_configured_provider_builds() {
        let config = Provider::ALL.into_iter().fold(ProviderConfig::new(), |c, p| {
            c.with(p, ProviderSettings::with_api_key("key"))
        });
        let factory = HttpEndpointFactory::new(config, 2).unwrap();

        for provider in Provider::ALL {
            let endpoint = factory.create(provider).unwrap();
            assert_eq!(endpoint.provider(), provider);
        }
    }
}
