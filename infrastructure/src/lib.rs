//! Infrastructure layer for model-council
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: HTTP provider endpoints and configuration file
//! loading.

pub mod config;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigSource, FileConfig, FileOrchestrationConfig, FileOutputConfig,
    FileOutputFormat, FileProviderEntry, FileProvidersConfig,
};
pub use providers::{AnthropicEndpoint, HttpEndpointFactory, HttpTransport, OpenAiCompatEndpoint};
