//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application and
//! domain types at the edge.

mod orchestration;
mod output;
mod providers;

pub use orchestration::FileOrchestrationConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use providers::{FileProviderEntry, FileProvidersConfig};

use council_domain::{ConfigIssue, ConfigIssueCode, ParsedModel, ProviderConfig};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Concurrency, timeout, default models and debate limits
    pub orchestration: FileOrchestrationConfig,
    /// Per-provider credentials and endpoints
    pub providers: FileProvidersConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the file contents, returning all detected issues.
    ///
    /// Checks:
    /// 1. Orchestration limits and default model names
    /// 2. Provider sections (unknown names, zero limits)
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.orchestration.to_orchestration_config().validate();
        issues.extend(self.providers.validate());
        issues
    }

    /// Check the configuration against the providers that actually have
    /// credentials: at least one must, and every default model should parse.
    pub fn validate_with(&self, providers: &ProviderConfig) -> Vec<ConfigIssue> {
        let mut issues = self.validate();

        if providers.configured().is_empty() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::NoProviderConfigured,
                "no provider has an API key; every query will fail to resolve",
            ));
            return issues;
        }

        for (i, model) in self.orchestration.default_models.iter().enumerate() {
            if model.trim().is_empty() {
                continue;
            }
            if let Err(e) = ParsedModel::parse(model, providers) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnresolvableModel {
                        field: format!("orchestration.default_models[{}]", i),
                    },
                    e.to_string(),
                ));
            }
        }
        issues
    }
}
