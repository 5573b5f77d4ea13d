//! Configuration file loading for model-council
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `COUNCIL_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./council.toml` or `./.council.toml`
//! 4. Global: `$XDG_CONFIG_HOME/model-council/config.toml`
//! 5. Default values
//!
//! API keys are never merged this way: each provider's key is read from
//! the environment variable its section names (see [`FileProviderEntry`]).

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileOrchestrationConfig, FileOutputConfig, FileOutputFormat, FileProviderEntry,
    FileProvidersConfig,
};
pub use loader::{ConfigLoader, ConfigSource, ENV_PREFIX};
