//! Application-level configuration.
//!
//! - [`OrchestrationConfig`]: concurrency ceiling, per-query timeout,
//!   default models and debate limits

pub mod orchestration_config;

pub use orchestration_config::OrchestrationConfig;
