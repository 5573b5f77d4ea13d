//! Structured configuration issues.
//!
//! Loaders collect [`ConfigIssue`]s instead of failing on the first problem,
//! so the caller can print every warning and only abort on errors.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A model identifier is empty or whitespace.
    EmptyModelName { field: String },
    /// A model identifier matches no provider prefix and no router is configured.
    UnresolvableModel { field: String },
    /// The default model list is empty.
    EmptyModelList,
    /// A numeric limit that must be positive is zero.
    ZeroLimit { field: String },
    /// Default debate rounds exceed the configured ceiling.
    RoundsAboveCeiling { rounds: u32, max: u32 },
    /// A provider section name does not match any known provider.
    UnknownProvider { name: String },
    /// No provider has a credential.
    NoProviderConfigured,
}

/// A detected configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
