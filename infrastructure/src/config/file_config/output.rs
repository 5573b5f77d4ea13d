//! Output configuration from TOML (`[output]` section)

use serde::{Deserialize, Serialize};

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileOutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON records
    Json,
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format; `--output` overrides it
    pub format: Option<FileOutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
    /// Show progress spinners on stderr
    pub show_progress: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            show_progress: true,
        }
    }
}
