//! Output formatter trait

use serde::Serialize;

/// A result that can be printed as human text or as a JSON record
pub trait OutputFormatter: Serialize {
    /// Format for terminal display
    fn format_text(&self) -> String;

    /// Format as pretty-printed JSON
    fn format_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
