//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order
const PROJECT_FILES: [&str; 2] = ["council.toml", ".council.toml"];

/// Prefix for environment overrides (`COUNCIL_ORCHESTRATION__MAX_CONCURRENT=3`)
pub const ENV_PREFIX: &str = "COUNCIL_";

/// One place configuration may come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    pub label: &'static str,
    pub location: String,
    pub found: bool,
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `COUNCIL_`-prefixed environment variables (`__` separates sections)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./council.toml` or `./.council.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/model-council/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        let mut files = Vec::new();
        if let Some(global) = Self::global_config_path().filter(|p| p.exists()) {
            files.push(global);
        }
        if let Some(project) = Self::project_config_path() {
            files.push(project);
        }
        if let Some(path) = config_path {
            files.push(path.to_path_buf());
        }

        Self::figment(&files)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)
    }

    /// Load defaults merged with the given files only, lowest priority first.
    pub fn load_files(files: &[PathBuf]) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(files).extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    fn figment(files: &[PathBuf]) -> Figment {
        files.iter().fold(
            Figment::new().merge(Serialized::defaults(FileConfig::default())),
            |figment, path| figment.merge(Toml::file(path)),
        )
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/model-council/config.toml if set,
    /// otherwise falls back to ~/.config/model-council/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("model-council").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Every source consulted by [`ConfigLoader::load`], highest priority first
    pub fn sources(config_path: Option<&Path>) -> Vec<ConfigSource> {
        let mut sources = vec![ConfigSource {
            label: "Env",
            location: format!("{}*", ENV_PREFIX),
            found: std::env::vars().any(|(k, _)| k.starts_with(ENV_PREFIX)),
        }];

        if let Some(path) = config_path {
            sources.push(ConfigSource {
                label: "Explicit",
                location: path.display().to_string(),
                found: path.exists(),
            });
        }

        sources.push(match Self::project_config_path() {
            Some(path) => ConfigSource {
                label: "Project",
                location: path.display().to_string(),
                found: true,
            },
            None => ConfigSource {
                label: "Project",
                location: PROJECT_FILES.map(|f| format!("./{}", f)).join(" or "),
                found: false,
            },
        });

        if let Some(path) = Self::global_config_path() {
            sources.push(ConfigSource {
                label: "Global",
                found: path.exists(),
                location: path.display().to_string(),
            });
        }

        sources.push(ConfigSource {
            label: "Default",
            location: "built-in defaults".to_string(),
            found: true,
        });
        sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn toml_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.orchestration.max_concurrent, 5);
        assert_eq!(config.orchestration.default_debate_rounds, 2);
        assert!(config.providers.entries.is_empty());
    }

    #[test]
    fn test_later_files_override_earlier() {
        let global = toml_file(
            r#"
[orchestration]
max_concurrent = 8
timeout_seconds = 90

[providers.anthropic]
max_tokens = 2000
"#,
        );
        let explicit = toml_file(
            r#"
[orchestration]
max_concurrent = 2
"#,
        );

        let config = ConfigLoader::load_files(&[
            global.path().to_path_buf(),
            explicit.path().to_path_buf(),
        ])
        .unwrap();

        assert_eq!(config.orchestration.max_concurrent, 2);
        assert_eq!(config.orchestration.timeout_seconds, 90);
        assert_eq!(
            config.providers.entries["anthropic"].max_tokens,
            Some(2000)
        );
        // Untouched sections keep defaults
        assert_eq!(config.orchestration.max_debate_rounds, 5);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let bad = toml_file("[orchestration\nmax_concurrent = ");
        assert!(ConfigLoader::load_files(&[bad.path().to_path_buf()]).is_err());
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        let bad = toml_file("[orchestration]\nmax_concurrent = \"many\"\n");
        assert!(ConfigLoader::load_files(&[bad.path().to_path_buf()]).is_err());
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("model-council"));
    }

    #[test]
    fn test_sources_end_with_defaults() {
        let sources = ConfigLoader::sources(Some(Path::new("/nonexistent/council.toml")));
        assert_eq!(sources.first().unwrap().label, "Env");
        assert_eq!(sources.last().unwrap().label, "Default");
        let explicit = sources.iter().find(|s| s.label == "Explicit").unwrap();
        assert!(!explicit.found);
    }
}
