// src/environment.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Per-environment settings from `config.yaml`; every field is optional and environment
/// variables take precedence.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvironmentConfig {
    pub port: Option<u16>,
    pub storage_backend: Option<String>,
    pub database_path: Option<PathBuf>,
    pub scraper_timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: EnvironmentConfig,
    #[serde(default)]
    production: EnvironmentConfig,
}

impl EnvironmentConfig {
    /// Load the section for `environment` from `config.yaml` in the working directory.
    /// A missing file is not an error.
    pub fn load(environment: &str) -> Result<Self> {
        Self::load_from_file(Path::new("config.yaml"), environment)
    }

    pub fn load_from_file(path: &Path, environment: &str) -> Result<Self> {
        if !path.exists() {
            info!("No {} found, using environment variables only", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::from_yaml(&content, environment)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        info!("Loaded {} section from {}", environment, path.display());
        Ok(config)
    }

    pub fn from_yaml(content: &str, environment: &str) -> Result<Self> {
        let config_file: ConfigFile = serde_yaml::from_str(content)?;

        Ok(match environment {
            "production" => config_file.production,
            _ => config_file.local,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
local:
  storage_backend: memory
  port: 8080
production:
  storage_backend: sheets
  database_path: /app/applications.db
"#;

    #[test]
    fn test_selects_section() {
        let local = EnvironmentConfig::from_yaml(SAMPLE, "local").unwrap();
        assert_eq!(local.storage_backend.as_deref(), Some("memory"));
        assert_eq!(local.port, Some(8080));
        assert_eq!(local.database_path, None);

        let production = EnvironmentConfig::from_yaml(SAMPLE, "production").unwrap();
        assert_eq!(production.storage_backend.as_deref(), Some("sheets"));
        assert_eq!(
            production.database_path,
            Some(PathBuf::from("/app/applications.db"))
        );
    }

    #[test]
    fn test_unknown_environment_uses_local() {
        let config = EnvironmentConfig::from_yaml(SAMPLE, "staging").unwrap();
        assert_eq!(config.port, Some(8080));
    }

    #[test]
    fn test_missing_section_defaults() {
        let config = EnvironmentConfig::from_yaml("local:\n  port: 1\n", "production").unwrap();
        assert_eq!(config.port, None);
    }

    #[test]
    fn test_missing_file_is_default() {
        let config =
            EnvironmentConfig::load_from_file(Path::new("/nonexistent/config.yaml"), "local")
                .unwrap();
        assert!(config.storage_backend.is_none());
    }
}
