//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the configured endpoint
pub const ENDPOINT_ENV_VAR: &str = "NPS_FEEDBACK_ENDPOINT";

/// Marker left in the default URL until a real deployment id is filled in
pub const PLACEHOLDER_TOKEN: &str = "REPLACE_WITH_YOUR_SCRIPT_ID";

/// Default endpoint shipped with the app
pub const PLACEHOLDER_ENDPOINT: &str =
    "https://script.google.com/macros/s/REPLACE_WITH_YOUR_SCRIPT_ID/exec";

/// Where the active endpoint came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointSource {
    Environment,
    ConfigFile,
    Default,
}

impl EndpointSource {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Environment => "environment",
            Self::ConfigFile => "config file",
            Self::Default => "built-in default",
        }
    }
}

/// Spreadsheet web app URL that feedback is posted to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: String,
    source: EndpointSource,
}

impl Endpoint {
    pub fn new(url: impl Into<String>, source: EndpointSource) -> Self {
        Self {
            url: url.into().trim().to_string(),
            source,
        }
    }

    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_ENDPOINT, EndpointSource::Default)
    }

    /// Resolve the endpoint: environment first, then config file, then the placeholder
    pub fn resolve(env_value: Option<String>, config: &TuiConfig) -> Self {
        if let Some(url) = env_value.filter(|v| !v.trim().is_empty()) {
            return Self::new(url, EndpointSource::Environment);
        }
        if let Some(url) = config
            .endpoint_url
            .as_ref()
            .filter(|v| !v.trim().is_empty())
        {
            return Self::new(url.clone(), EndpointSource::ConfigFile);
        }
        Self::placeholder()
    }

    /// Resolve using the process environment
    pub fn from_env(config: &TuiConfig) -> Self {
        Self::resolve(std::env::var(ENDPOINT_ENV_VAR).ok(), config)
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn source(&self) -> EndpointSource {
        self.source
    }

    /// False while the URL is blank or still carries the placeholder token
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.url.contains(PLACEHOLDER_TOKEN)
    }
}

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Apps Script web app URL
    pub endpoint_url: Option<String>,
}

impl TuiConfig {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "labirintar", "nps-feedback")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file, defaulting when it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: TuiConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file, creating its directory
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("nps-feedback-test-{}-{name}", std::process::id()))
            .join("config.json")
    }

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert!(config.endpoint_url.is_none());
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: TuiConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.endpoint_url.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"endpoint_url": "https://example.com/exec", "unknown_field": 1}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed.endpoint_url.as_deref(),
            Some("https://example.com/exec")
        );
    }

    #[test]
    fn test_save_and_load_file() {
        let path = temp_config_path("roundtrip");
        let config = TuiConfig {
            endpoint_url: Some("https://script.google.com/macros/s/abc/exec".to_string()),
        };
        config.save_to(&path).unwrap();
        let loaded = TuiConfig::load_from(&path).unwrap();
        assert_eq!(loaded.endpoint_url, config.endpoint_url);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let path = temp_config_path("missing");
        let loaded = TuiConfig::load_from(&path).unwrap();
        assert!(loaded.endpoint_url.is_none());
    }

    #[test]
    fn test_load_invalid_json_fails() {
        let path = temp_config_path("invalid");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();
        assert!(TuiConfig::load_from(&path).is_err());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_placeholder_is_not_configured() {
        assert!(!Endpoint::placeholder().is_configured());
        assert!(!Endpoint::new("   ", EndpointSource::ConfigFile).is_configured());
        assert!(Endpoint::new("https://script.google.com/macros/s/abc/exec", EndpointSource::ConfigFile)
            .is_configured());
    }

    #[test]
    fn test_environment_wins_over_file() {
        let config = TuiConfig {
            endpoint_url: Some("https://file.example/exec".to_string()),
        };
        let endpoint = Endpoint::resolve(Some("https://env.example/exec".to_string()), &config);
        assert_eq!(endpoint.as_str(), "https://env.example/exec");
        assert_eq!(endpoint.source(), EndpointSource::Environment);
    }

    #[test]
    fn test_blank_environment_falls_back_to_file() {
        let config = TuiConfig {
            endpoint_url: Some("https://file.example/exec".to_string()),
        };
        let endpoint = Endpoint::resolve(Some("  ".to_string()), &config);
        assert_eq!(endpoint.as_str(), "https://file.example/exec");
        assert_eq!(endpoint.source(), EndpointSource::ConfigFile);
    }

    #[test]
    fn test_nothing_configured_uses_placeholder() {
        let endpoint = Endpoint::resolve(None, &TuiConfig::default());
        assert_eq!(endpoint.as_str(), PLACEHOLDER_ENDPOINT);
        assert_eq!(endpoint.source(), EndpointSource::Default);
    }

    #[test]
    fn test_config_path_returns_option() {
        // Just test that the function doesn't panic
        let _path = TuiConfig::config_path();
    }
}
