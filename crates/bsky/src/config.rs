//! Service configuration
//!
//! Resolves which XRPC service to query, in order of priority:
//! 1. `SKYTHREAD_SERVICE` environment variable
//! 2. JSON file (~/.config/skythread/service.json)
//! 3. The public Bluesky AppView

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::api::BskyClient;

/// Service config filename in the skythread config directory
const SERVICE_FILE: &str = "service.json";

/// Environment variable naming the service base URL
pub const SERVICE_ENV: &str = "SKYTHREAD_SERVICE";

/// Which service to send queries to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub service: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service: BskyClient::DEFAULT_SERVICE.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Load the service using the following priority:
    /// 1. `SKYTHREAD_SERVICE` environment variable
    /// 2. JSON file (~/.config/skythread/service.json)
    /// 3. Default public AppView
    pub fn load() -> Result<Self> {
        if let Some(config) = Self::from_env() {
            return config;
        }

        if config::config_exists(SERVICE_FILE) {
            let config: Self = config::load_json(SERVICE_FILE)?;
            return config.validated();
        }

        Ok(Self::default())
    }

    /// A validated config for an explicit service URL
    pub fn new(service: impl Into<String>) -> Result<Self> {
        Self {
            service: service.into(),
        }
        .validated()
    }

    /// Read the service from the environment, ignoring empty values
    pub fn from_env() -> Option<Result<Self>> {
        Self::from_env_value(std::env::var(SERVICE_ENV).ok())
    }

    fn from_env_value(value: Option<String>) -> Option<Result<Self>> {
        value
            .filter(|s| !s.trim().is_empty())
            .map(|service| Self::new(service).with_context(|| format!("Invalid {SERVICE_ENV}")))
    }

    /// Load the service from a specific JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let config: Self = config::load_json_file(path)?;
        config.validated()
    }

    /// Persist this service as the default
    pub fn save(&self) -> Result<PathBuf> {
        let config = self.clone().validated()?;
        config::save_json(SERVICE_FILE, &config)
    }

    /// Get the default service file path (~/.config/skythread/service.json)
    pub fn default_config_path() -> Option<PathBuf> {
        config::config_path(SERVICE_FILE)
    }

    fn validated(self) -> Result<Self> {
        let parsed = url::Url::parse(&self.service)
            .with_context(|| format!("Invalid service URL: {}", self.service))?;
        anyhow::ensure!(
            matches!(parsed.scheme(), "http" | "https"),
            "Service URL must use http or https: {}",
            self.service
        );
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_public_appview() {
        assert_eq!(
            ServiceConfig::default().service,
            "https://public.api.bsky.app"
        );
    }

    #[test]
    fn test_new_validates_service() {
        assert!(ServiceConfig::new("https://api.example.com").is_ok());
        assert!(ServiceConfig::new("nonsense").is_err());
        assert!(ServiceConfig::new("ftp://api.example.com").is_err());
    }

    #[test]
    fn test_env_value_is_validated() {
        let config = ServiceConfig::from_env_value(Some("http://localhost:2584".to_string()))
            .unwrap()
            .unwrap();
        assert_eq!(config.service, "http://localhost:2584");

        let err = ServiceConfig::from_env_value(Some("nonsense".to_string()))
            .unwrap()
            .unwrap_err();
        assert!(format!("{err:#}").contains(SERVICE_ENV));
        assert!(format!("{err:#}").contains("nonsense"));
    }

    #[test]
    fn test_empty_env_value_is_ignored() {
        assert!(ServiceConfig::from_env_value(None).is_none());
        assert!(ServiceConfig::from_env_value(Some("  ".to_string())).is_none());
    }

    #[test]
    fn test_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(SERVICE_FILE);
        std::fs::write(&path, r#"{ "service": "https://api.example.com" }"#).unwrap();

        let config = ServiceConfig::from_file(&path).unwrap();
        assert_eq!(config.service, "https://api.example.com");
    }

    #[test]
    fn test_from_file_rejects_non_http() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(SERVICE_FILE);
        std::fs::write(&path, r#"{ "service": "ftp://api.example.com" }"#).unwrap();
        assert!(ServiceConfig::from_file(&path).is_err());

        std::fs::write(&path, r#"{ "service": "not a url" }"#).unwrap();
        assert!(ServiceConfig::from_file(&path).is_err());
    }
}
