use crate::error::{ClinicError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const API_URL_ENV: &str = "CLINICDESK_API_URL";

/// Configuration for clinicdesk, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClinicConfig {
    /// Base URL of the clinic backend (e.g. "http://localhost:8080")
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClinicConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: ClinicConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    /// Apply `CLINICDESK_API_URL` if it is set.
    pub fn with_env_overrides(mut self) -> Self {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => {
                self.api_url = url.trim().trim_end_matches('/').to_string();
            }
            _ => {}
        }
        self
    }

    /// Set the api url (drops trailing slashes)
    pub fn set_api_url(&mut self, url: &str) -> Result<()> {
        let url = url.trim().trim_end_matches('/');
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ClinicError::Url(url.to_string()));
        }
        self.api_url = url.to_string();
        Ok(())
    }

    /// Whole seconds, at least 1; a zero timeout fails every request.
    pub fn set_timeout_secs(&mut self, value: &str) -> Result<()> {
        let secs: u64 = value
            .trim()
            .parse()
            .map_err(|_| ClinicError::Api(format!("Invalid timeout: {}", value)))?;
        if secs == 0 {
            return Err(ClinicError::Api("Timeout must be at least 1 second".into()));
        }
        self.timeout_secs = secs;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClinicConfig::default();
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_set_api_url_trims_slash() {
        let mut config = ClinicConfig::default();
        config.set_api_url("https://clinic.example.org/api/").unwrap();
        assert_eq!(config.api_url, "https://clinic.example.org/api");
    }

    #[test]
    fn test_set_api_url_rejects_scheme_less() {
        let mut config = ClinicConfig::default();
        assert!(config.set_api_url("clinic.example.org").is_err());
        assert_eq!(config.api_url, "http://localhost:8080");
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = ClinicConfig::load(temp_dir.path().join("missing")).unwrap();
        assert_eq!(config, ClinicConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();

        let mut config = ClinicConfig::default();
        config.set_api_url("http://10.0.0.5:9000").unwrap();
        config.set_timeout_secs("3").unwrap();
        config.save(temp_dir.path()).unwrap();

        let loaded = ClinicConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded.api_url, "http://10.0.0.5:9000");
        assert_eq!(loaded.timeout_secs, 3);
    }

    #[test]
    fn test_timeout_must_be_positive() {
        let mut config = ClinicConfig::default();
        assert!(config.set_timeout_secs("0").is_err());
        assert!(config.set_timeout_secs("-2").is_err());
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        config.set_timeout_secs(" 1 ").unwrap();
        assert_eq!(config.timeout_secs, 1);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let parsed: ClinicConfig = serde_json::from_str(r#"{"timeout_secs": 2}"#).unwrap();
        assert_eq!(parsed.api_url, DEFAULT_API_URL);
        assert_eq!(parsed.timeout_secs, 2);
    }
}
