use crate::utils::error::{AuditError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Environment variable that overrides the config file's API key.
pub const API_KEY_ENV: &str = "NEXTDNS_API_KEY";

/// The JSON config file: an optional API key plus a map of human-readable
/// profile names to the hexadecimal profile IDs the API wants.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub profiles: BTreeMap<String, String>,
}

impl FileConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| AuditError::ConfigError {
            message: format!("Could not read config file {}: {}", path.display(), e),
        })?;
        let config = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// The environment variable wins over the config file.
    pub fn resolve_api_key(&self) -> Result<String> {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                return Ok(key);
            }
        }
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .map(str::to_string)
            .ok_or(AuditError::MissingApiKeyError { env_var: API_KEY_ENV })
    }

    pub fn profile_id(&self, name: &str) -> Result<&str> {
        self.profiles
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| AuditError::UnknownProfileError {
                name: name.to_string(),
                known: if self.profiles.is_empty() {
                    "none configured".to_string()
                } else {
                    self.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
                },
            })
    }
}
