use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::constants::{DEFAULT_PROVIDER, DEFAULT_TIMEOUT_SECONDS, KBGA_BASE_URL};
use crate::error::{ProviderError, Result};
use crate::types::RegisterKind;

pub const BASE_URL_ENV: &str = "AUTHORITY_BASE_URL";
pub const TIMEOUT_ENV: &str = "AUTHORITY_TIMEOUT_SECS";

/// Per-provider-instance configuration, fixed at construction
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegistryConfig {
    pub register: RegisterKind,
    /// Replaces the default API segment for `register`
    #[serde(default, rename = "api")]
    pub api_override: Option<String>,
    /// Namespace prepended to normalized ids as `"{prefix}:{id}"`
    #[serde(default, rename = "prefix")]
    pub id_prefix: Option<String>,
}

impl RegistryConfig {
    pub fn new(register: RegisterKind) -> Self {
        Self {
            register,
            api_override: None,
            id_prefix: None,
        }
    }

    pub fn with_api_override(mut self, segment: impl Into<String>) -> Self {
        self.api_override = Some(segment.into());
        self
    }

    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = Some(prefix.into());
        self
    }

    pub fn prefixed_id(&self, id: &str) -> String {
        match &self.id_prefix {
            Some(prefix) => format!("{}:{}", prefix, id),
            None => id.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSettings {
    #[serde(default = "default_provider")]
    pub name: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            name: default_provider(),
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl ProviderSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

fn default_base_url() -> String {
    KBGA_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderSettings,
    pub registry: RegistryConfig,
}

impl Config {
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let config_path = config_path.as_ref();
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            ProviderError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        let mut config: Config = toml::from_str(&config_content)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Environment variables take precedence over the file
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            self.provider.base_url = base_url;
        }
        if let Ok(timeout) = std::env::var(TIMEOUT_ENV) {
            self.provider.timeout_seconds = timeout.trim().parse().map_err(|_| {
                ProviderError::Config(format!("{} must be a whole number of seconds", TIMEOUT_ENV))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_full_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[provider]
name = "kbga"
base_url = "http://localhost:9000"
timeout_seconds = 5

[registry]
register = "place"
prefix = "kbga"
api = "geo"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.provider.name, "kbga");
        assert_eq!(config.provider.timeout(), Duration::from_secs(5));
        assert_eq!(config.registry.register, RegisterKind::Place);
        assert_eq!(config.registry.id_prefix.as_deref(), Some("kbga"));
        assert_eq!(config.registry.api_override.as_deref(), Some("geo"));
    }

    #[test]
    fn test_provider_section_defaults() {
        let config: Config = toml::from_str("[registry]\nregister = \"person\"\n").unwrap();
        assert_eq!(config.provider.name, DEFAULT_PROVIDER);
        assert_eq!(config.provider.base_url, KBGA_BASE_URL);
        assert_eq!(config.registry.register, RegisterKind::Person);
        assert!(config.registry.id_prefix.is_none());
    }

    #[test]
    fn test_blank_register_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[registry]\nregister = \"\"").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ProviderError::Toml(_)));
        assert_eq!(err.kind(), crate::error::ErrorKind::Config);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = Config::load("/nonexistent/authority.toml").unwrap_err();
        assert!(matches!(err, ProviderError::Config(_)));
    }

    #[test]
    fn test_prefixed_id() {
        let config = RegistryConfig::new(RegisterKind::Person).with_id_prefix("p");
        assert_eq!(config.prefixed_id("12345"), "p:12345");
        assert_eq!(RegistryConfig::new(RegisterKind::Person).prefixed_id("12345"), "12345");
    }
}
