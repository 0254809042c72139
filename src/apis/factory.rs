use crate::apis::base::Registry;
use crate::apis::kbga::KbgaRegistry;
use crate::app::ports::HttpClientPort;
use crate::config::{Config, ProviderSettings, RegistryConfig};
use crate::constants::*;
use crate::error::{ProviderError, Result};
use crate::infra::ReqwestHttp;

/// Build a registry for `provider` over the given transport.
/// Returns `None` for unknown provider names.
pub fn create_registry(
    provider: &ProviderSettings,
    config: RegistryConfig,
    http: Box<dyn HttpClientPort>,
) -> Option<Box<dyn Registry>> {
    match provider.name.to_lowercase().as_str() {
        KBGA_PROVIDER => Some(Box::new(
            KbgaRegistry::new(config, http).with_base_url(provider.base_url.clone()),
        )),
        _ => None,
    }
}

/// Build the configured registry over the reqwest transport
pub fn registry_from_config(config: &Config) -> Result<Box<dyn Registry>> {
    let http = Box::new(ReqwestHttp::new(config.provider.timeout()));
    create_registry(&config.provider, config.registry.clone(), http).ok_or_else(|| {
        ProviderError::Config(format!(
            "Unknown provider '{}'. Available: {}",
            config.provider.name,
            get_supported_providers().join(", ")
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RegisterKind;

    fn config_for(provider: &str) -> Config {
        Config {
            provider: ProviderSettings {
                name: provider.to_string(),
                ..ProviderSettings::default()
            },
            registry: RegistryConfig::new(RegisterKind::Place),
        }
    }

    #[test]
    fn test_known_provider_is_created() {
        let registry = registry_from_config(&config_for("KBGA")).unwrap();
        assert_eq!(registry.provider_name(), KBGA_DISPLAY_NAME);
        assert_eq!(registry.api_segment(), "places");
        assert_eq!(registry.label_field(), "placeName_full");
    }

    #[test]
    fn test_unknown_provider_is_config_error() {
        let err = registry_from_config(&config_for("gnd")).err().unwrap();
        assert!(matches!(err, ProviderError::Config(_)));
        assert!(err.to_string().contains("kbga"));
    }
}
