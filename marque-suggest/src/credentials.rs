use std::time::Duration;

use marque_import::ProviderError;
use marque_lib::Settings;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const ENV_API_KEY: &str = "MARQUE_API_KEY";
const ENV_MODEL: &str = "MARQUE_MODEL";
const ENV_ENDPOINT: &str = "MARQUE_ENDPOINT";

/// Connection settings for the content-generation API.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: String,
    pub timeout: Duration,
}

/// Where a config field's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the settings file.
    ConfigFile,
    /// Hard-coded default value.
    Default,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// Provenance of each config field.
#[derive(Debug)]
pub struct ConfigSources {
    pub endpoint: ConfigSource,
    pub model: ConfigSource,
    pub api_key: ConfigSource,
}

impl ProviderConfig {
    /// Resolve the provider config.
    ///
    /// Priority: env vars > settings file > defaults. The API key has no
    /// default and is required.
    pub fn load(settings: &Settings) -> Result<Self, ProviderError> {
        Self::resolve(settings, |name| std::env::var(name).ok())
    }

    fn resolve(
        settings: &Settings,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ProviderError> {
        let provider = &settings.provider;

        let api_key = env(ENV_API_KEY)
            .or_else(|| provider.api_key.clone())
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                ProviderError::config(format!(
                    "Missing API key. Set {ENV_API_KEY} or add provider.api_key to the settings file"
                ))
            })?;

        let model = env(ENV_MODEL)
            .or_else(|| provider.model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let endpoint = env(ENV_ENDPOINT)
            .or_else(|| provider.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let timeout = provider
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model,
            api_key,
            timeout,
        })
    }
}

/// Determine where each config field is coming from.
pub fn config_sources(settings: &Settings) -> ConfigSources {
    sources_with(settings, |name| std::env::var(name).is_ok())
}

fn sources_with(settings: &Settings, env_set: impl Fn(&str) -> bool) -> ConfigSources {
    let provider = &settings.provider;
    let pick = |var: &'static str, in_file: bool, default: ConfigSource| {
        if env_set(var) {
            ConfigSource::EnvVar(var)
        } else if in_file {
            ConfigSource::ConfigFile
        } else {
            default
        }
    };

    ConfigSources {
        endpoint: pick(ENV_ENDPOINT, provider.endpoint.is_some(), ConfigSource::Default),
        model: pick(ENV_MODEL, provider.model.is_some(), ConfigSource::Default),
        api_key: pick(ENV_API_KEY, provider.api_key.is_some(), ConfigSource::Missing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn missing_api_key_is_config_error() {
        let err = ProviderConfig::resolve(&Settings::default(), no_env).unwrap_err();
        assert!(matches!(err, ProviderError::Config(_)));
    }

    #[test]
    fn defaults_fill_in_model_and_endpoint() {
        let mut settings = Settings::default();
        settings.provider.api_key = Some("file-key".into());
        let config = ProviderConfig::resolve(&settings, no_env).unwrap();
        assert_eq!(config.api_key, "file-key");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn env_overrides_file() {
        let mut settings = Settings::default();
        settings.provider.api_key = Some("file-key".into());
        settings.provider.model = Some("file-model".into());
        settings.provider.endpoint = Some("http://localhost:8080/".into());
        settings.provider.timeout_secs = Some(5);

        let env = |name: &str| match name {
            ENV_API_KEY => Some("env-key".to_string()),
            _ => None,
        };
        let config = ProviderConfig::resolve(&settings, env).unwrap();
        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.model, "file-model");
        assert_eq!(config.endpoint, "http://localhost:8080");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let mut settings = Settings::default();
        settings.provider.api_key = Some("   ".into());
        assert!(ProviderConfig::resolve(&settings, no_env).is_err());
    }

    #[test]
    fn sources_report_origin() {
        let mut settings = Settings::default();
        settings.provider.model = Some("m".into());
        let sources = sources_with(&settings, |name| name == ENV_ENDPOINT);
        assert_eq!(sources.endpoint, ConfigSource::EnvVar(ENV_ENDPOINT));
        assert_eq!(sources.model, ConfigSource::ConfigFile);
        assert_eq!(sources.api_key, ConfigSource::Missing);
        assert_eq!(sources.endpoint.to_string(), "env $MARQUE_ENDPOINT");
    }
}
